use thiserror::Error;

/// Errors that can occur while extracting a recipe from a page
#[derive(Error, Debug)]
pub enum ImportError {
    /// No proxy endpoint returned page content
    #[error("Could not reach the page: {0}")]
    FetchError(String),

    /// The AI-assisted extractor could not produce a recipe
    #[error("AI extraction failed: {0}")]
    AiExtractionError(String),

    /// Failed to decode a JSON document
    #[error("Failed to decode JSON: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// A single field could not be translated
    #[error("Translation failed: {0}")]
    TranslationError(String),

    /// An extractor stage found nothing it could parse
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// Every extraction stage ran and none produced a usable recipe
    #[error("Page reached but no recipe data found on this page")]
    NoRecipeFound,

    /// The input is not an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Low-level HTTP failure
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ImportError {
    /// True when the page itself could not be retrieved, as opposed to a
    /// page that was reached but held no recipe.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ImportError::FetchError(_))
    }
}
