pub mod builder;
pub mod config;
pub mod duration;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod translator;

pub use builder::RecipePipelineBuilder;
pub use config::AppConfig;
pub use duration::normalize_duration;
pub use error::ImportError;
pub use model::Recipe;
pub use pipelines::{ExtractionState, RecipePipeline};
pub use translator::Translator;

/// Extract a recipe from `url` using configuration from `recipe-import.toml`
/// and `RECIPE_IMPORT__*` environment variables.
///
/// The AI-assisted stage runs only when a completion API key is configured.
///
/// # Errors
/// `ImportError::FetchError` when no proxy could retrieve the page and
/// `ImportError::NoRecipeFound` when the page held nothing usable.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_import::ImportError> {
/// let recipe = recipe_import::extract_recipe("https://example.com/tomato-soup").await?;
/// println!("{}", recipe);
/// # Ok(())
/// # }
/// ```
pub async fn extract_recipe(url: &str) -> Result<Recipe, ImportError> {
    let config = AppConfig::load()?;
    RecipePipeline::from_config(&config)?.extract(url).await
}
