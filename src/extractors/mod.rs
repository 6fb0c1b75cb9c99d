use crate::error::ImportError;
use crate::fetchers::RawPageContent;
use crate::model::Recipe;
use async_trait::async_trait;

mod html_lists;
mod json_ld;
mod plain_text_llm;

pub use html_lists::HtmlListExtractor;
pub use json_ld::JsonLdExtractor;
pub use plain_text_llm::{clean_page_text, PlainTextLlmExtractor};

/// Page markup handed to each extractor stage.
pub struct ParsingContext {
    pub url: String,
    pub content: String,
}

impl From<RawPageContent> for ParsingContext {
    fn from(page: RawPageContent) -> Self {
        ParsingContext {
            url: page.url().to_string(),
            content: page.content().to_string(),
        }
    }
}

/// One stage of the extraction fallback chain.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short stage name used in logs
    fn name(&self) -> &str;

    async fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError>;
}
