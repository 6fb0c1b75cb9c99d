use super::{Extractor, ParsingContext};
use crate::duration::normalize_duration;
use crate::error::ImportError;
use crate::model::{clean_entries, Recipe};
use crate::providers::{build_extraction_prompt, LlmProvider};
use async_trait::async_trait;
use log::debug;
use scraper::{ElementRef, Html, Node};
use serde::Deserialize;

/// Excerpts are truncated, not summarized
const MAX_EXCERPT_CHARS: usize = 3000;

/// Subtrees that never hold recipe content
const SKIPPED_TAGS: [&str; 6] = ["script", "style", "noscript", "nav", "footer", "header"];

#[derive(Debug, Deserialize)]
struct LlmRecipe {
    name: String,
    #[serde(rename = "prepTime", default)]
    prep_time: Option<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
}

/// Asks a completion service to pull the recipe out of the page's visible
/// text.
pub struct PlainTextLlmExtractor {
    provider: Box<dyn LlmProvider>,
}

impl PlainTextLlmExtractor {
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub async fn extract(&self, html: &str) -> Result<Recipe, ImportError> {
        let excerpt = clean_page_text(html);
        if excerpt.is_empty() {
            return Err(ImportError::AiExtractionError(
                "page has no text content".to_string(),
            ));
        }
        debug!(
            "Sending {} characters of page text to {}",
            excerpt.chars().count(),
            self.provider.provider_name()
        );

        let reply = self
            .provider
            .complete(&build_extraction_prompt(&excerpt))
            .await
            .map_err(|e| match e {
                ImportError::AiExtractionError(_) => e,
                other => ImportError::AiExtractionError(other.to_string()),
            })?;

        parse_reply(&reply)
    }
}

#[async_trait]
impl Extractor for PlainTextLlmExtractor {
    fn name(&self) -> &str {
        "plain_text_llm"
    }

    async fn parse(&self, context: &ParsingContext) -> Result<Recipe, ImportError> {
        self.extract(&context.content).await
    }
}

/// Visible page text with non-content blocks removed, whitespace collapsed,
/// and cut to the first 3000 characters.
pub fn clean_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    collect_text(document.root_element(), &mut text);

    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_EXCERPT_CHARS)
        .collect()
}

fn collect_text(element: ElementRef, out: &mut String) {
    if SKIPPED_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Decode the model reply. Markdown fences and chatter around the object are
/// tolerated; anything else that fails to decode is an error.
fn parse_reply(reply: &str) -> Result<Recipe, ImportError> {
    let json = json_object_span(reply).ok_or_else(|| {
        ImportError::AiExtractionError("reply does not contain a JSON object".to_string())
    })?;

    let parsed: LlmRecipe = serde_json::from_str(json).map_err(|e| {
        ImportError::AiExtractionError(format!("reply is not a valid recipe: {e}"))
    })?;

    Ok(Recipe::new(
        parsed.name.trim(),
        normalize_duration(parsed.prep_time.as_deref().unwrap_or_default()),
        clean_entries(parsed.ingredients),
        clean_entries(parsed.instructions),
    ))
}

fn json_object_span(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}
