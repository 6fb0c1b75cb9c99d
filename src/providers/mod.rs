mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_extraction_prompt, RECIPE_EXTRACTION_PROMPT};

use crate::error::ImportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Used when a provider is built without configuration
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Completion calls get a bounded wait so a stalled service cannot hang
/// the pipeline.
pub(crate) fn http_client(timeout: Duration) -> Result<Client, ImportError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Unified trait for completion services
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send a single prompt and return the model's text reply
    async fn complete(&self, prompt: &str) -> Result<String, ImportError>;
}
