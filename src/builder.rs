use std::time::Duration;

use crate::config::{FetcherConfig, ProxyConfig, TranslatorConfig};
use crate::extractors::{Extractor, JsonLdExtractor, PlainTextLlmExtractor};
use crate::fetchers::ProxyFetcher;
use crate::pipelines::{ExtractionState, RecipePipeline};
use crate::providers::LlmProvider;
use crate::translator::Translator;
use crate::ImportError;

/// How the finished recipe is translated
#[derive(Default)]
enum Translation {
    /// Use the default MyMemory endpoint, English to Polish
    #[default]
    Default,
    Custom(Translator),
    Disabled,
}

/// Builder for configuring a recipe extraction pipeline
#[derive(Default)]
pub struct RecipePipelineBuilder {
    proxies: Option<Vec<ProxyConfig>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    provider: Option<Box<dyn LlmProvider>>,
    translation: Translation,
}

impl RecipePipelineBuilder {
    /// Replace the list of CORS proxies, tried in the given order
    ///
    /// # Example
    /// ```
    /// use recipe_import::config::{ProxyConfig, ProxyFormat};
    /// use recipe_import::RecipePipeline;
    ///
    /// let builder = RecipePipeline::builder()
    ///     .proxies(vec![ProxyConfig::new("https://corsproxy.io/?{url}", ProxyFormat::Raw)]);
    /// ```
    pub fn proxies(mut self, proxies: Vec<ProxyConfig>) -> Self {
        self.proxies = Some(proxies);
        self
    }

    /// Set the timeout for each proxy request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable AI-assisted extraction through the given completion service.
    ///
    /// Without a provider the pipeline goes straight from structured data
    /// to list scanning.
    pub fn provider(mut self, provider: Box<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Translate results with a custom translator
    pub fn translator(mut self, translator: Translator) -> Self {
        self.translation = Translation::Custom(translator);
        self
    }

    /// Return recipes in whatever language the page used
    pub fn without_translation(mut self) -> Self {
        self.translation = Translation::Disabled;
        self
    }

    /// Build the pipeline
    ///
    /// # Errors
    /// Returns `ImportError::BuilderError` if the proxy list is empty, or
    /// `ImportError::HttpError` if the HTTP client cannot be created.
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipePipeline;
    ///
    /// let pipeline = RecipePipeline::builder()
    ///     .without_translation()
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(pipeline.stage_names(), vec!["json_ld", "html_lists"]);
    /// ```
    pub fn build(self) -> Result<RecipePipeline, ImportError> {
        let defaults = FetcherConfig::default();
        let timeout = self.timeout.unwrap_or_else(|| defaults.timeout());
        let user_agent = self.user_agent.unwrap_or(defaults.user_agent);
        let proxies = self.proxies.unwrap_or(defaults.proxies);
        if proxies.is_empty() {
            return Err(ImportError::BuilderError(
                "At least one proxy is required".to_string(),
            ));
        }

        let fetcher = ProxyFetcher::new(proxies, timeout, &user_agent)?;

        let mut stages: Vec<(ExtractionState, Box<dyn Extractor>)> = vec![(
            ExtractionState::StructuredAttempt,
            Box::new(JsonLdExtractor) as Box<dyn Extractor>,
        )];
        if let Some(provider) = self.provider {
            stages.push((
                ExtractionState::HeuristicOrAiAttempt,
                Box::new(PlainTextLlmExtractor::new(provider)) as Box<dyn Extractor>,
            ));
        }

        let translator = match self.translation {
            Translation::Default => Some(Translator::from_config(&TranslatorConfig::default())?),
            Translation::Custom(translator) => Some(translator),
            Translation::Disabled => None,
        };

        Ok(RecipePipeline::new(fetcher, stages, translator))
    }
}
