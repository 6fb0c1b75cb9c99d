use super::ExtractionState;
use crate::builder::RecipePipelineBuilder;
use crate::config::AppConfig;
use crate::error::ImportError;
use crate::extractors::{Extractor, HtmlListExtractor, ParsingContext};
use crate::fetchers::{ProxyFetcher, RawPageContent};
use crate::model::Recipe;
use crate::providers::ProviderFactory;
use crate::translator::Translator;
use log::{debug, info, warn};
use url::Url;

/// The extraction pipeline: fetch, try each extractor stage in order, fall
/// back to list scanning, then translate.
///
/// Holds only immutable configuration, so one pipeline can serve concurrent
/// extraction calls.
pub struct RecipePipeline {
    fetcher: ProxyFetcher,
    stages: Vec<(ExtractionState, Box<dyn Extractor>)>,
    fallback: HtmlListExtractor,
    translator: Option<Translator>,
}

impl RecipePipeline {
    pub(crate) fn new(
        fetcher: ProxyFetcher,
        stages: Vec<(ExtractionState, Box<dyn Extractor>)>,
        translator: Option<Translator>,
    ) -> Self {
        Self {
            fetcher,
            stages,
            fallback: HtmlListExtractor,
            translator,
        }
    }

    /// Create a builder for a custom pipeline
    pub fn builder() -> RecipePipelineBuilder {
        RecipePipelineBuilder::default()
    }

    /// Build a pipeline from loaded configuration.
    ///
    /// The AI stage is only added when a completion API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, ImportError> {
        let mut builder = Self::builder()
            .proxies(config.fetcher.proxies.clone())
            .timeout(config.fetcher.timeout())
            .user_agent(config.fetcher.user_agent.clone());

        if let Some(provider) = ProviderFactory::from_config(&config.ai)? {
            builder = builder.provider(provider);
        }

        builder = if config.translator.enabled {
            builder.translator(Translator::from_config(&config.translator)?)
        } else {
            builder.without_translation()
        };

        builder.build()
    }

    /// Names of the extractor stages in the order they run, fallback last
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages
            .iter()
            .map(|(_, stage)| stage.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    /// Fetch `url` and extract a recipe from it.
    pub async fn extract(&self, url: &str) -> Result<Recipe, ImportError> {
        Url::parse(url)?;

        debug!("Extraction state: {}", ExtractionState::Fetching);
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                debug!("Extraction state: {}", ExtractionState::Failed);
                return Err(e);
            }
        };

        self.extract_from_page(page).await
    }

    /// Run the extractor stages and translation on already fetched content.
    pub async fn extract_from_page(&self, page: RawPageContent) -> Result<Recipe, ImportError> {
        let context = ParsingContext::from(page);
        let recipe = self.run_stages(&context).await;

        debug!("Extraction state: {}", ExtractionState::Normalizing);
        let recipe = match &self.translator {
            Some(translator) => translator.normalize_language(recipe).await,
            None => recipe,
        };

        if !recipe.is_usable() {
            debug!("Extraction state: {}", ExtractionState::Failed);
            return Err(ImportError::NoRecipeFound);
        }

        debug!("Extraction state: {}", ExtractionState::Done);
        Ok(recipe)
    }

    /// First usable result wins; each stage runs at most once.
    async fn run_stages(&self, context: &ParsingContext) -> Recipe {
        for (state, stage) in &self.stages {
            debug!("Extraction state: {} ({})", state, stage.name());

            match stage.parse(context).await {
                Ok(recipe) if recipe.is_usable() => {
                    info!("Extracted '{}' using {}", recipe.name, stage.name());
                    return recipe;
                }
                Ok(_) => warn!("{} returned a recipe without content", stage.name()),
                Err(e) => debug!("{} found nothing: {}", stage.name(), e),
            }
        }

        debug!(
            "Extraction state: {} ({})",
            ExtractionState::HeuristicOrAiAttempt,
            self.fallback.name()
        );
        self.fallback.extract(&context.content, &context.url)
    }
}
