use crate::config::AiConfig;
use crate::error::ImportError;
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider};
use log::info;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the configured provider, or `None` when no credential is set.
    ///
    /// A missing credential is not an error: it simply leaves the
    /// AI-assisted extractor unreachable.
    pub fn from_config(config: &AiConfig) -> Result<Option<Box<dyn LlmProvider>>, ImportError> {
        let Some(api_key) = config.resolved_api_key() else {
            info!("No API key configured for '{}', AI extraction disabled", config.provider);
            return Ok(None);
        };

        Self::create(&config.provider, config, api_key).map(Some)
    }

    /// Create a provider instance by name
    pub fn create(
        provider_name: &str,
        config: &AiConfig,
        api_key: String,
    ) -> Result<Box<dyn LlmProvider>, ImportError> {
        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config, api_key)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, api_key)?)),
            _ => Err(ImportError::BuilderError(format!(
                "Unknown provider: {provider_name}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(provider: &str) -> AiConfig {
        AiConfig {
            provider: provider.to_string(),
            api_key: Some("test-key".to_string()),
            ..AiConfig::default()
        }
    }

    #[test]
    fn test_create_openai_provider() {
        let provider = ProviderFactory::from_config(&config_with_key("openai"))
            .unwrap()
            .unwrap();
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_create_anthropic_provider() {
        let provider = ProviderFactory::from_config(&config_with_key("anthropic"))
            .unwrap()
            .unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }

    #[test]
    fn test_create_unknown_provider() {
        let result = ProviderFactory::from_config(&config_with_key("unknown"));
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Unknown provider"));
        }
    }

    #[test]
    fn test_no_key_means_no_provider() {
        // "custom" has no environment fallback, so only the explicit key counts
        let config = AiConfig {
            provider: "custom".to_string(),
            api_key: None,
            ..AiConfig::default()
        };
        assert!(ProviderFactory::from_config(&config).unwrap().is_none());
    }
}
