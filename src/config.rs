use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Top-level configuration for the extraction pipeline
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Completion service used by the AI-assisted extractor
    #[serde(default)]
    pub ai: AiConfig,
    /// Proxy endpoints and request settings for page retrieval
    #[serde(default)]
    pub fetcher: FetcherConfig,
    /// Translation into the canonical language
    #[serde(default)]
    pub translator: TranslatorConfig,
}

/// Configuration for the completion provider
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Provider name ("openai" or "anthropic")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Model identifier; each provider has its own default
    pub model: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the credential, falling back to the provider's conventional
    /// environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        let from_env = match self.provider.as_str() {
            "openai" => std::env::var("OPENAI_API_KEY").ok(),
            "anthropic" => std::env::var("ANTHROPIC_API_KEY").ok(),
            _ => None,
        };

        self.api_key
            .clone()
            .or(from_env)
            .filter(|key| !key.trim().is_empty())
    }
}

/// How a proxy wraps the page it fetched
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyFormat {
    /// JSON envelope carrying the markup under `contents`, `body` or `data`
    Json,
    /// The response body is the markup itself
    Raw,
}

/// One proxy endpoint
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// URL template containing `{url}` (percent-encoded) or `{raw_url}`
    pub template: String,
    #[serde(default = "default_proxy_format")]
    pub format: ProxyFormat,
}

impl ProxyConfig {
    pub fn new(template: impl Into<String>, format: ProxyFormat) -> Self {
        Self {
            template: template.into(),
            format,
        }
    }
}

/// Configuration for the content fetcher
#[derive(Debug, Deserialize, Clone)]
pub struct FetcherConfig {
    /// Proxies tried in order
    #[serde(default = "default_proxies")]
    pub proxies: Vec<ProxyConfig>,
    /// Per-proxy request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            proxies: default_proxies(),
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for the translator
#[derive(Debug, Deserialize, Clone)]
pub struct TranslatorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// MyMemory-compatible `get` endpoint
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Characters whose presence marks text as already in the target language
    #[serde(default = "default_language_markers")]
    pub markers: String,
    /// Pause between successive field translations in milliseconds
    #[serde(default = "default_translation_delay_ms")]
    pub delay_ms: u64,
    /// Per-field request timeout in seconds
    #[serde(default = "default_translation_timeout")]
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_translation_endpoint(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            markers: default_language_markers(),
            delay_ms: default_translation_delay_ms(),
            timeout_secs: default_translation_timeout(),
        }
    }
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_ai_timeout() -> u64 {
    60
}

fn default_proxy_format() -> ProxyFormat {
    ProxyFormat::Raw
}

fn default_proxies() -> Vec<ProxyConfig> {
    vec![
        ProxyConfig::new("https://api.allorigins.win/get?url={url}", ProxyFormat::Json),
        ProxyConfig::new("https://corsproxy.io/?{url}", ProxyFormat::Raw),
        ProxyConfig::new("https://proxy.cors.sh/{raw_url}", ProxyFormat::Raw),
    ]
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_true() -> bool {
    true
}

fn default_translation_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "pl".to_string()
}

fn default_language_markers() -> String {
    "ąćęłńóśźż".to_string()
}

fn default_translation_delay_ms() -> u64 {
    200
}

fn default_translation_timeout() -> u64 {
    10
}

impl AppConfig {
    /// Load configuration from `recipe-import.toml` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_IMPORT__ prefix
/// 2. The given file, or recipe-import.toml in the current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_IMPORT__AI__API_KEY
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::with_name(path).required(true),
        None => File::with_name("recipe-import").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
