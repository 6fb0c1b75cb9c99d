use crate::config::TranslatorConfig;
use crate::error::ImportError;
use crate::model::Recipe;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(rename = "responseData")]
    response_data: Option<TranslationData>,
    #[serde(rename = "responseStatus")]
    response_status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TranslationData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Translates recipes into the target language one field at a time.
///
/// Every field is best-effort: a failed call keeps the original text for
/// that field, so the result may be partially translated.
pub struct Translator {
    client: Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
    markers: Vec<char>,
    delay: Duration,
}

impl Translator {
    /// `timeout` bounds each translation request; a request that runs out
    /// of time leaves its field untranslated.
    pub fn new(
        endpoint: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        markers: &str,
        delay: Duration,
        timeout: Duration,
    ) -> Result<Self, ImportError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            markers: markers.chars().flat_map(char::to_lowercase).collect(),
            delay,
        })
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, ImportError> {
        Self::new(
            config.endpoint.clone(),
            config.source_lang.clone(),
            config.target_lang.clone(),
            &config.markers,
            Duration::from_millis(config.delay_ms),
            config.timeout(),
        )
    }

    /// Set the pause inserted between successive field translations
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// True when any target-language marker appears in the recipe text.
    pub fn is_target_language(&self, recipe: &Recipe) -> bool {
        std::iter::once(&recipe.name)
            .chain(&recipe.ingredients)
            .chain(&recipe.instructions)
            .flat_map(|text| text.chars())
            .flat_map(char::to_lowercase)
            .any(|c| self.markers.contains(&c))
    }

    /// Return the recipe in the target language. Never fails.
    pub async fn normalize_language(&self, recipe: Recipe) -> Recipe {
        if self.is_target_language(&recipe) {
            debug!("Recipe already in '{}', skipping translation", self.target_lang);
            return recipe;
        }

        info!(
            "Translating recipe from '{}' to '{}'",
            self.source_lang, self.target_lang
        );

        let Recipe {
            name,
            prep_time,
            ingredients,
            instructions,
            servings,
            description,
            cuisine,
            category,
        } = recipe;

        let mut fields = Vec::with_capacity(1 + ingredients.len() + instructions.len());
        fields.push(name);
        fields.extend(ingredients.iter().cloned());
        fields.extend(instructions.iter().cloned());

        let mut translated = Vec::with_capacity(fields.len());
        for (index, field) in fields.into_iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            translated.push(self.translate_or_keep(field).await);
        }

        let mut translated = translated.into_iter();
        let name = translated.next().unwrap_or_default();
        let ingredients: Vec<String> = translated.by_ref().take(ingredients.len()).collect();
        let instructions: Vec<String> = translated.collect();

        Recipe {
            name,
            prep_time,
            ingredients,
            instructions,
            servings,
            description,
            cuisine,
            category,
        }
    }

    async fn translate_or_keep(&self, text: String) -> String {
        if text.trim().is_empty() {
            return text;
        }

        match self.translate_text(&text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Keeping original text for one field: {}", e);
                text
            }
        }
    }

    /// Translate a single piece of text through the endpoint.
    pub async fn translate_text(&self, text: &str) -> Result<String, ImportError> {
        let langpair = format!("{}|{}", self.source_lang, self.target_lang);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| ImportError::TranslationError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::TranslationError(format!(
                "endpoint responded with status {status}"
            )));
        }

        let body: TranslationResponse = response
            .json()
            .await
            .map_err(|e| ImportError::TranslationError(e.to_string()))?;

        // MyMemory reports quota and query errors with HTTP 200 and a
        // non-200 responseStatus
        if let Some(code) = body.response_status.as_ref().and_then(status_code) {
            if code != 200 {
                return Err(ImportError::TranslationError(format!(
                    "endpoint reported status {code}"
                )));
            }
        }

        body.response_data
            .and_then(|data| data.translated_text)
            .map(|translated| translated.trim().to_string())
            .filter(|translated| !translated.is_empty())
            .ok_or_else(|| ImportError::TranslationError("no translated text".to_string()))
    }
}

/// `responseStatus` arrives as a number or a numeric string.
fn status_code(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
