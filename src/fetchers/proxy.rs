use super::RawPageContent;
use crate::config::{ProxyConfig, ProxyFormat};
use crate::error::ImportError;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Envelope fields that may carry the page, in lookup order
const ENVELOPE_FIELDS: [&str; 3] = ["contents", "body", "data"];

/// Fetches pages through a list of proxies, moving on to the next one
/// whenever a proxy fails.
pub struct ProxyFetcher {
    client: Client,
    proxies: Vec<ProxyConfig>,
}

impl ProxyFetcher {
    pub fn new(
        proxies: Vec<ProxyConfig>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, proxies })
    }

    /// Fetch `url`, trying every proxy once in order.
    pub async fn fetch(&self, url: &str) -> Result<RawPageContent, ImportError> {
        for (index, proxy) in self.proxies.iter().enumerate() {
            let proxied = proxy_url(&proxy.template, url);
            debug!(
                "Trying proxy {}/{}: {}",
                index + 1,
                self.proxies.len(),
                proxied
            );

            match self.fetch_via(proxy.format, &proxied).await {
                Ok(content) => {
                    info!("Fetched {} bytes through proxy {}", content.len(), index + 1);
                    return Ok(RawPageContent::new(url, content));
                }
                Err(e) => {
                    warn!("Proxy {} failed, trying the next one: {}", index + 1, e);
                }
            }
        }

        Err(ImportError::FetchError("no proxy returned content".to_string()))
    }

    async fn fetch_via(&self, format: ProxyFormat, proxied: &str) -> Result<String, ImportError> {
        let response = self.client.get(proxied).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::FetchError(format!(
                "proxy responded with status {status}"
            )));
        }

        let body = response.text().await?;
        let content = match format {
            ProxyFormat::Json => unwrap_envelope(&body)?,
            ProxyFormat::Raw => body,
        };

        if content.trim().is_empty() {
            return Err(ImportError::FetchError(
                "proxy returned an empty body".to_string(),
            ));
        }

        Ok(content)
    }
}

/// Substitute the target URL into a proxy template.
fn proxy_url(template: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    template
        .replace("{raw_url}", target)
        .replace("{url}", &encoded)
}

fn unwrap_envelope(body: &str) -> Result<String, ImportError> {
    let envelope: Value = serde_json::from_str(body)?;

    ENVELOPE_FIELDS
        .iter()
        .find_map(|field| {
            envelope
                .get(field)
                .and_then(Value::as_str)
                .filter(|content| !content.trim().is_empty())
                .map(str::to_string)
        })
        .ok_or_else(|| {
            ImportError::FetchError("proxy response carried no page content".to_string())
        })
}
