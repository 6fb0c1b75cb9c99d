mod proxy;

pub use proxy::ProxyFetcher;

/// Page markup as returned by a proxy, tied to the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPageContent {
    url: String,
    content: String,
}

impl RawPageContent {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
