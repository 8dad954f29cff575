//! SerpAPI fare search configuration.

use serde::Deserialize;

use crate::infrastructure::config::http::HttpConfig;

/// `[fares]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SerpApiConfig {
    /// API root; `/search` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// ISO 4217 currency for returned prices.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Result language.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://serpapi.com".into()
}

fn default_currency() -> String {
    "USD".into()
}

fn default_language() -> String {
    "en".into()
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            currency: default_currency(),
            language: default_language(),
            http: HttpConfig::default(),
        }
    }
}
