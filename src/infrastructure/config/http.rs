//! HTTP client settings shared by the outbound adapters.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

/// Per-request limits for an outbound API.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl HttpConfig {
    /// Build a client enforcing these timeouts.
    pub fn build_client(&self) -> reqwest::Result<HttpClient> {
        HttpClient::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .user_agent(concat!("farewatch/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
