//! Twilio REST response shapes.

use serde::Deserialize;

/// Successful `Messages.json` create.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    #[serde(default)]
    pub status: String,
}

/// Account fetch.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub status: String,
    #[serde(default)]
    pub friendly_name: String,
}

/// Error body returned with 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub code: Option<u32>,
    pub message: String,
}

impl ErrorResponse {
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("{} (code {code})", self.message),
            None => self.message.clone(),
        }
    }
}
