//! Secrets read from the environment.
//!
//! Values may come from a `.env` file loaded by the binary before this runs.
//! Missing and empty variables are both reported as
//! [`ConfigError::MissingField`].

use crate::adapter::twilio::TwilioCredentials;
use crate::error::{ConfigError, Result};

pub const SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
/// Sender number.
pub const TWILIO_WHATSAPP_NUMBER: &str = "TWILIO_WHATSAPP_NUMBER";
/// Recipient number.
pub const YOUR_WHATSAPP_NUMBER: &str = "YOUR_WHATSAPP_NUMBER";

/// Read a required variable through `lookup`.
fn required<F>(lookup: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingField { field: name }.into()),
    }
}

fn from_process(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// SerpAPI key from the process environment.
pub fn serpapi_key() -> Result<String> {
    serpapi_key_from(from_process)
}

/// Twilio account and numbers from the process environment.
pub fn twilio() -> Result<TwilioCredentials> {
    twilio_from(from_process)
}

pub fn serpapi_key_from<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    required(&lookup, SERPAPI_API_KEY)
}

pub fn twilio_from<F>(lookup: F) -> Result<TwilioCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(TwilioCredentials {
        account_sid: required(&lookup, TWILIO_ACCOUNT_SID)?,
        auth_token: required(&lookup, TWILIO_AUTH_TOKEN)?,
        from: required(&lookup, TWILIO_WHATSAPP_NUMBER)?,
        to: required(&lookup, YOUR_WHATSAPP_NUMBER)?,
    })
}
