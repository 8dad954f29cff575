//! Twilio messaging configuration.

use std::fmt;

use serde::Deserialize;

use crate::infrastructure::config::http::HttpConfig;

/// Delivery channel for alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Whatsapp,
    Sms,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whatsapp => write!(f, "whatsapp"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

/// `[notifications]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    /// API root; `/2010-04-01/...` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub channel: Channel,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://api.twilio.com".into()
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            channel: Channel::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Account secrets and phone numbers, read from the environment.
#[derive(Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, without channel prefix.
    pub from: String,
    /// Recipient number, without channel prefix.
    pub to: String,
}

impl fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}
