//! Twilio Messages API sender.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::dto::{AccountResponse, ErrorResponse, MessageResponse};
use super::settings::{Channel, TwilioConfig, TwilioCredentials};
use crate::error::NotifyError;
use crate::port::{DeliveryReceipt, MessageSender};

const API_VERSION: &str = "2010-04-01";

/// Account details returned by [`TwilioSender::verify_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
    pub name: String,
    pub status: String,
}

/// Sends alerts through Twilio over WhatsApp or SMS.
pub struct TwilioSender {
    http: HttpClient,
    account_url: String,
    credentials: TwilioCredentials,
    channel: Channel,
}

impl TwilioSender {
    #[must_use]
    pub fn new(config: &TwilioConfig, credentials: TwilioCredentials) -> Self {
        let http = config.http.build_client().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        });

        Self {
            http,
            account_url: format!(
                "{}/{API_VERSION}/Accounts/{}",
                config.base_url.trim_end_matches('/'),
                credentials.account_sid
            ),
            credentials,
            channel: config.channel,
        }
    }

    /// Address in the form Twilio expects for the configured channel.
    fn address(&self, number: &str) -> String {
        match self.channel {
            Channel::Whatsapp if !number.starts_with("whatsapp:") => format!("whatsapp:{number}"),
            _ => number.to_string(),
        }
    }

    /// Fetch the account to prove the credentials work.
    pub async fn verify_account(&self) -> Result<AccountStatus, NotifyError> {
        let response = self
            .http
            .get(format!("{}.json", self.account_url))
            .basic_auth(&self.credentials.account_sid, Some(&self.credentials.auth_token))
            .send()
            .await
            .map_err(transport_error)?;

        let account: AccountResponse = decode(response).await?;
        Ok(AccountStatus {
            name: account.friendly_name,
            status: account.status,
        })
    }
}

#[async_trait]
impl MessageSender for TwilioSender {
    async fn send(&self, body: &str) -> Result<DeliveryReceipt, NotifyError> {
        let to = self.address(&self.credentials.to);
        let from = self.address(&self.credentials.from);

        let response = self
            .http
            .post(format!("{}/Messages.json", self.account_url))
            .basic_auth(&self.credentials.account_sid, Some(&self.credentials.auth_token))
            .form(&[("To", to.as_str()), ("From", from.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(transport_error)?;

        let message: MessageResponse = decode(response).await?;
        Ok(DeliveryReceipt {
            id: message.sid,
            status: message.status,
        })
    }

    fn name(&self) -> &'static str {
        "twilio"
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, NotifyError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|err| err.describe())
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
        return Err(NotifyError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|err| NotifyError::Decode(err.to_string()))
}

fn transport_error(err: reqwest::Error) -> NotifyError {
    if err.is_timeout() {
        NotifyError::Timeout
    } else {
        NotifyError::Transport(err.to_string())
    }
}
