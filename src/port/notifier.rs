//! Messaging port for deal alerts.

use async_trait::async_trait;

use crate::error::NotifyError;

/// Acknowledgement returned by a messaging backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Backend message identifier.
    pub id: String,
    /// Backend delivery status, e.g. `queued`.
    pub status: String,
}

/// Delivers a plain-text message to the configured recipient.
///
/// Implementations make a single attempt; retrying is not their job.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, body: &str) -> Result<DeliveryReceipt, NotifyError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}
