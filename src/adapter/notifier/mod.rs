//! Local message senders.
//!
//! Implements the `port::MessageSender` trait for backends that do not
//! leave the process.

use async_trait::async_trait;
use tracing::info;

use crate::error::NotifyError;
use crate::port::{DeliveryReceipt, MessageSender};

/// Writes alerts to the log instead of delivering them. Used for dry runs.
pub struct LogSender;

#[async_trait]
impl MessageSender for LogSender {
    async fn send(&self, body: &str) -> Result<DeliveryReceipt, NotifyError> {
        info!(body = %body, "Dry run: alert not delivered");
        Ok(DeliveryReceipt {
            id: "dry-run".into(),
            status: "logged".into(),
        })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
