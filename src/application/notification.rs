//! Alert delivery.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::NotifyError;
use crate::port::{DeliveryReceipt, MessageSender};

/// Sends deal alerts through a [`MessageSender`], one attempt per call.
///
/// Failures are logged here and handed back to the caller. Nothing done
/// before the send (such as saving a new price) is undone.
#[derive(Clone)]
pub struct NotificationSender {
    backend: Arc<dyn MessageSender>,
}

impl NotificationSender {
    #[must_use]
    pub fn new(backend: Arc<dyn MessageSender>) -> Self {
        Self { backend }
    }

    /// Deliver `message`. Empty messages are refused without a send.
    pub async fn send(&self, message: &str) -> Result<DeliveryReceipt, NotifyError> {
        let backend = self.backend.name();
        if message.trim().is_empty() {
            error!(backend, "Refusing to send empty alert");
            return Err(NotifyError::EmptyMessage);
        }

        match self.backend.send(message).await {
            Ok(receipt) => {
                info!(
                    backend,
                    id = %receipt.id,
                    status = %receipt.status,
                    "Alert delivered"
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(backend, error = %err, "Alert delivery failed");
                Err(err)
            }
        }
    }
}
