//! Recording [`MessageSender`] for notification assertions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::port::{DeliveryReceipt, MessageSender};

#[derive(Default)]
struct Log {
    attempts: usize,
    delivered: Vec<String>,
}

/// Thread-safe message collector. Optionally fails every send.
#[derive(Clone, Default)]
pub struct RecordingSender {
    log: Arc<Mutex<Log>>,
    failure: Option<NotifyError>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every attempt fails with `err`.
    pub fn failing(err: NotifyError) -> Self {
        Self {
            log: Arc::default(),
            failure: Some(err),
        }
    }

    /// Successfully delivered messages.
    pub fn messages(&self) -> Vec<String> {
        self.log.lock().expect("lock sender log").delivered.clone()
    }

    /// Send attempts, successful or not.
    pub fn attempts(&self) -> usize {
        self.log.lock().expect("lock sender log").attempts
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, body: &str) -> Result<DeliveryReceipt, NotifyError> {
        let mut log = self.log.lock().expect("lock sender log");
        log.attempts += 1;
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let id = format!("SM{}", log.delivered.len());
        log.delivered.push(body.to_string());
        Ok(DeliveryReceipt {
            id,
            status: "queued".into(),
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
