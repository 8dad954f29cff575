//! Results of a sweep run.

use rust_decimal::Decimal;

use crate::domain::{FareQuote, IataCode};

/// What happened to a destination's alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Price did not improve; nothing was sent.
    NotNeeded,
    /// Backend acknowledged the message with this id.
    Delivered(String),
    /// Delivery was attempted and failed.
    Failed(String),
}

/// Per-destination outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationReport {
    pub iata: IataCode,
    pub city: String,
    pub trials: usize,
    pub skipped: usize,
    /// Cheapest fare seen this run, improving or not.
    pub best: Option<FareQuote>,
    pub previous_price: Option<Decimal>,
    pub improved: bool,
    pub notification: NotificationStatus,
}

/// Summary of one sweep-and-notify pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub destinations: Vec<DestinationReport>,
}

impl RunReport {
    #[must_use]
    pub fn trials(&self) -> usize {
        self.destinations.iter().map(|d| d.trials).sum()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.destinations.iter().map(|d| d.skipped).sum()
    }

    #[must_use]
    pub fn improved(&self) -> usize {
        self.destinations.iter().filter(|d| d.improved).count()
    }

    #[must_use]
    pub fn notifications_delivered(&self) -> usize {
        self.count_notifications(|s| matches!(s, NotificationStatus::Delivered(_)))
    }

    #[must_use]
    pub fn notifications_failed(&self) -> usize {
        self.count_notifications(|s| matches!(s, NotificationStatus::Failed(_)))
    }

    #[must_use]
    pub fn get(&self, iata: &str) -> Option<&DestinationReport> {
        self.destinations.iter().find(|d| d.iata.as_str() == iata)
    }

    fn count_notifications(&self, pred: impl Fn(&NotificationStatus) -> bool) -> usize {
        self.destinations
            .iter()
            .filter(|d| pred(&d.notification))
            .count()
    }
}
