//! Fare lookup port.
//!
//! A lookup never fails the caller: transport problems, API errors and
//! empty results are all folded into [`FareOutcome`] at the adapter
//! boundary, so the sweep can log and move on.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{FareQuote, IataCode, Trial};

/// One round-trip search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareRequest {
    pub origin: IataCode,
    pub destination: IataCode,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl FareRequest {
    /// Build the request for `trial` towards `destination`.
    #[must_use]
    pub fn for_trial(trial: &Trial, destination: &IataCode) -> Self {
        Self {
            origin: trial.origin.clone(),
            destination: destination.clone(),
            departure_date: trial.departure_date,
            return_date: trial.return_date,
        }
    }
}

/// Why a lookup produced no fare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FareLookupError {
    #[error("fare search timed out")]
    Timeout,

    #[error("fare search returned HTTP {status}")]
    Http { status: u16 },

    #[error("fare search API error: {0}")]
    Api(String),

    #[error("could not decode fare search response: {0}")]
    Decode(String),

    #[error("fare search transport error: {0}")]
    Transport(String),
}

/// Result of a single fare lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FareOutcome {
    /// Cheapest round trip for the requested dates.
    Fare(FareQuote),
    /// The search ran but nothing was bookable.
    NoResult,
    /// The search could not be completed.
    Error(FareLookupError),
}

/// Source of round-trip fares.
#[async_trait]
pub trait FareLookup: Send + Sync {
    /// Look up the cheapest fare for `request`.
    async fn lookup(&self, request: &FareRequest) -> FareOutcome;
}
