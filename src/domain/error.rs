//! Domain validation errors for core domain types.
//!
//! Returned by parsing constructors such as [`IataCode::parse`] and
//! [`DayRange::new`] when an input violates a domain rule.
//!
//! # Examples
//!
//! ```
//! use farewatch::domain::error::DomainError;
//! use farewatch::domain::IataCode;
//!
//! let result = IataCode::parse("LONDON");
//! assert!(matches!(result, Err(DomainError::InvalidIata { .. })));
//! ```
//!
//! [`IataCode::parse`]: crate::domain::IataCode::parse
//! [`DayRange::new`]: crate::domain::DayRange::new

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Airport codes are exactly three ASCII letters.
    #[error("invalid IATA code '{code}': expected three letters")]
    InvalidIata {
        /// The rejected input.
        code: String,
    },

    /// A day range whose lower bound exceeds its upper bound.
    #[error("invalid day range: min {min} is greater than max {max}")]
    InvertedRange {
        /// Lower bound in days.
        min: u32,
        /// Upper bound in days.
        max: u32,
    },

    /// Destinations need a city name.
    #[error("city name must not be empty")]
    EmptyCity,

    /// A destination with the same airport code is already tracked.
    #[error("destination '{code}' is already tracked")]
    DuplicateDestination {
        /// The duplicated airport code.
        code: String,
    },
}
