//! Airport identifier type.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Three-letter IATA airport code, always stored upper-case.
///
/// The inner String is private so every value goes through [`IataCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IataCode(String);

impl IataCode {
    /// Parse and normalize an airport code.
    ///
    /// Surrounding whitespace is ignored and letters are upper-cased.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidIata {
                code: raw.to_string(),
            });
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IataCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
