use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Destination storage errors. Always fatal for a run.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read destination store {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write destination store {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed destination store: {0}")]
    Csv(#[from] csv::Error),

    #[error("destination store has no '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("duplicate IATA code '{code}' in destination store")]
    DuplicateIata { code: String },
}

/// Notification delivery errors.
#[derive(Error, Debug, Clone)]
pub enum NotifyError {
    #[error("refusing to send an empty message")]
    EmptyMessage,

    #[error("message rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("messaging request timed out")]
    Timeout,

    #[error("messaging transport error: {0}")]
    Transport(String),

    #[error("unexpected messaging response: {0}")]
    Decode(String),
}

/// Crate-wide error. Only configuration and storage failures end a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("check failed: {0}")]
    Check(String),
}

pub type Result<T> = std::result::Result<T, Error>;
