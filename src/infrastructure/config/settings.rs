//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is read from a TOML file; secrets come from the environment
//! (see [`credentials`](super::credentials)).
//!
//! # Example
//!
//! ```no_run
//! use farewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("farewatch.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::serpapi::SerpApiConfig;
use crate::adapter::twilio::TwilioConfig;
use crate::domain::{
    DayRange, IataCode, SearchParams, SteppedSampler, TrialSampler, UniformSampler,
};
use crate::error::{ConfigError, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "farewatch.toml";

/// How trial dates and durations are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sampling {
    /// Independent random draws.
    #[default]
    Uniform,
    /// Evenly spaced, deterministic.
    Stepped,
}

/// Inclusive `[min, max]` pair as written in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Origin airport codes.
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
    /// Trip length bounds in days.
    #[serde(default = "default_trip_days")]
    pub trip_days: Bounds,
    /// Departure window in days from today.
    #[serde(default = "default_window_days")]
    pub window_days: Bounds,
    /// Trials per origin airport.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default)]
    pub sampling: Sampling,
    /// Seed for uniform sampling. Unseeded runs use OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub stop_at_typical_price: bool,
}

/// Upper limit for `trip_days` and `window_days` bounds (about ten years).
pub const MAX_SEARCH_DAYS: u32 = 3650;

fn default_origins() -> Vec<String> {
    vec!["ASU".into()]
}

const fn default_trip_days() -> Bounds {
    Bounds { min: 7, max: 10 }
}

const fn default_window_days() -> Bounds {
    Bounds { min: 150, max: 180 }
}

const fn default_iterations() -> u32 {
    3
}

const fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origins: default_origins(),
            trip_days: default_trip_days(),
            window_days: default_window_days(),
            iterations: default_iterations(),
            sampling: Sampling::default(),
            seed: None,
            stop_at_typical_price: default_true(),
        }
    }
}

impl SearchConfig {
    /// Validated sweep parameters.
    pub fn params(&self) -> Result<SearchParams> {
        if self.origins.is_empty() {
            return Err(ConfigError::MissingField { field: "origins" }.into());
        }
        let origins = self
            .origins
            .iter()
            .map(|code| {
                IataCode::parse(code).map_err(|e| ConfigError::InvalidValue {
                    field: "origins",
                    reason: e.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if self.trip_days.min == 0 {
            return Err(ConfigError::InvalidValue {
                field: "trip_days",
                reason: "min must be at least 1".to_string(),
            }
            .into());
        }
        let trip_days = DayRange::new(self.trip_days.min, self.trip_days.max).map_err(|e| {
            ConfigError::InvalidValue {
                field: "trip_days",
                reason: e.to_string(),
            }
        })?;
        let window_days = DayRange::new(self.window_days.min, self.window_days.max).map_err(
            |e| ConfigError::InvalidValue {
                field: "window_days",
                reason: e.to_string(),
            },
        )?;

        for (field, range) in [("trip_days", trip_days), ("window_days", window_days)] {
            if range.max() > MAX_SEARCH_DAYS {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("max must be at most {MAX_SEARCH_DAYS} days"),
                }
                .into());
            }
        }

        if self.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "iterations",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(SearchParams {
            origins,
            trip_days,
            window_days,
            iterations: self.iterations,
            stop_at_typical_price: self.stop_at_typical_price,
        })
    }

    /// Sampler for the configured policy. `seed` overrides the configured seed.
    #[must_use]
    pub fn sampler(&self, seed: Option<u64>) -> Box<dyn TrialSampler> {
        match self.sampling {
            Sampling::Uniform => Box::new(UniformSampler::new(seed.or(self.seed))),
            Sampling::Stepped => Box::new(SteppedSampler::new(self.iterations)),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Destination table file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Create the default destination list when the file is missing.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("destinations.csv")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            seed_defaults: default_true(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Sweep parameters.
    #[serde(default)]
    pub search: SearchConfig,

    /// Destination table location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Fare search API settings.
    #[serde(default)]
    pub fares: SerpApiConfig,

    /// Messaging API settings.
    #[serde(default)]
    pub notifications: TwilioConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; any other read failure is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn validate(&self) -> Result<()> {
        self.search.params()?;

        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "store.path" }.into());
        }
        for (field, base_url) in [
            ("fares.base_url", &self.fares.base_url),
            ("notifications.base_url", &self.notifications.base_url),
        ] {
            let parsed = url::Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                }
                .into());
            }
        }
        for (field, http) in [
            ("fares.http.timeout_ms", &self.fares.http),
            ("notifications.http.timeout_ms", &self.notifications.http),
        ] {
            if http.timeout_ms == 0 || http.connect_timeout_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "timeouts must be greater than 0".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
