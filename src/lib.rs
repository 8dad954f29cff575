//! Farewatch - round-trip fare sweeps with alerts on new lows.
//!
//! For every tracked destination the crate samples departure dates and trip
//! lengths, asks a fare search API for each combination, and keeps the
//! cheapest round trip. When that beats the stored lowest price, the table is
//! updated and an alert is sent.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Destinations, fares, deals and sweep planning
//! - **`port`** - Traits at the external seams (fares, messaging, storage)
//! - **`adapter`** - SerpAPI, Twilio, CSV and logging implementations
//! - **`application`** - The deal finder and notification sender
//! - **`infrastructure`** - Configuration and wiring
//! - **`cli`** - Command-line entry points
//!
//! # Features
//!
//! - `testkit` - Test doubles for the ports and a stub HTTP server
//!
//! # Example
//!
//! ```no_run
//! use farewatch::domain::{DayRange, IataCode, SearchParams, SweepPlan, UniformSampler};
//!
//! let params = SearchParams {
//!     origins: vec![IataCode::parse("ASU").unwrap()],
//!     trip_days: DayRange::new(7, 10).unwrap(),
//!     window_days: DayRange::new(150, 180).unwrap(),
//!     iterations: 3,
//!     stop_at_typical_price: true,
//! };
//! let today = chrono::Local::now().date_naive();
//! let plan = SweepPlan::new(&params, today);
//! let mut sampler = UniformSampler::new(Some(42));
//! for trial in plan.trials(&mut sampler) {
//!     println!("{} -> {} ({} days)", trial.departure_date, trial.return_date, trial.trip_days);
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
