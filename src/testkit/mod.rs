//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fares`] - `ScriptedFares`, a [`FareLookup`](crate::port::FareLookup)
//!   that replays canned outcomes.
//! - [`notifier`] - `RecordingSender`, a [`MessageSender`](crate::port::MessageSender)
//!   that records or fails.
//! - [`store`] - `MemoryStore`, an in-memory destination table.
//! - [`http`] - `StubServer`, a canned-response HTTP server for adapter tests.
//! - [`domain`] - Builders for destinations and tables.

pub mod domain;
pub mod fares;
pub mod http;
pub mod notifier;
pub mod store;
