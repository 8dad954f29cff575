//! Implementations of ports (hexagonal adapters).

pub mod notifier;
pub mod serpapi;
pub mod store;
pub mod twilio;
