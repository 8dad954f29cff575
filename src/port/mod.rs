//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the application meets external systems.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  DealFinder + Sender    ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Fare   │            │ Destination │              │  Message  │
//! │ Lookup  │            │    Store    │              │  Sender   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`FareLookup`] - Round-trip fare search (SerpAPI)
//! - [`MessageSender`] - Alert delivery (Twilio, logging)
//! - [`DestinationStore`] - Destination table persistence (CSV, memory)

mod fare;
mod notifier;
mod store;

pub use fare::{FareLookup, FareLookupError, FareOutcome, FareRequest};
pub use notifier::{DeliveryReceipt, MessageSender};
pub use store::DestinationStore;
