//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod destinations;
pub mod finder;
pub mod notification;
pub mod report;

pub use destinations::{add_destination, list_destinations};
pub use finder::{DealFinder, SweepOutcome};
pub use notification::NotificationSender;
pub use report::{DestinationReport, NotificationStatus, RunReport};
