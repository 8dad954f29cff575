//! Collaborator-agnostic domain logic.

mod deal;
mod destination;
mod fare;
mod iata;
mod sweep;

pub mod error;

pub use deal::Deal;
pub use destination::{
    DealRecord, Destination, DestinationTable, DEFAULT_COLUMNS, DEFAULT_DESTINATIONS,
};
pub use fare::{FareQuote, FlightLeg, PriceInsights};
pub use iata::IataCode;
pub use sweep::{
    DayRange, SearchParams, SteppedSampler, SweepPlan, Trial, TrialSampler, UniformSampler,
};
