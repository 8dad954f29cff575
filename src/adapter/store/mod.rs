//! Destination store adapters.

mod tabular;

pub use tabular::CsvDestinationStore;
