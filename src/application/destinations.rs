//! Curating the destination table outside of a sweep.

use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::{Destination, DestinationTable, IataCode};
use crate::error::Result;
use crate::port::DestinationStore;

/// Append a destination with no known price and save the table.
///
/// Rejects blank city names, malformed codes and codes already tracked.
pub fn add_destination(store: &dyn DestinationStore, city: &str, iata: &str) -> Result<Destination> {
    let city = city.trim();
    if city.is_empty() {
        return Err(DomainError::EmptyCity.into());
    }
    let iata = IataCode::parse(iata)?;

    let mut table = store.load()?;
    let destination = Destination::new(city, iata);
    table.push(destination.clone())?;
    store.save(&table)?;

    info!(
        store = %store.describe(),
        city = %destination.city(),
        destination = %destination.iata(),
        total = table.len(),
        "Destination added"
    );
    Ok(destination)
}

/// Load the current table.
pub fn list_destinations(store: &dyn DestinationStore) -> Result<DestinationTable> {
    Ok(store.load()?)
}
