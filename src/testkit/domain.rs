//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`IataCode`], [`Destination`],
//! [`DestinationTable`] and [`SearchParams`] so tests focus on assertions
//! rather than construction boilerplate.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{DayRange, Destination, DestinationTable, IataCode, SearchParams};

/// Parse an airport code, panicking on bad input.
pub fn iata(code: &str) -> IataCode {
    IataCode::parse(code).expect("valid IATA code")
}

/// A destination with an optional stored price.
pub fn destination(city: &str, code: &str, price: Option<Decimal>) -> Destination {
    Destination::new(city, iata(code)).with_price(price)
}

/// A table with the default column layout holding `rows`.
pub fn table(rows: &[(&str, &str, Option<Decimal>)]) -> DestinationTable {
    let mut table = DestinationTable::new();
    for (city, code, price) in rows {
        table
            .push(destination(city, code, *price))
            .expect("unique destination codes");
    }
    table
}

/// Default sweep bounds (7-10 day trips, 150-180 days out) with early stop off.
pub fn search(origins: &[&str], iterations: u32) -> SearchParams {
    SearchParams {
        origins: origins.iter().map(|o| iata(o)).collect(),
        trip_days: DayRange::new(7, 10).expect("ordered range"),
        window_days: DayRange::new(150, 180).expect("ordered range"),
        iterations,
        stop_at_typical_price: false,
    }
}

/// Fixed "today" so dates in assertions are stable.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}
