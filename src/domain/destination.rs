//! Tracked destinations and the table that holds them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::deal::Deal;
use super::error::DomainError;
use super::iata::IataCode;

/// Column names written for a freshly created table, in order.
pub const DEFAULT_COLUMNS: [&str; 10] = [
    "city",
    "iata_code",
    "lowest_price",
    "origin",
    "departure_date",
    "return_date",
    "trip_days",
    "airline",
    "flight_number",
    "stopovers",
];

/// Destinations seeded into an empty store.
pub const DEFAULT_DESTINATIONS: [(&str, &str); 20] = [
    ("Paris", "CDG"),
    ("Berlin", "BER"),
    ("Tokyo", "HND"),
    ("Sydney", "SYD"),
    ("Istanbul", "IST"),
    ("Kuala Lumpur", "KUL"),
    ("New York", "JFK"),
    ("San Francisco", "SFO"),
    ("Cape Town", "CPT"),
    ("Rio de Janeiro", "GIG"),
    ("Lima", "LIM"),
    ("Cancun", "CUN"),
    ("Dubai", "DXB"),
    ("Bangkok", "BKK"),
    ("Rome", "FCO"),
    ("Barcelona", "BCN"),
    ("Amsterdam", "AMS"),
    ("Prague", "PRG"),
    ("Vienna", "VIE"),
    ("Athens", "ATH"),
];

/// Details of the fare behind a destination's stored price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealRecord {
    pub origin: IataCode,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub trip_days: u32,
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub stopovers: Option<u32>,
}

/// A destination tracked for fare monitoring.
///
/// The lowest price is private: it only moves through [`Destination::apply`],
/// which refuses anything that is not a strict improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    city: String,
    iata: IataCode,
    lowest_price: Option<Decimal>,
    last_deal: Option<DealRecord>,
    /// Cells from columns this crate does not interpret, keyed by column
    /// position in the table layout. Headers may repeat, positions do not.
    pub extra: BTreeMap<usize, String>,
}

impl Destination {
    /// Create a destination with no known price.
    pub fn new(city: impl Into<String>, iata: IataCode) -> Self {
        Self {
            city: city.into(),
            iata,
            lowest_price: None,
            last_deal: None,
            extra: BTreeMap::new(),
        }
    }

    /// Restore a destination with a previously stored price.
    ///
    /// Zero and negative prices are treated as "never found".
    #[must_use]
    pub fn with_price(mut self, price: Option<Decimal>) -> Self {
        self.lowest_price = price.filter(|p| *p > Decimal::ZERO);
        self
    }

    #[must_use]
    pub fn with_last_deal(mut self, deal: Option<DealRecord>) -> Self {
        self.last_deal = deal;
        self
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn iata(&self) -> &IataCode {
        &self.iata
    }

    #[must_use]
    pub fn lowest_price(&self) -> Option<Decimal> {
        self.lowest_price
    }

    #[must_use]
    pub fn last_deal(&self) -> Option<&DealRecord> {
        self.last_deal.as_ref()
    }

    /// True when `price` is strictly below the stored price, or none is stored.
    #[must_use]
    pub fn is_improved_by(&self, price: Decimal) -> bool {
        match self.lowest_price {
            Some(current) => price < current,
            None => true,
        }
    }

    /// Record `deal` if it improves on the stored price.
    ///
    /// Returns whether the row changed.
    pub fn apply(&mut self, deal: &Deal) -> bool {
        let quote = &deal.quote;
        if !self.is_improved_by(quote.price) {
            return false;
        }
        self.lowest_price = Some(quote.price);
        self.last_deal = Some(DealRecord {
            origin: quote.origin.clone(),
            departure_date: quote.departure_date,
            return_date: quote.return_date,
            trip_days: quote.trip_days(),
            airline: quote.outbound.as_ref().and_then(|l| l.airline.clone()),
            flight_number: quote.outbound.as_ref().and_then(|l| l.flight_number.clone()),
            stopovers: quote.outbound.as_ref().and_then(|l| l.stopovers),
        });
        true
    }
}

/// The full destination table together with its column layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationTable {
    columns: Vec<String>,
    rows: Vec<Destination>,
}

impl DestinationTable {
    /// Create an empty table with the default column layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: DEFAULT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from a stored column layout and rows.
    ///
    /// Fails if two rows share an airport code.
    pub fn from_parts(
        columns: Vec<String>,
        rows: Vec<Destination>,
    ) -> Result<Self, DomainError> {
        let mut table = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    /// Table seeded with [`DEFAULT_DESTINATIONS`].
    pub fn with_defaults() -> Result<Self, DomainError> {
        let mut table = Self::new();
        for (city, code) in DEFAULT_DESTINATIONS {
            table.push(Destination::new(city, IataCode::parse(code)?))?;
        }
        Ok(table)
    }

    /// Append a destination, rejecting duplicate airport codes.
    pub fn push(&mut self, destination: Destination) -> Result<(), DomainError> {
        if self.get(destination.iata()).is_some() {
            return Err(DomainError::DuplicateDestination {
                code: destination.iata().to_string(),
            });
        }
        self.rows.push(destination);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Destination] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, iata: &IataCode) -> Option<&Destination> {
        self.rows.iter().find(|d| d.iata() == iata)
    }

    pub fn get_mut(&mut self, iata: &IataCode) -> Option<&mut Destination> {
        self.rows.iter_mut().find(|d| d.iata() == iata)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for DestinationTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FareQuote;
    use rust_decimal_macros::dec;

    fn iata(code: &str) -> IataCode {
        IataCode::parse(code).unwrap()
    }

    fn deal_at(price: Decimal) -> Deal {
        let departure = NaiveDate::from_ymd_opt(2027, 3, 20).unwrap();
        let quote = FareQuote::new(
            iata("ASU"),
            iata("LON"),
            departure,
            departure + chrono::Days::new(7),
            price,
        );
        Deal::new("London", quote, None)
    }

    #[test]
    fn zero_price_means_never_found() {
        let dest = Destination::new("Paris", iata("PAR")).with_price(Some(Decimal::ZERO));
        assert_eq!(dest.lowest_price(), None);
        assert!(dest.is_improved_by(dec!(5000)));
    }

    #[test]
    fn apply_only_accepts_strict_improvements() {
        let mut dest = Destination::new("London", iata("LON")).with_price(Some(dec!(100)));

        assert!(!dest.apply(&deal_at(dec!(100))));
        assert!(!dest.apply(&deal_at(dec!(120))));
        assert_eq!(dest.lowest_price(), Some(dec!(100)));
        assert!(dest.last_deal().is_none());

        assert!(dest.apply(&deal_at(dec!(95))));
        assert_eq!(dest.lowest_price(), Some(dec!(95)));
        let record = dest.last_deal().unwrap();
        assert_eq!(record.trip_days, 7);
        assert_eq!(record.origin.as_str(), "ASU");
    }

    #[test]
    fn table_rejects_duplicate_codes() {
        let mut table = DestinationTable::new();
        table.push(Destination::new("Paris", iata("CDG"))).unwrap();
        let err = table
            .push(Destination::new("Paris again", iata("cdg")))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateDestination {
                code: "CDG".into()
            }
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn defaults_seed_twenty_unique_destinations() {
        let table = DestinationTable::with_defaults().unwrap();
        assert_eq!(table.len(), 20);
        assert_eq!(table.columns()[..3], ["city", "iata_code", "lowest_price"]);
        assert!(table.rows().iter().all(|d| d.lowest_price().is_none()));
    }
}
