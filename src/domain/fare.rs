//! Fare quotes returned by a fare search.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::iata::IataCode;

/// One direction of an itinerary, as far as the search API describes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightLeg {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    /// Local departure time as reported by the API, e.g. `2027-03-20 08:15`.
    pub departs_at: Option<String>,
    pub arrives_at: Option<String>,
    pub stopovers: Option<u32>,
    pub duration_minutes: Option<u32>,
}

/// Market context the search API attaches to a result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceInsights {
    /// Free-form level such as `low`, `typical` or `high`.
    pub price_level: Option<String>,
    /// Usual (low, high) round-trip price for the route.
    pub typical_range: Option<(Decimal, Decimal)>,
}

/// Lowest round-trip fare found for one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct FareQuote {
    pub origin: IataCode,
    pub destination: IataCode,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Total price for the whole round trip.
    pub price: Decimal,
    pub outbound: Option<FlightLeg>,
    pub inbound: Option<FlightLeg>,
    pub insights: PriceInsights,
}

impl FareQuote {
    /// Create a quote with no itinerary details.
    #[must_use]
    pub fn new(
        origin: IataCode,
        destination: IataCode,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        price: Decimal,
    ) -> Self {
        Self {
            origin,
            destination,
            departure_date,
            return_date,
            price,
            outbound: None,
            inbound: None,
            insights: PriceInsights::default(),
        }
    }

    /// Nights between departure and return.
    #[must_use]
    pub fn trip_days(&self) -> u32 {
        let days = (self.return_date - self.departure_date).num_days();
        u32::try_from(days).unwrap_or(0)
    }

    /// True when the price sits at or under the top of the typical range.
    #[must_use]
    pub fn is_typical_or_better(&self) -> bool {
        self.insights
            .typical_range
            .is_some_and(|(_, high)| self.price <= high)
    }
}
