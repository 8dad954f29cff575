//! Google Flights response shapes, decoded once into [`FareOutcome`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{FareQuote, FlightLeg, PriceInsights};
use crate::port::{FareLookupError, FareOutcome, FareRequest};

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub error: Option<String>,
    #[serde(default)]
    pub best_flights: Vec<Itinerary>,
    #[serde(default)]
    pub other_flights: Vec<Itinerary>,
    pub price_insights: Option<PriceInsightsDto>,
}

#[derive(Debug, Deserialize)]
pub struct Itinerary {
    pub price: Option<f64>,
    #[serde(default)]
    pub flights: Vec<Segment>,
    /// Whole journey in minutes, layovers included.
    pub total_duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Segment {
    pub departure_airport: Option<AirportTime>,
    pub arrival_airport: Option<AirportTime>,
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AirportTime {
    pub id: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceInsightsDto {
    pub price_level: Option<String>,
    #[serde(default)]
    pub typical_price_range: Vec<f64>,
}

impl SearchResponse {
    /// Reduce the response to the cheapest priced itinerary.
    pub fn into_outcome(self, request: &FareRequest) -> FareOutcome {
        if let Some(message) = self.error {
            // "no results" is reported through the error field as well.
            if message.to_ascii_lowercase().contains("hasn't returned any results") {
                return FareOutcome::NoResult;
            }
            return FareOutcome::Error(FareLookupError::Api(message));
        }

        let cheapest = self
            .best_flights
            .into_iter()
            .chain(self.other_flights)
            .filter_map(|it| {
                let price = it.price.and_then(Decimal::from_f64)?;
                (price > Decimal::ZERO).then_some((price, it))
            })
            .min_by(|(a, _), (b, _)| a.cmp(b));

        let Some((price, itinerary)) = cheapest else {
            return FareOutcome::NoResult;
        };

        let mut quote = FareQuote::new(
            request.origin.clone(),
            request.destination.clone(),
            request.departure_date,
            request.return_date,
            price.normalize(),
        );
        quote.outbound = itinerary.to_leg();
        quote.insights = self
            .price_insights
            .map(PriceInsightsDto::into_domain)
            .unwrap_or_default();

        FareOutcome::Fare(quote)
    }
}

impl Itinerary {
    fn to_leg(&self) -> Option<FlightLeg> {
        let first = self.flights.first()?;
        let last = self.flights.last()?;
        let segment_minutes: Option<u32> = self.flights.iter().map(|s| s.duration).sum();

        Some(FlightLeg {
            airline: first.airline.clone(),
            flight_number: first.flight_number.clone(),
            departs_at: first.departure_airport.as_ref().and_then(|a| a.time.clone()),
            arrives_at: last.arrival_airport.as_ref().and_then(|a| a.time.clone()),
            stopovers: u32::try_from(self.flights.len() - 1).ok(),
            duration_minutes: self.total_duration.or(segment_minutes),
        })
    }
}

impl PriceInsightsDto {
    fn into_domain(self) -> PriceInsights {
        let typical_range = match self.typical_price_range.as_slice() {
            [low, high, ..] => Decimal::from_f64(*low).zip(Decimal::from_f64(*high)),
            _ => None,
        };
        PriceInsights {
            price_level: self.price_level,
            typical_range,
        }
    }
}
