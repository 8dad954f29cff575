//! Price improvements and their alert text.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use super::fare::{FareQuote, FlightLeg};
use super::iata::IataCode;

/// A fare that beats a destination's stored price.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub city: String,
    pub quote: FareQuote,
    /// Stored price before this run; `None` when the route had no price yet.
    pub previous_price: Option<Decimal>,
}

impl Deal {
    #[must_use]
    pub fn new(city: impl Into<String>, quote: FareQuote, previous_price: Option<Decimal>) -> Self {
        Self {
            city: city.into(),
            quote,
            previous_price,
        }
    }

    #[must_use]
    pub fn destination(&self) -> &IataCode {
        &self.quote.destination
    }

    /// Plain-text alert describing the fare, its dates and how it compares.
    #[must_use]
    pub fn alert_message(&self) -> String {
        let q = &self.quote;
        let mut msg = format!(
            "Low price alert! Only ${} for a {}-day round trip from {} to {}-{}.\n",
            q.price.normalize(),
            q.trip_days(),
            q.origin,
            self.city,
            q.destination,
        );

        write_leg(&mut msg, "Outbound", q.departure_date, q.outbound.as_ref());
        write_leg(&mut msg, "Return", q.return_date, q.inbound.as_ref());
        msg.push_str("This price is for the entire round trip.\n");

        match self.previous_price {
            Some(previous) => {
                let _ = writeln!(
                    msg,
                    "This is lower than the previous lowest price of ${:.2}.",
                    previous
                );
            }
            None => msg.push_str("This is the first recorded price for this route.\n"),
        }

        if let Some(level) = &q.insights.price_level {
            let _ = writeln!(msg, "Price level: {level}");
        }
        if let Some((low, high)) = q.insights.typical_range {
            let _ = writeln!(
                msg,
                "Typical price range: ${} - ${}",
                low.normalize(),
                high.normalize()
            );
        }

        msg.trim_end().to_string()
    }
}

fn write_leg(msg: &mut String, label: &str, date: chrono::NaiveDate, leg: Option<&FlightLeg>) {
    let _ = write!(msg, "{label}: {date}");
    let Some(leg) = leg else {
        msg.push('\n');
        return;
    };

    let flight = [leg.airline.as_deref(), leg.flight_number.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !flight.is_empty() {
        let _ = write!(msg, " {flight}");
    }
    if let Some(departs) = &leg.departs_at {
        let _ = write!(msg, ", departs {departs}");
    }
    if let Some(arrives) = &leg.arrives_at {
        let _ = write!(msg, ", arrives {arrives}");
    }
    msg.push('\n');

    let mut details = Vec::new();
    if let Some(stops) = leg.stopovers {
        details.push(format!("Stopovers: {stops}"));
    }
    if let Some(minutes) = leg.duration_minutes {
        details.push(format!(
            "Duration: {} hours {} minutes",
            minutes / 60,
            minutes % 60
        ));
    }
    if !details.is_empty() {
        let _ = writeln!(msg, "{}", details.join(", "));
    }
}
