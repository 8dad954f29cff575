//! Scripted [`FareLookup`] for sweep tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::FareQuote;
use crate::port::{FareLookup, FareLookupError, FareOutcome, FareRequest};

/// One scripted lookup result.
#[derive(Debug, Clone)]
pub enum Scripted {
    Price(Decimal),
    /// Price with a (low, high) typical range attached.
    Typical(Decimal, (Decimal, Decimal)),
    NoResult,
    Error(FareLookupError),
}

#[derive(Default)]
struct Script {
    fallback: VecDeque<Scripted>,
    routes: HashMap<String, VecDeque<Scripted>>,
    requests: Vec<FareRequest>,
}

/// Replays scripted outcomes in call order and records every request.
///
/// Destinations with their own [`route`](Self::route) script use it; all
/// others share the fallback queue. An exhausted queue answers `NoResult`.
#[derive(Clone, Default)]
pub struct ScriptedFares {
    script: Arc<Mutex<Script>>,
}

impl ScriptedFares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(self, price: Decimal) -> Self {
        self.push(Scripted::Price(price))
    }

    pub fn typical(self, price: Decimal, range: (Decimal, Decimal)) -> Self {
        self.push(Scripted::Typical(price, range))
    }

    pub fn no_result(self) -> Self {
        self.push(Scripted::NoResult)
    }

    pub fn error(self, err: FareLookupError) -> Self {
        self.push(Scripted::Error(err))
    }

    /// Script the outcomes for one destination.
    pub fn route(self, destination: &str, steps: impl IntoIterator<Item = Scripted>) -> Self {
        self.lock()
            .routes
            .entry(destination.to_ascii_uppercase())
            .or_default()
            .extend(steps);
        self
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<FareRequest> {
        self.lock().requests.clone()
    }

    /// Requests made for one destination.
    pub fn requests_to(&self, destination: &str) -> Vec<FareRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.destination.as_str().eq_ignore_ascii_case(destination))
            .cloned()
            .collect()
    }

    fn push(self, step: Scripted) -> Self {
        self.lock().fallback.push_back(step);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("lock fare script")
    }
}

#[async_trait]
impl FareLookup for ScriptedFares {
    async fn lookup(&self, request: &FareRequest) -> FareOutcome {
        let mut script = self.lock();
        script.requests.push(request.clone());

        let step = match script.routes.get_mut(request.destination.as_str()) {
            Some(queue) => queue.pop_front(),
            None => script.fallback.pop_front(),
        };

        let quote = |price: Decimal| {
            FareQuote::new(
                request.origin.clone(),
                request.destination.clone(),
                request.departure_date,
                request.return_date,
                price,
            )
        };

        match step {
            Some(Scripted::Price(price)) => FareOutcome::Fare(quote(price)),
            Some(Scripted::Typical(price, range)) => {
                let mut q = quote(price);
                q.insights.typical_range = Some(range);
                FareOutcome::Fare(q)
            }
            Some(Scripted::Error(err)) => FareOutcome::Error(err),
            Some(Scripted::NoResult) | None => FareOutcome::NoResult,
        }
    }
}
