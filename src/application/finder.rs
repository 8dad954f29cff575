//! The sweep-and-notify pass.
//!
//! For every destination the finder walks `origins × iterations` trials,
//! keeps the cheapest quote, and compares it with the stored price. All
//! improvements are applied to the table, the table is saved once, and only
//! then are alerts sent. A failed lookup skips one trial; a failed alert
//! is recorded in the report. Only storage errors end the run.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::notification::NotificationSender;
use super::report::{DestinationReport, NotificationStatus, RunReport};
use crate::domain::{Deal, Destination, FareQuote, SearchParams, SweepPlan, TrialSampler};
use crate::error::Result;
use crate::port::{DestinationStore, FareLookup, FareOutcome, FareRequest};

/// Result of sweeping one destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepOutcome {
    /// Cheapest quote across all origins; earlier trials win ties.
    pub best: Option<FareQuote>,
    pub trials: usize,
    /// Trials that produced no fare, for any reason.
    pub skipped: usize,
}

/// Drives the sweep over every destination in the store.
pub struct DealFinder {
    search: SearchParams,
    sampler: Box<dyn TrialSampler>,
    fares: Arc<dyn FareLookup>,
    store: Arc<dyn DestinationStore>,
    notifier: NotificationSender,
}

impl DealFinder {
    pub fn new(
        search: SearchParams,
        sampler: Box<dyn TrialSampler>,
        fares: Arc<dyn FareLookup>,
        store: Arc<dyn DestinationStore>,
        notifier: NotificationSender,
    ) -> Self {
        Self {
            search,
            sampler,
            fares,
            store,
            notifier,
        }
    }

    /// Run one full pass with departure offsets counted from `today`.
    ///
    /// Returns `Error::Store` if the table cannot be loaded or saved.
    /// Lookup and notification failures never surface as errors.
    pub async fn run(&mut self, today: NaiveDate) -> Result<RunReport> {
        let mut table = self.store.load()?;
        let plan = SweepPlan::new(&self.search, today);
        info!(
            store = %self.store.describe(),
            destinations = table.len(),
            origins = self.search.origins.len(),
            max_lookups = table.len() * plan.max_trials(),
            "Starting sweep"
        );
        if table.is_empty() {
            warn!("Destination store is empty, nothing to sweep");
        }

        let mut reports = Vec::with_capacity(table.len());
        let mut deals = Vec::new();

        for destination in table.rows() {
            let outcome = self.sweep(destination, today).await;
            let improved = outcome
                .best
                .as_ref()
                .is_some_and(|best| destination.is_improved_by(best.price));

            if improved {
                if let Some(best) = &outcome.best {
                    info!(
                        destination = %destination.iata(),
                        origin = %best.origin,
                        price = %best.price,
                        previous = ?destination.lowest_price(),
                        departure = %best.departure_date,
                        return_date = %best.return_date,
                        "New lowest fare"
                    );
                    deals.push((
                        reports.len(),
                        Deal::new(destination.city(), best.clone(), destination.lowest_price()),
                    ));
                }
            } else {
                debug!(
                    destination = %destination.iata(),
                    best = ?outcome.best.as_ref().map(|q| q.price),
                    stored = ?destination.lowest_price(),
                    "No improvement"
                );
            }

            reports.push(DestinationReport {
                iata: destination.iata().clone(),
                city: destination.city().to_string(),
                trials: outcome.trials,
                skipped: outcome.skipped,
                best: outcome.best,
                previous_price: destination.lowest_price(),
                improved,
                notification: NotificationStatus::NotNeeded,
            });
        }

        let mut applied = Vec::with_capacity(deals.len());
        for (index, deal) in deals {
            let report = &mut reports[index];
            let changed = table
                .get_mut(&report.iata)
                .is_some_and(|row| row.apply(&deal));
            if changed {
                applied.push((index, deal));
            } else {
                report.improved = false;
                warn!(destination = %report.iata, "Deal no longer beats stored price, dropped");
            }
        }

        self.store.save(&table)?;
        info!(
            store = %self.store.describe(),
            improved = applied.len(),
            "Destination store saved"
        );

        for (index, deal) in applied {
            let status = match self.notifier.send(&deal.alert_message()).await {
                Ok(receipt) => NotificationStatus::Delivered(receipt.id),
                Err(err) => NotificationStatus::Failed(err.to_string()),
            };
            reports[index].notification = status;
        }

        let report = RunReport {
            destinations: reports,
        };
        info!(
            trials = report.trials(),
            skipped = report.skipped(),
            improved = report.improved(),
            delivered = report.notifications_delivered(),
            failed = report.notifications_failed(),
            "Sweep complete"
        );
        Ok(report)
    }

    /// Sweep every origin for `destination` and keep the cheapest quote.
    ///
    /// Does not touch the store.
    pub async fn sweep(&mut self, destination: &Destination, today: NaiveDate) -> SweepOutcome {
        let plan = SweepPlan::new(&self.search, today);
        let mut outcome = SweepOutcome::default();

        for origin in &self.search.origins {
            for trial in plan.trials_for(origin, self.sampler.as_mut()) {
                outcome.trials += 1;
                let request = FareRequest::for_trial(&trial, destination.iata());

                match self.fares.lookup(&request).await {
                    FareOutcome::Fare(mut quote) => {
                        if quote.destination != request.destination {
                            warn!(
                                destination = %request.destination,
                                quoted = %quote.destination,
                                "Quote names another destination, using the requested one"
                            );
                            quote.destination = request.destination.clone();
                        }
                        debug!(
                            origin = %origin,
                            destination = %destination.iata(),
                            trial = trial.index,
                            price = %quote.price,
                            "Fare found"
                        );
                        let stop = self.search.stop_at_typical_price && quote.is_typical_or_better();
                        if outcome.best.as_ref().map_or(true, |best| quote.price < best.price) {
                            outcome.best = Some(quote);
                        }
                        if stop {
                            info!(
                                origin = %origin,
                                destination = %destination.iata(),
                                "Fare within typical range, done with origin"
                            );
                            break;
                        }
                    }
                    FareOutcome::NoResult => {
                        outcome.skipped += 1;
                        warn!(
                            origin = %origin,
                            destination = %destination.iata(),
                            departure = %request.departure_date,
                            return_date = %request.return_date,
                            "No fares found, skipping trial"
                        );
                    }
                    FareOutcome::Error(err) => {
                        outcome.skipped += 1;
                        warn!(
                            origin = %origin,
                            destination = %destination.iata(),
                            departure = %request.departure_date,
                            return_date = %request.return_date,
                            error = %err,
                            "Fare lookup failed, skipping trial"
                        );
                    }
                }
            }
        }

        outcome
    }
}
