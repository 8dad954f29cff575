#![allow(dead_code)]

use std::sync::Arc;

use farewatch::application::{DealFinder, NotificationSender};
use farewatch::domain::{SearchParams, SteppedSampler};
use farewatch::testkit::fares::ScriptedFares;
use farewatch::testkit::notifier::RecordingSender;
use farewatch::testkit::store::MemoryStore;

/// Finder over test doubles with deterministic, evenly spaced trials.
pub fn finder(
    search: SearchParams,
    fares: &ScriptedFares,
    store: &MemoryStore,
    sender: &RecordingSender,
) -> DealFinder {
    let steps = search.iterations;
    DealFinder::new(
        search,
        Box::new(SteppedSampler::new(steps)),
        Arc::new(fares.clone()),
        Arc::new(store.clone()),
        NotificationSender::new(Arc::new(sender.clone())),
    )
}
