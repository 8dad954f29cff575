//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::notifier::LogSender;
use crate::adapter::serpapi::SerpApiClient;
use crate::adapter::store::CsvDestinationStore;
use crate::adapter::twilio::TwilioSender;
use crate::application::{DealFinder, NotificationSender};
use crate::error::Result;
use crate::infrastructure::config::credentials;
use crate::infrastructure::config::settings::Config;
use crate::port::MessageSender;

/// Build the destination store from `[store]`.
#[must_use]
pub fn build_store(config: &Config) -> Arc<CsvDestinationStore> {
    Arc::new(CsvDestinationStore::new(
        config.store.path.clone(),
        config.store.seed_defaults,
    ))
}

/// Build the alert backend.
///
/// Dry runs log alerts instead of sending them and need no Twilio credentials.
pub fn build_sender(config: &Config, dry_run: bool) -> Result<Arc<dyn MessageSender>> {
    if dry_run {
        info!("Dry run: alerts will be logged, not sent");
        return Ok(Arc::new(LogSender));
    }
    let credentials = credentials::twilio()?;
    info!(channel = %config.notifications.channel, "Twilio notifier enabled");
    Ok(Arc::new(TwilioSender::new(&config.notifications, credentials)))
}

/// Wire a [`DealFinder`] from configuration and the environment.
///
/// `seed` overrides `[search].seed`.
pub fn build_finder(config: &Config, dry_run: bool, seed: Option<u64>) -> Result<DealFinder> {
    let search = config.search.params()?;
    let api_key = credentials::serpapi_key()?;
    let sender = build_sender(config, dry_run)?;

    Ok(DealFinder::new(
        search,
        config.search.sampler(seed),
        Arc::new(SerpApiClient::new(&config.fares, api_key)),
        build_store(config),
        NotificationSender::new(sender),
    ))
}
