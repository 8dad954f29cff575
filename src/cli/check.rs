//! Handler for the `check` command.
//!
//! Reads everything a run would need without sweeping or writing anything.

use crate::adapter::twilio::TwilioSender;
use crate::cli::{output, CheckArgs};
use crate::domain::DEFAULT_DESTINATIONS;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::credentials;
use crate::infrastructure::config::settings::Config;
use crate::port::DestinationStore;

/// Validate configuration, credentials and the destination store.
pub async fn execute(config: &Config, dry_run: bool, args: &CheckArgs) -> Result<()> {
    let params = config.search.params()?;
    let mut problems = 0usize;

    output::section("Configuration");
    let origins: Vec<&str> = params.origins.iter().map(|o| o.as_str()).collect();
    output::key_value("Origins", origins.join(", "));
    output::key_value(
        "Trip days",
        format!("{}-{}", params.trip_days.min(), params.trip_days.max()),
    );
    output::key_value(
        "Window days",
        format!("{}-{}", params.window_days.min(), params.window_days.max()),
    );
    output::key_value("Iterations", params.iterations);
    output::key_value("Channel", config.notifications.channel);
    output::ok("Configuration is valid");

    output::section("Credentials");
    match credentials::serpapi_key() {
        Ok(_) => output::ok("SerpAPI key found"),
        Err(e) => {
            output::warn(&e.to_string());
            problems += 1;
        }
    }
    let twilio = if dry_run {
        output::note("Dry run: Twilio credentials not required");
        None
    } else {
        match credentials::twilio() {
            Ok(creds) => {
                output::ok("Twilio credentials found");
                Some(creds)
            }
            Err(e) => {
                output::warn(&e.to_string());
                problems += 1;
                None
            }
        }
    };

    output::section("Destination store");
    let store = bootstrap::build_store(config);
    output::key_value("Path", store.path().display());
    if store.path().exists() {
        match store.load() {
            Ok(table) => output::ok(&format!("{} destination(s) tracked", table.len())),
            Err(e) => {
                output::warn(&e.to_string());
                problems += 1;
            }
        }
    } else if config.store.seed_defaults {
        output::note(&format!(
            "Missing; the first run will create it with {} default destinations",
            DEFAULT_DESTINATIONS.len()
        ));
    } else {
        output::warn("Store file is missing and seed_defaults is off");
        problems += 1;
    }

    if args.live {
        output::section("Live checks");
        match twilio {
            Some(creds) => {
                let sender = TwilioSender::new(&config.notifications, creds);
                match sender.verify_account().await {
                    Ok(account) => output::ok(&format!(
                        "Twilio account '{}' is {}",
                        account.name, account.status
                    )),
                    Err(e) => {
                        output::warn(&format!("Twilio account check failed: {e}"));
                        problems += 1;
                    }
                }
            }
            None => output::note("Skipping Twilio account check"),
        }
    }

    println!();
    if problems == 0 {
        output::ok("Ready to run");
        Ok(())
    } else {
        Err(Error::Check(format!("{problems} problem(s) found")))
    }
}
