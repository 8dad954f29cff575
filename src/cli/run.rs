//! Handler for the `run` command.

use chrono::Local;
use tabled::{Table, Tabled};
use tracing::info;

use crate::application::{DestinationReport, NotificationStatus, RunReport};
use crate::cli::{output, RunArgs};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "IATA")]
    iata: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Stored")]
    stored: String,
    #[tabled(rename = "Trials")]
    trials: String,
    #[tabled(rename = "Alert")]
    alert: String,
}

impl From<&DestinationReport> for SummaryRow {
    fn from(report: &DestinationReport) -> Self {
        let alert = match &report.notification {
            NotificationStatus::NotNeeded => "-".to_string(),
            NotificationStatus::Delivered(id) => format!("sent ({id})"),
            NotificationStatus::Failed(_) => "failed".to_string(),
        };
        Self {
            iata: report.iata.to_string(),
            city: report.city.clone(),
            best: output::price(report.best.as_ref().map(|q| q.price)),
            stored: output::price(report.previous_price),
            trials: format!("{} ({} skipped)", report.trials, report.skipped),
            alert,
        }
    }
}

/// Execute one sweep-and-notify pass.
pub async fn execute(config: &Config, dry_run: bool, args: &RunArgs) -> Result<RunReport> {
    let mut finder = bootstrap::build_finder(config, dry_run, args.seed)?;
    let today = Local::now().date_naive();
    info!(%today, dry_run, "farewatch starting");

    let report = finder.run(today).await?;
    print_summary(&report);
    Ok(report)
}

fn print_summary(report: &RunReport) {
    output::section("Sweep summary");
    if report.destinations.is_empty() {
        output::warn("No destinations to sweep");
        return;
    }

    let rows: Vec<SummaryRow> = report.destinations.iter().map(SummaryRow::from).collect();
    println!("{}", Table::new(rows));
    println!();
    output::key_value("Lookups", report.trials());
    output::key_value("Skipped", report.skipped());
    output::key_value("New lows", report.improved());
    if report.notifications_failed() > 0 {
        output::warn(&format!(
            "{} alert(s) could not be delivered",
            report.notifications_failed()
        ));
    }
}
