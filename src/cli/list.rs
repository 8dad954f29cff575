//! Handler for the `list` command.

use tabled::{Table, Tabled};

use crate::application::list_destinations;
use crate::cli::output;
use crate::domain::Destination;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct DestinationRow {
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "IATA")]
    iata: String,
    #[tabled(rename = "Lowest")]
    lowest: String,
    #[tabled(rename = "From")]
    origin: String,
    #[tabled(rename = "Dates")]
    dates: String,
}

impl From<&Destination> for DestinationRow {
    fn from(destination: &Destination) -> Self {
        let (origin, dates) = destination.last_deal().map_or_else(
            || ("-".to_string(), "-".to_string()),
            |deal| {
                (
                    deal.origin.to_string(),
                    format!("{} → {}", deal.departure_date, deal.return_date),
                )
            },
        );
        Self {
            city: destination.city().to_string(),
            iata: destination.iata().to_string(),
            lowest: output::price(destination.lowest_price()),
            origin,
            dates,
        }
    }
}

/// Print the destination table.
pub fn execute(config: &Config) -> Result<()> {
    let store = bootstrap::build_store(config);
    let table = list_destinations(store.as_ref())?;

    output::section(&format!("Destinations ({})", store.path().display()));
    if table.is_empty() {
        output::note("No destinations tracked. Add one with `farewatch add <CITY> <IATA>`.");
        return Ok(());
    }

    let rows: Vec<DestinationRow> = table.rows().iter().map(DestinationRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
