//! Handler for the `add` command.

use crate::application::add_destination;
use crate::cli::{output, AddArgs};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Append a destination to the store.
pub fn execute(config: &Config, args: &AddArgs) -> Result<()> {
    let store = bootstrap::build_store(config);
    let added = add_destination(store.as_ref(), &args.city, &args.iata)?;
    output::ok(&format!(
        "Tracking {} ({}) in {}",
        added.city(),
        added.iata(),
        store.path().display()
    ));
    Ok(())
}
