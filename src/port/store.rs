//! Destination storage port.

use crate::domain::DestinationTable;
use crate::error::StoreError;

/// Persistence for the destination table.
///
/// The table is always read and written whole.
pub trait DestinationStore: Send + Sync {
    /// Read the full table.
    fn load(&self) -> Result<DestinationTable, StoreError>;

    /// Replace the stored table with `table`.
    fn save(&self, table: &DestinationTable) -> Result<(), StoreError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}
