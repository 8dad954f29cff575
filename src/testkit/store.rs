//! In-memory [`DestinationStore`].

use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::DestinationTable;
use crate::error::StoreError;
use crate::port::DestinationStore;

struct State {
    table: DestinationTable,
    saves: usize,
    fail_load: bool,
    fail_save: bool,
}

/// Shared table with switchable load/save failures.
#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new(table: DestinationTable) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                table,
                saves: 0,
                fail_load: false,
                fail_save: false,
            })),
        }
    }

    /// Make every load fail.
    pub fn failing_load(self) -> Self {
        self.state.lock().expect("lock store").fail_load = true;
        self
    }

    /// Make every save fail.
    pub fn failing_save(self) -> Self {
        self.state.lock().expect("lock store").fail_save = true;
        self
    }

    /// Current stored table.
    pub fn snapshot(&self) -> DestinationTable {
        self.state.lock().expect("lock store").table.clone()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.state.lock().expect("lock store").saves
    }
}

impl DestinationStore for MemoryStore {
    fn load(&self) -> Result<DestinationTable, StoreError> {
        let state = self.state.lock().expect("lock store");
        if state.fail_load {
            return Err(StoreError::Read {
                path: self.describe(),
                source: io::Error::other("scripted load failure"),
            });
        }
        Ok(state.table.clone())
    }

    fn save(&self, table: &DestinationTable) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("lock store");
        if state.fail_save {
            return Err(StoreError::Write {
                path: self.describe(),
                source: io::Error::other("scripted save failure"),
            });
        }
        state.table = table.clone();
        state.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
