//! Atomically swappable holder for the live redirect table.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::domain::RedirectTable;

/// Shared handle to the table currently used for requests.
///
/// Readers take a snapshot and keep using it for the whole request, even if a
/// reload swaps in a new table meanwhile. Tables are replaced whole; a reader
/// never observes a partially loaded one.
#[derive(Clone)]
pub struct RedirectStore {
    table: Arc<ArcSwap<RedirectTable>>,
}

impl RedirectStore {
    pub fn new(table: RedirectTable) -> Self {
        Self {
            table: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Creates a store serving an empty table until the first load completes.
    pub fn empty() -> Self {
        Self::new(RedirectTable::empty())
    }

    /// Returns the current table.
    pub fn snapshot(&self) -> Arc<RedirectTable> {
        self.table.load_full()
    }

    /// Replaces the current table.
    pub fn swap(&self, table: RedirectTable) {
        self.table.store(Arc::new(table));
    }
}

impl Default for RedirectStore {
    fn default() -> Self {
        Self::empty()
    }
}
