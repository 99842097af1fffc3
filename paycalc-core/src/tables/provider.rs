use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::TableSet;

/// Source of the reference tables a calculation runs against.
///
/// A calculation takes one snapshot and uses it throughout, so a reload
/// that lands mid-calculation is never observed half-applied.
pub trait TableProvider: Send + Sync {
    fn snapshot(&self) -> Arc<TableSet>;
}

/// Tables fixed for the life of the process.
impl TableProvider for Arc<TableSet> {
    fn snapshot(&self) -> Arc<TableSet> {
        Arc::clone(self)
    }
}

/// Tables that can be swapped for a new tax year without restarting.
///
/// [`replace`](Self::replace) installs a complete new [`TableSet`] in one
/// step; readers holding an older snapshot keep using it unchanged.
#[derive(Debug)]
pub struct ReloadableTables {
    current: RwLock<Arc<TableSet>>,
}

impl ReloadableTables {
    pub fn new(tables: TableSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(tables)),
        }
    }

    /// Installs `tables` and returns the set it replaced.
    pub fn replace(
        &self,
        tables: TableSet,
    ) -> Arc<TableSet> {
        let next = Arc::new(tables);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!("reference tables replaced");
        std::mem::replace(&mut *guard, next)
    }
}

impl TableProvider for ReloadableTables {
    fn snapshot(&self) -> Arc<TableSet> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }
}
