//! Versioned reference tables and the providers that hand them to the
//! calculator.

mod provider;
mod table_set;

pub use provider::{ReloadableTables, TableProvider};
pub use table_set::{ConfigurationError, Resolved, TableError, TableSet, TableSetBuilder};
