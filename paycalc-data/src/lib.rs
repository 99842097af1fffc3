//! Versioned reference tables for `paycalc-core`, parsed from CSV.

mod loader;

pub use loader::{
    BRACKETS_FILE, BracketRecord, CONTRIBUTION_LIMITS_FILE, MINIMUM_WAGES_FILE,
    MinimumWageRecord, STATUTORY_RATES_FILE, TableLoader, TableLoaderError, TableSources,
};
