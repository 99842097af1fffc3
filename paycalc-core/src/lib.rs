//! Canadian payroll tax estimation.
//!
//! [`TaxCalculator`] turns a [`TaxInput`] into a [`TaxResult`] using the
//! reference tables exposed by a [`tables::TableProvider`].

pub mod calculations;
mod engine;
pub mod models;
pub mod tables;

pub use engine::{CalculationError, InputError, MAX_AMOUNT, TaxCalculator, validate_input};
pub use models::*;
pub use tables::{ConfigurationError, TableError, TableSet};
