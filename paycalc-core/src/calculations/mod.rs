//! Payroll tax calculators and the companion mortgage calculator.
//!
//! Each calculator is a pure function over its inputs; [`crate::TaxCalculator`]
//! composes them into a full breakdown.

mod bracket_tax;
pub mod common;
mod deductions;
mod income;
mod minimum_wage;
mod mortgage;
mod statutory;
mod voluntary;

pub use bracket_tax::{compute_bracket_tax, marginal_rate};
pub use deductions::resolve_deductions;
pub use income::{base_annual_income, bonus_amount, compute_annual_gross_income};
pub use minimum_wage::check_minimum_wage;
pub use mortgage::{
    MortgageError, MortgageInput, MortgagePayment, PaymentFrequency, calculate_mortgage_payment,
};
pub use statutory::{StatutoryContributions, compute_statutory_contribution};
pub use voluntary::{resolve_retirement_contribution, resolve_tax_free_contribution};
