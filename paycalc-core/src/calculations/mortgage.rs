//! Amortizing mortgage payment calculator.
//!
//! Uses the standard fixed-payment formula with monthly compounding:
//!
//! ```text
//! M = P · r(1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! where `P` is the purchase price less the down payment, `r` the annual
//! rate divided by 12 and `n` the number of monthly payments. A zero rate
//! degenerates to `P / n`.
//!
//! The monthly payment is rounded to a whole unit first; the annual figure
//! is exactly twelve of those, and the bi-weekly figure is that annual total
//! spread over 26 payments.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycalc_core::calculations::{MortgageInput, PaymentFrequency, calculate_mortgage_payment};
//!
//! let input = MortgageInput {
//!     purchase_price: dec!(400000),
//!     down_payment: dec!(80000),
//!     annual_rate_percent: dec!(5.5),
//!     amortization_years: 25,
//!     frequency: PaymentFrequency::Monthly,
//! };
//!
//! let payment = calculate_mortgage_payment(&input).unwrap();
//!
//! assert_eq!(payment.principal, dec!(320000));
//! assert_eq!(payment.annual, payment.monthly * dec!(12));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_to_unit;

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const BI_WEEKLY_PERIODS: Decimal = Decimal::from_parts(26, 0, 0, false, 0);
const MAX_AMORTIZATION_YEARS: u32 = 40;

/// Errors that can occur during mortgage calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MortgageError {
    #[error("purchase price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("down payment must be non-negative, got {0}")]
    NegativeDownPayment(Decimal),

    #[error("down payment {down_payment} must be less than the purchase price {purchase_price}")]
    DownPaymentTooLarge {
        down_payment: Decimal,
        purchase_price: Decimal,
    },

    #[error("interest rate must be non-negative, got {0}")]
    NegativeRate(Decimal),

    #[error("amortization must be between 1 and 40 years, got {0}")]
    AmortizationOutOfRange(u32),

    #[error("payment calculation overflowed")]
    Overflow,
}

/// How often the borrower pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    Annual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub purchase_price: Decimal,
    pub down_payment: Decimal,
    /// Annual nominal rate in percent (5.5 means 5.5%).
    pub annual_rate_percent: Decimal,
    pub amortization_years: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

impl MortgageInput {
    /// # Errors
    ///
    /// Returns [`MortgageError`] for a non-positive price, a negative or
    /// too-large down payment, a negative rate, or an amortization outside
    /// 1 to 40 years.
    pub fn validate(&self) -> Result<(), MortgageError> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(MortgageError::NonPositivePrice(self.purchase_price));
        }
        if self.down_payment < Decimal::ZERO {
            return Err(MortgageError::NegativeDownPayment(self.down_payment));
        }
        if self.down_payment >= self.purchase_price {
            return Err(MortgageError::DownPaymentTooLarge {
                down_payment: self.down_payment,
                purchase_price: self.purchase_price,
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::NegativeRate(self.annual_rate_percent));
        }
        if self.amortization_years == 0 || self.amortization_years > MAX_AMORTIZATION_YEARS {
            return Err(MortgageError::AmortizationOutOfRange(
                self.amortization_years,
            ));
        }
        Ok(())
    }
}

/// Payment amounts, all rounded to whole units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgagePayment {
    pub principal: Decimal,
    pub monthly: Decimal,
    pub bi_weekly: Decimal,
    pub annual: Decimal,
    /// Sum of all monthly payments over the amortization.
    pub total_paid: Decimal,
    pub total_interest: Decimal,
    pub frequency: PaymentFrequency,
}

impl MortgagePayment {
    /// The payment matching the requested frequency.
    pub fn selected(&self) -> Decimal {
        match self.frequency {
            PaymentFrequency::Monthly => self.monthly,
            PaymentFrequency::BiWeekly => self.bi_weekly,
            PaymentFrequency::Annual => self.annual,
        }
    }
}

/// Unrounded monthly payment for `principal` over `payments` months.
fn monthly_payment(
    principal: Decimal,
    monthly_rate: Decimal,
    payments: u32,
) -> Result<Decimal, MortgageError> {
    let n = Decimal::from(payments);
    if monthly_rate.is_zero() {
        return Ok(principal / n);
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(payments))
        .ok_or(MortgageError::Overflow)?;
    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .ok_or(MortgageError::Overflow)?;

    numerator
        .checked_div(growth - Decimal::ONE)
        .ok_or(MortgageError::Overflow)
}

/// Computes the payment schedule summary for `input`.
///
/// # Errors
///
/// Returns [`MortgageError`] when the input fails
/// [`MortgageInput::validate`] or the arithmetic overflows.
pub fn calculate_mortgage_payment(input: &MortgageInput) -> Result<MortgagePayment, MortgageError> {
    input.validate()?;

    let principal = input.purchase_price - input.down_payment;
    let monthly_rate = input.annual_rate_percent / Decimal::ONE_HUNDRED / MONTHS;
    let payments = input.amortization_years * 12;

    let monthly = round_to_unit(monthly_payment(principal, monthly_rate, payments)?);
    let annual = monthly.checked_mul(MONTHS).ok_or(MortgageError::Overflow)?;
    let bi_weekly = round_to_unit(annual / BI_WEEKLY_PERIODS);
    let total_paid = monthly
        .checked_mul(Decimal::from(payments))
        .ok_or(MortgageError::Overflow)?;

    Ok(MortgagePayment {
        principal,
        monthly,
        bi_weekly,
        annual,
        total_paid,
        total_interest: total_paid - principal,
        frequency: input.frequency,
    })
}
