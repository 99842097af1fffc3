//! Retirement-plan (RRSP-style) and tax-free-savings (TFSA-style)
//! contributions resolved against their caps.
//!
//! | Plan       | Candidate                          | Caps                                   |
//! |------------|------------------------------------|----------------------------------------|
//! | retirement | `income × percent/100` or `amount` | `income × income_fraction`, dollar cap |
//! | tax-free   | `income × percent/100` or `amount` | dollar cap                             |
//!
//! Only the retirement contribution reduces taxable income; the tax-free
//! contribution is taken out of net pay after tax.
//!
//! Results are truncated to cents so they never exceed the request or a cap.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_down_to_cents};
use crate::{AmountKind, ContributionLimits, ContributionSpec};

fn candidate(
    spec: &ContributionSpec,
    annual_income: Decimal,
) -> Decimal {
    match spec.kind {
        AmountKind::Percentage => percent_of(annual_income, spec.amount),
        AmountKind::FixedAmount => spec.amount,
    }
}

/// `min(candidate, income × fraction, dollar cap)`, or zero when absent.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::resolve_retirement_contribution;
/// use paycalc_core::{ContributionLimits, ContributionSpec};
///
/// let limits = ContributionLimits {
///     tax_year: 2025,
///     retirement_cap: dec!(32490),
///     retirement_income_fraction: dec!(0.18),
///     tax_free_cap: dec!(7000),
/// };
/// let spec = ContributionSpec::fixed(dec!(20000));
///
/// // 18% of 100000 is the binding cap
/// assert_eq!(
///     resolve_retirement_contribution(Some(&spec), dec!(100000), &limits),
///     dec!(18000.00)
/// );
/// ```
pub fn resolve_retirement_contribution(
    spec: Option<&ContributionSpec>,
    annual_income: Decimal,
    limits: &ContributionLimits,
) -> Decimal {
    let Some(spec) = spec else {
        return Decimal::ZERO;
    };
    let income_cap = (annual_income * limits.retirement_income_fraction).max(Decimal::ZERO);
    let resolved = candidate(spec, annual_income)
        .min(income_cap)
        .min(limits.retirement_cap)
        .max(Decimal::ZERO);

    round_down_to_cents(resolved)
}

/// `min(candidate, dollar cap)`, or zero when absent.
pub fn resolve_tax_free_contribution(
    spec: Option<&ContributionSpec>,
    annual_income: Decimal,
    limits: &ContributionLimits,
) -> Decimal {
    let Some(spec) = spec else {
        return Decimal::ZERO;
    };
    let resolved = candidate(spec, annual_income)
        .min(limits.tax_free_cap)
        .max(Decimal::ZERO);

    round_down_to_cents(resolved)
}
