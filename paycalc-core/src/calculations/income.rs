//! Annual gross income from a base salary and a list of bonuses.
//!
//! | Source                  | Annual amount                    |
//! |-------------------------|----------------------------------|
//! | annual base             | `amount`                         |
//! | hourly base             | `rate × hours_per_week × 52`     |
//! | percentage bonus        | `base × percent / 100`           |
//! | hourly premium          | `amount × hours × 52`            |
//! | travel allowance        | `amount × distance × 52`         |

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::percent_of;
use crate::{BonusEntry, IncomeSpec, WEEKS_PER_YEAR};

/// Base salary before bonuses.
pub fn base_annual_income(spec: &IncomeSpec) -> Decimal {
    match spec {
        IncomeSpec::Annual { amount } => *amount,
        IncomeSpec::Hourly {
            rate,
            hours_per_week,
        } => rate * hours_per_week * WEEKS_PER_YEAR,
    }
}

/// Annual value of a single bonus given the base annual income.
pub fn bonus_amount(
    bonus: &BonusEntry,
    base: Decimal,
) -> Decimal {
    match bonus {
        BonusEntry::Percentage { percent } => percent_of(base, *percent),
        BonusEntry::HourlyPremium { amount, hours } => amount * hours * WEEKS_PER_YEAR,
        BonusEntry::TravelAllowance { amount, distance } => amount * distance * WEEKS_PER_YEAR,
    }
}

/// Base salary plus every bonus.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::compute_annual_gross_income;
/// use paycalc_core::{BonusEntry, IncomeSpec};
///
/// let income = IncomeSpec::Hourly { rate: dec!(25), hours_per_week: dec!(40) };
/// let bonuses = [BonusEntry::Percentage { percent: dec!(10) }];
///
/// assert_eq!(compute_annual_gross_income(&income, &bonuses), dec!(57200));
/// ```
pub fn compute_annual_gross_income(
    spec: &IncomeSpec,
    bonuses: &[BonusEntry],
) -> Decimal {
    let base = base_annual_income(spec);
    let bonus_total: Decimal = bonuses
        .iter()
        .map(|bonus| {
            let amount = bonus_amount(bonus, base);
            debug!(?bonus, %amount, "bonus annualised");
            amount
        })
        .sum();

    base + bonus_total
}
