//! Capped statutory payroll contributions (QPP/CPP- and EI-style).
//!
//! `contribution = max(0, min((income - exemption) * rate, cap))`
//!
//! The result never exceeds the cap and is never negative, whatever the
//! income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::StatutoryRates;
use crate::calculations::common::round_half_up;

/// One capped contribution, rounded to cents.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::compute_statutory_contribution;
///
/// let qpp = compute_statutory_contribution(dec!(60000), dec!(3500), dec!(0.064), dec!(4339.20));
/// assert_eq!(qpp, dec!(3616.00));
/// ```
pub fn compute_statutory_contribution(
    income: Decimal,
    exemption: Decimal,
    rate: Decimal,
    cap: Decimal,
) -> Decimal {
    let uncapped = (income - exemption) * rate;
    let capped = uncapped.min(cap).max(Decimal::ZERO);
    round_half_up(capped).min(cap.max(Decimal::ZERO))
}

/// Both statutory contributions for one income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryContributions {
    pub pension: Decimal,
    pub insurance: Decimal,
}

impl StatutoryContributions {
    pub fn compute(
        income: Decimal,
        rates: &StatutoryRates,
    ) -> Self {
        Self {
            pension: compute_statutory_contribution(
                income,
                rates.pension_exemption,
                rates.pension_rate,
                rates.pension_cap,
            ),
            insurance: compute_statutory_contribution(
                income,
                rates.insurance_exemption,
                rates.insurance_rate,
                rates.insurance_cap,
            ),
        }
    }

    pub fn total(&self) -> Decimal {
        self.pension + self.insurance
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rates_2025() -> StatutoryRates {
        StatutoryRates {
            tax_year: 2025,
            pension_rate: dec!(0.064),
            pension_exemption: dec!(3500),
            pension_cap: dec!(4339.20),
            insurance_rate: dec!(0.0131),
            insurance_exemption: dec!(0),
            insurance_cap: dec!(860.67),
        }
    }

    // =========================================================================
    // compute_statutory_contribution tests
    // =========================================================================

    #[test]
    fn applies_rate_above_exemption() {
        let result =
            compute_statutory_contribution(dec!(60000), dec!(3500), dec!(0.064), dec!(4339.20));

        // (60000 - 3500) * 0.064 = 3616
        assert_eq!(result, dec!(3616.00));
    }

    #[test]
    fn clamps_to_cap() {
        let result =
            compute_statutory_contribution(dec!(150000), dec!(3500), dec!(0.064), dec!(4339.20));

        assert_eq!(result, dec!(4339.20));
    }

    #[test]
    fn income_below_exemption_contributes_nothing() {
        let result =
            compute_statutory_contribution(dec!(2000), dec!(3500), dec!(0.064), dec!(4339.20));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn zero_income_contributes_nothing() {
        let result = compute_statutory_contribution(dec!(0), dec!(0), dec!(0.0131), dec!(860.67));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn very_large_income_stays_at_cap() {
        let result = compute_statutory_contribution(
            dec!(1000000000000),
            dec!(0),
            dec!(0.0131),
            dec!(860.67),
        );

        assert_eq!(result, dec!(860.67));
    }

    #[test]
    fn rounds_to_cents() {
        // 1234.56 * 0.0131 = 16.172736
        let result =
            compute_statutory_contribution(dec!(1234.56), dec!(0), dec!(0.0131), dec!(860.67));

        assert_eq!(result, dec!(16.17));
    }

    // =========================================================================
    // StatutoryContributions tests
    // =========================================================================

    #[test]
    fn compute_uses_exemption_only_for_pension() {
        let result = StatutoryContributions::compute(dec!(50000), &rates_2025());

        // pension: 46500 * 0.064 = 2976; insurance: 50000 * 0.0131 = 655
        assert_eq!(
            result,
            StatutoryContributions {
                pension: dec!(2976.00),
                insurance: dec!(655.00),
            }
        );
        assert_eq!(result.total(), dec!(3631.00));
    }
}
