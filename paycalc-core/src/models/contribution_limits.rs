use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::statutory_rates::{RateTableError, check_non_negative};

/// Annual ceilings on voluntary savings plan contributions.
///
/// Retirement-plan (RRSP) contributions are limited both by a dollar cap
/// and by a fraction of annual income; tax-free savings (TFSA)
/// contributions only by a dollar cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    pub tax_year: i32,
    pub retirement_cap: Decimal,
    pub retirement_income_fraction: Decimal,
    pub tax_free_cap: Decimal,
}

impl ContributionLimits {
    /// # Errors
    ///
    /// Returns [`RateTableError`] if a cap is negative or the income
    /// fraction is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), RateTableError> {
        check_non_negative("retirement_cap", self.retirement_cap)?;
        check_non_negative("tax_free_cap", self.tax_free_cap)?;
        if self.retirement_income_fraction < Decimal::ZERO
            || self.retirement_income_fraction > Decimal::ONE
        {
            return Err(RateTableError::RateOutOfRange {
                field: "retirement_income_fraction",
                value: self.retirement_income_fraction,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn validate_accepts_full_income_fraction() {
        let limits = ContributionLimits {
            tax_year: 2025,
            retirement_cap: dec!(32490),
            retirement_income_fraction: dec!(1),
            tax_free_cap: dec!(7000),
        };

        assert_eq!(limits.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_tax_free_cap() {
        let limits = ContributionLimits {
            tax_year: 2025,
            retirement_cap: dec!(32490),
            retirement_income_fraction: dec!(0.18),
            tax_free_cap: dec!(-7000),
        };

        assert_eq!(
            limits.validate(),
            Err(RateTableError::Negative {
                field: "tax_free_cap",
                value: dec!(-7000),
            })
        );
    }
}
