use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a per-year rate or limit row is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("{field} must be in [0, 1), got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
}

/// Mandatory payroll contribution parameters for one tax year.
///
/// The pension-style contribution (QPP/CPP) applies its rate above a fixed
/// exemption floor; the insurance-style contribution (EI) normally has a
/// zero exemption. Both are capped at a dollar amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    pub tax_year: i32,
    pub pension_rate: Decimal,
    pub pension_exemption: Decimal,
    pub pension_cap: Decimal,
    pub insurance_rate: Decimal,
    pub insurance_exemption: Decimal,
    pub insurance_cap: Decimal,
}

impl StatutoryRates {
    /// # Errors
    ///
    /// Returns [`RateTableError`] if a rate is outside `[0, 1)` or a cap or
    /// exemption is negative.
    pub fn validate(&self) -> Result<(), RateTableError> {
        check_rate("pension_rate", self.pension_rate)?;
        check_rate("insurance_rate", self.insurance_rate)?;
        check_non_negative("pension_exemption", self.pension_exemption)?;
        check_non_negative("pension_cap", self.pension_cap)?;
        check_non_negative("insurance_exemption", self.insurance_exemption)?;
        check_non_negative("insurance_cap", self.insurance_cap)
    }
}

pub(crate) fn check_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), RateTableError> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(RateTableError::RateOutOfRange { field, value });
    }
    Ok(())
}

pub(crate) fn check_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), RateTableError> {
    if value < Decimal::ZERO {
        return Err(RateTableError::Negative { field, value });
    }
    Ok(())
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

    #[test]
    fn validate_accepts_published_rates() {
        assert_eq!(rates_2025().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_rate_of_one() {
        let mut rates = rates_2025();
        rates.insurance_rate = dec!(1);

        assert_eq!(
            rates.validate(),
            Err(RateTableError::RateOutOfRange {
                field: "insurance_rate",
                value: dec!(1),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_cap() {
        let mut rates = rates_2025();
        rates.pension_cap = dec!(-1);

        assert_eq!(
            rates.validate(),
            Err(RateTableError::Negative {
                field: "pension_cap",
                value: dec!(-1),
            })
        );
    }
}
