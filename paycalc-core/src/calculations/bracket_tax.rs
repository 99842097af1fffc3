//! Marginal bracket taxation.
//!
//! Income is split across the bands of a [`BracketSchedule`] in ascending
//! order and each slice is taxed at its band's rate:
//!
//! | Band            | Portion taxed                           |
//! |-----------------|-----------------------------------------|
//! | `[min, max)`    | `min(income, max) - min`, if `income > min` |
//! | `[min, ∞)`      | `income - min`, if `income > min`       |
//!
//! Accumulation stops at the first band whose `max` is at or above the
//! income, so an income sitting exactly on a boundary is taxed only by the
//! lower band.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycalc_core::calculations::compute_bracket_tax;
//! use paycalc_core::{BracketSchedule, TaxBracket};
//!
//! let schedule = BracketSchedule::new(vec![
//!     TaxBracket::new(dec!(0), Some(dec!(50000)), dec!(0.15)),
//!     TaxBracket::new(dec!(50000), None, dec!(0.20)),
//! ])
//! .unwrap();
//!
//! assert_eq!(compute_bracket_tax(dec!(50000), &schedule), dec!(7500));
//! assert_eq!(compute_bracket_tax(dec!(60000), &schedule), dec!(9500));
//! ```

use rust_decimal::Decimal;

use crate::BracketSchedule;
use crate::calculations::common::round_to_unit;

/// Tax owed on `income`, rounded to the nearest whole unit.
///
/// Zero or negative income owes nothing.
pub fn compute_bracket_tax(
    income: Decimal,
    schedule: &BracketSchedule,
) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    for bracket in schedule.iter() {
        if income <= bracket.min_income {
            break;
        }
        let upper = match bracket.max_income {
            Some(max) => income.min(max),
            None => income,
        };
        tax += (upper - bracket.min_income) * bracket.tax_rate;

        match bracket.max_income {
            Some(max) if income > max => continue,
            _ => break,
        }
    }

    round_to_unit(tax)
}

/// Rate of the band that contains `income`; zero for non-positive income.
pub fn marginal_rate(
    income: Decimal,
    schedule: &BracketSchedule,
) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    schedule
        .iter()
        .find(|b| b.max_income.is_none_or(|max| income <= max))
        .map(|b| b.tax_rate)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn two_band() -> BracketSchedule {
        BracketSchedule::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(50000)), dec!(0.15)),
            TaxBracket::new(dec!(50000), None, dec!(0.20)),
        ])
        .unwrap()
    }

    fn federal_2025() -> BracketSchedule {
        BracketSchedule::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(57375)), dec!(0.15)),
            TaxBracket::new(dec!(57375), Some(dec!(114750)), dec!(0.205)),
            TaxBracket::new(dec!(114750), Some(dec!(177882)), dec!(0.26)),
            TaxBracket::new(dec!(177882), Some(dec!(253414)), dec!(0.29)),
            TaxBracket::new(dec!(253414), None, dec!(0.33)),
        ])
        .unwrap()
    }

    // =========================================================================
    // compute_bracket_tax tests
    // =========================================================================

    #[test]
    fn zero_income_owes_nothing() {
        assert_eq!(compute_bracket_tax(dec!(0), &two_band()), dec!(0));
    }

    #[test]
    fn negative_income_owes_nothing() {
        assert_eq!(compute_bracket_tax(dec!(-1000), &two_band()), dec!(0));
    }

    #[test]
    fn income_on_boundary_uses_lower_band_only() {
        assert_eq!(compute_bracket_tax(dec!(50000), &two_band()), dec!(7500));
    }

    #[test]
    fn income_above_boundary_spills_into_next_band() {
        // 50000 * 0.15 + 10000 * 0.20
        assert_eq!(compute_bracket_tax(dec!(60000), &two_band()), dec!(9500));
    }

    #[test]
    fn result_is_rounded_to_whole_units() {
        // 333.33 * 0.15 = 49.9995
        assert_eq!(compute_bracket_tax(dec!(333.33), &two_band()), dec!(50));
    }

    #[test]
    fn federal_schedule_middle_band() {
        // 57375 * 0.15 + (85000 - 57375) * 0.205 = 8606.25 + 5663.125
        assert_eq!(compute_bracket_tax(dec!(85000), &federal_2025()), dec!(14269));
    }

    #[test]
    fn federal_schedule_top_band() {
        // 8606.25 + 11761.875 + 16414.32 + 21904.28 + 46586 * 0.33
        let tax = compute_bracket_tax(dec!(300000), &federal_2025());

        assert_eq!(tax, dec!(74060));
    }

    #[test]
    fn tax_is_continuous_at_every_boundary() {
        let schedule = federal_2025();
        for bracket in schedule.iter() {
            let Some(max) = bracket.max_income else {
                continue;
            };
            let below = compute_bracket_tax(max, &schedule);
            let above = compute_bracket_tax(max + dec!(1), &schedule);

            assert!(above >= below);
            assert!(above - below <= dec!(1), "jump at {max}");
        }
    }

    // =========================================================================
    // marginal_rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_on_boundary_is_lower_band() {
        assert_eq!(marginal_rate(dec!(50000), &two_band()), dec!(0.15));
    }

    #[test]
    fn marginal_rate_in_top_band() {
        assert_eq!(marginal_rate(dec!(1000000), &two_band()), dec!(0.20));
    }

    #[test]
    fn marginal_rate_is_zero_without_income() {
        assert_eq!(marginal_rate(dec!(0), &two_band()), dec!(0));
    }
}
