//! Rounding and arithmetic helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates to cents toward zero. Used where the result must never exceed
/// the unrounded value.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::common::round_down_to_cents;
///
/// assert_eq!(round_down_to_cents(dec!(1500.0099)), dec!(1500.00));
/// ```
pub fn round_down_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Rounds to the nearest whole currency unit, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(7499.50)), dec!(7500));
/// assert_eq!(round_to_unit(dec!(7499.49)), dec!(7499));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `base × percent / 100`.
pub fn percent_of(
    base: Decimal,
    percent: Decimal,
) -> Decimal {
    base * percent / HUNDRED
}

/// `numerator / denominator` rounded to four places, or zero when the
/// denominator is not positive.
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (numerator / denominator).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    #[test]
    fn round_down_to_cents_never_rounds_up() {
        assert_eq!(round_down_to_cents(dec!(0.045)), dec!(0.04));
        assert_eq!(round_down_to_cents(dec!(18.005)), dec!(18.00));
        assert_eq!(round_down_to_cents(dec!(18.00)), dec!(18.00));
    }

    // =========================================================================
    // round_to_unit tests
    // =========================================================================

    #[test]
    fn round_to_unit_rounds_half_away_from_zero() {
        assert_eq!(round_to_unit(dec!(0.5)), dec!(1));
        assert_eq!(round_to_unit(dec!(-0.5)), dec!(-1));
    }

    #[test]
    fn round_to_unit_keeps_whole_values() {
        assert_eq!(round_to_unit(dec!(7500)), dec!(7500));
    }

    // =========================================================================
    // percent_of / ratio_or_zero tests
    // =========================================================================

    #[test]
    fn percent_of_scales_by_hundredths() {
        assert_eq!(percent_of(dec!(50000), dec!(10)), dec!(5000));
    }

    #[test]
    fn ratio_or_zero_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(100), dec!(0)), dec!(0));
    }

    #[test]
    fn ratio_or_zero_rounds_to_four_places() {
        assert_eq!(ratio_or_zero(dec!(1), dec!(3)), dec!(0.3333));
    }
}
