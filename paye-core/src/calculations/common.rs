//! Shared helpers for monetary calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoints go away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(67.525)), dec!(67.53));
/// assert_eq!(round_half_up(dec!(67.524)), dec!(67.52));
/// assert_eq!(round_half_up(dec!(-67.525)), dec!(-67.53));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(877.474)), dec!(877.47));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(877.475)), dec!(877.48));
    }

    #[test]
    fn round_half_up_rounds_negative_values_away_from_zero() {
        assert_eq!(round_half_up(dec!(-877.475)), dec!(-877.48));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(877.47)), dec!(877.47));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(dec!(0.00)), dec!(0.00));
    }
}
