//! Money arithmetic in `Decimal`. Amounts travel as `f64` on the wire and
//! are converted on the way in and out.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Wire amount to `Decimal`. Non-finite values become zero.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// `Decimal` to a wire amount, rounded to cents.
pub fn to_f64(value: Decimal) -> f64 {
    // Parsing the decimal text gives the nearest f64, so 29.99 stays 29.99.
    round_cents(value).to_string().parse().unwrap_or_default()
}

pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Price of `quantity` units at `unit_price`, rounded to cents.
pub fn line_total(unit_price: f64, quantity: i32) -> Decimal {
    round_cents(to_decimal(unit_price) * Decimal::from(quantity))
}

/// True when the wire amount `actual` is exactly `expected`.
pub fn same_amount(expected: Decimal, actual: f64) -> bool {
    actual.is_finite() && to_decimal(actual) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_matches_price_times_quantity() {
        assert_eq!(line_total(29.99, 1), Decimal::new(2999, 2));
        assert_eq!(line_total(29.99, 3), Decimal::new(8997, 2));
        assert_eq!(line_total(0.1, 3), Decimal::new(3, 1));
        assert_eq!(line_total(12.5, 0), Decimal::ZERO);
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!(line_total(0.125, 1), Decimal::new(13, 2));
        assert_eq!(line_total(0.125, 3), Decimal::new(38, 2));
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
        assert_eq!(to_f64(line_total(0.1, 3)), 0.3);
    }

    #[test]
    fn same_amount_is_exact() {
        assert!(same_amount(line_total(29.99, 1), 29.99));
        assert!(same_amount(line_total(0.1, 3), 0.3));
        assert!(!same_amount(line_total(29.99, 1), 29.994));
        assert!(!same_amount(line_total(29.99, 1), 30.0));
        assert!(!same_amount(Decimal::ZERO, f64::NAN));
    }
}
