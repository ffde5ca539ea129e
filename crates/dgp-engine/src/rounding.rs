//! Protocol rounding
//!
//! All score aggregation uses half-up rounding: `round(0.5) = 1` and
//! `round(-0.5) = 0`. Confidence values round the same way at two decimals.

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round to two decimals, ties toward positive infinity.
pub fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_up_ties() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(79.5), 80);
    }

    #[test]
    fn test_half_up_non_ties() {
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(0.51), 1);
        assert_eq!(round_half_up(-0.51), -1);
        assert_eq!(round_half_up(87.5), 88);
        assert_eq!(round_half_up(100.0), 100);
    }

    #[test]
    fn test_two_decimal_rounding() {
        assert_eq!(round_two_decimals(1.0 / 4.0), 0.25);
        assert_eq!(round_two_decimals(1.0 / 7.0), 0.14);
        assert_eq!(round_two_decimals(1.0 / 3.0), 0.33);
        assert_eq!(round_two_decimals(0.5), 0.5);
        assert_eq!(round_two_decimals(0.125), 0.13);
    }
}
