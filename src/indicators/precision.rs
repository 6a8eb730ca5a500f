// =============================================================================
// Decimal Rounding
// =============================================================================
//
// Band containment and the regression output are compared against external
// reference values at 12 decimal places. Rounding both sides to that precision
// before comparing removes representation noise left over from the rolling
// sums.
//
//   round(x, d) = round_half_away(x * 10^d) / 10^d

/// Decimal places used for every comparison-sensitive value.
pub const PRICE_DECIMALS: u32 = 12;

/// Round `value` to `decimals` decimal places, half away from zero.
///
/// Non-finite input, and input whose scaled value overflows, is passed
/// through unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Round to [`PRICE_DECIMALS`].
#[inline]
pub fn round12(value: f64) -> f64 {
    round_to(value, PRICE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accumulated_noise() {
        let noisy = 0.1 + 0.2;
        assert_ne!(noisy, 0.3);
        assert_eq!(round12(noisy), 0.3);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }

    #[test]
    fn rounding_is_idempotent() {
        let samples = [
            0.0,
            1.0 / 3.0,
            -2.0 / 3.0,
            1.166_666_666_666_666_7,
            123.456_789_012_345_67,
            -0.000_000_000_000_4,
            2000.123_456_789_012_3,
            2300.5,
            5000.123_456_789,
            65_432.123_456_789,
            1_000_000.1,
        ];
        for &x in &samples {
            let once = round12(x);
            assert_eq!(round12(once), once, "re-rounding changed {x}");
        }
    }

    #[test]
    fn rounds_at_high_price_levels() {
        // One ulp below 3000.25 is 3000.249999999999545..., which is 3000.25
        // at 12 decimals.
        let level = 3000.25_f64;
        let below = f64::from_bits(level.to_bits() - 1);
        assert!(below < level);
        assert_eq!(round12(below), round12(level));
        assert_eq!(round12(below), 3000.25);
    }

    #[test]
    fn overflowing_scale_passes_through() {
        let huge = 1.0e300;
        assert_eq!(round12(huge), huge);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(round12(f64::NAN).is_nan());
        assert_eq!(round12(f64::INFINITY), f64::INFINITY);
    }
}
