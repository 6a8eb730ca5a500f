// =============================================================================
// Keltner Channel
// =============================================================================
//
//   middle = SMA(close, period)
//   range  = TrueRange            (use_true_range)
//          | high - low           (otherwise)
//   upper  = middle + mult * SMA(range, period)
//   lower  = middle - mult * SMA(range, period)

use super::atr::true_range;
use super::rolling::{add, scale, sma, subtract};

/// Keltner channel series, each the same length as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct KeltnerChannel {
    /// SMA of closes. Also feeds the regression detrend.
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Per-bar volatility range feeding the channel width.
pub fn range_series(high: &[f64], low: &[f64], close: &[f64], use_true_range: bool) -> Vec<f64> {
    if use_true_range {
        true_range(high, low, close)
    } else {
        subtract(high, low)
    }
}

/// Calculate the Keltner channel over `period` bars with width multiplier
/// `mult`.
pub fn calculate_keltner(
    close: &[f64],
    high: &[f64],
    low: &[f64],
    period: usize,
    mult: f64,
    use_true_range: bool,
) -> KeltnerChannel {
    let middle = sma(close, period);
    let range_ma = sma(&range_series(high, low, close, use_true_range), period);
    let width = scale(&range_ma, mult);
    let upper = add(&middle, &width);
    let lower = subtract(&middle, &width);

    KeltnerChannel {
        middle,
        upper,
        lower,
    }
}
