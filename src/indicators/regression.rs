// =============================================================================
// Linear Regression Momentum
// =============================================================================
//
// The oscillator is the least-squares trend value of the detrended close:
//
//   avgHL_i  = (highest(high, p)_i + lowest(low, p)_i) / 2      clamped window
//   input_i  = round12(close_i - (avgHL_i + ma_i) / 2)
//   value_i  = round12(a + b * (p - 1))   fit y = a + b*x over input_{i-p+1..i}
//
// with x = 0..p-1 in window order and the closed-form OLS solution
//
//   b = (n Σxy - Σx Σy) / (n Σx² - (Σx)²)
//   a = (Σy - b Σx) / n
//
// Bars before the first full window carry 0.0.

use tracing::trace;

use super::precision::round12;
use super::rolling::{highest, lowest};

/// Intercept and slope of an ordinary least-squares line over `ys`, with
/// x = 0, 1, .., len - 1.
///
/// Returns `None` for fewer than two points, where the denominator vanishes.
pub fn least_squares(ys: &[f64]) -> Option<(f64, f64)> {
    if ys.len() < 2 {
        return None;
    }

    let n = ys.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for (i, &y) in ys.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some((intercept, slope))
}

/// Value of the fitted line at the last window position, i.e. the current
/// bar's trend value. Windows shorter than two points yield 0.0.
pub fn linear_regression_value(ys: &[f64]) -> f64 {
    match least_squares(ys) {
        Some((intercept, slope)) => intercept + slope * (ys.len() - 1) as f64,
        None => {
            trace!(len = ys.len(), "regression window too short, emitting 0");
            0.0
        }
    }
}

/// Close detrended against the midpoint of the clamped high/low range and the
/// Keltner moving average `ma`, rounded to 12 decimals.
///
/// Defined for every bar; during warm-up the extrema cover the bars seen so
/// far and `ma` is whatever the moving average holds there.
pub fn detrended_close(
    close: &[f64],
    high: &[f64],
    low: &[f64],
    ma: &[f64],
    period: usize,
) -> Vec<f64> {
    let highest_high = highest(high, period);
    let lowest_low = lowest(low, period);

    (0..close.len())
        .map(|i| {
            let avg_hl = (highest_high[i] + lowest_low[i]) / 2.0;
            round12(close[i] - (avg_hl + ma[i]) / 2.0)
        })
        .collect()
}

/// Rolling linear-regression value of `input` over `period` bars, rounded to
/// 12 decimals. Indices `< period - 1` are 0.0.
pub fn rolling_regression(input: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![0.0; input.len()];
    if period == 0 || input.len() < period {
        return result;
    }

    for i in (period - 1)..input.len() {
        result[i] = round12(linear_regression_value(&input[i + 1 - period..=i]));
    }
    result
}
