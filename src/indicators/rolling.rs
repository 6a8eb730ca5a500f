// =============================================================================
// Rolling Window Statistics
// =============================================================================
//
// Full-length series primitives: every output has the same length as its
// input, and positions without a complete window (`i < period - 1`) hold 0.0.
//
//   SMA_i   = (x_{i-p+1} + ... + x_i) / p          running sum, O(n)
//   SD_i    = sqrt(Σ (x_j - SMA_i)^2 / p)          population σ
//
// `highest` / `lowest` clamp their window to the available history instead of
// leaving the warm-up undefined: bar i looks back over min(p, i + 1) bars.

/// Simple moving average over a trailing window of `period` values.
///
/// Uses a running sum (add the incoming value, drop the one leaving the
/// window). A zero `period` yields an all-zero series.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![0.0; data.len()];
    if period == 0 {
        return result;
    }

    let divisor = period as f64;
    let mut sum = 0.0_f64;
    for (i, &x) in data.iter().enumerate() {
        sum += x;
        if i >= period {
            sum -= data[i - period];
        }
        if i + 1 >= period {
            result[i] = sum / divisor;
        }
    }
    result
}

/// Population standard deviation (divides by `period`, not `period - 1`).
pub fn stdev(data: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![0.0; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    let divisor = period as f64;
    for i in (period - 1)..data.len() {
        let window = &data[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / divisor;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / divisor;
        result[i] = variance.sqrt();
    }
    result
}

/// Start index of the trailing window ending at `i`, clamped to the series
/// start.
#[inline]
fn window_start(i: usize, period: usize) -> usize {
    (i + 1).saturating_sub(period.max(1))
}

/// Highest value over the trailing `period` bars, clamped at the series start.
pub fn highest(data: &[f64], period: usize) -> Vec<f64> {
    (0..data.len())
        .map(|i| max_of(&data[window_start(i, period)..=i]))
        .collect()
}

/// Lowest value over the trailing `period` bars, clamped at the series start.
pub fn lowest(data: &[f64], period: usize) -> Vec<f64> {
    (0..data.len())
        .map(|i| min_of(&data[window_start(i, period)..=i]))
        .collect()
}

fn max_of(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::INFINITY, f64::min)
}

// -----------------------------------------------------------------------------
// Elementwise helpers
// -----------------------------------------------------------------------------

/// `a[i] + b[i]`. Both slices must have the same length.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// `a[i] - b[i]`. Both slices must have the same length.
pub fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// `a[i] * k`.
pub fn scale(a: &[f64], k: f64) -> Vec<f64> {
    a.iter().map(|x| x * k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn sma_warm_up_is_zero() {
        let out = sma(&ascending(5), 3);
        assert_eq!(out, vec![0.0, 0.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn sma_matches_naive_mean() {
        let data: Vec<f64> = (0..40).map(|i| (i as f64 * 0.7).sin() * 10.0 + 50.0).collect();
        let out = sma(&data, 7);
        for i in 6..data.len() {
            let naive = data[i - 6..=i].iter().sum::<f64>() / 7.0;
            assert!((out[i] - naive).abs() < 1e-9, "index {i}: {} vs {naive}", out[i]);
        }
    }

    #[test]
    fn sma_period_longer_than_series() {
        assert_eq!(sma(&[1.0, 2.0], 5), vec![0.0, 0.0]);
    }

    #[test]
    fn sma_zero_period() {
        assert_eq!(sma(&[1.0, 2.0, 3.0], 0), vec![0.0; 3]);
    }

    #[test]
    fn stdev_is_population() {
        // [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population σ = 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = stdev(&data, 8);
        assert!((out[7] - 2.0).abs() < 1e-12);
        assert!(out[..7].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn stdev_flat_is_zero() {
        let out = stdev(&[5.0; 6], 3);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn extrema_clamp_at_series_start() {
        let high = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(highest(&high, 3), vec![3.0, 3.0, 4.0, 4.0, 5.0]);
        assert_eq!(lowest(&high, 3), vec![3.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn extrema_window_of_one() {
        let data = [2.0, 7.0, 1.0];
        assert_eq!(highest(&data, 1), data.to_vec());
        assert_eq!(lowest(&data, 1), data.to_vec());
    }

    #[test]
    fn elementwise_helpers() {
        let a = [1.0, 2.0, 3.0];
        let b = [0.5, 0.5, 1.0];
        assert_eq!(add(&a, &b), vec![1.5, 2.5, 4.0]);
        assert_eq!(subtract(&a, &b), vec![0.5, 1.5, 2.0]);
        assert_eq!(scale(&a, 2.0), vec![2.0, 4.0, 6.0]);
    }
}
