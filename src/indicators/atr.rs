// =============================================================================
// True Range & Average True Range (ATR) — Simple Moving Average Method
// =============================================================================
//
// True Range (TR) for each bar decomposes the entire range including gaps:
//   TR_0 = H_0 - L_0
//   TR_t = max(H_t - L_t, |H_t - C_{t-1}|, |L_t - C_{t-1}|)
//
// ATR is the plain running-sum SMA of TR over `period` bars (not Wilder's
// smoothing), so the volatility gate moves in lock-step with the Keltner
// channel width when both use the same window.
// =============================================================================

use super::rolling::sma;

/// Compute the True Range series. The first bar has no previous close and
/// falls back to its own high-low spread.
///
/// All three slices must have the same length; the output has that length.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    debug_assert!(high.len() == low.len() && low.len() == close.len());

    let mut result = Vec::with_capacity(high.len());
    for i in 0..high.len() {
        let hl = high[i] - low[i];
        if i == 0 {
            result.push(hl);
            continue;
        }
        let prev_close = close[i - 1];
        let hc = (high[i] - prev_close).abs();
        let lc = (low[i] - prev_close).abs();
        result.push(hl.max(hc).max(lc));
    }
    result
}

/// Average True Range: `sma(true_range(..), period)`.
///
/// Indices `< period - 1` are 0.0 (window not yet filled).
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    sma(&true_range(high, low, close), period)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bar_uses_high_low_spread() {
        let tr = true_range(&[105.0], &[95.0], &[102.0]);
        assert_eq!(tr, vec![10.0]);
    }

    #[test]
    fn true_range_uses_prev_close_on_gap() {
        // Gap up: |115 - 95| = 20 > 115 - 108 = 7.
        let high = [105.0, 115.0];
        let low = [95.0, 108.0];
        let close = [95.0, 112.0];
        let tr = true_range(&high, &low, &close);
        assert_eq!(tr[1], 20.0);
    }

    #[test]
    fn true_range_gap_down() {
        // Gap down: |90 - 110| = 20 > 92 - 90 = 2.
        let high = [112.0, 92.0];
        let low = [105.0, 90.0];
        let close = [110.0, 91.0];
        let tr = true_range(&high, &low, &close);
        assert_eq!(tr[1], 20.0);
    }

    #[test]
    fn empty_input() {
        assert!(true_range(&[], &[], &[]).is_empty());
        assert!(atr(&[], &[], &[], 14).is_empty());
    }

    #[test]
    fn atr_constant_range() {
        // Every bar spans 10 around a close at its midpoint with no gaps.
        let close: Vec<f64> = vec![100.0; 30];
        let high: Vec<f64> = close.iter().map(|c| c + 5.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 5.0).collect();
        let out = atr(&high, &low, &close, 14);
        assert!(out[..13].iter().all(|&v| v == 0.0));
        assert!(out[13..].iter().all(|&v| (v - 10.0).abs() < 1e-12));
    }

    #[test]
    fn atr_is_sma_of_true_range() {
        let close: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.9).sin() * 4.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 2.0).collect();
        let tr = true_range(&high, &low, &close);
        let out = atr(&high, &low, &close, 5);
        for i in 4..close.len() {
            let naive = tr[i - 4..=i].iter().sum::<f64>() / 5.0;
            assert!((out[i] - naive).abs() < 1e-9);
        }
    }

    #[test]
    fn flat_market_has_zero_atr() {
        let flat = [5.0; 6];
        let out = atr(&flat, &flat, &flat, 3);
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
