// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), with σ the population standard deviation of
// the same window.
//
// The squeeze compares these bands against the Keltner channel bar by bar, so
// they are produced as full-length series rather than a single latest value.

use super::rolling::{add, scale, sma, stdev, subtract};

/// Bollinger band series, each the same length as the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub basis: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `basis` = SMA(`period`)
/// - `upper` = basis + `num_std` * σ
/// - `lower` = basis - `num_std` * σ
///
/// Bars before the first full window are 0.0 in every series.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerBands {
    let basis = sma(closes, period);
    let dev = scale(&stdev(closes, period), num_std);
    let upper = add(&basis, &dev);
    let lower = subtract(&basis, &dev);

    BollingerBands {
        basis,
        upper,
        lower,
    }
}
