// =============================================================================
// Squeeze Indicator
// =============================================================================
//
// A squeeze is on when the Bollinger Bands sit entirely inside the Keltner
// Channel while the market still moves enough to matter:
//
//   squeeze_i = lowerBB_i >= lowerKC_i
//            && upperBB_i <= upperKC_i
//            && ATR_i > min_volatility
//
// Band values are rounded to 12 decimals before comparison. Alongside the
// flag, every bar carries the linear-regression momentum value (see
// `regression`).
//
// The indicator is stateless: each call recomputes every series from the
// inputs, so one instance can be shared freely across threads.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::atr::atr;
use super::bollinger::{calculate_bollinger, BollingerBands};
use super::keltner::{calculate_keltner, KeltnerChannel};
use super::precision::round12;
use super::regression::{detrended_close, rolling_regression};
use crate::error::IndicatorError;

// =============================================================================
// Parameters
// =============================================================================

fn default_bb_length() -> usize {
    20
}

fn default_bb_mult() -> f64 {
    2.0
}

fn default_kc_length() -> usize {
    20
}

fn default_kc_mult() -> f64 {
    1.5
}

fn default_true() -> bool {
    true
}

/// How strictly the Bollinger Bands must sit inside the Keltner Channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandContainment {
    /// `lowerBB >= lowerKC && upperBB <= upperKC`
    #[default]
    Inclusive,
    /// `lowerBB > lowerKC && upperBB < upperKC`
    Strict,
}

impl BandContainment {
    /// Whether the band `[bb_lower, bb_upper]` lies inside `[kc_lower, kc_upper]`.
    pub fn contains(self, bb_lower: f64, bb_upper: f64, kc_lower: f64, kc_upper: f64) -> bool {
        match self {
            Self::Inclusive => bb_lower >= kc_lower && bb_upper <= kc_upper,
            Self::Strict => bb_lower > kc_lower && bb_upper < kc_upper,
        }
    }
}

/// Configuration of a [`SqueezeIndicator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqueezeParams {
    /// Bollinger window.
    #[serde(default = "default_bb_length")]
    pub bb_length: usize,

    /// Bollinger standard-deviation multiplier.
    #[serde(default = "default_bb_mult")]
    pub bb_mult: f64,

    /// Keltner window, also used for the regression and the default ATR gate.
    #[serde(default = "default_kc_length")]
    pub kc_length: usize,

    /// Keltner range multiplier.
    #[serde(default = "default_kc_mult")]
    pub kc_mult: f64,

    /// Use True Range for the channel width instead of `high - low`.
    #[serde(default = "default_true")]
    pub use_true_range: bool,

    /// ATR must be strictly above this for a squeeze to register.
    #[serde(default)]
    pub min_volatility: f64,

    /// ATR window of the volatility gate. `None` follows `kc_length`.
    #[serde(default)]
    pub atr_length: Option<usize>,

    #[serde(default)]
    pub containment: BandContainment,
}

impl Default for SqueezeParams {
    fn default() -> Self {
        Self {
            bb_length: default_bb_length(),
            bb_mult: default_bb_mult(),
            kc_length: default_kc_length(),
            kc_mult: default_kc_mult(),
            use_true_range: true,
            min_volatility: 0.0,
            atr_length: None,
            containment: BandContainment::Inclusive,
        }
    }
}

impl SqueezeParams {
    /// Build from the six core settings, keeping the default ATR window and
    /// containment policy.
    pub fn new(
        bb_length: usize,
        kc_length: usize,
        bb_mult: f64,
        kc_mult: f64,
        use_true_range: bool,
        min_volatility: f64,
    ) -> Self {
        Self {
            bb_length,
            bb_mult,
            kc_length,
            kc_mult,
            use_true_range,
            min_volatility,
            ..Self::default()
        }
    }

    /// Effective ATR window of the volatility gate.
    pub fn atr_window(&self) -> usize {
        self.atr_length.unwrap_or(self.kc_length)
    }

    /// First bar at which the bands, the channel and the ATR gate are all
    /// defined. Earlier bars never report a squeeze.
    pub fn warm_up(&self) -> usize {
        self.kc_length
            .max(self.bb_length)
            .max(self.atr_window())
            .saturating_sub(1)
    }

    /// Reject zero windows, non-positive multipliers and a negative
    /// volatility floor.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.bb_length == 0 {
            return Err(IndicatorError::invalid("bb_length must be positive"));
        }
        if self.kc_length == 0 {
            return Err(IndicatorError::invalid("kc_length must be positive"));
        }
        if self.atr_length == Some(0) {
            return Err(IndicatorError::invalid("atr_length must be positive"));
        }
        if !(self.bb_mult.is_finite() && self.bb_mult > 0.0) {
            return Err(IndicatorError::invalid(format!(
                "bb_mult must be a positive number, got {}",
                self.bb_mult
            )));
        }
        if !(self.kc_mult.is_finite() && self.kc_mult > 0.0) {
            return Err(IndicatorError::invalid(format!(
                "kc_mult must be a positive number, got {}",
                self.kc_mult
            )));
        }
        if !(self.min_volatility.is_finite() && self.min_volatility >= 0.0) {
            return Err(IndicatorError::invalid(format!(
                "min_volatility must be zero or positive, got {}",
                self.min_volatility
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Squeeze Evaluator
// =============================================================================

/// Combine bands, channel and ATR into the per-bar squeeze flag.
///
/// Bars before `params.warm_up()` are `false`.
pub fn evaluate_squeeze(
    bb: &BollingerBands,
    kc: &KeltnerChannel,
    atr: &[f64],
    params: &SqueezeParams,
) -> Vec<bool> {
    let n = atr.len();
    let start = params.warm_up();
    let mut squeeze = vec![false; n];

    for i in start..n {
        let volatile = atr[i] > params.min_volatility;
        if !volatile {
            continue;
        }
        squeeze[i] = params.containment.contains(
            round12(bb.lower[i]),
            round12(bb.upper[i]),
            round12(kc.lower[i]),
            round12(kc.upper[i]),
        );
    }
    squeeze
}

// =============================================================================
// Indicator Facade
// =============================================================================

/// Every intermediate and output series of one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct SqueezeSeries {
    pub bollinger: BollingerBands,
    pub keltner: KeltnerChannel,
    pub atr: Vec<f64>,
    /// Detrended close fed into the regression.
    pub regression_input: Vec<f64>,
    /// Momentum oscillator.
    pub values: Vec<f64>,
    pub squeeze_on: Vec<bool>,
}

impl SqueezeSeries {
    fn empty() -> Self {
        Self {
            bollinger: BollingerBands {
                basis: Vec::new(),
                upper: Vec::new(),
                lower: Vec::new(),
            },
            keltner: KeltnerChannel {
                middle: Vec::new(),
                upper: Vec::new(),
                lower: Vec::new(),
            },
            atr: Vec::new(),
            regression_input: Vec::new(),
            values: Vec::new(),
            squeeze_on: Vec::new(),
        }
    }
}

/// Squeeze momentum indicator with immutable parameters.
#[derive(Debug, Clone)]
pub struct SqueezeIndicator {
    params: SqueezeParams,
}

impl SqueezeIndicator {
    /// Validate `params` and build the indicator.
    pub fn new(params: SqueezeParams) -> Result<Self, IndicatorError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SqueezeParams {
        &self.params
    }

    /// Momentum values and squeeze flags, both as long as the input.
    ///
    /// Empty input yields two empty vectors. Series of unequal length are
    /// rejected with [`IndicatorError::InvalidInput`].
    pub fn calculate(
        &self,
        close: &[f64],
        high: &[f64],
        low: &[f64],
    ) -> Result<(Vec<f64>, Vec<bool>), IndicatorError> {
        let series = self.calculate_series(close, high, low)?;
        Ok((series.values, series.squeeze_on))
    }

    /// Like [`calculate`](Self::calculate) but keeps every derived series.
    pub fn calculate_series(
        &self,
        close: &[f64],
        high: &[f64],
        low: &[f64],
    ) -> Result<SqueezeSeries, IndicatorError> {
        if close.len() != high.len() || close.len() != low.len() {
            return Err(IndicatorError::invalid(format!(
                "series lengths differ: close {}, high {}, low {}",
                close.len(),
                high.len(),
                low.len()
            )));
        }
        if close.is_empty() {
            return Ok(SqueezeSeries::empty());
        }

        let p = &self.params;

        let bollinger = calculate_bollinger(close, p.bb_length, p.bb_mult);
        let keltner = calculate_keltner(close, high, low, p.kc_length, p.kc_mult, p.use_true_range);
        let atr = atr(high, low, close, p.atr_window());

        let regression_input = detrended_close(close, high, low, &keltner.middle, p.kc_length);
        let values = rolling_regression(&regression_input, p.kc_length);

        let squeeze_on = evaluate_squeeze(&bollinger, &keltner, &atr, p);

        debug!(
            bars = close.len(),
            squeeze_bars = squeeze_on.iter().filter(|&&s| s).count(),
            "squeeze computed"
        );

        Ok(SqueezeSeries {
            bollinger,
            keltner,
            atr,
            regression_input,
            values,
            squeeze_on,
        })
    }
}
