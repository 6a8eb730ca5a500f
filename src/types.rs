// =============================================================================
// Shared types used across the squeeze service
// =============================================================================

use serde::{Deserialize, Serialize};

/// Chronological close/high/low prices of one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    #[serde(default)]
    pub close: Vec<f64>,
    #[serde(default)]
    pub high: Vec<f64>,
    #[serde(default)]
    pub low: Vec<f64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

/// One bar of indicator output as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqueezePoint {
    /// Bar index.
    pub time: usize,
    pub close: f64,
    pub value: f64,
    #[serde(rename = "sqzOn")]
    pub sqz_on: bool,
}

/// Zip closes with indicator output into dashboard rows.
pub fn to_points(close: &[f64], values: &[f64], squeeze_on: &[bool]) -> Vec<SqueezePoint> {
    close
        .iter()
        .zip(values)
        .zip(squeeze_on)
        .enumerate()
        .map(|(time, ((&close, &value), &sqz_on))| SqueezePoint {
            time,
            close,
            value,
            sqz_on,
        })
        .collect()
}
