// =============================================================================
// Application State — Squeeze Server
// =============================================================================
//
// Shared read-only state handed to every request handler through
// `Arc<AppState>`. The indicator is immutable, so no locking is needed.
// =============================================================================

use crate::error::IndicatorError;
use crate::indicators::SqueezeIndicator;
use crate::runtime_config::RuntimeConfig;
use crate::types::PriceSeries;

/// Fixed 25-bar sample served by the demo endpoint.
const DEMO_CLOSE: [f64; 25] = [
    10.0, 12.0, 15.0, 14.0, 13.0, 11.0, 10.0, 9.0, 10.0, 11.0, 13.0, 14.0, 15.0, 16.0, 15.0,
    14.0, 13.0, 12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 8.0, 9.0,
];
const DEMO_HIGH: [f64; 25] = [
    11.0, 13.0, 16.0, 15.0, 14.0, 12.0, 11.0, 10.0, 11.0, 12.0, 14.0, 15.0, 16.0, 17.0, 16.0,
    15.0, 14.0, 13.0, 12.0, 11.0, 10.0, 9.0, 8.0, 9.0, 10.0,
];
const DEMO_LOW: [f64; 25] = [
    9.0, 11.0, 14.0, 13.0, 12.0, 10.0, 9.0, 8.0, 9.0, 10.0, 12.0, 13.0, 14.0, 15.0, 14.0, 13.0,
    12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 6.0, 7.0, 8.0,
];

/// The built-in demo series.
pub fn demo_series() -> PriceSeries {
    PriceSeries {
        close: DEMO_CLOSE.to_vec(),
        high: DEMO_HIGH.to_vec(),
        low: DEMO_LOW.to_vec(),
    }
}

/// State shared across all HTTP handlers.
pub struct AppState {
    pub config: RuntimeConfig,
    /// Indicator built from `config.squeeze`.
    pub indicator: SqueezeIndicator,
    pub demo: PriceSeries,
}

impl AppState {
    /// Build the state, validating the configured indicator parameters.
    pub fn new(config: RuntimeConfig) -> Result<Self, IndicatorError> {
        let indicator = SqueezeIndicator::new(config.squeeze.clone())?;
        Ok(Self {
            config,
            indicator,
            demo: demo_series(),
        })
    }
}
