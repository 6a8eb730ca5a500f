// =============================================================================
// Squeeze Alert — volatility squeeze indicator and its HTTP front
// =============================================================================
//
// `indicators` holds the pure computation: rolling statistics, Bollinger and
// Keltner bands, the linear-regression momentum value and the squeeze flag.
// Everything else is the thin service around it.
// =============================================================================

pub mod api;
pub mod app_state;
pub mod error;
pub mod fixtures;
pub mod indicators;
pub mod runtime_config;
pub mod types;

pub use error::IndicatorError;
pub use indicators::{BandContainment, SqueezeIndicator, SqueezeParams, SqueezeSeries};
pub use types::{PriceSeries, SqueezePoint};
