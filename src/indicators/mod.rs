// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free full-series indicators behind the squeeze signal.
// Every series function returns a vector as long as its input; positions
// without enough history hold 0.0 so that index i always refers to bar i.

pub mod atr;
pub mod bollinger;
pub mod keltner;
pub mod precision;
pub mod regression;
pub mod rolling;
pub mod squeeze;

pub use squeeze::{BandContainment, SqueezeIndicator, SqueezeParams, SqueezeSeries};
