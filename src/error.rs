// =============================================================================
// Indicator Errors
// =============================================================================
//
// The indicator is closed-form arithmetic over finite arrays, so the only
// failure a caller can trigger is handing it inputs it cannot work with.

use thiserror::Error;

/// Failure raised by the squeeze computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// Unequal series lengths, zero windows or out-of-range multipliers.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl IndicatorError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = IndicatorError::invalid("close has 3 bars, high has 2");
        assert_eq!(err.to_string(), "invalid input: close has 3 bars, high has 2");
    }
}
