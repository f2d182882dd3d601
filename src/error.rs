//! Error types for the dashboard pipeline.

use thiserror::Error;

/// Errors raised while parsing or validating indicator labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// Label does not name a supported indicator
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    /// Window suffix is not a number
    #[error("invalid window in indicator {label}: {suffix:?}")]
    InvalidWindow {
        label: String,
        suffix: String,
    },

    /// Window must be at least one bar
    #[error("indicator {0} needs a positive window")]
    ZeroWindow(String),
}

/// Errors produced by one instrument's fetch -> compute -> compose pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Fetch returned nothing usable for the symbol
    #[error("no data available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Spread legs share no timestamps
    #[error("no overlapping bars between {minuend} and {subtrahend}")]
    Alignment {
        minuend: String,
        subtrahend: String,
    },

    /// Malformed indicator request from the caller
    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    /// Parameter combination rejected before fetching
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl DashboardError {
    /// Creates a `DataUnavailable` error.
    pub fn unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        DashboardError::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidParams` error.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        DashboardError::InvalidParams(msg.into())
    }

    /// Whether the instrument should be shown with a "no data" placeholder.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DashboardError::DataUnavailable { .. } | DashboardError::Alignment { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
