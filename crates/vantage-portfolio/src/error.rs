//! Error types for portfolio analytics.
//!
//! This module defines the error types used throughout the portfolio crate.
//! Every error is raised synchronously where it is detected; there is no
//! partial result alongside an error.

use thiserror::Error;
use vantage_core::CoreError;
use vantage_math::MathError;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Series of different assets do not share the same date index.
    #[error("Data alignment error: {reason}")]
    DataAlignment {
        /// What differs between the series.
        reason: String,
    },

    /// Too few observations for the requested statistic.
    #[error("Insufficient data for {asset}: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// The asset (or portfolio) being analysed.
        asset: String,
        /// Minimum required observations.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// Volatility too close to zero to divide by.
    #[error("Degenerate volatility for {context}: {volatility:.3e}")]
    DegenerateVolatility {
        /// The asset or portfolio whose volatility vanished.
        context: String,
        /// The offending volatility.
        volatility: f64,
    },

    /// Optimization constraints admit no solution.
    #[error("Infeasible constraints: {constraint}")]
    InfeasibleConstraints {
        /// The offending constraint.
        constraint: String,
    },

    /// Invalid analytics configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// Invalid portfolio weights.
    #[error("Invalid weights: {reason}")]
    InvalidWeights {
        /// The reason the weights are invalid.
        reason: String,
    },

    /// An asset was referenced that is not part of the input.
    #[error("Unknown asset: {asset}")]
    UnknownAsset {
        /// The unknown asset id.
        asset: String,
    },

    /// Calculation failed.
    #[error("Calculation failed: {reason}")]
    CalculationFailed {
        /// The reason the calculation failed.
        reason: String,
    },

    /// Invalid price data.
    #[error(transparent)]
    Core(CoreError),
}

impl PortfolioError {
    /// Create a data alignment error.
    #[must_use]
    pub fn data_alignment(reason: impl Into<String>) -> Self {
        Self::DataAlignment {
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient_data(asset: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            asset: asset.into(),
            required,
            actual,
        }
    }

    /// Create a degenerate volatility error.
    #[must_use]
    pub fn degenerate_volatility(context: impl Into<String>, volatility: f64) -> Self {
        Self::DegenerateVolatility {
            context: context.into(),
            volatility,
        }
    }

    /// Create an infeasible constraints error.
    #[must_use]
    pub fn infeasible(constraint: impl Into<String>) -> Self {
        Self::InfeasibleConstraints {
            constraint: constraint.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid weights error.
    #[must_use]
    pub fn invalid_weights(reason: impl Into<String>) -> Self {
        Self::InvalidWeights {
            reason: reason.into(),
        }
    }

    /// Create a calculation failed error.
    #[must_use]
    pub fn calculation_failed(reason: impl Into<String>) -> Self {
        Self::CalculationFailed {
            reason: reason.into(),
        }
    }

    /// Attaches an asset name to a math error raised while analysing it.
    pub(crate) fn from_math(asset: &str, err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::insufficient_data(asset, required, actual)
            }
            MathError::DivisionByZero { value } => {
                Self::degenerate_volatility(asset, value.max(0.0).sqrt())
            }
            other => Self::from(other),
        }
    }
}

impl From<CoreError> for PortfolioError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DataAlignment { asset, reason } => {
                Self::data_alignment(format!("{asset}: {reason}"))
            }
            other => Self::Core(other),
        }
    }
}

impl From<MathError> for PortfolioError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Infeasible { constraint } => Self::InfeasibleConstraints { constraint },
            MathError::DimensionMismatch { expected, actual } => Self::data_alignment(format!(
                "expected {expected} observations, found {actual}"
            )),
            MathError::InsufficientData { required, actual } => {
                Self::insufficient_data("input", required, actual)
            }
            other => Self::calculation_failed(other.to_string()),
        }
    }
}
