//! Rolling volatility.

use serde::Serialize;
use vantage_core::{AssetId, Date};
use vantage_math::statistics::rolling_std_dev;

use super::returns::ReturnSeries;
use crate::error::{PortfolioError, PortfolioResult};

/// Trailing-window daily volatility of one asset.
///
/// Entry `k` covers the `window` returns ending on `dates[k]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingVolatility {
    /// Asset the series describes.
    pub asset: AssetId,
    /// Window length, in returns.
    pub window: usize,
    /// Last return date of each window.
    pub dates: Vec<Date>,
    /// Daily sample volatility of each window.
    pub values: Vec<f64>,
}

impl RollingVolatility {
    /// Values scaled by `sqrt(trading_days)`.
    #[must_use]
    pub fn annualized(&self, trading_days: u32) -> Vec<f64> {
        let scale = f64::from(trading_days).sqrt();
        self.values.iter().map(|v| v * scale).collect()
    }

    /// The most recent window, if any.
    #[must_use]
    pub fn latest(&self) -> Option<(Date, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    /// Number of windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Daily volatility over every full trailing window of `window` returns.
///
/// # Errors
///
/// - `InvalidConfig` if `window` is below 2
/// - `InsufficientData` if there are fewer returns than `window`
pub fn rolling_volatility(returns: &ReturnSeries, window: usize) -> PortfolioResult<RollingVolatility> {
    if window < 2 {
        return Err(PortfolioError::invalid_config(format!(
            "rolling window must be at least 2, got {window}"
        )));
    }
    let asset = returns.asset().as_str();
    if returns.len() < window {
        return Err(PortfolioError::insufficient_data(asset, window, returns.len()));
    }

    let values =
        rolling_std_dev(returns.values(), window).map_err(|e| PortfolioError::from_math(asset, e))?;

    Ok(RollingVolatility {
        asset: returns.asset().clone(),
        window,
        dates: returns.dates()[window - 1..].to_vec(),
        values,
    })
}
