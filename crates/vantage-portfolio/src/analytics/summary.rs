//! Risk/return summaries and Sharpe ratios.
//!
//! Daily figures are annualized arithmetically: the annual return is the mean
//! daily return times the trading days per year, and the annual volatility is
//! the daily sample deviation times the square root of that count. The
//! optimizer objective uses the same scaling, so a single-asset portfolio has
//! exactly the asset's Sharpe ratio.

use serde::Serialize;
use vantage_core::AssetId;
use vantage_math::statistics::{mean, median, sample_std_dev};

use super::parallel::maybe_parallel_map;
use super::returns::ReturnSeries;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::AnalyticsConfig;

/// Annualized volatility below this is treated as zero.
pub const MIN_VOLATILITY: f64 = 1e-12;

/// Descriptive statistics of a daily return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnStatistics {
    /// Number of returns.
    pub observations: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Sample standard deviation (ddof = 1).
    pub std_dev: f64,
}

/// Descriptive statistics of `returns`, without annualization.
///
/// Unlike [`compute_summary`] this accepts a zero-volatility series.
///
/// # Errors
///
/// Returns `InsufficientData` for fewer than 2 returns.
pub fn return_statistics(returns: &ReturnSeries) -> PortfolioResult<ReturnStatistics> {
    let asset = returns.asset().as_str();
    let values = returns.values();
    if values.len() < 2 {
        return Err(PortfolioError::insufficient_data(asset, 2, values.len()));
    }

    Ok(ReturnStatistics {
        observations: values.len(),
        mean: mean(values).map_err(|e| PortfolioError::from_math(asset, e))?,
        median: median(values).map_err(|e| PortfolioError::from_math(asset, e))?,
        std_dev: sample_std_dev(values).map_err(|e| PortfolioError::from_math(asset, e))?,
    })
}

/// Risk and return profile of one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReturnSummary {
    /// Asset the summary describes.
    pub asset: AssetId,
    /// Number of daily returns used.
    pub observations: usize,
    /// Mean daily return.
    pub mean_daily: f64,
    /// Median daily return.
    pub median_daily: f64,
    /// Daily volatility (sample standard deviation).
    pub vol_daily: f64,
    /// Annualized return, `mean_daily * trading_days`.
    pub annual_return: f64,
    /// Annualized volatility, `vol_daily * sqrt(trading_days)`.
    pub annual_vol: f64,
    /// `(annual_return - risk_free_rate) / annual_vol`.
    pub sharpe: f64,
}

/// Summarizes a daily return series.
///
/// # Errors
///
/// - `InvalidConfig` for a non-finite risk-free rate or zero trading days
/// - `InsufficientData` for fewer than 2 returns
/// - `DegenerateVolatility` when the annualized volatility is below
///   [`MIN_VOLATILITY`]
pub fn compute_summary(
    returns: &ReturnSeries,
    risk_free_rate: f64,
    trading_days: u32,
) -> PortfolioResult<RiskReturnSummary> {
    if !risk_free_rate.is_finite() {
        return Err(PortfolioError::invalid_config(format!(
            "risk-free rate must be finite, got {risk_free_rate}"
        )));
    }
    if trading_days == 0 {
        return Err(PortfolioError::invalid_config(
            "trading days per year must be positive",
        ));
    }

    let stats = return_statistics(returns)?;
    let periods = f64::from(trading_days);
    let annual_return = stats.mean * periods;
    let annual_vol = stats.std_dev * periods.sqrt();

    if annual_vol < MIN_VOLATILITY {
        return Err(PortfolioError::degenerate_volatility(
            returns.asset().as_str(),
            annual_vol,
        ));
    }

    Ok(RiskReturnSummary {
        asset: returns.asset().clone(),
        observations: stats.observations,
        mean_daily: stats.mean,
        median_daily: stats.median,
        vol_daily: stats.std_dev,
        annual_return,
        annual_vol,
        sharpe: (annual_return - risk_free_rate) / annual_vol,
    })
}

/// Summarizes every asset, in order.
///
/// # Errors
///
/// The first failing asset aborts the batch. Use [`try_compute_summaries`]
/// to isolate failures per asset.
pub fn compute_summaries(
    returns: &[ReturnSeries],
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<RiskReturnSummary>> {
    try_compute_summaries(returns, config)
        .into_iter()
        .map(|(_, result)| result)
        .collect()
}

/// Summarizes every asset, keeping one result per asset.
pub fn try_compute_summaries(
    returns: &[ReturnSeries],
    config: &AnalyticsConfig,
) -> Vec<(AssetId, PortfolioResult<RiskReturnSummary>)> {
    maybe_parallel_map(returns, config, |series| {
        (
            series.asset().clone(),
            compute_summary(series, config.risk_free_rate, config.trading_days_per_year),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::returns::compute_returns;
    use crate::types::ReturnType;
    use approx::assert_relative_eq;
    use vantage_core::{Date, PriceSeries};

    fn returns(asset: &str, prices: &[f64]) -> ReturnSeries {
        let start = Date::from_ymd(2024, 1, 2).unwrap();
        let series = PriceSeries::from_daily_prices(asset, start, prices).unwrap();
        compute_returns(&series, ReturnType::Simple).unwrap()
    }

    #[test]
    fn test_summary_values() {
        let r = returns("A", &[100.0, 101.0, 102.0, 101.0]);
        let summary = compute_summary(&r, 0.0, 252).unwrap();

        let values = r.values();
        let mean = values.iter().sum::<f64>() / 3.0;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 2.0;

        assert_eq!(summary.observations, 3);
        assert_relative_eq!(summary.mean_daily, mean, epsilon = 1e-15);
        assert_relative_eq!(summary.median_daily, 1.0 / 101.0, epsilon = 1e-15);
        assert_relative_eq!(summary.vol_daily, var.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(summary.annual_return, mean * 252.0, epsilon = 1e-12);
        assert_relative_eq!(summary.annual_vol, var.sqrt() * 252.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            summary.sharpe,
            summary.annual_return / summary.annual_vol,
            epsilon = 1e-12
        );
        assert!(summary.mean_daily > 0.0);
        assert!(summary.sharpe.is_finite());
    }

    #[test]
    fn test_risk_free_rate_lowers_sharpe() {
        let r = returns("A", &[100.0, 101.0, 100.5, 102.0, 103.0]);
        let base = compute_summary(&r, 0.0, 252).unwrap();
        let with_rf = compute_summary(&r, 0.05, 252).unwrap();
        assert_relative_eq!(
            base.sharpe - with_rf.sharpe,
            0.05 / base.annual_vol,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_prices() {
        let r = returns("FLAT", &[50.0, 50.0, 50.0, 50.0]);

        let stats = return_statistics(&r).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);

        let err = compute_summary(&r, 0.0, 252).unwrap_err();
        assert!(matches!(err, PortfolioError::DegenerateVolatility { .. }));
        assert!(err.to_string().contains("FLAT"));
    }

    #[test]
    fn test_insufficient_returns() {
        let r = returns("A", &[100.0, 101.0]);
        assert_eq!(
            compute_summary(&r, 0.0, 252).unwrap_err(),
            PortfolioError::insufficient_data("A", 2, 1)
        );
    }

    #[test]
    fn test_invalid_conventions() {
        let r = returns("A", &[100.0, 101.0, 102.0]);
        assert!(matches!(
            compute_summary(&r, f64::INFINITY, 252),
            Err(PortfolioError::InvalidConfig { .. })
        ));
        assert!(matches!(
            compute_summary(&r, 0.0, 0),
            Err(PortfolioError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_batch_and_isolation() {
        let good = returns("GOOD", &[100.0, 101.0, 100.0, 102.0]);
        let flat = returns("FLAT", &[10.0, 10.0, 10.0, 10.0]);
        let config = AnalyticsConfig::default();

        let batch = compute_summaries(&[good.clone(), flat.clone()], &config);
        assert!(matches!(batch, Err(PortfolioError::DegenerateVolatility { .. })));

        let isolated = try_compute_summaries(&[good.clone(), flat], &config);
        assert_eq!(isolated.len(), 2);
        assert_eq!(isolated[0].0.as_str(), "GOOD");
        assert!(isolated[0].1.is_ok());
        assert!(isolated[1].1.is_err());

        let ok = compute_summaries(&[good], &config).unwrap();
        assert_eq!(ok.len(), 1);
    }
}
