//! Performance of a fixed-weight portfolio.

use serde::Serialize;
use vantage_core::{AssetId, Date};

use super::returns::{asset_ids, check_alignment, ReturnSeries};
use super::summary::compute_summary;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, PortfolioWeights, ReturnType};

/// Identifier used for portfolio-level return series.
pub const PORTFOLIO_ID: &str = "PORTFOLIO";

/// Growth of one unit invested in an asset or the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthCurve {
    /// Asset (or [`PORTFOLIO_ID`]).
    pub asset: AssetId,
    /// Value of one unit after each return.
    pub values: Vec<f64>,
}

impl GrowthCurve {
    /// Final value, or 1 for an empty curve.
    #[must_use]
    pub fn terminal_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(1.0)
    }

    /// Total return over the whole period.
    #[must_use]
    pub fn total_return(&self) -> f64 {
        self.terminal_value() - 1.0
    }
}

/// Daily and cumulative performance of a weighted portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioPerformance {
    /// Weights applied on every day.
    pub weights: PortfolioWeights,
    /// Return dates.
    pub dates: Vec<Date>,
    /// Daily portfolio returns.
    pub portfolio_returns: Vec<f64>,
    /// Cumulative growth of the rebalanced portfolio (see [`portfolio_growth`]).
    pub portfolio_growth: GrowthCurve,
    /// Cumulative growth of each asset, in input order.
    pub asset_growth: Vec<GrowthCurve>,
}

/// Daily returns of a portfolio rebalanced to `weights` every day.
///
/// Each day's return is `sum(w_i * r_i)` in the series' own return type.
/// For log returns this is the usual linear approximation; use
/// [`portfolio_growth`] for the exact value of the rebalanced portfolio.
/// Assets missing from `weights` carry zero weight.
///
/// # Errors
///
/// - `DataAlignment` if the series do not share dates
/// - `UnknownAsset` if `weights` names an asset without returns
pub fn portfolio_returns(
    returns: &[ReturnSeries],
    weights: &PortfolioWeights,
) -> PortfolioResult<ReturnSeries> {
    let mut combined = vec![0.0; returns.first().map_or(0, ReturnSeries::len)];
    for (w, series) in weighted(returns, weights)? {
        for (total, r) in combined.iter_mut().zip(series.values()) {
            *total += w * r;
        }
    }

    ReturnSeries::new(
        PORTFOLIO_ID,
        returns[0].return_type(),
        returns[0].dates().to_vec(),
        combined,
    )
}

/// Growth of one unit held in a portfolio rebalanced to `weights` daily.
///
/// Each day the portfolio grows by `sum(w_i * (1 + R_i))`, where `R_i` is
/// the simple return of asset `i` (log returns are converted first), so the
/// curve depends only on prices and weights, never on the return type.
///
/// # Errors
///
/// Same as [`portfolio_returns`].
pub fn portfolio_growth(
    returns: &[ReturnSeries],
    weights: &PortfolioWeights,
) -> PortfolioResult<GrowthCurve> {
    let mut factors = vec![0.0; returns.first().map_or(0, ReturnSeries::len)];
    for (w, series) in weighted(returns, weights)? {
        let return_type = series.return_type();
        for (factor, &r) in factors.iter_mut().zip(series.values()) {
            *factor += w * (1.0 + simple_return(r, return_type));
        }
    }

    let mut value = 1.0;
    let values = factors
        .into_iter()
        .map(|f| {
            value *= f;
            value
        })
        .collect();

    Ok(GrowthCurve {
        asset: AssetId::new(PORTFOLIO_ID),
        values,
    })
}

/// Pairs each weight with its asset's returns.
fn weighted<'a>(
    returns: &'a [ReturnSeries],
    weights: &PortfolioWeights,
) -> PortfolioResult<Vec<(f64, &'a ReturnSeries)>> {
    check_alignment(returns)?;
    weights
        .iter()
        .map(|(asset, w)| {
            returns
                .iter()
                .find(|r| r.asset() == asset)
                .map(|series| (w, series))
                .ok_or_else(|| PortfolioError::UnknownAsset {
                    asset: asset.to_string(),
                })
        })
        .collect()
}

fn simple_return(r: f64, return_type: ReturnType) -> f64 {
    match return_type {
        ReturnType::Simple => r,
        ReturnType::Log => r.exp_m1(),
    }
}

/// Growth of one unit through `returns`.
///
/// Simple returns compound as `prod(1 + r)`, log returns as `exp(sum(r))`.
#[must_use]
pub fn cumulative_growth(returns: &ReturnSeries) -> GrowthCurve {
    let mut value = 1.0;
    let values = returns
        .values()
        .iter()
        .map(|&r| {
            value *= match returns.return_type() {
                ReturnType::Simple => 1.0 + r,
                ReturnType::Log => r.exp(),
            };
            value
        })
        .collect();

    GrowthCurve {
        asset: returns.asset().clone(),
        values,
    }
}

/// Portfolio and per-asset performance under `weights`.
///
/// Without weights the portfolio is equally weighted across all assets.
///
/// # Errors
///
/// Same as [`portfolio_returns`].
pub fn portfolio_performance(
    returns: &[ReturnSeries],
    weights: Option<&PortfolioWeights>,
) -> PortfolioResult<PortfolioPerformance> {
    check_alignment(returns)?;
    let weights = match weights {
        Some(w) => w.clone(),
        None => PortfolioWeights::equal(asset_ids(returns))?,
    };

    let combined = portfolio_returns(returns, &weights)?;
    log::debug!(
        "portfolio performance over {} returns for {} assets",
        combined.len(),
        weights.len()
    );

    Ok(PortfolioPerformance {
        portfolio_growth: portfolio_growth(returns, &weights)?,
        asset_growth: returns.iter().map(cumulative_growth).collect(),
        dates: combined.dates().to_vec(),
        portfolio_returns: combined.values().to_vec(),
        weights,
    })
}

/// Sharpe ratio of a fixed weighting.
///
/// Computed from the portfolio's daily return series with the same rules as
/// [`compute_summary`].
///
/// # Errors
///
/// Same as [`portfolio_returns`] and [`compute_summary`].
pub fn portfolio_sharpe(
    returns: &[ReturnSeries],
    weights: &PortfolioWeights,
    config: &AnalyticsConfig,
) -> PortfolioResult<f64> {
    let combined = portfolio_returns(returns, weights)?;
    let summary = compute_summary(&combined, config.risk_free_rate, config.trading_days_per_year)?;
    Ok(summary.sharpe)
}
