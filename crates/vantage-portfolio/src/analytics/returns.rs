//! Daily return series.
//!
//! A return is dated with the later of the two prices it spans, so a series
//! of `n` prices yields `n - 1` returns.

use serde::Serialize;
use vantage_core::{AssetId, Date, PriceSeries, PriceTable};

use super::parallel::maybe_parallel_map;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{AnalyticsConfig, ReturnType};

/// Daily returns of one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    asset: AssetId,
    return_type: ReturnType,
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Wraps precomputed returns.
    ///
    /// # Errors
    ///
    /// Returns `DataAlignment` if dates and values differ in length or the
    /// dates are not strictly increasing, and `CalculationFailed` for a
    /// non-finite return.
    pub fn new(
        asset: impl Into<AssetId>,
        return_type: ReturnType,
        dates: Vec<Date>,
        values: Vec<f64>,
    ) -> PortfolioResult<Self> {
        let asset = asset.into();
        if dates.len() != values.len() {
            return Err(PortfolioError::data_alignment(format!(
                "{asset}: {} dates but {} returns",
                dates.len(),
                values.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(PortfolioError::data_alignment(format!(
                "{asset}: return dates not strictly increasing at {}",
                pair[1]
            )));
        }
        if let Some((date, value)) = dates.iter().zip(&values).find(|(_, v)| !v.is_finite()) {
            return Err(PortfolioError::calculation_failed(format!(
                "{asset}: non-finite return {value} on {date}"
            )));
        }

        Ok(Self {
            asset,
            return_type,
            dates,
            values,
        })
    }

    /// The asset these returns belong to.
    #[must_use]
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// How the returns were computed.
    #[must_use]
    pub fn return_type(&self) -> ReturnType {
        self.return_type
    }

    /// Return dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Return values, as decimals.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over (date, return) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

/// Computes daily returns from a price series.
///
/// # Errors
///
/// Returns `InsufficientData` if the series has fewer than 2 prices.
pub fn compute_returns(prices: &PriceSeries, return_type: ReturnType) -> PortfolioResult<ReturnSeries> {
    if prices.len() < 2 {
        return Err(PortfolioError::insufficient_data(
            prices.asset().as_str(),
            2,
            prices.len(),
        ));
    }

    let values: Vec<f64> = prices
        .prices()
        .windows(2)
        .map(|pair| {
            let ratio = pair[1] / pair[0];
            match return_type {
                ReturnType::Simple => ratio - 1.0,
                ReturnType::Log => ratio.ln(),
            }
        })
        .collect();

    Ok(ReturnSeries {
        asset: prices.asset().clone(),
        return_type,
        dates: prices.dates()[1..].to_vec(),
        values,
    })
}

/// Computes returns for every asset of a table, in table order.
///
/// # Errors
///
/// Fails on the first asset that fails; no partial result is returned.
pub fn compute_all_returns(
    table: &PriceTable,
    config: &AnalyticsConfig,
) -> PortfolioResult<Vec<ReturnSeries>> {
    log::debug!(
        "computing {} returns for {} assets over {} observations",
        config.return_type,
        table.num_assets(),
        table.num_observations()
    );

    maybe_parallel_map(table.series(), config, |series| {
        compute_returns(series, config.return_type)
    })
    .into_iter()
    .collect()
}

/// Rebuilds the price path implied by `returns` from a starting price.
///
/// The result has `returns.len() + 1` entries, the first being `initial`.
#[must_use]
pub fn reconstruct_prices(initial: f64, returns: &ReturnSeries) -> Vec<f64> {
    let mut prices = Vec::with_capacity(returns.len() + 1);
    prices.push(initial);

    let mut price = initial;
    for &r in returns.values() {
        price *= match returns.return_type {
            ReturnType::Simple => 1.0 + r,
            ReturnType::Log => r.exp(),
        };
        prices.push(price);
    }

    prices
}

/// Checks that return series of different assets can be combined.
///
/// All series must be for distinct assets, share the same return type and
/// the same dates.
pub fn check_alignment(returns: &[ReturnSeries]) -> PortfolioResult<()> {
    let Some(first) = returns.first() else {
        return Err(PortfolioError::insufficient_data("portfolio", 1, 0));
    };

    for (i, series) in returns.iter().enumerate().skip(1) {
        if returns[..i].iter().any(|s| s.asset == series.asset) {
            return Err(PortfolioError::data_alignment(format!(
                "{} appears more than once",
                series.asset
            )));
        }
        if series.return_type != first.return_type {
            return Err(PortfolioError::data_alignment(format!(
                "{} uses {} returns but {} uses {} returns",
                series.asset, series.return_type, first.asset, first.return_type
            )));
        }
        if series.len() != first.len() {
            return Err(PortfolioError::data_alignment(format!(
                "{} has {} returns but {} has {}",
                series.asset,
                series.len(),
                first.asset,
                first.len()
            )));
        }
        if let Some((a, b)) = first
            .dates
            .iter()
            .zip(&series.dates)
            .find(|(a, b)| a != b)
        {
            return Err(PortfolioError::data_alignment(format!(
                "{} has a return on {b} where {} has one on {a}",
                series.asset, first.asset
            )));
        }
    }

    Ok(())
}

/// Asset ids of `returns`, in order.
pub(crate) fn asset_ids(returns: &[ReturnSeries]) -> Vec<AssetId> {
    returns.iter().map(|r| r.asset.clone()).collect()
}

/// Return values as columns, in asset order.
pub(crate) fn columns(returns: &[ReturnSeries]) -> Vec<&[f64]> {
    returns.iter().map(ReturnSeries::values).collect()
}
