//! Price history of a single asset.

use serde::Serialize;

use super::{AssetId, Date};
use crate::error::{CoreError, CoreResult};

/// Ordered (date, price) history for one asset.
///
/// Construction enforces the invariants every analytic relies on:
///
/// - dates are strictly increasing (so no duplicates)
/// - prices are positive and finite
///
/// The series is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    asset: AssetId,
    dates: Vec<Date>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Creates a series from (date, price) observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset id is blank, a price is not positive and
    /// finite, or the dates are not strictly increasing.
    pub fn new(
        asset: impl Into<AssetId>,
        observations: impl IntoIterator<Item = (Date, f64)>,
    ) -> CoreResult<Self> {
        let (dates, prices) = observations.into_iter().unzip();
        Self::from_parts(asset, dates, prices)
    }

    /// Creates a series from parallel date and price vectors.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`], plus `LengthMismatch` when the vectors
    /// differ in length.
    pub fn from_parts(
        asset: impl Into<AssetId>,
        dates: Vec<Date>,
        prices: Vec<f64>,
    ) -> CoreResult<Self> {
        let asset = asset.into();
        if asset.as_str().trim().is_empty() {
            return Err(CoreError::InvalidAssetId {
                reason: "identifier is empty".to_string(),
            });
        }

        if dates.len() != prices.len() {
            return Err(CoreError::LengthMismatch {
                asset: asset.to_string(),
                dates: dates.len(),
                prices: prices.len(),
            });
        }

        for (date, &price) in dates.iter().zip(&prices) {
            if !price.is_finite() || price <= 0.0 {
                return Err(CoreError::InvalidPrice {
                    asset: asset.to_string(),
                    date: date.to_string(),
                    value: price,
                });
            }
        }

        for pair in dates.windows(2) {
            if pair[1] == pair[0] {
                return Err(CoreError::DuplicateDate {
                    asset: asset.to_string(),
                    date: pair[1].to_string(),
                });
            }
            if pair[1] < pair[0] {
                return Err(CoreError::UnsortedDates {
                    asset: asset.to_string(),
                    previous: pair[0].to_string(),
                    current: pair[1].to_string(),
                });
            }
        }

        Ok(Self {
            asset,
            dates,
            prices,
        })
    }

    /// Creates a series on consecutive trading days (weekdays) starting at
    /// `start`.
    ///
    /// Handy for tests and synthetic data where only the price path matters.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`].
    pub fn from_daily_prices(
        asset: impl Into<AssetId>,
        start: Date,
        prices: &[f64],
    ) -> CoreResult<Self> {
        let mut dates = Vec::with_capacity(prices.len());
        let mut date = if start.is_weekend() {
            start.next_trading_day()
        } else {
            start
        };
        for _ in prices {
            dates.push(date);
            date = date.next_trading_day();
        }
        Self::from_parts(asset, dates, prices.to_vec())
    }

    /// Returns the asset identifier.
    #[must_use]
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Returns the observation dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the prices, aligned with [`PriceSeries::dates`].
    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Returns the first observation.
    #[must_use]
    pub fn first(&self) -> Option<(Date, f64)> {
        Some((*self.dates.first()?, *self.prices.first()?))
    }

    /// Returns the last observation.
    #[must_use]
    pub fn last(&self) -> Option<(Date, f64)> {
        Some((*self.dates.last()?, *self.prices.last()?))
    }

    /// Iterates over (date, price) observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.prices.iter().copied())
    }
}
