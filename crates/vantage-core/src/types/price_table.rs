//! Aligned multi-asset price table.

use serde::Serialize;
use std::collections::HashSet;

use super::{AssetId, Date, PriceSeries};
use crate::error::{CoreError, CoreResult};

/// Price series for several assets that share one date index.
///
/// This is the input of the analytics engine. Building a table checks that
/// every series has exactly the same dates as the first one; anything else
/// is a `DataAlignment` error. Asset order is the insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    dates: Vec<Date>,
    series: Vec<PriceSeries>,
}

impl PriceTable {
    /// Creates a table from already validated series.
    ///
    /// # Errors
    ///
    /// - `EmptyTable` if no series are given
    /// - `DuplicateAsset` if an asset appears twice
    /// - `DataAlignment` if the date indices differ
    pub fn new(series: Vec<PriceSeries>) -> CoreResult<Self> {
        let first = series.first().ok_or(CoreError::EmptyTable)?;
        let dates = first.dates().to_vec();

        let mut seen = HashSet::with_capacity(series.len());
        for s in &series {
            if !seen.insert(s.asset().clone()) {
                return Err(CoreError::DuplicateAsset {
                    asset: s.asset().to_string(),
                });
            }
            check_alignment(first.asset(), &dates, s)?;
        }

        log::debug!(
            "built price table: {} assets x {} observations",
            series.len(),
            dates.len()
        );

        Ok(Self { dates, series })
    }

    /// Creates a table from a shared date column and one price column per
    /// asset (the layout of a wide CSV file).
    ///
    /// # Errors
    ///
    /// Any validation error of [`PriceSeries::from_parts`] or
    /// [`PriceTable::new`].
    pub fn from_columns(dates: Vec<Date>, columns: Vec<(AssetId, Vec<f64>)>) -> CoreResult<Self> {
        let series = columns
            .into_iter()
            .map(|(asset, prices)| PriceSeries::from_parts(asset, dates.clone(), prices))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(series)
    }

    /// Returns the shared date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the series in insertion order.
    #[must_use]
    pub fn series(&self) -> &[PriceSeries] {
        &self.series
    }

    /// Returns the asset identifiers in insertion order.
    #[must_use]
    pub fn assets(&self) -> Vec<AssetId> {
        self.series.iter().map(|s| s.asset().clone()).collect()
    }

    /// Looks up the series of one asset.
    #[must_use]
    pub fn get(&self, asset: &str) -> Option<&PriceSeries> {
        self.series.iter().find(|s| s.asset().as_str() == asset)
    }

    /// Returns the number of assets.
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.series.len()
    }

    /// Returns the number of observations per asset.
    #[must_use]
    pub fn num_observations(&self) -> usize {
        self.dates.len()
    }

    /// Returns the first and last dates of the index.
    #[must_use]
    pub fn date_range(&self) -> Option<(Date, Date)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }
}

fn check_alignment(reference: &AssetId, dates: &[Date], series: &PriceSeries) -> CoreResult<()> {
    if series.len() != dates.len() {
        return Err(CoreError::data_alignment(
            series.asset().as_str(),
            format!(
                "{} observations, but {} has {}",
                series.len(),
                reference,
                dates.len()
            ),
        ));
    }

    if let Some((expected, found)) = dates
        .iter()
        .zip(series.dates())
        .find(|(expected, found)| expected != found)
    {
        return Err(CoreError::data_alignment(
            series.asset().as_str(),
            format!("found date {found} where {reference} has {expected}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Date {
        Date::from_ymd(2024, 1, 2).unwrap()
    }

    fn series(asset: &str, prices: &[f64]) -> PriceSeries {
        PriceSeries::from_daily_prices(asset, start(), prices).unwrap()
    }

    #[test]
    fn test_aligned_table() {
        let table = PriceTable::new(vec![
            series("AAPL", &[100.0, 101.0, 102.0]),
            series("MSFT", &[50.0, 50.5, 51.0]),
        ])
        .unwrap();

        assert_eq!(table.num_assets(), 2);
        assert_eq!(table.num_observations(), 3);
        assert_eq!(table.assets(), vec![AssetId::new("AAPL"), AssetId::new("MSFT")]);
        assert_eq!(table.get("MSFT").unwrap().prices(), &[50.0, 50.5, 51.0]);
        assert!(table.get("GOOGL").is_none());
        assert_eq!(table.date_range().unwrap().0, start());
    }

    #[test]
    fn test_length_misalignment() {
        let err = PriceTable::new(vec![
            series("AAPL", &[100.0, 101.0, 102.0]),
            series("MSFT", &[50.0, 50.5]),
        ])
        .unwrap_err();
        assert!(err.is_alignment_error());
        assert!(err.to_string().contains("MSFT"));
    }

    #[test]
    fn test_date_misalignment() {
        let shifted =
            PriceSeries::from_daily_prices("MSFT", start().next_trading_day(), &[50.0, 50.5, 51.0])
                .unwrap();
        let err = PriceTable::new(vec![series("AAPL", &[100.0, 101.0, 102.0]), shifted])
            .unwrap_err();
        assert!(err.is_alignment_error());
    }

    #[test]
    fn test_empty_and_duplicate() {
        assert_eq!(PriceTable::new(vec![]).unwrap_err(), CoreError::EmptyTable);

        let err = PriceTable::new(vec![series("AAPL", &[1.0]), series("AAPL", &[1.0])]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateAsset { .. }));
    }

    #[test]
    fn test_from_columns() {
        let dates = vec![start(), start().next_trading_day()];
        let table = PriceTable::from_columns(
            dates.clone(),
            vec![
                (AssetId::new("A"), vec![1.0, 2.0]),
                (AssetId::new("B"), vec![3.0, 4.0]),
            ],
        )
        .unwrap();
        assert_eq!(table.dates(), dates.as_slice());

        let err = PriceTable::from_columns(dates, vec![(AssetId::new("A"), vec![1.0])]).unwrap_err();
        assert!(matches!(err, CoreError::LengthMismatch { .. }));
    }
}
