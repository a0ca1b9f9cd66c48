//! Correlation of daily returns across assets.

use serde::Serialize;
use vantage_core::AssetId;
use vantage_math::statistics::{correlation_from_covariance, covariance_matrix};

use super::returns::{asset_ids, check_alignment, columns, ReturnSeries};
use super::summary::MIN_VOLATILITY;
use crate::error::{PortfolioError, PortfolioResult};

/// Pearson correlation matrix, rows and columns in asset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Asset order of rows and columns.
    pub assets: Vec<AssetId>,
    /// Row-major correlations.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two assets, if both are present.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i][j])
    }

    /// Number of assets.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.assets.len()
    }

    fn index_of(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|id| id.as_str() == asset)
    }
}

/// Correlation of daily returns between every pair of assets.
///
/// # Errors
///
/// - `DataAlignment` if the series do not share dates
/// - `InsufficientData` for fewer than 2 returns
/// - `DegenerateVolatility` if an asset's returns do not vary
pub fn correlation_matrix(returns: &[ReturnSeries]) -> PortfolioResult<CorrelationMatrix> {
    check_alignment(returns)?;
    let first = returns[0].asset().as_str();
    if returns[0].len() < 2 {
        return Err(PortfolioError::insufficient_data(first, 2, returns[0].len()));
    }

    let cov = covariance_matrix(&columns(returns)).map_err(|e| PortfolioError::from_math(first, e))?;

    for (i, series) in returns.iter().enumerate() {
        let vol = cov[(i, i)].max(0.0).sqrt();
        if vol < MIN_VOLATILITY {
            return Err(PortfolioError::degenerate_volatility(
                series.asset().as_str(),
                vol,
            ));
        }
    }

    let corr = correlation_from_covariance(&cov)?;
    let n = returns.len();
    let values = (0..n)
        .map(|i| (0..n).map(|j| corr[(i, j)]).collect())
        .collect();

    Ok(CorrelationMatrix {
        assets: asset_ids(returns),
        values,
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
    fn test_symmetric_unit_diagonal() {
        let panel = [
            returns("AAPL", &[100.0, 101.0, 99.5, 102.0, 103.5, 103.0]),
            returns("MSFT", &[50.0, 50.2, 50.1, 51.0, 50.7, 51.3]),
            returns("GOOGL", &[80.0, 79.0, 80.5, 80.1, 82.0, 81.0]),
        ];
        let corr = correlation_matrix(&panel).unwrap();

        assert_eq!(corr.dim(), 3);
        for i in 0..3 {
            assert_relative_eq!(corr.values[i][i], 1.0);
            for j in 0..3 {
                assert_relative_eq!(corr.values[i][j], corr.values[j][i], epsilon = 1e-15);
                assert!(corr.values[i][j].abs() <= 1.0);
            }
        }
        assert_eq!(corr.get("AAPL", "MSFT"), Some(corr.values[0][1]));
        assert!(corr.get("AAPL", "TSLA").is_none());
    }

    #[test]
    fn test_perfectly_correlated() {
        // Same relative moves, different price levels
        let a = returns("A", &[100.0, 102.0, 101.0, 104.0]);
        let b = returns("B", &[10.0, 10.2, 10.1, 10.4]);
        let corr = correlation_matrix(&[a, b]).unwrap();
        assert_relative_eq!(corr.values[0][1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_asset() {
        let a = returns("A", &[100.0, 102.0, 101.0, 104.0]);
        let flat = returns("FLAT", &[10.0, 10.0, 10.0, 10.0]);
        let err = correlation_matrix(&[a, flat]).unwrap_err();
        assert!(matches!(err, PortfolioError::DegenerateVolatility { .. }));
        assert!(err.to_string().contains("FLAT"));
    }

    #[test]
    fn test_insufficient_data() {
        let a = returns("A", &[100.0, 102.0]);
        let b = returns("B", &[10.0, 10.2]);
        assert!(matches!(
            correlation_matrix(&[a, b]),
            Err(PortfolioError::InsufficientData { .. })
        ));
    }
}
