//! End-to-end analysis of a price table.

use serde::Serialize;
use vantage_core::{AssetId, CoreError, Date, PriceTable};

use crate::analytics::{
    compute_all_returns, compute_summaries, compute_summary, correlation_matrix,
    portfolio_growth, portfolio_returns, rolling_volatility, CorrelationMatrix, ReturnSeries,
    RiskReturnSummary, RollingVolatility,
};
use crate::error::{PortfolioError, PortfolioResult};
use crate::optimization::{optimize_with_config, OptimizedPortfolio};
use crate::types::{AnalyticsConfig, PortfolioWeights, ReturnType};

/// Statistics of a fixed-weight portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    /// Weights applied on every day.
    pub weights: PortfolioWeights,
    /// Summary of the daily portfolio returns.
    pub summary: RiskReturnSummary,
    /// Total return over the period.
    pub cumulative_return: f64,
}

/// Everything the analyzer derives from one price table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Assets, in table order.
    pub assets: Vec<AssetId>,
    /// First price date.
    pub start_date: Date,
    /// Last price date.
    pub end_date: Date,
    /// Number of daily returns per asset.
    pub observations: usize,
    /// Return definition used.
    pub return_type: ReturnType,
    /// Annualized risk-free rate used.
    pub risk_free_rate: f64,
    /// Annualization factor used.
    pub trading_days_per_year: u32,
    /// Per-asset summaries.
    pub summaries: Vec<RiskReturnSummary>,
    /// Return correlations.
    pub correlation: CorrelationMatrix,
    /// Rolling volatility per asset; empty when the history is shorter than
    /// the window.
    pub rolling_volatility: Vec<RollingVolatility>,
    /// Equally weighted portfolio.
    pub equal_weight: PortfolioSnapshot,
    /// Sharpe-maximizing portfolio.
    pub optimized: OptimizedPortfolio,
}

/// Runs the full pipeline: returns, summaries, correlation, rolling
/// volatility, equal-weight performance and optimization.
#[derive(Debug, Clone, Default)]
pub struct PortfolioAnalyzer {
    config: AnalyticsConfig,
}

impl PortfolioAnalyzer {
    /// Creates an analyzer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` does not validate.
    pub fn new(config: AnalyticsConfig) -> PortfolioResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Daily returns of every asset.
    pub fn returns(&self, table: &PriceTable) -> PortfolioResult<Vec<ReturnSeries>> {
        compute_all_returns(table, &self.config)
    }

    /// Analyzes `table`.
    ///
    /// # Errors
    ///
    /// Any failure aborts the analysis; there is no partial report.
    pub fn analyze(&self, table: &PriceTable) -> PortfolioResult<AnalysisReport> {
        let config = &self.config;
        let returns = self.returns(table)?;
        let observations = returns.first().map_or(0, ReturnSeries::len);

        let summaries = compute_summaries(&returns, config)?;
        let correlation = correlation_matrix(&returns)?;
        let rolling = self.rolling(&returns)?;

        let weights = PortfolioWeights::equal(table.assets())?;
        let combined = portfolio_returns(&returns, &weights)?;
        let equal_weight = PortfolioSnapshot {
            summary: compute_summary(&combined, config.risk_free_rate, config.trading_days_per_year)?,
            cumulative_return: portfolio_growth(&returns, &weights)?.total_return(),
            weights,
        };

        let optimized = optimize_with_config(&returns, config)?;

        let (start_date, end_date) = table
            .date_range()
            .ok_or(PortfolioError::Core(CoreError::EmptyTable))?;

        log::debug!(
            "analysis complete: {} assets, optimal Sharpe {:.4}",
            returns.len(),
            optimized.sharpe
        );

        Ok(AnalysisReport {
            assets: table.assets(),
            start_date,
            end_date,
            observations,
            return_type: config.return_type,
            risk_free_rate: config.risk_free_rate,
            trading_days_per_year: config.trading_days_per_year,
            summaries,
            correlation,
            rolling_volatility: rolling,
            equal_weight,
            optimized,
        })
    }

    fn rolling(&self, returns: &[ReturnSeries]) -> PortfolioResult<Vec<RollingVolatility>> {
        let window = self.config.rolling_window;
        if returns.iter().any(|r| r.len() < window) {
            log::debug!("skipping rolling volatility: fewer than {window} returns");
            return Ok(Vec::new());
        }
        returns
            .iter()
            .map(|r| rolling_volatility(r, window))
            .collect()
    }
}
