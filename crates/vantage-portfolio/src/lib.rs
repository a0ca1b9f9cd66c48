//! # Vantage Portfolio
//!
//! Return, risk and Sharpe ratio analytics for equity portfolios.
//!
//! This crate turns aligned daily price histories into return series,
//! risk/return summaries and a Sharpe-maximizing long-only allocation.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Explicit failures**: Misaligned data, zero volatility and infeasible
//!   bounds are errors, never silently coerced values
//! - **One convention**: Summaries and the optimizer annualize the same way
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use vantage_core::{Date, PriceSeries, PriceTable};
//! use vantage_portfolio::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let table = PriceTable::new(vec![
//!     PriceSeries::from_daily_prices("A", start, &[100.0, 101.0, 102.0, 101.0]).unwrap(),
//!     PriceSeries::from_daily_prices("B", start, &[50.0, 50.5, 51.0, 50.7]).unwrap(),
//! ])
//! .unwrap();
//!
//! let config = AnalyticsConfig::default();
//! let returns = compute_all_returns(&table, &config).unwrap();
//! let summaries = compute_summaries(&returns, &config).unwrap();
//! assert!(summaries[0].sharpe.is_finite());
//!
//! let optimized = optimize_portfolio(&returns, 0.0, 252, &WeightBounds::default()).unwrap();
//! assert!((optimized.weights.total() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Returns, summaries, rolling volatility, correlation, performance
//! - [`optimization`] - Sharpe objective and the bounded optimizer
//! - [`analyzer`] - The full pipeline behind one configuration
//! - [`types`] - Configuration, bounds and weights
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing across assets

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod analytics;
pub mod analyzer;
pub mod error;
pub mod optimization;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

pub use types::{
    AnalyticsConfig, AssetBounds, OptimizerConfig, PortfolioWeights, ReturnType, WeightBounds,
    WEIGHT_SUM_TOLERANCE,
};

pub use analytics::{
    check_alignment, compute_all_returns, compute_returns, compute_summaries, compute_summary,
    correlation_matrix, cumulative_growth, maybe_parallel_map, portfolio_growth,
    portfolio_performance, portfolio_returns, portfolio_sharpe, reconstruct_prices,
    return_statistics, rolling_volatility, try_compute_summaries, CorrelationMatrix, GrowthCurve,
    PortfolioPerformance, ReturnSeries, ReturnStatistics, RiskReturnSummary, RollingVolatility,
    MIN_VOLATILITY, PORTFOLIO_ID,
};

pub use analyzer::{AnalysisReport, PortfolioAnalyzer, PortfolioSnapshot};
pub use optimization::{optimize_portfolio, optimize_with_config, OptimizedPortfolio, SharpeObjective};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        compute_all_returns, compute_returns, compute_summaries, compute_summary,
        correlation_matrix, portfolio_performance, portfolio_sharpe, reconstruct_prices,
        rolling_volatility, try_compute_summaries, CorrelationMatrix, PortfolioPerformance,
        ReturnSeries, RiskReturnSummary, RollingVolatility,
    };
    pub use crate::analyzer::{AnalysisReport, PortfolioAnalyzer};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::optimization::{optimize_portfolio, optimize_with_config, OptimizedPortfolio};
    pub use crate::types::{
        AnalyticsConfig, OptimizerConfig, PortfolioWeights, ReturnType, WeightBounds,
    };
}
