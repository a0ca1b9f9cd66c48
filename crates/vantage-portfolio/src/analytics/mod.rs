//! Return-based analytics.
//!
//! All calculations are pure functions over return series:
//!
//! - [`returns`]: Daily simple or log returns from prices
//! - [`summary`]: Mean, volatility, annualization and Sharpe ratio
//! - [`rolling`]: Trailing-window volatility
//! - [`correlation`]: Pairwise return correlation
//! - [`performance`]: Weighted portfolio returns and growth
//! - [`parallel`]: Threshold-switched parallel iteration over assets

pub mod correlation;
pub mod parallel;
pub mod performance;
pub mod returns;
pub mod rolling;
pub mod summary;

pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use parallel::maybe_parallel_map;
pub use performance::{
    cumulative_growth, portfolio_growth, portfolio_performance, portfolio_returns,
    portfolio_sharpe, GrowthCurve, PortfolioPerformance, PORTFOLIO_ID,
};
pub use returns::{
    check_alignment, compute_all_returns, compute_returns, reconstruct_prices, ReturnSeries,
};
pub use rolling::{rolling_volatility, RollingVolatility};
pub use summary::{
    compute_summaries, compute_summary, return_statistics, try_compute_summaries,
    ReturnStatistics, RiskReturnSummary, MIN_VOLATILITY,
};
