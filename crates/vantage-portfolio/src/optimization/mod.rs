//! Sharpe ratio portfolio optimization.
//!
//! - [`SharpeObjective`]: Annualized Sharpe ratio and its gradient
//! - [`optimize_portfolio`]: Long-only, fully invested, bounded maximization

mod objective;
mod optimizer;

pub use objective::SharpeObjective;
pub use optimizer::{optimize_portfolio, optimize_with_config, OptimizedPortfolio};
