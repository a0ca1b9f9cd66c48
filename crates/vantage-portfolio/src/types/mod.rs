//! Domain types for portfolio analytics.
//!
//! - [`AnalyticsConfig`]: Market conventions, constraints and parallelism
//! - [`ReturnType`]: Simple or logarithmic daily returns
//! - [`WeightBounds`]: Per-asset optimizer weight limits
//! - [`OptimizerConfig`]: Sharpe optimizer settings
//! - [`PortfolioWeights`]: A fully invested long-only allocation

mod config;
mod weights;

pub use config::{AnalyticsConfig, AssetBounds, OptimizerConfig, ReturnType, WeightBounds};
pub(crate) use weights::weight_dispersion;
pub use weights::{PortfolioWeights, WEIGHT_SUM_TOLERANCE};
