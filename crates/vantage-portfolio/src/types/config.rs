//! Configuration for portfolio analytics computation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vantage_core::AssetId;
use vantage_math::optimization::{BoundedSimplex, OptimizationConfig};

use crate::error::{PortfolioError, PortfolioResult};

/// How a daily return is derived from two consecutive prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    /// `p_t / p_{t-1} - 1`
    #[default]
    Simple,

    /// `ln(p_t / p_{t-1})`
    Log,
}

impl ReturnType {
    /// Returns a human-readable name for the return type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ReturnType {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "arithmetic" => Ok(Self::Simple),
            "log" | "logarithmic" => Ok(Self::Log),
            other => Err(PortfolioError::invalid_config(format!(
                "unknown return type '{other}', expected 'simple' or 'log'"
            ))),
        }
    }
}

/// Weight limits for a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetBounds {
    /// Minimum weight.
    pub min: f64,
    /// Maximum weight.
    pub max: f64,
}

impl AssetBounds {
    /// Creates bounds `[min, max]`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Per-asset weight bounds for the optimizer.
///
/// Every asset gets `[min, max]` unless it has an entry in `overrides`.
/// The default `[0, 1]` is the plain long-only constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightBounds {
    /// Default minimum weight.
    pub min: f64,
    /// Default maximum weight.
    pub max: f64,
    /// Asset-specific bounds.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<AssetId, AssetBounds>,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self::uniform(0.0, 1.0)
    }
}

impl WeightBounds {
    /// Same bounds for every asset.
    #[must_use]
    pub fn uniform(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            overrides: BTreeMap::new(),
        }
    }

    /// Sets bounds for one asset.
    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<AssetId>, min: f64, max: f64) -> Self {
        self.overrides.insert(asset.into(), AssetBounds::new(min, max));
        self
    }

    /// Bounds that apply to `asset`.
    #[must_use]
    pub fn for_asset(&self, asset: &AssetId) -> AssetBounds {
        self.overrides
            .get(asset)
            .copied()
            .unwrap_or(AssetBounds::new(self.min, self.max))
    }

    /// Builds the feasible set for `assets`, in their order.
    ///
    /// # Errors
    ///
    /// Returns `InfeasibleConstraints` naming the offending constraint when a
    /// bound is not finite or outside `[0, 1]`, a minimum exceeds its maximum,
    /// an override names an asset not in `assets`, or the bounds cannot sum
    /// to 1.
    pub fn resolve(&self, assets: &[AssetId]) -> PortfolioResult<BoundedSimplex> {
        if let Some(unknown) = self.overrides.keys().find(|id| !assets.contains(id)) {
            return Err(PortfolioError::infeasible(format!(
                "bounds given for {unknown}, which is not in the portfolio"
            )));
        }

        let mut lower = Vec::with_capacity(assets.len());
        let mut upper = Vec::with_capacity(assets.len());
        for asset in assets {
            let AssetBounds { min, max } = self.for_asset(asset);
            for (label, value) in [("minimum", min), ("maximum", max)] {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(PortfolioError::infeasible(format!(
                        "{label} weight {value} for {asset} is outside [0, 1]"
                    )));
                }
            }
            if min > max {
                return Err(PortfolioError::infeasible(format!(
                    "minimum weight {min} exceeds maximum {max} for {asset}"
                )));
            }
            lower.push(min);
            upper.push(max);
        }

        Ok(BoundedSimplex::new(lower, upper)?)
    }
}

/// Settings for the Sharpe ratio optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Iteration cap per start point.
    pub max_iterations: u32,
    /// Stop once a projected step moves the weights less than this.
    pub tolerance: f64,
    /// Candidates within this Sharpe distance of the best count as tied.
    pub tie_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-10,
            tie_tolerance: 1e-9,
        }
    }
}

impl OptimizerConfig {
    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the step tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Settings for the underlying gradient ascent.
    #[must_use]
    pub fn to_math(&self) -> OptimizationConfig {
        OptimizationConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            ..OptimizationConfig::default()
        }
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.max_iterations == 0 {
            return Err(PortfolioError::invalid_config(
                "optimizer max_iterations must be positive",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(PortfolioError::invalid_config(format!(
                "optimizer tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(PortfolioError::invalid_config(format!(
                "optimizer tie_tolerance must be non-negative, got {}",
                self.tie_tolerance
            )));
        }
        Ok(())
    }
}

/// Configuration for portfolio analytics computation.
///
/// Carries the market conventions (risk-free rate, annualization factor,
/// return definition), the optimizer constraints and the parallelism
/// switches. Every field has a default, so partial TOML files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annualized risk-free rate, as a decimal.
    pub risk_free_rate: f64,

    /// Trading days per year used to annualize daily figures.
    pub trading_days_per_year: u32,

    /// Return definition.
    pub return_type: ReturnType,

    /// Optimizer weight bounds.
    pub weight_bounds: WeightBounds,

    /// Trailing window for rolling volatility, in returns.
    pub rolling_window: usize,

    /// Optimizer settings.
    pub optimizer: OptimizerConfig,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum asset count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            trading_days_per_year: 252,
            return_type: ReturnType::Simple,
            weight_bounds: WeightBounds::default(),
            rolling_window: 30,
            optimizer: OptimizerConfig::default(),
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the annualized risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_trading_days(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the return definition.
    #[must_use]
    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    /// Sets the optimizer weight bounds.
    #[must_use]
    pub fn with_weight_bounds(mut self, bounds: WeightBounds) -> Self {
        self.weight_bounds = bounds;
        self
    }

    /// Sets the rolling volatility window.
    #[must_use]
    pub fn with_rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = window;
        self
    }

    /// Sets the optimizer settings.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks the settings are usable.
    ///
    /// Weight bounds are checked when they are resolved against the assets.
    pub fn validate(&self) -> PortfolioResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(PortfolioError::invalid_config(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if self.trading_days_per_year == 0 {
            return Err(PortfolioError::invalid_config(
                "trading days per year must be positive",
            ));
        }
        if self.rolling_window < 2 {
            return Err(PortfolioError::invalid_config(format!(
                "rolling window must be at least 2, got {}",
                self.rolling_window
            )));
        }
        self.optimizer.validate()
    }

    /// Annualization factor as a float.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.trading_days_per_year)
    }
}
