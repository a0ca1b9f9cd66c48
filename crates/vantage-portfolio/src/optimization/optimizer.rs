//! Long-only Sharpe ratio maximization.

use nalgebra::DVector;
use serde::Serialize;
use vantage_math::optimization::{maximize_projected, BoundedSimplex, OptimizationResult};
use vantage_math::statistics::{covariance_matrix, mean};

use super::objective::SharpeObjective;
use crate::analytics::returns::{asset_ids, check_alignment, columns, ReturnSeries};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{weight_dispersion, AnalyticsConfig, PortfolioWeights, WeightBounds};

/// Weights maximizing the Sharpe ratio, with the portfolio they produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedPortfolio {
    /// Optimal weights.
    pub weights: PortfolioWeights,
    /// Annualized expected return.
    pub expected_return: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Sharpe ratio.
    pub sharpe: f64,
    /// Iterations used by the winning start.
    pub iterations: u32,
    /// Whether the winning start converged.
    pub converged: bool,
}

/// Maximizes the portfolio Sharpe ratio under `bounds`.
///
/// Uses the default optimizer settings; see [`optimize_with_config`].
///
/// # Errors
///
/// Same as [`optimize_with_config`].
pub fn optimize_portfolio(
    returns: &[ReturnSeries],
    risk_free_rate: f64,
    trading_days: u32,
    bounds: &WeightBounds,
) -> PortfolioResult<OptimizedPortfolio> {
    let config = AnalyticsConfig::default()
        .with_risk_free_rate(risk_free_rate)
        .with_trading_days(trading_days)
        .with_weight_bounds(bounds.clone());
    optimize_with_config(returns, &config)
}

/// Maximizes the portfolio Sharpe ratio over
/// `{ w : sum(w) = 1, min_i <= w_i <= max_i }`.
///
/// Runs projected gradient ascent from the equal-weight point and from one
/// start leaning towards each asset. Every start point is itself a
/// candidate next to the point its ascent reaches. Candidates within
/// `config.optimizer.tie_tolerance` of the best Sharpe ratio are tied; the
/// one closest to equal weighting wins, so interchangeable assets share the
/// allocation evenly.
///
/// # Errors
///
/// - `InvalidConfig` for unusable conventions or optimizer settings
/// - `DataAlignment` if the series do not share dates
/// - `InsufficientData` for fewer than 2 returns
/// - `InfeasibleConstraints` naming the offending bound
/// - `DegenerateVolatility` if no feasible start has positive volatility
pub fn optimize_with_config(
    returns: &[ReturnSeries],
    config: &AnalyticsConfig,
) -> PortfolioResult<OptimizedPortfolio> {
    config.validate()?;
    check_alignment(returns)?;
    let observations = returns[0].len();
    if observations < 2 {
        return Err(PortfolioError::insufficient_data(
            returns[0].asset().as_str(),
            2,
            observations,
        ));
    }

    let assets = asset_ids(returns);
    let simplex = config.weight_bounds.resolve(&assets)?;
    let objective = build_objective(returns, config)?;

    log::debug!(
        "optimizing Sharpe ratio over {} assets and {} observations",
        assets.len(),
        observations
    );

    let math_config = config.optimizer.to_math();
    let mut candidates: Vec<OptimizationResult> = Vec::new();
    for start in start_points(&simplex) {
        let result = maximize_projected(
            |w| objective.sharpe(w),
            |w| objective.gradient(w),
            &simplex,
            &start,
            &math_config,
        )?;
        if result.objective_value.is_finite() && !result.converged {
            log::warn!(
                "optimizer stopped after {} iterations without converging (Sharpe {:.6})",
                result.iterations,
                result.objective_value
            );
        }
        let start_value = objective.sharpe(&start);
        let (iterations, converged) = (result.iterations, result.converged);
        candidates.push(result);
        candidates.push(OptimizationResult {
            parameters: start,
            objective_value: start_value,
            iterations,
            converged,
        });
    }

    let best = select_candidate(candidates, config.optimizer.tie_tolerance).ok_or_else(|| {
        PortfolioError::degenerate_volatility("portfolio", 0.0)
    })?;

    let weights = PortfolioWeights::new(assets, best.parameters)?;
    let result = OptimizedPortfolio {
        expected_return: objective.expected_return(weights.values()),
        volatility: objective.volatility(weights.values()),
        sharpe: best.objective_value,
        iterations: best.iterations,
        converged: best.converged,
        weights,
    };

    log::debug!(
        "optimal Sharpe {:.6} after {} iterations",
        result.sharpe,
        result.iterations
    );
    Ok(result)
}

fn build_objective(
    returns: &[ReturnSeries],
    config: &AnalyticsConfig,
) -> PortfolioResult<SharpeObjective> {
    let cols = columns(returns);
    let means = returns
        .iter()
        .map(|r| mean(r.values()).map_err(|e| PortfolioError::from_math(r.asset().as_str(), e)))
        .collect::<PortfolioResult<Vec<f64>>>()?;
    let covariance = covariance_matrix(&cols)?;

    Ok(SharpeObjective::new(
        DVector::from_vec(means),
        covariance,
        config.risk_free_rate,
        config.trading_days_per_year,
    ))
}

/// The projected equal-weight point, then one start per asset halfway
/// between equal weighting and that asset alone.
fn start_points(simplex: &BoundedSimplex) -> Vec<Vec<f64>> {
    let n = simplex.dim();
    let equal = 1.0 / n as f64;

    let mut starts = vec![simplex.centre()];
    if n > 1 {
        for i in 0..n {
            let leaning: Vec<f64> = (0..n)
                .map(|j| 0.5 * equal + if i == j { 0.5 } else { 0.0 })
                .collect();
            starts.push(simplex.project(&leaning));
        }
    }
    starts
}

/// Best finite candidate; ties go to the smallest weight dispersion, then to
/// the earliest start.
fn select_candidate(
    candidates: Vec<OptimizationResult>,
    tie_tolerance: f64,
) -> Option<OptimizationResult> {
    let best_value = candidates
        .iter()
        .map(|c| c.objective_value)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !best_value.is_finite() {
        return None;
    }

    let mut chosen: Option<(f64, OptimizationResult)> = None;
    for candidate in candidates {
        if !candidate.objective_value.is_finite()
            || candidate.objective_value < best_value - tie_tolerance
        {
            continue;
        }
        let dispersion = weight_dispersion(&candidate.parameters);
        let replace = chosen
            .as_ref()
            .map_or(true, |(best_dispersion, _)| dispersion < *best_dispersion);
        if replace {
            chosen = Some((dispersion, candidate));
        }
    }

    chosen.map(|(_, candidate)| candidate)
}
