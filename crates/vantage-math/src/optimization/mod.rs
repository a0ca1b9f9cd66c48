//! Constrained optimization.
//!
//! This module provides projected gradient ascent over the bounded simplex,
//! the feasible set of a long-only, fully invested portfolio.

mod simplex;

pub use simplex::BoundedSimplex;

use crate::error::{MathError, MathResult};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Stop once a projected step moves the point less than this distance.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Length of the first trial step along the normalized gradient.
    pub initial_step: f64,
    /// Smallest accepted gain, relative to `max(|objective|, 1)`.
    ///
    /// Smaller gains are treated as rounding noise and rejected.
    pub min_improvement: f64,
    /// A stalled run counts as converged only if the projected gradient
    /// norm `|P(w + g) - w|` is at most this.
    pub stationarity_tolerance: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 1000,
            initial_step: 1.0,
            min_improvement: 1e-14,
            stationarity_tolerance: 1e-4,
        }
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// Maximizes `objective` over a bounded simplex by projected gradient ascent.
///
/// Each iteration steps along the gradient, projects back onto the simplex
/// and halves the step until the objective improves by more than
/// `config.min_improvement` (backtracking). The run stops once the projected
/// step becomes shorter than `config.tolerance`; it is reported as converged
/// only when the projected gradient there is within
/// `config.stationarity_tolerance`.
///
/// The objective may return a non-finite value for points it cannot
/// evaluate; such trial points are never accepted. If the projected starting
/// point itself is not finite the run stops immediately, unconverged.
pub fn maximize_projected<F, G>(
    objective: F,
    gradient: G,
    domain: &BoundedSimplex,
    initial: &[f64],
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    if initial.len() != domain.dim() {
        return Err(MathError::DimensionMismatch {
            expected: domain.dim(),
            actual: initial.len(),
        });
    }
    if config.tolerance <= 0.0 || config.initial_step <= 0.0 {
        return Err(MathError::invalid_input(
            "tolerance and initial step must be positive",
        ));
    }
    if config.min_improvement < 0.0 || config.stationarity_tolerance < 0.0 {
        return Err(MathError::invalid_input(
            "improvement and stationarity tolerances must be non-negative",
        ));
    }

    let mut params = domain.project(initial);
    let mut best_value = objective(&params);

    if !best_value.is_finite() {
        return Ok(OptimizationResult {
            parameters: params,
            objective_value: best_value,
            iterations: 0,
            converged: false,
        });
    }

    for iteration in 0..config.max_iterations {
        let grad = gradient(&params);
        let grad_mag = grad.iter().map(|g| g * g).sum::<f64>().sqrt();

        if !grad_mag.is_finite() || grad_mag == 0.0 {
            return Ok(OptimizationResult {
                parameters: params,
                objective_value: best_value,
                iterations: iteration,
                converged: grad_mag == 0.0,
            });
        }

        // Backtracking along the projected gradient path
        let mut step = config.initial_step / grad_mag;
        loop {
            let trial: Vec<f64> = params
                .iter()
                .zip(&grad)
                .map(|(p, g)| p + step * g)
                .collect();
            let candidate = domain.project(&trial);

            let moved = distance(&candidate, &params);
            if moved < config.tolerance {
                let stationarity = projected_gradient_norm(domain, &params, &grad);
                log::trace!(
                    "projected step stalled at iteration {iteration} (projected gradient {stationarity:.3e})"
                );
                return Ok(OptimizationResult {
                    parameters: params,
                    objective_value: best_value,
                    iterations: iteration,
                    converged: stationarity <= config.stationarity_tolerance,
                });
            }

            let value = objective(&candidate);
            let floor = config.min_improvement * best_value.abs().max(1.0);
            if value.is_finite() && value - best_value > floor {
                params = candidate;
                best_value = value;
                log::trace!("iteration {iteration}: objective {best_value:.12} (step {moved:.3e})");
                break;
            }

            step *= 0.5;
        }
    }

    Ok(OptimizationResult {
        parameters: params,
        objective_value: best_value,
        iterations: config.max_iterations,
        converged: false,
    })
}

/// `|P(w + g) - w|`: zero exactly at the stationary points of the
/// constrained problem.
fn projected_gradient_norm(domain: &BoundedSimplex, params: &[f64], grad: &[f64]) -> f64 {
    let stepped: Vec<f64> = params.iter().zip(grad).map(|(p, g)| p + g).collect();
    distance(&domain.project(&stepped), params)
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
