//! The bounded simplex `{ w : sum(w) = 1, lower <= w <= upper }`.

use crate::error::{MathError, MathResult};

/// Slack allowed when checking that the bounds admit a point summing to 1.
const FEASIBILITY_TOLERANCE: f64 = 1e-12;

/// Maximum bisection steps when searching for the projection shift.
const MAX_BISECTIONS: usize = 200;

/// Box-constrained probability simplex.
///
/// This is the feasible set of a fully invested portfolio with per-asset
/// weight limits. Construction fails when the set is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedSimplex {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl BoundedSimplex {
    /// Creates the simplex with per-coordinate bounds.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the bound vectors differ in length
    /// - `InvalidInput` if there are no coordinates or a bound is not finite
    /// - `Infeasible` if a lower bound exceeds its upper bound, or the bounds
    ///   cannot sum to 1
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> MathResult<Self> {
        if lower.len() != upper.len() {
            return Err(MathError::DimensionMismatch {
                expected: lower.len(),
                actual: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(MathError::invalid_input("simplex needs at least one coordinate"));
        }

        for (i, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "bounds for coordinate {i} must be finite, got [{lo}, {hi}]"
                )));
            }
            if lo > hi {
                return Err(MathError::infeasible(format!(
                    "lower bound {lo} exceeds upper bound {hi} for coordinate {i}"
                )));
            }
        }

        let lower_sum: f64 = lower.iter().sum();
        if lower_sum > 1.0 + FEASIBILITY_TOLERANCE {
            return Err(MathError::infeasible(format!(
                "lower bounds sum to {lower_sum}, above the full-investment total of 1"
            )));
        }
        let upper_sum: f64 = upper.iter().sum();
        if upper_sum < 1.0 - FEASIBILITY_TOLERANCE {
            return Err(MathError::infeasible(format!(
                "upper bounds sum to {upper_sum}, below the full-investment total of 1"
            )));
        }

        Ok(Self { lower, upper })
    }

    /// Creates the simplex with the same bounds on every coordinate.
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> MathResult<Self> {
        Self::new(vec![lower; dim], vec![upper; dim])
    }

    /// Number of coordinates.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Checks membership within `tol`.
    #[must_use]
    pub fn contains(&self, w: &[f64], tol: f64) -> bool {
        w.len() == self.dim()
            && (w.iter().sum::<f64>() - 1.0).abs() <= tol
            && w
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&lo, &hi))| x >= lo - tol && x <= hi + tol)
    }

    /// The feasible point closest to equal weighting.
    #[must_use]
    pub fn centre(&self) -> Vec<f64> {
        let n = self.dim();
        self.project(&vec![1.0 / n as f64; n])
    }

    /// Euclidean projection of `v` onto the set.
    ///
    /// The minimizer has the form `w_i = clamp(v_i - tau, lower_i, upper_i)`
    /// for a scalar shift `tau`; the coordinate sum is non-increasing in
    /// `tau`, so it is found by bisection. Non-finite entries of `v` are
    /// treated as zero.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not have [`BoundedSimplex::dim`] entries.
    #[must_use]
    pub fn project(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.dim(), "projection input has wrong dimension");

        let v: Vec<f64> = v
            .iter()
            .map(|&x| if x.is_finite() { x } else { 0.0 })
            .collect();

        if self.contains(&v, 4.0 * f64::EPSILON) {
            return v;
        }

        // At tau_lo every coordinate sits at its upper bound, at tau_hi at its lower bound
        let mut tau_lo = f64::INFINITY;
        let mut tau_hi = f64::NEG_INFINITY;
        for (i, &x) in v.iter().enumerate() {
            tau_lo = tau_lo.min(x - self.upper[i]);
            tau_hi = tau_hi.max(x - self.lower[i]);
        }

        for _ in 0..MAX_BISECTIONS {
            let tau = 0.5 * (tau_lo + tau_hi);
            if tau <= tau_lo || tau >= tau_hi {
                break;
            }
            if self.shifted_sum(&v, tau) > 1.0 {
                tau_lo = tau;
            } else {
                tau_hi = tau;
            }
        }

        let tau = 0.5 * (tau_lo + tau_hi);
        let mut w = self.shifted(&v, tau);
        self.spread_residual(&mut w);
        w
    }

    fn shifted(&self, v: &[f64], tau: f64) -> Vec<f64> {
        v.iter()
            .enumerate()
            .map(|(i, &x)| (x - tau).clamp(self.lower[i], self.upper[i]))
            .collect()
    }

    fn shifted_sum(&self, v: &[f64], tau: f64) -> f64 {
        v.iter()
            .enumerate()
            .map(|(i, &x)| (x - tau).clamp(self.lower[i], self.upper[i]))
            .sum()
    }

    /// Puts the rounding residual of the bisection on coordinates with room.
    fn spread_residual(&self, w: &mut [f64]) {
        let residual = 1.0 - w.iter().sum::<f64>();
        if residual == 0.0 {
            return;
        }

        let free: Vec<usize> = (0..w.len())
            .filter(|&i| {
                if residual > 0.0 {
                    w[i] + residual <= self.upper[i]
                } else {
                    w[i] + residual >= self.lower[i]
                }
            })
            .collect();

        if let Some(&i) = free.first() {
            w[i] += residual;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_infeasible_bounds() {
        assert!(matches!(
            BoundedSimplex::uniform(3, 0.5, 1.0),
            Err(MathError::Infeasible { .. })
        ));
        assert!(matches!(
            BoundedSimplex::uniform(3, 0.0, 0.2),
            Err(MathError::Infeasible { .. })
        ));
        assert!(matches!(
            BoundedSimplex::new(vec![0.6, 0.0], vec![0.5, 1.0]),
            Err(MathError::Infeasible { .. })
        ));
        assert!(matches!(
            BoundedSimplex::new(vec![0.0], vec![1.0, 1.0]),
            Err(MathError::DimensionMismatch { .. })
        ));
        assert!(BoundedSimplex::new(vec![], vec![]).is_err());
        assert!(BoundedSimplex::uniform(2, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_exactly_tight_bounds() {
        let simplex = BoundedSimplex::uniform(4, 0.25, 0.25).unwrap();
        let w = simplex.project(&[10.0, -3.0, 0.0, 1.0]);
        for x in w {
            assert_relative_eq!(x, 0.25, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_projection_of_feasible_point_is_identity() {
        let simplex = BoundedSimplex::uniform(3, 0.0, 1.0).unwrap();
        let p = [0.2, 0.5, 0.3];
        let w = simplex.project(&p);
        for (a, b) in w.iter().zip(p) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_projection_known_value() {
        // Projection of (1, 0) onto the 2-simplex is (1, 0); of (2, 0) also (1, 0)
        let simplex = BoundedSimplex::uniform(2, 0.0, 1.0).unwrap();
        let w = simplex.project(&[2.0, 0.0]);
        assert_relative_eq!(w[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.0, epsilon = 1e-12);

        // (0.7, 0.7) -> shift by 0.2 -> (0.5, 0.5)
        let w = simplex.project(&[0.7, 0.7]);
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_respects_caps() {
        let simplex = BoundedSimplex::uniform(3, 0.1, 0.5).unwrap();
        let w = simplex.project(&[5.0, 0.0, 0.0]);
        assert!(simplex.contains(&w, 1e-12));
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(w[2], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_centre_is_equal_weight_when_allowed() {
        let simplex = BoundedSimplex::uniform(3, 0.0, 1.0).unwrap();
        for x in simplex.centre() {
            assert_relative_eq!(x, 1.0 / 3.0, epsilon = 1e-15);
        }

        // Equal weight is infeasible here, centre is the nearest point
        let simplex = BoundedSimplex::new(vec![0.6, 0.0, 0.0], vec![1.0, 1.0, 1.0]).unwrap();
        let c = simplex.centre();
        assert!(simplex.contains(&c, 1e-12));
        assert_relative_eq!(c[0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(c[1], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_input() {
        let simplex = BoundedSimplex::uniform(2, 0.0, 1.0).unwrap();
        let w = simplex.project(&[f64::NAN, 1.0]);
        assert!(simplex.contains(&w, 1e-12));
    }
}
