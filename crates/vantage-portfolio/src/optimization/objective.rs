//! Annualized Sharpe ratio of a weight vector.

use nalgebra::{DMatrix, DVector};

use crate::analytics::summary::MIN_VOLATILITY;

/// Sharpe ratio as a function of portfolio weights.
///
/// With daily mean vector `mu`, daily covariance `sigma` and `T` trading
/// days per year:
///
/// ```text
/// S(w) = (T * w'mu - rf) / sqrt(T * w'sigma w)
/// ```
#[derive(Debug, Clone)]
pub struct SharpeObjective {
    mean: DVector<f64>,
    covariance: DMatrix<f64>,
    risk_free_rate: f64,
    periods: f64,
}

impl SharpeObjective {
    /// Creates the objective from daily moments.
    ///
    /// # Panics
    ///
    /// Panics if `covariance` is not square with the length of `mean`.
    #[must_use]
    pub fn new(
        mean: DVector<f64>,
        covariance: DMatrix<f64>,
        risk_free_rate: f64,
        trading_days: u32,
    ) -> Self {
        assert_eq!(covariance.shape(), (mean.len(), mean.len()));
        Self {
            mean,
            covariance,
            risk_free_rate,
            periods: f64::from(trading_days),
        }
    }

    /// Number of assets.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Annualized expected return, `T * w'mu`.
    #[must_use]
    pub fn expected_return(&self, w: &[f64]) -> f64 {
        self.periods * self.mean.iter().zip(w).map(|(m, x)| m * x).sum::<f64>()
    }

    /// Annualized volatility, `sqrt(T * w'sigma w)`.
    #[must_use]
    pub fn volatility(&self, w: &[f64]) -> f64 {
        let w = DVector::from_column_slice(w);
        let variance = w.dot(&(&self.covariance * &w));
        (self.periods * variance).max(0.0).sqrt()
    }

    /// Sharpe ratio; negative infinity where the volatility vanishes.
    #[must_use]
    pub fn sharpe(&self, w: &[f64]) -> f64 {
        let vol = self.volatility(w);
        if vol < MIN_VOLATILITY {
            return f64::NEG_INFINITY;
        }
        (self.expected_return(w) - self.risk_free_rate) / vol
    }

    /// Gradient of [`SharpeObjective::sharpe`]; zero where it is undefined.
    ///
    /// `dS/dw = T mu / s - (T w'mu - rf) * T sigma w / s^3` with `s` the
    /// annualized volatility.
    #[must_use]
    pub fn gradient(&self, w: &[f64]) -> Vec<f64> {
        let vol = self.volatility(w);
        if vol < MIN_VOLATILITY {
            return vec![0.0; self.dim()];
        }

        let excess = self.expected_return(w) - self.risk_free_rate;
        let sigma_w = &self.covariance * DVector::from_column_slice(w);
        let vol3 = vol * vol * vol;

        self.mean
            .iter()
            .zip(sigma_w.iter())
            .map(|(m, sw)| self.periods * m / vol - excess * self.periods * sw / vol3)
            .collect()
    }
}
