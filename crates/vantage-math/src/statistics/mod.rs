//! Descriptive statistics.
//!
//! Moments use the sample (ddof = 1) convention throughout, matching how
//! return volatility is quoted in practice.

mod matrix;
mod rolling;

pub use matrix::{correlation_from_covariance, covariance_matrix};
pub use rolling::rolling_std_dev;

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("median of a series containing NaN"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Sample variance with Bessel's correction.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    covariance(values, values)
}

/// Sample standard deviation with Bessel's correction.
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Sample covariance of two equally long series.
pub fn covariance(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.len() < 2 {
        return Err(MathError::insufficient_data(2, a.len()));
    }

    let mean_a = mean(a)?;
    let mean_b = mean(b)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();

    Ok(sum / (a.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_median() {
        let xs = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_relative_eq!(mean(&xs).unwrap(), 2.8, epsilon = 1e-12);
        assert_relative_eq!(median(&xs).unwrap(), 3.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            mean(&[]),
            Err(MathError::InsufficientData { required: 1, actual: 0 })
        ));
        assert!(median(&[]).is_err());
        assert!(matches!(
            sample_variance(&[1.0]),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_sample_variance() {
        // Known example: variance of 2,4,4,4,5,5,7,9 with ddof=1 is 32/7
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_variance(&xs).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(
            sample_std_dev(&xs).unwrap(),
            (32.0f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_series_has_zero_variance() {
        let xs = [0.01; 20];
        assert_eq!(sample_variance(&xs).unwrap(), 0.0);
    }

    #[test]
    fn test_covariance() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        let c = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(covariance(&a, &b).unwrap(), 2.0 * sample_variance(&a).unwrap());
        assert_relative_eq!(covariance(&a, &c).unwrap(), -sample_variance(&a).unwrap());
        assert!(matches!(
            covariance(&a, &b[..3]),
            Err(MathError::DimensionMismatch { .. })
        ));
    }
}
