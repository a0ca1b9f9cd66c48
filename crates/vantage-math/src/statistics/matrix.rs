//! Covariance and correlation matrices.

use nalgebra::DMatrix;

use super::mean;
use crate::error::{MathError, MathResult};

/// Variances below this are treated as zero when normalizing.
const MIN_VARIANCE: f64 = 1e-24;

/// Sample covariance matrix of equally long columns.
///
/// Entry `(i, j)` is the ddof = 1 covariance of `columns[i]` and
/// `columns[j]`. The result is exactly symmetric.
pub fn covariance_matrix(columns: &[&[f64]]) -> MathResult<DMatrix<f64>> {
    let n = columns.len();
    if n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }

    let len = columns[0].len();
    if let Some(bad) = columns.iter().find(|c| c.len() != len) {
        return Err(MathError::DimensionMismatch {
            expected: len,
            actual: bad.len(),
        });
    }
    if len < 2 {
        return Err(MathError::insufficient_data(2, len));
    }

    // Centre once, then every entry is a dot product
    let centred: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| {
            let m = mean(c)?;
            Ok(c.iter().map(|x| x - m).collect())
        })
        .collect::<MathResult<_>>()?;

    let denom = (len - 1) as f64;
    let mut cov = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let v = centred[i]
                .iter()
                .zip(&centred[j])
                .map(|(x, y)| x * y)
                .sum::<f64>()
                / denom;
            cov[(i, j)] = v;
            cov[(j, i)] = v;
        }
    }

    Ok(cov)
}

/// Converts a covariance matrix into a Pearson correlation matrix.
///
/// The diagonal is exactly 1 and off-diagonal entries are clamped to
/// `[-1, 1]`. A (near) zero variance on the diagonal has no defined
/// correlation and is reported as `DivisionByZero`.
pub fn correlation_from_covariance(cov: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let n = cov.nrows();
    if n != cov.ncols() {
        return Err(MathError::invalid_input("covariance matrix must be square"));
    }

    let mut std_devs = Vec::with_capacity(n);
    for i in 0..n {
        let var = cov[(i, i)];
        if var <= MIN_VARIANCE {
            return Err(MathError::DivisionByZero { value: var });
        }
        std_devs.push(var.sqrt());
    }

    Ok(DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            1.0
        } else {
            (cov[(i, j)] / (std_devs[i] * std_devs[j])).clamp(-1.0, 1.0)
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{covariance, sample_variance};
    use approx::assert_relative_eq;

    #[test]
    fn test_covariance_matrix_matches_pairwise() {
        let a = [0.01, -0.02, 0.015, 0.003, -0.007];
        let b = [0.02, -0.01, 0.005, 0.001, -0.004];
        let c = [-0.01, 0.02, -0.012, 0.0, 0.006];

        let cov = covariance_matrix(&[&a[..], &b[..], &c[..]]).unwrap();
        assert_eq!(cov.shape(), (3, 3));
        assert_relative_eq!(cov[(0, 0)], sample_variance(&a).unwrap(), epsilon = 1e-15);
        assert_relative_eq!(cov[(0, 1)], covariance(&a, &b).unwrap(), epsilon = 1e-15);
        assert_relative_eq!(cov[(2, 1)], covariance(&c, &b).unwrap(), epsilon = 1e-15);
        assert_eq!(cov, cov.transpose());
    }

    #[test]
    fn test_covariance_matrix_validation() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];
        assert!(matches!(
            covariance_matrix(&[&a[..], &b[..]]),
            Err(MathError::DimensionMismatch { .. })
        ));
        assert!(covariance_matrix(&[]).is_err());
        assert!(covariance_matrix(&[&[1.0][..]]).is_err());
    }

    #[test]
    fn test_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.1, 5.9, 8.0];
        let c = [4.0, 3.0, 2.0, 1.0];

        let cov = covariance_matrix(&[&a[..], &b[..], &c[..]]).unwrap();
        let corr = correlation_from_covariance(&cov).unwrap();

        for i in 0..3 {
            assert_eq!(corr[(i, i)], 1.0);
        }
        assert!(corr[(0, 1)] > 0.99);
        assert_relative_eq!(corr[(0, 2)], -1.0, epsilon = 1e-12);
        assert_eq!(corr, corr.transpose());
    }

    #[test]
    fn test_correlation_zero_variance() {
        let a = [1.0, 2.0, 3.0];
        let flat = [5.0, 5.0, 5.0];
        let cov = covariance_matrix(&[&a[..], &flat[..]]).unwrap();
        assert!(matches!(
            correlation_from_covariance(&cov),
            Err(MathError::DivisionByZero { .. })
        ));
    }
}
