//! Trailing-window statistics.

use super::sample_std_dev;
use crate::error::{MathError, MathResult};

/// Sample standard deviation over every full trailing window.
///
/// Returns `values.len() - window + 1` entries; entry `k` covers
/// `values[k..k + window]`. Windows shorter than two points have no sample
/// deviation and are rejected.
pub fn rolling_std_dev(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    if window < 2 {
        return Err(MathError::invalid_input(format!(
            "rolling window must be at least 2, got {window}"
        )));
    }
    if values.len() < window {
        return Err(MathError::insufficient_data(window, values.len()));
    }

    values.windows(window).map(sample_std_dev).collect()
}
