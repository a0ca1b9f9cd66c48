//! # Vantage Math
//!
//! Mathematical utilities for the Vantage portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, median, sample variance, covariance and correlation matrices
//! - **Optimization**: Projection onto the bounded simplex and projected gradient ascent
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Two-pass moments, explicit degenerate-input errors
//! - **Deterministic**: No randomness, identical input gives identical output
//! - **Small surface**: `f64` slices in, `f64` / nalgebra matrices out

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod optimization;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{
        maximize_projected, BoundedSimplex, OptimizationConfig, OptimizationResult,
    };
    pub use crate::statistics::{
        correlation_from_covariance, covariance, covariance_matrix, mean, median, rolling_std_dev,
        sample_std_dev, sample_variance,
    };
}

pub use error::{MathError, MathResult};
