//! # Vantage Core
//!
//! Core types for the Vantage equity portfolio analytics library.
//!
//! This crate provides the foundational building blocks used throughout Vantage:
//!
//! - **Types**: `Date`, `AssetId`, `PriceSeries` and the aligned `PriceTable`
//! - **Errors**: Validation failures raised while constructing price data
//!
//! ## Design Philosophy
//!
//! - **Validate at the boundary**: A `PriceSeries` or `PriceTable` that exists is valid
//! - **Immutable data**: Loaded prices are never mutated, every analytic is derived
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use vantage_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let aapl = PriceSeries::from_daily_prices("AAPL", start, &[100.0, 101.0, 102.0]).unwrap();
//! let msft = PriceSeries::from_daily_prices("MSFT", start, &[50.0, 50.5, 51.0]).unwrap();
//!
//! let table = PriceTable::new(vec![aapl, msft]).unwrap();
//! assert_eq!(table.num_assets(), 2);
//! assert_eq!(table.num_observations(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{AssetId, Date, PriceSeries, PriceTable};
}

pub use error::{CoreError, CoreResult};
pub use types::{AssetId, Date, PriceSeries, PriceTable};
