//! Error types for price data construction.
//!
//! Every constructor in this crate validates its input and reports the
//! first violation it finds with enough context to locate the bad row.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building dates, price series and price tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid or unparseable date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A price that is not a positive finite number.
    #[error("Invalid price for {asset} on {date}: {value}")]
    InvalidPrice {
        /// Asset the price belongs to.
        asset: String,
        /// Observation date.
        date: String,
        /// The offending value.
        value: f64,
    },

    /// Dates of a series are not strictly increasing.
    #[error("Dates for {asset} are not strictly increasing: {current} follows {previous}")]
    UnsortedDates {
        /// Asset whose series is out of order.
        asset: String,
        /// The earlier row's date.
        previous: String,
        /// The later row's date.
        current: String,
    },

    /// The same date appears twice in one series.
    #[error("Duplicate date {date} in series for {asset}")]
    DuplicateDate {
        /// Asset whose series repeats a date.
        asset: String,
        /// The repeated date.
        date: String,
    },

    /// Dates and prices of different lengths were supplied.
    #[error("Length mismatch for {asset}: {dates} dates but {prices} prices")]
    LengthMismatch {
        /// Asset being constructed.
        asset: String,
        /// Number of dates.
        dates: usize,
        /// Number of prices.
        prices: usize,
    },

    /// Price series of different assets do not share the same date index.
    #[error("Data alignment error for {asset}: {reason}")]
    DataAlignment {
        /// First asset found to be out of line with the table index.
        asset: String,
        /// What differs.
        reason: String,
    },

    /// The same asset was supplied twice.
    #[error("Duplicate asset: {asset}")]
    DuplicateAsset {
        /// The repeated asset id.
        asset: String,
    },

    /// A table was built without any series.
    #[error("Price table has no assets")]
    EmptyTable,

    /// An empty or otherwise unusable asset identifier.
    #[error("Invalid asset identifier: {reason}")]
    InvalidAssetId {
        /// Why the identifier was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a data alignment error.
    #[must_use]
    pub fn data_alignment(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataAlignment {
            asset: asset.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by misaligned multi-asset input.
    #[must_use]
    pub fn is_alignment_error(&self) -> bool {
        matches!(self, Self::DataAlignment { .. })
    }
}
