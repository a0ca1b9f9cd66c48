//! Domain types for equity price analytics.
//!
//! - [`Date`]: Trading date
//! - [`AssetId`]: Ticker or other asset identifier
//! - [`PriceSeries`]: Validated (date, price) history for one asset
//! - [`PriceTable`]: Several price series sharing one date index

mod asset;
mod date;
mod price_series;
mod price_table;

pub use asset::AssetId;
pub use date::Date;
pub use price_series::PriceSeries;
pub use price_table::PriceTable;
