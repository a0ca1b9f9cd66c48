//! Portfolio weights.

use serde::ser::{Serialize, SerializeMap, Serializer};
use vantage_core::AssetId;

use crate::error::{PortfolioError, PortfolioResult};

/// Allowed distance of the weight total from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Fully invested, long-only allocation across an ordered set of assets.
///
/// Weights are non-negative and sum to 1 within [`WEIGHT_SUM_TOLERANCE`].
/// Serializes as a map from asset id to weight, in asset order.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioWeights {
    assets: Vec<AssetId>,
    weights: Vec<f64>,
}

impl PortfolioWeights {
    /// Creates weights for `assets`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeights` if the lengths differ, there are no assets,
    /// an asset repeats, a weight is negative or not finite, or the weights do
    /// not sum to 1.
    pub fn new(assets: Vec<AssetId>, weights: Vec<f64>) -> PortfolioResult<Self> {
        if assets.len() != weights.len() {
            return Err(PortfolioError::invalid_weights(format!(
                "{} assets but {} weights",
                assets.len(),
                weights.len()
            )));
        }
        if assets.is_empty() {
            return Err(PortfolioError::invalid_weights("no assets"));
        }
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(PortfolioError::invalid_weights(format!(
                    "{asset} appears more than once"
                )));
            }
        }
        for (asset, &w) in assets.iter().zip(&weights) {
            if !w.is_finite() || w < 0.0 {
                return Err(PortfolioError::invalid_weights(format!(
                    "weight {w} for {asset} must be finite and non-negative"
                )));
            }
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PortfolioError::invalid_weights(format!(
                "weights sum to {total}, expected 1"
            )));
        }

        Ok(Self { assets, weights })
    }

    /// Equal weighting, `1/n` each.
    pub fn equal(assets: Vec<AssetId>) -> PortfolioResult<Self> {
        let n = assets.len();
        if n == 0 {
            return Err(PortfolioError::invalid_weights("no assets"));
        }
        Self::new(assets, vec![1.0 / n as f64; n])
    }

    /// Asset ids, in order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Weights, in asset order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of `asset`, if held.
    #[must_use]
    pub fn weight(&self, asset: &str) -> Option<f64> {
        self.assets
            .iter()
            .position(|id| id.as_str() == asset)
            .map(|i| self.weights[i])
    }

    /// Iterates over (asset, weight) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, f64)> + '_ {
        self.assets.iter().zip(self.weights.iter().copied())
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Always false for a constructed value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Sum of weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Population variance of the weights; zero for equal weighting.
    #[must_use]
    pub fn dispersion(&self) -> f64 {
        weight_dispersion(&self.weights)
    }
}

pub(crate) fn weight_dispersion(weights: &[f64]) -> f64 {
    let n = weights.len() as f64;
    let mean = weights.iter().sum::<f64>() / n;
    weights.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / n
}

impl Serialize for PortfolioWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (asset, w) in self.iter() {
            map.serialize_entry(asset, &w)?;
        }
        map.end()
    }
}
