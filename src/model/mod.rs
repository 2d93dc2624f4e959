pub mod forest;
pub mod isolation;
pub mod tree;

pub use forest::{FeatureImportance, ValuationModel};
pub use isolation::detect_outliers;

use crate::domain::Features;

/// Anything that can price a feature vector. The upgrade simulator only
/// needs this, which keeps it testable with hand-built pricing functions.
pub trait PricePredictor {
    fn predict(&self, features: &Features) -> f64;
}

#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_trees: usize,
    /// Features considered at each split, out of bedrooms/bathrooms/area.
    pub max_features: usize,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_features: 2,
            min_samples_split: 2,
            max_depth: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IsolationParams {
    pub n_trees: usize,
    /// Expected share of the batch to flag.
    pub contamination: f64,
    pub seed: u64,
}

impl Default for IsolationParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            contamination: 0.1,
            seed: 42,
        }
    }
}
