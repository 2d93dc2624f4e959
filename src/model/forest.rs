// src/model/forest.rs

use crate::domain::{Features, ListingRecord};
use crate::model::tree::{RegressionTree, TreeParams};
use crate::model::{ForestParams, PricePredictor};
use crate::pipeline::PipelineError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

/// Share of total split gain attributed to each input, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImportance {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area_sqft: f64,
}

/// Bagged regression trees mapping physical features to price. Trained per
/// request and dropped with it.
#[derive(Debug, Clone)]
pub struct ValuationModel {
    trees: Vec<RegressionTree>,
    importances: [f64; Features::COUNT],
}

impl ValuationModel {
    /// Fits the ensemble on the usable listings.
    ///
    /// For a fixed listing order and seed the result is bit-for-bit
    /// reproducible: one master RNG hands each tree its own seed.
    pub fn train(
        listings: &[ListingRecord],
        params: &ForestParams,
        min_listings: usize,
    ) -> Result<Self, PipelineError> {
        let usable: Vec<&ListingRecord> = listings.iter().filter(|l| l.is_usable()).collect();
        if usable.len() < min_listings.max(1) {
            return Err(PipelineError::not_enough_to_analyze(usable.len(), min_listings));
        }

        let x: Vec<Vec<f64>> = usable.iter().map(|l| l.features().to_row()).collect();
        let y: Vec<f64> = usable.iter().map(|l| l.price).collect();
        let n = x.len();

        let tree_params = TreeParams {
            max_features: params.max_features.clamp(1, Features::COUNT),
            min_samples_split: params.min_samples_split.max(2),
            max_depth: params.max_depth,
        };

        let mut master = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        let mut importances = [0.0; Features::COUNT];

        for _ in 0..params.n_trees.max(1) {
            let mut rng = StdRng::seed_from_u64(master.gen());
            let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            let mut gains = [0.0; Features::COUNT];
            trees.push(RegressionTree::fit(
                &x,
                &y,
                bootstrap,
                &tree_params,
                &mut rng,
                &mut gains,
            ));

            let total: f64 = gains.iter().sum();
            if total > 0.0 {
                for (acc, g) in importances.iter_mut().zip(gains) {
                    *acc += g / total;
                }
            }
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|v| *v /= total);
        } else {
            importances = [1.0 / Features::COUNT as f64; Features::COUNT];
        }

        info!(
            listings = n,
            trees = trees.len(),
            seed = params.seed,
            "trained valuation model"
        );

        Ok(Self {
            trees,
            importances,
        })
    }

    pub fn feature_importances(&self) -> FeatureImportance {
        let [bedrooms, bathrooms, area_sqft] = self.importances;
        FeatureImportance {
            bedrooms,
            bathrooms,
            area_sqft,
        }
    }
}

impl PricePredictor for ValuationModel {
    fn predict(&self, features: &Features) -> f64 {
        let row = features.to_row();
        let sum: f64 = self.trees.iter().map(|t| t.predict(&row)).sum();
        sum / self.trees.len() as f64
    }
}
