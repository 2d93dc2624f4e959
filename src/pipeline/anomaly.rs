// src/pipeline/anomaly.rs

use crate::domain::ListingRecord;
use crate::model::{detect_outliers, IsolationParams, PricePredictor};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyAssessment {
    pub listing: ListingRecord,
    pub predicted_price: f64,
    pub residual: f64,
    /// Isolation score; lower is more anomalous.
    pub score: f64,
    pub is_anomaly: bool,
}

/// Prices every usable listing, then runs the isolation forest over
/// (bedrooms, bathrooms, area, residual) for the whole batch at once.
pub fn score_listings<M: PricePredictor>(
    listings: &[ListingRecord],
    model: &M,
    params: &IsolationParams,
) -> Vec<AnomalyAssessment> {
    let priced: Vec<(&ListingRecord, f64)> = listings
        .iter()
        .filter(|l| l.is_usable())
        .map(|l| (l, model.predict(&l.features())))
        .collect();

    let rows: Vec<Vec<f64>> = priced
        .iter()
        .map(|(l, predicted)| vec![l.bedrooms, l.bathrooms, l.area_sqft, l.price - predicted])
        .collect();

    let outcomes = detect_outliers(&rows, params);

    let assessments: Vec<AnomalyAssessment> = priced
        .into_iter()
        .zip(outcomes)
        .map(|((listing, predicted_price), (score, is_anomaly))| AnomalyAssessment {
            residual: listing.price - predicted_price,
            listing: listing.clone(),
            predicted_price,
            score,
            is_anomaly,
        })
        .collect();

    info!(
        scored = assessments.len(),
        flagged = assessments.iter().filter(|a| a.is_anomaly).count(),
        contamination = params.contamination,
        "scored listings"
    );
    assessments
}
