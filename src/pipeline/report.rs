// src/pipeline/report.rs

use crate::domain::ListingRecord;
use crate::model::{FeatureImportance, ValuationModel};
use crate::pipeline::anomaly::score_listings;
use crate::pipeline::upgrade::{simulate, Category, FeatureAverages, UpgradeSimulationResult};
use crate::pipeline::{AnalysisSettings, PipelineError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryCounts {
    pub good_investment: usize,
    pub good_renovation: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub region: String,
    pub generated_at: DateTime<Utc>,
    pub listings_analyzed: usize,
    pub anomalies_detected: usize,
    pub good_investments: Vec<UpgradeSimulationResult>,
    pub good_renovations: Vec<UpgradeSimulationResult>,
    pub counts: CategoryCounts,
    pub feature_importance: FeatureImportance,
}

impl AnalysisReport {
    /// Investments first, then renovations.
    pub fn results(&self) -> impl Iterator<Item = &UpgradeSimulationResult> {
        self.good_investments.iter().chain(self.good_renovations.iter())
    }
}

/// Splits simulation results into their buckets, best ROI first.
pub fn build_report(
    region: &str,
    listings_analyzed: usize,
    anomalies_detected: usize,
    results: Vec<UpgradeSimulationResult>,
    feature_importance: FeatureImportance,
) -> AnalysisReport {
    let (mut good_investments, mut good_renovations): (Vec<_>, Vec<_>) = results
        .into_iter()
        .filter(|r| r.category != Category::Discarded)
        .partition(|r| r.category == Category::GoodInvestment);

    let by_roi = |a: &UpgradeSimulationResult, b: &UpgradeSimulationResult| {
        b.roi_percent.total_cmp(&a.roi_percent)
    };
    good_investments.sort_by(by_roi);
    good_renovations.sort_by(by_roi);

    let counts = CategoryCounts {
        good_investment: good_investments.len(),
        good_renovation: good_renovations.len(),
        total: good_investments.len() + good_renovations.len(),
    };

    AnalysisReport {
        region: region.to_string(),
        generated_at: Utc::now(),
        listings_analyzed,
        anomalies_detected,
        good_investments,
        good_renovations,
        counts,
        feature_importance,
    }
}

/// Train, score, simulate and report over an already-aggregated listing set.
pub fn analyze(
    region: &str,
    listings: &[ListingRecord],
    settings: &AnalysisSettings,
) -> Result<AnalysisReport, PipelineError> {
    let usable: Vec<ListingRecord> = listings.iter().filter(|l| l.is_usable()).cloned().collect();
    if usable.len() < settings.min_listings {
        return Err(PipelineError::not_enough_to_analyze(
            usable.len(),
            settings.min_listings,
        ));
    }

    let model = ValuationModel::train(&usable, &settings.forest, settings.min_listings)?;
    let assessments = score_listings(&usable, &model, &settings.isolation);
    let averages = FeatureAverages::from_listings(&usable)
        .ok_or_else(|| PipelineError::not_enough_to_analyze(0, settings.min_listings))?;

    let anomalies_detected = assessments.iter().filter(|a| a.is_anomaly).count();
    let results = simulate(&assessments, &model, &averages);

    let report = build_report(
        region,
        usable.len(),
        anomalies_detected,
        results,
        model.feature_importances(),
    );

    info!(
        region,
        analyzed = report.listings_analyzed,
        anomalies = report.anomalies_detected,
        investments = report.counts.good_investment,
        renovations = report.counts.good_renovation,
        "analysis complete"
    );
    Ok(report)
}
