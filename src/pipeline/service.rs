// src/pipeline/service.rs

use crate::domain::{ListingFilter, ListingRecord, RegionQuery};
use crate::pipeline::{analyze, AnalysisReport, AnalysisSettings, PipelineError, RegionAggregator};

/// The two operations the HTTP layer exposes. Each call aggregates once and
/// trains its own models; nothing is shared between calls.
#[derive(Clone)]
pub struct ValuationService {
    aggregator: RegionAggregator,
    settings: AnalysisSettings,
}

impl ValuationService {
    pub fn new(aggregator: RegionAggregator, settings: AnalysisSettings) -> Self {
        Self {
            aggregator,
            settings,
        }
    }

    pub fn listings(
        &self,
        region: &str,
        limit: u32,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingRecord>, PipelineError> {
        let query = RegionQuery::new(region, limit)?;
        let listings = self.aggregator.aggregate(&query)?;
        Ok(filter.apply(listings))
    }

    pub fn analysis(&self, region: &str, limit: u32) -> Result<AnalysisReport, PipelineError> {
        let query = RegionQuery::new(region, limit)?;
        let listings = self.aggregator.aggregate(&query)?;
        analyze(&query.primary_region, &listings, &self.settings)
    }
}
