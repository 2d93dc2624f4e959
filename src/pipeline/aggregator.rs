// src/pipeline/aggregator.rs

use crate::domain::{normalize, ListingRecord, RegionQuery};
use crate::pipeline::PipelineError;
use crate::provider::ListingsProvider;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Fetches and normalizes listings for a region, widening to the
/// neighbouring codes when the primary region comes back thin.
#[derive(Clone)]
pub struct RegionAggregator {
    provider: Arc<dyn ListingsProvider>,
    min_listings: usize,
}

impl RegionAggregator {
    pub fn new(provider: Arc<dyn ListingsProvider>, min_listings: usize) -> Self {
        Self {
            provider,
            min_listings,
        }
    }

    /// Primary region first, then (if needed) every ring region, deduplicated
    /// by address with the first occurrence kept.
    pub fn aggregate(&self, query: &RegionQuery) -> Result<Vec<ListingRecord>, PipelineError> {
        let mut collected = self.fetch_region(&query.primary_region, query.limit);

        if collected.len() < self.min_listings && !query.expansion_ring.is_empty() {
            info!(
                region = %query.primary_region,
                found = collected.len(),
                ring = ?query.expansion_ring,
                "primary region below threshold; expanding to neighbours"
            );

            // Ring members are independent; results are appended in ring order.
            let ring_results: Vec<Vec<ListingRecord>> = thread::scope(|s| {
                let handles: Vec<_> = query
                    .expansion_ring
                    .iter()
                    .map(|region| s.spawn(move || self.fetch_region(region, query.limit)))
                    .collect();

                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_default())
                    .collect()
            });

            for records in ring_results {
                collected.extend(records);
            }
        }

        let unique = dedup_by_address(collected);
        if unique.is_empty() {
            return Err(PipelineError::no_data_near(&query.primary_region));
        }

        info!(region = %query.primary_region, listings = unique.len(), "aggregated listings");
        Ok(unique)
    }

    /// Provider failures count as an empty region.
    fn fetch_region(&self, region: &str, limit: u32) -> Vec<ListingRecord> {
        match self.provider.fetch(region, limit) {
            Ok(raw) => raw.iter().filter_map(|r| normalize(r, region)).collect(),
            Err(e) => {
                warn!(region, error = %e, "provider fetch failed; treating region as empty");
                Vec::new()
            }
        }
    }
}

pub fn dedup_by_address(listings: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| seen.insert(l.address.clone()))
        .collect()
}
