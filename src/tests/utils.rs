use crate::domain::ListingRecord;
use crate::pipeline::{AnalysisSettings, RegionAggregator, ValuationService};
use crate::provider::{ListingsProvider, ProviderError, RawListing};
use astra::Response;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::sync::{Arc, Mutex};

/// In-memory provider keyed by region. Regions without a feed return an
/// empty list; `failing` regions return an error. Every call is recorded.
#[derive(Default)]
pub struct StubProvider {
    feeds: HashMap<String, Vec<RawListing>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: &str, feed: Vec<RawListing>) -> Self {
        self.feeds.insert(region.to_string(), feed);
        self
    }

    pub fn failing(mut self, region: &str) -> Self {
        self.failing.insert(region.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ListingsProvider for StubProvider {
    fn fetch(&self, region: &str, _limit: u32) -> Result<Vec<RawListing>, ProviderError> {
        self.calls.lock().unwrap().push(region.to_string());
        if self.failing.contains(region) {
            return Err(ProviderError::Network(format!("stub failure for {region}")));
        }
        Ok(self.feeds.get(region).cloned().unwrap_or_default())
    }
}

pub fn raw_listing(address: &str, beds: f64, baths: f64, sqft: f64, price: f64) -> RawListing {
    RawListing {
        address: Some(address.to_string()),
        bedrooms: Some(beds),
        bathrooms: Some(baths),
        living_area: Some(sqft),
        price: Some(price),
        ..RawListing::default()
    }
}

pub fn listing(address: &str, beds: f64, baths: f64, sqft: f64, price: f64) -> ListingRecord {
    ListingRecord {
        address: address.to_string(),
        city: "Unknown".to_string(),
        state: "CA".to_string(),
        region_code: "94110".to_string(),
        bedrooms: beds,
        bathrooms: baths,
        area_sqft: sqft,
        price,
        lat: None,
        lng: None,
        external_id: None,
    }
}

/// Plausible market where price rises with size and room counts, plus noise.
pub fn synthetic_market(n: usize, seed: u64) -> Vec<ListingRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let beds = rng.gen_range(2..=5) as f64;
            let baths = rng.gen_range(1..=beds as u32) as f64;
            let sqft = 600.0 + beds * 400.0 + rng.gen_range(0.0..400.0);
            let price = 150_000.0
                + sqft * 300.0
                + beds * 20_000.0
                + baths * 15_000.0
                + rng.gen_range(-30_000.0..30_000.0);
            listing(&format!("{i} Synthetic Ave"), beds, baths, sqft, price)
        })
        .collect()
}

/// Ten similar 4 bed / 3 bath homes and two 2 bed / 1 bath homes priced far
/// below them.
pub fn bargain_scenario() -> Vec<RawListing> {
    let mut feed: Vec<RawListing> = (0..10)
        .map(|i| {
            raw_listing(
                &format!("{} Maple Dr", 100 + i),
                4.0,
                3.0,
                2000.0 + 20.0 * i as f64,
                600_000.0 + 10_000.0 * i as f64,
            )
        })
        .collect();
    feed.insert(3, raw_listing("1 Bargain Ln", 2.0, 1.0, 2010.0, 200_000.0));
    feed.push(raw_listing("2 Bargain Ln", 2.0, 1.0, 2130.0, 210_000.0));
    feed
}

pub fn service_with(stub: Arc<StubProvider>) -> ValuationService {
    let settings = AnalysisSettings::default();
    let aggregator = RegionAggregator::new(stub, settings.min_listings);
    ValuationService::new(aggregator, settings)
}

pub fn read_body(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("read body");
    String::from_utf8(bytes).expect("utf-8 body")
}
