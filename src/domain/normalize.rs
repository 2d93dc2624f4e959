// src/domain/normalize.rs

use crate::domain::ListingRecord;
use crate::provider::RawListing;
use tracing::debug;

pub const MIN_PRICE: f64 = 50_000.0;
pub const MIN_AREA_SQFT: f64 = 300.0;

const DEFAULT_CITY: &str = "Unknown";
const DEFAULT_STATE: &str = "CA";

/// Maps a provider record onto the canonical schema, or drops it.
///
/// Each canonical field resolves from a fixed list of provider fields, first
/// present value wins. Records that fail the plausibility floors are dropped
/// rather than reported; this never fails.
pub fn normalize(raw: &RawListing, fallback_region: &str) -> Option<ListingRecord> {
    let address = raw
        .address
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let price = raw
        .price
        .or(raw.unformatted_price)
        .or(raw.zestimate)
        .or(raw.last_sold_price);
    let area_sqft = raw.living_area.or(raw.area);
    let bedrooms = raw.bedrooms.or(raw.beds);
    let bathrooms = raw.bathrooms.or(raw.baths);

    let (Some(price), Some(area_sqft), Some(bedrooms), Some(bathrooms)) =
        (price, area_sqft, bedrooms, bathrooms)
    else {
        debug!(address = %address, "dropping listing with missing features");
        return None;
    };

    if !(price > MIN_PRICE && area_sqft > MIN_AREA_SQFT && bedrooms > 0.0 && bathrooms > 0.0) {
        debug!(address = %address, price, area_sqft, bedrooms, bathrooms, "dropping implausible listing");
        return None;
    }

    Some(ListingRecord {
        address,
        city: non_empty(&raw.city).unwrap_or(DEFAULT_CITY).to_string(),
        state: non_empty(&raw.state).unwrap_or(DEFAULT_STATE).to_string(),
        region_code: non_empty(&raw.zipcode).unwrap_or(fallback_region).to_string(),
        bedrooms,
        bathrooms,
        area_sqft,
        price,
        lat: raw.latitude,
        lng: raw.longitude,
        external_id: raw.zpid.clone().or_else(|| raw.id.clone()),
    })
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
