// src/domain/listing.rs

use serde::Serialize;

/// Canonical listing, produced only by `normalize`. Every instance has the
/// four modelling features present and plausible.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub address: String,
    pub city: String,
    pub state: String,
    pub region_code: String,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area_sqft: f64,
    pub price: f64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub external_id: Option<String>,
}

impl ListingRecord {
    pub fn features(&self) -> Features {
        Features {
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area_sqft: self.area_sqft,
        }
    }

    /// All modelling inputs finite and positive.
    pub fn is_usable(&self) -> bool {
        [self.bedrooms, self.bathrooms, self.area_sqft, self.price]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Physical features fed to the valuation model, in model column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area_sqft: f64,
}

impl Features {
    pub const COUNT: usize = 3;

    pub fn to_row(self) -> Vec<f64> {
        vec![self.bedrooms, self.bathrooms, self.area_sqft]
    }
}
