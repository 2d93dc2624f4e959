// src/pipeline/upgrade.rs

use crate::domain::{Features, ListingRecord};
use crate::model::PricePredictor;
use crate::pipeline::AnomalyAssessment;
use serde::Serialize;
use std::collections::BTreeMap;

/// ROI (percent) at or above which an upgrade is an investment opportunity.
pub const INVESTMENT_ROI: f64 = 15.0;
/// ROI (percent) at or above which an upgrade is worth a renovation.
pub const RENOVATION_ROI: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeFeature {
    Bedrooms,
    Bathrooms,
}

impl UpgradeFeature {
    pub const ALL: [UpgradeFeature; 2] = [UpgradeFeature::Bedrooms, UpgradeFeature::Bathrooms];

    pub fn label(self) -> &'static str {
        match self {
            UpgradeFeature::Bedrooms => "bedrooms",
            UpgradeFeature::Bathrooms => "bathrooms",
        }
    }

    fn value(self, f: &Features) -> f64 {
        match self {
            UpgradeFeature::Bedrooms => f.bedrooms,
            UpgradeFeature::Bathrooms => f.bathrooms,
        }
    }

    fn add(self, f: &mut Features, delta: u32) {
        match self {
            UpgradeFeature::Bedrooms => f.bedrooms += delta as f64,
            UpgradeFeature::Bathrooms => f.bathrooms += delta as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GoodInvestment,
    GoodRenovation,
    Discarded,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::GoodInvestment => "good_investment",
            Category::GoodRenovation => "good_renovation",
            Category::Discarded => "discarded",
        }
    }
}

pub fn categorize(roi_percent: f64) -> Category {
    if roi_percent >= INVESTMENT_ROI {
        Category::GoodInvestment
    } else if roi_percent >= RENOVATION_ROI {
        Category::GoodRenovation
    } else {
        Category::Discarded
    }
}

/// Batch means used as upgrade targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAverages {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area_sqft: f64,
}

impl FeatureAverages {
    /// Means over usable listings; `None` when there are none.
    pub fn from_listings(listings: &[ListingRecord]) -> Option<Self> {
        let usable: Vec<&ListingRecord> = listings.iter().filter(|l| l.is_usable()).collect();
        if usable.is_empty() {
            return None;
        }
        let n = usable.len() as f64;
        let mean = |f: fn(&ListingRecord) -> f64| usable.iter().map(|l| f(l)).sum::<f64>() / n;

        Some(Self {
            bedrooms: mean(|l| l.bedrooms),
            bathrooms: mean(|l| l.bathrooms),
            area_sqft: mean(|l| l.area_sqft),
        })
    }

    fn target(&self, feature: UpgradeFeature) -> f64 {
        match feature {
            UpgradeFeature::Bedrooms => self.bedrooms,
            UpgradeFeature::Bathrooms => self.bathrooms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot {
    pub address: String,
    pub city: String,
    pub state: String,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area_sqft: f64,
    pub price: f64,
    pub predicted_price: f64,
    pub residual: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedSnapshot {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub area_sqft: f64,
    pub new_predicted_price: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSimulationResult {
    pub original: ListingSnapshot,
    pub added_features: BTreeMap<UpgradeFeature, u32>,
    pub adjusted: AdjustedSnapshot,
    pub gain: f64,
    pub roi_percent: f64,
    pub category: Category,
}

/// Projects each flagged listing's bedrooms/bathrooms up to the batch
/// average (area fixed), re-prices it, and keeps upgrades that clear the
/// renovation ROI bar.
pub fn simulate<M: PricePredictor>(
    assessments: &[AnomalyAssessment],
    model: &M,
    averages: &FeatureAverages,
) -> Vec<UpgradeSimulationResult> {
    assessments
        .iter()
        .filter(|a| a.is_anomaly)
        .filter_map(|a| simulate_one(a, model, averages))
        .collect()
}

fn simulate_one<M: PricePredictor>(
    assessment: &AnomalyAssessment,
    model: &M,
    averages: &FeatureAverages,
) -> Option<UpgradeSimulationResult> {
    let listing = &assessment.listing;
    let mut adjusted = listing.features();
    let mut added = BTreeMap::new();

    for feature in UpgradeFeature::ALL {
        let value = feature.value(&adjusted);
        let target = averages.target(feature);
        let gap = (target - value).round_ties_even();
        if value < target && gap > 0.0 {
            added.insert(feature, gap as u32);
        }
    }
    if added.is_empty() {
        return None;
    }
    for (feature, delta) in &added {
        feature.add(&mut adjusted, *delta);
    }

    let new_predicted_price = model.predict(&adjusted);
    let gain = new_predicted_price - listing.price;
    if gain <= 0.0 {
        return None;
    }

    let roi_percent = gain * 100.0 / listing.price;
    let category = categorize(roi_percent);
    if category == Category::Discarded {
        return None;
    }

    Some(UpgradeSimulationResult {
        original: ListingSnapshot {
            address: listing.address.clone(),
            city: listing.city.clone(),
            state: listing.state.clone(),
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            area_sqft: listing.area_sqft,
            price: listing.price,
            predicted_price: assessment.predicted_price,
            residual: assessment.residual,
        },
        added_features: added,
        adjusted: AdjustedSnapshot {
            bedrooms: adjusted.bedrooms,
            bathrooms: adjusted.bathrooms,
            area_sqft: adjusted.area_sqft,
            new_predicted_price,
        },
        gain,
        roi_percent,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::listing;

    /// Prices each bedroom and bathroom at a fixed amount.
    struct PerRoom {
        bedroom: f64,
        bathroom: f64,
    }

    impl PricePredictor for PerRoom {
        fn predict(&self, f: &Features) -> f64 {
            f.bedrooms * self.bedroom + f.bathrooms * self.bathroom
        }
    }

    fn flagged(listing: ListingRecord) -> AnomalyAssessment {
        AnomalyAssessment {
            predicted_price: listing.price,
            residual: 0.0,
            score: -0.8,
            is_anomaly: true,
            listing,
        }
    }

    fn averages(bedrooms: f64, bathrooms: f64) -> FeatureAverages {
        FeatureAverages {
            bedrooms,
            bathrooms,
            area_sqft: 1500.0,
        }
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(categorize(15.0), Category::GoodInvestment);
        assert_eq!(categorize(14.99), Category::GoodRenovation);
        assert_eq!(categorize(5.0), Category::GoodRenovation);
        assert_eq!(categorize(4.99), Category::Discarded);
    }

    /// Flat 100k plus a fixed lift per bedroom above two.
    struct BedroomLift(f64);

    impl PricePredictor for BedroomLift {
        fn predict(&self, f: &Features) -> f64 {
            100_000.0 + (f.bedrooms - 2.0).max(0.0) * self.0
        }
    }

    #[test]
    fn exact_thresholds_through_simulation() {
        let a = [flagged(listing("1 A St", 2.0, 2.0, 1500.0, 100_000.0))];
        let avg = averages(3.0, 2.0);

        let inv = simulate(&a, &BedroomLift(15_000.0), &avg);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv[0].roi_percent, 15.0);
        assert_eq!(inv[0].category, Category::GoodInvestment);

        let ren = simulate(&a, &BedroomLift(5_000.0), &avg);
        assert_eq!(ren.len(), 1);
        assert_eq!(ren[0].roi_percent, 5.0);
        assert_eq!(ren[0].category, Category::GoodRenovation);

        assert!(simulate(&a, &BedroomLift(4_990.0), &avg).is_empty());
    }

    #[test]
    fn gaps_round_and_only_fill_shortfalls() {
        let model = PerRoom {
            bedroom: 100_000.0,
            bathroom: 50_000.0,
        };
        let a = [flagged(listing("1 A St", 1.0, 3.0, 1500.0, 200_000.0))];
        let out = simulate(&a, &model, &averages(3.4, 2.2));

        assert_eq!(out.len(), 1);
        let r = &out[0];
        assert_eq!(r.added_features.get(&UpgradeFeature::Bedrooms), Some(&2));
        assert_eq!(r.added_features.get(&UpgradeFeature::Bathrooms), None);
        assert_eq!(r.adjusted.bedrooms, 3.0);
        assert_eq!(r.adjusted.bathrooms, 3.0);
        assert_eq!(r.adjusted.area_sqft, 1500.0);
        assert_eq!(r.adjusted.new_predicted_price, 450_000.0);
        assert_eq!(r.gain, 250_000.0);
    }

    #[test]
    fn half_gaps_round_to_even() {
        let model = PerRoom {
            bedroom: 100_000.0,
            bathroom: 50_000.0,
        };

        // 3.5 - 3 = 0.5 rounds to zero: nothing to add.
        let a = [flagged(listing("1 A St", 3.0, 3.0, 1500.0, 200_000.0))];
        assert!(simulate(&a, &model, &averages(3.5, 2.0)).is_empty());

        // 3.5 - 1 = 2.5 rounds to 2.
        let a = [flagged(listing("2 B St", 1.0, 3.0, 1500.0, 200_000.0))];
        let out = simulate(&a, &model, &averages(3.5, 2.0));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].added_features.get(&UpgradeFeature::Bedrooms), Some(&2));
        assert_eq!(out[0].adjusted.bedrooms, 3.0);
    }

    #[test]
    fn nothing_to_upgrade_is_dropped() {
        let model = PerRoom {
            bedroom: 100_000.0,
            bathroom: 50_000.0,
        };
        // Bedroom gap of 0.4 rounds to zero.
        let a = [flagged(listing("1 A St", 3.0, 3.0, 1500.0, 200_000.0))];
        assert!(simulate(&a, &model, &averages(3.4, 2.0)).is_empty());
    }

    #[test]
    fn non_positive_gain_is_dropped() {
        let model = PerRoom {
            bedroom: 10_000.0,
            bathroom: 10_000.0,
        };
        let a = [flagged(listing("1 A St", 1.0, 1.0, 1500.0, 900_000.0))];
        assert!(simulate(&a, &model, &averages(3.0, 2.0)).is_empty());
    }

    #[test]
    fn unflagged_listings_are_ignored() {
        let model = PerRoom {
            bedroom: 100_000.0,
            bathroom: 50_000.0,
        };
        let mut a = flagged(listing("1 A St", 1.0, 1.0, 1500.0, 200_000.0));
        a.is_anomaly = false;
        assert!(simulate(&[a], &model, &averages(3.0, 2.0)).is_empty());
    }

    #[test]
    fn averages_cover_usable_listings_only() {
        let mut listings = vec![
            listing("1 A St", 2.0, 1.0, 1000.0, 300_000.0),
            listing("2 B St", 4.0, 3.0, 2000.0, 600_000.0),
            listing("3 C St", 9.0, 9.0, 9000.0, 900_000.0),
        ];
        listings[2].price = f64::NAN;

        let avg = FeatureAverages::from_listings(&listings).unwrap();
        assert_eq!(avg.bedrooms, 3.0);
        assert_eq!(avg.bathrooms, 2.0);
        assert_eq!(avg.area_sqft, 1500.0);
        assert!(FeatureAverages::from_listings(&[]).is_none());
    }
}
