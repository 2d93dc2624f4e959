// src/domain/filters.rs

use crate::domain::ListingRecord;

/// Narrowing applied to aggregated listings before they are returned:
/// minimum bedrooms/bathrooms and an inclusive price band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub min_beds: Option<f64>,
    pub min_baths: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, listing: &ListingRecord) -> bool {
        self.min_beds.map_or(true, |b| listing.bedrooms >= b)
            && self.min_baths.map_or(true, |b| listing.bathrooms >= b)
            && self.min_price.map_or(true, |p| listing.price >= p)
            && self.max_price.map_or(true, |p| listing.price <= p)
    }

    pub fn apply(&self, listings: Vec<ListingRecord>) -> Vec<ListingRecord> {
        if self.is_empty() {
            return listings;
        }
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::listing;

    #[test]
    fn empty_filter_keeps_everything() {
        let all = vec![listing("1 A St", 2.0, 1.0, 900.0, 300_000.0)];
        assert_eq!(ListingFilter::default().apply(all.clone()), all);
    }

    #[test]
    fn bounds_are_inclusive() {
        let all = vec![
            listing("1 A St", 2.0, 1.0, 900.0, 300_000.0),
            listing("2 B St", 3.0, 2.0, 1400.0, 500_000.0),
            listing("3 C St", 4.0, 3.0, 2200.0, 900_000.0),
        ];
        let filter = ListingFilter {
            min_beds: Some(3.0),
            min_baths: Some(2.0),
            min_price: Some(500_000.0),
            max_price: Some(900_000.0),
        };
        let kept: Vec<_> = filter.apply(all).into_iter().map(|l| l.address).collect();
        assert_eq!(kept, vec!["2 B St", "3 C St"]);
    }

    #[test]
    fn price_ceiling_excludes_expensive_listings() {
        let all = vec![
            listing("1 A St", 2.0, 1.0, 900.0, 300_000.0),
            listing("3 C St", 4.0, 3.0, 2200.0, 900_000.0),
        ];
        let filter = ListingFilter {
            max_price: Some(400_000.0),
            ..ListingFilter::default()
        };
        assert_eq!(filter.apply(all).len(), 1);
    }
}
