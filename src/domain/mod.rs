pub mod filters;
pub mod listing;
pub mod normalize;
pub mod region;

pub use filters::ListingFilter;
pub use listing::{Features, ListingRecord};
pub use normalize::normalize;
pub use region::RegionQuery;
