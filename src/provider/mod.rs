pub mod models;
pub mod provider_error;
pub mod zillow;

pub use models::RawListing;
pub use provider_error::ProviderError;
pub use zillow::ZillowProvider;

/// Source of raw listing records for a region code.
///
/// Implementations must be shareable across request threads; the aggregator
/// fans ring fetches out over scoped threads.
pub trait ListingsProvider: Send + Sync {
    fn fetch(&self, region: &str, limit: u32) -> Result<Vec<RawListing>, ProviderError>;
}
