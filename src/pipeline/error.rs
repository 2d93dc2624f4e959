use thiserror::Error;

/// Failures a caller can see. Provider failures never appear here; the
/// aggregator absorbs them per region.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Invalid region code: {0:?}")]
    InvalidRegion(String),

    #[error("{0}")]
    InsufficientData(String),
}

impl PipelineError {
    pub fn no_data_near(region: &str) -> Self {
        PipelineError::InsufficientData(format!("No valid housing data near ZIP {region}."))
    }

    pub fn not_enough_to_analyze(found: usize, needed: usize) -> Self {
        PipelineError::InsufficientData(format!(
            "Not enough clean data to analyze: {found} usable listings, need {needed}."
        ))
    }
}
