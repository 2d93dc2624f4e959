pub mod aggregator;
pub mod anomaly;
pub mod error;
pub mod report;
pub mod service;
pub mod upgrade;

pub use aggregator::RegionAggregator;
pub use anomaly::AnomalyAssessment;
pub use error::PipelineError;
pub use report::{analyze, AnalysisReport};
pub use service::ValuationService;
pub use upgrade::UpgradeSimulationResult;

use crate::model::{ForestParams, IsolationParams};

/// Knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Fewest usable listings the models will train on.
    pub min_listings: usize,
    pub forest: ForestParams,
    pub isolation: IsolationParams,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_listings: 10,
            forest: ForestParams::default(),
            isolation: IsolationParams::default(),
        }
    }
}
