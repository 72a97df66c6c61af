//! Configuration for DataFrame tracking

use poisson_changepoint::PoissonSegmentationParameters;

/// Name of the per-step rate column added to the input frame
pub const RATE_COLUMN: &str = "mle";

/// Options for [`PoissonTrackingExt::poisson_tracking`](crate::PoissonTrackingExt::poisson_tracking)
#[derive(Debug, Clone, Default)]
pub struct TrackingOptions {
    /// Detector parameters
    pub parameters: PoissonSegmentationParameters,

    /// Column whose values label each segment start in the model frame
    pub index_column: Option<String>,
}

impl TrackingOptions {
    pub fn new(parameters: PoissonSegmentationParameters) -> Self {
        Self {
            parameters,
            index_column: None,
        }
    }

    pub fn with_index_column(mut self, column: impl Into<String>) -> Self {
        self.index_column = Some(column.into());
        self
    }
}
