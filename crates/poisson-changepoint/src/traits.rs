//! Core traits for change-point detection
//!
//! Following a three-stage layout:
//! - Segment likelihood evaluation ([`SegmentLikelihood`])
//! - Exact segmentation over all change-point counts (`dynamic`)
//! - Model selection and profile reconstruction (detectors in this crate)

use crate::types::{DetectionResult, SegmentEstimate};
use poisson_core::{CountSeries, Result};

/// Likelihood of a contiguous segment `(start, end]` of a series
///
/// The solver calls this `O(T²)` times per change-point count, so
/// implementations should answer in constant time.
pub trait SegmentLikelihood: Sync {
    /// Number of time steps in the underlying series
    fn len(&self) -> usize;

    /// Whether the underlying series is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fit the segment `(start, end]`
    fn estimate(&self, start: usize, end: usize) -> Result<SegmentEstimate>;

    /// Log-likelihood contribution of the segment `(start, end]`
    fn log_likelihood(&self, start: usize, end: usize) -> Result<f64> {
        Ok(self.estimate(start, end)?.log_likelihood)
    }
}

/// Properties of a change-point detector
pub trait ChangePointDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Get the minimum sample size required for detection
    fn minimum_sample_size(&self) -> usize;
}

/// Detectors operating on validated count series
pub trait CountDetector: ChangePointDetectorProperties {
    /// Detect rate changes in the given series
    fn detect_series(&self, series: &CountSeries) -> Result<DetectionResult>;

    /// Process several independent series with the same configuration
    ///
    /// Default implementation processes sequentially
    fn detect_batch(&self, series: &[CountSeries]) -> Result<Vec<DetectionResult>> {
        series.iter().map(|s| self.detect_series(s)).collect()
    }
}

/// Detectors with a parameter set
pub trait ConfigurableDetector {
    type Parameters;

    fn with_parameters(params: Self::Parameters) -> Self;
    fn parameters(&self) -> &Self::Parameters;
    fn set_parameters(&mut self, params: Self::Parameters);
}
