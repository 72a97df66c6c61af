//! Extension trait for Poisson change-point tracking on Polars DataFrames

use crate::{Result, TrackingFrames, TrackingOptions};
use poisson_core::CountSeries;

/// Extension trait for Poisson change-point tracking on DataFrames
pub trait PoissonTrackingExt {
    /// Read a numeric column as a validated count series
    ///
    /// Nulls, negative values and non-integer values are rejected.
    fn poisson_counts(&self, column: &str) -> Result<CountSeries>;

    /// Run multi-step detection on a count column
    ///
    /// # Arguments
    /// * `column` - Column name holding the counts
    /// * `options` - Detector parameters and optional label column
    ///
    /// # Returns
    /// The detection result with its tables rendered as DataFrames:
    /// - `rates`: the input frame with an added `mle` column
    /// - `model`: `rate`, `start_index` (and `start_label`) per segment
    /// - `criteria`: `k`, `log_likelihood`, `parameter_count`, criterion score
    /// - `likelihood_table` / `split_table`: raw DP matrices, `k` by `t{0..=T}`
    fn poisson_tracking(&self, column: &str, options: &TrackingOptions) -> Result<TrackingFrames>;
}
