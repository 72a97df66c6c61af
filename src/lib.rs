//! Multi-step change-point tracking for Poisson count processes
//!
//! Facade over the workspace crates:
//! - [`poisson_core`]: validated count series, errors and log-factorial helpers
//! - [`poisson_changepoint`]: segment likelihoods, the DP sweep, criteria and rate profiles
//! - `poisson_polars` (feature `polars`): DataFrame input and tabular output
//!
//! ```rust
//! use poisson_tracking::prelude::*;
//!
//! let result = detect_changes(&[1, 1, 1, 10, 10, 10])?;
//! assert_eq!(result.selected_change_points(), 1);
//! # Ok::<(), poisson_tracking::Error>(())
//! ```

pub use poisson_changepoint;
pub use poisson_core;
#[cfg(feature = "polars")]
pub use poisson_polars;

pub use poisson_core::{Error, Result};

pub mod prelude {
    pub use poisson_changepoint::{
        detect_changes, ConfigurableDetector, CountDetector, CountSeries, DetectionResult,
        InformationCriterion, MultiStepPoissonDetector, PoissonSegmentationParameters, RateChange,
    };

    #[cfg(feature = "polars")]
    pub use poisson_polars::{PoissonTrackingExt, TrackingFrames, TrackingOptions};
}
