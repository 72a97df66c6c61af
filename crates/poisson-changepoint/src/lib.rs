//! Multi-segment change-point detection for Poisson count processes
//!
//! Given a series of non-negative counts (e.g. daily incident counts), this
//! crate finds, for every possible number of change points, the partition
//! into contiguous segments that maximizes the Poisson log-likelihood, scores
//! each candidate with an information criterion, and reports the selected
//! piecewise-constant rate profile.
//!
//! # Stages
//!
//! - [`PoissonSegmentKernel`]: O(1) segment MLE rate and log-likelihood from
//!   prefix sums
//! - [`SegmentNeighbourhood`]: exact dynamic programming over all
//!   change-point counts, exposing the raw [`DpTable`] for auditing
//! - [`InformationCriterion`] and [`RateProfile`]: model selection and
//!   profile reconstruction
//! - [`MultiStepPoissonDetector`]: runs all three
//!
//! ## Usage
//!
//! ```rust
//! use poisson_changepoint::MultiStepPoissonDetector;
//!
//! let detector = MultiStepPoissonDetector::new();
//! let result = detector.detect_counts(&[2u32, 3, 2, 10, 11, 9]).unwrap();
//!
//! assert_eq!(result.selected_change_points(), 1);
//! assert_eq!(result.changes()[1].start_index, 3);
//! println!("{result}");
//! ```
//!
//! # Conventions
//!
//! - Segments are half-open `(start, end]` ranges over the 1-indexed series;
//!   breakpoints always include `0` and `T`.
//! - A candidate with `k` change points has `B_k = 2k + 1` parameters.
//! - Ties in the DP pick the earliest split; ties in the criterion pick the
//!   smaller `k`.
//! - Log-likelihoods omit `ln(x_i!)` unless
//!   [`PoissonSegmentationParameters::include_log_factorial`] is set.

pub mod dynamic;
pub mod multistep;
pub mod profile;
pub mod segment;
pub mod selection;
pub mod traits;
pub mod types;

pub use dynamic::{DpTable, SegmentNeighbourhood, Segmentation, SegmentationSweep};
pub use multistep::{detect_changes, MultiStepPoissonDetector, PoissonSegmentationParameters};
pub use profile::RateProfile;
pub use segment::PoissonSegmentKernel;
pub use selection::{parameter_count, select_minimum, InformationCriterion};

pub use traits::{
    ChangePointDetectorProperties, ConfigurableDetector, CountDetector, SegmentLikelihood,
};

pub use types::{Candidate, DetectionResult, RateChange, SegmentEstimate};

pub use poisson_core::{CountSeries, Error, Result};
