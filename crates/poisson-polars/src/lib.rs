//! Polars integration for Poisson change-point tracking
//!
//! This crate reads count columns from Polars DataFrames, runs the
//! multi-step Poisson detector and renders its tables back as DataFrames.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use poisson_polars::{PoissonTrackingExt, TrackingOptions};
//!
//! let df = df![
//!     "day" => ["mon", "tue", "wed", "thu", "fri", "sat"],
//!     "arrivals" => [1u64, 2, 1, 9, 11, 10],
//! ]?;
//!
//! let options = TrackingOptions::default().with_index_column("day");
//! let frames = df.poisson_tracking("arrivals", &options)?;
//! println!("{}", frames.model);
//! ```

pub mod config;
pub mod error;
pub mod frames;
pub mod traits;

pub use config::{TrackingOptions, RATE_COLUMN};
pub use error::{Error, Result};
pub use frames::TrackingFrames;
pub use traits::PoissonTrackingExt;

pub use poisson_changepoint::{InformationCriterion, PoissonSegmentationParameters};
