//! Core types for Poisson change-point tracking
//!
//! This crate provides the foundations shared by the tracking crates:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`CountSeries`]: a validated, non-empty series of counts with prefix sums
//! - [`math`]: log-factorial and log-likelihood helpers
//!
//! # Example
//!
//! ```rust
//! use poisson_core::CountSeries;
//!
//! let series = CountSeries::from_integers(&[2, 3, 2, 10, 11, 9]).unwrap();
//! assert_eq!(series.len(), 6);
//! assert_eq!(series.range_sum(0, 3), 7);
//! ```

pub mod counts;
pub mod error;
pub mod math;

// Re-export core types
pub use counts::{CountSeries, INTEGER_TOLERANCE};
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::counts::CountSeries;
    pub use crate::error::Error;
    pub use crate::Result;
}
