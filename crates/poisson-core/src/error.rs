//! Error types for Poisson change-point tracking
//!
//! Provides a unified error type for all poisson-tracking crates.

use thiserror::Error;

/// Core error type for change-point tracking operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a negative count
    pub fn negative_count(index: usize, value: impl std::fmt::Display) -> Self {
        Self::InvalidInput(format!(
            "Counts must be non-negative; got {value} at index {index}"
        ))
    }

    /// Create an error for a count that is not a finite integer
    pub fn non_integer_count(index: usize, value: f64) -> Self {
        Self::InvalidInput(format!(
            "Counts must be finite integers; got {value} at index {index}"
        ))
    }

    /// Create an error for a missing count
    pub fn missing_count(index: usize) -> Self {
        Self::InvalidInput(format!("Count at index {index} is missing"))
    }

    /// Create an error for a segment range outside the series
    pub fn invalid_segment(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidParameter(format!(
            "Segment ({start}, {end}] is not a non-empty range within 0..={len}"
        ))
    }

    /// Create an error for a change-point count without a candidate
    pub fn change_points_out_of_range(k: usize, candidates: usize) -> Self {
        Self::InvalidParameter(format!(
            "No candidate with {k} change points; {candidates} candidates available"
        ))
    }

    /// Whether this error rejects the input series itself
    pub fn is_input_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InsufficientData { .. })
    }
}
