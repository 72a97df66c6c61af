//! Error types for poisson-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Tracking error: {0}")]
    Core(#[from] poisson_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
}

impl Error {
    /// Whether the count column itself was rejected
    pub fn is_input_validation(&self) -> bool {
        match self {
            Self::Core(err) => err.is_input_validation(),
            Self::TypeMismatch { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
