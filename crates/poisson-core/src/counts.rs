//! Validated count series
//!
//! A [`CountSeries`] owns the observed counts together with a prefix-sum
//! array carrying a leading zero sentinel, so that the sum over any half-open
//! range `(start, end]` is a single subtraction.

use crate::{math, Error, Result};
use num_traits::PrimInt;
use std::fmt;

/// Tolerance used when accepting floating-point counts as integers
pub const INTEGER_TOLERANCE: f64 = 1e-9;

/// An immutable, non-empty sequence of non-negative integer counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSeries {
    counts: Vec<u64>,
    /// `prefix[t]` is the sum of the first `t` counts; `prefix[0] == 0`
    prefix: Vec<u64>,
}

impl CountSeries {
    /// Create a series from unsigned counts
    pub fn new(counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::empty_input("count series"));
        }

        let mut prefix = Vec::with_capacity(counts.len() + 1);
        let mut running = 0u64;
        prefix.push(running);
        for (index, &count) in counts.iter().enumerate() {
            running = running.checked_add(count).ok_or_else(|| {
                Error::InvalidInput(format!("Count sum overflows u64 at index {index}"))
            })?;
            prefix.push(running);
        }

        Ok(Self { counts, prefix })
    }

    /// Create a series from any primitive integer type, rejecting negatives
    pub fn from_integers<T>(values: &[T]) -> Result<Self>
    where
        T: PrimInt + fmt::Display,
    {
        let counts = values
            .iter()
            .enumerate()
            .map(|(index, &value)| integer_to_count(index, value))
            .collect::<Result<Vec<_>>>()?;

        Self::new(counts)
    }

    /// Create a series from nullable integers of any primitive type
    ///
    /// Missing values are rejected rather than imputed.
    pub fn from_nullable_integers<T, I>(values: I) -> Result<Self>
    where
        T: PrimInt + fmt::Display,
        I: IntoIterator<Item = Option<T>>,
    {
        let counts = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Some(value) => integer_to_count(index, value),
                None => Err(Error::missing_count(index)),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(counts)
    }

    /// Create a series from floating-point values that must hold integers
    pub fn from_floats(values: &[f64]) -> Result<Self> {
        let counts = values
            .iter()
            .enumerate()
            .map(|(index, &value)| float_to_count(index, value))
            .collect::<Result<Vec<_>>>()?;

        Self::new(counts)
    }

    /// Create a series from nullable floating-point values
    ///
    /// Missing values are rejected rather than imputed.
    pub fn from_nullable_floats<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let counts = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Some(value) => float_to_count(index, value),
                None => Err(Error::missing_count(index)),
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(counts)
    }

    /// Number of observed time steps (`T`)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: an empty series cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The observed counts, 0-indexed
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Prefix sums of length `T + 1` with the zero sentinel at index 0
    pub fn prefix_sums(&self) -> &[u64] {
        &self.prefix
    }

    /// Sum of counts over the half-open range `(start, end]`
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len()`.
    #[inline]
    pub fn range_sum(&self, start: usize, end: usize) -> u64 {
        self.prefix[end] - self.prefix[start]
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.prefix[self.counts.len()]
    }

    /// The model-independent term `-Σ ln(x_i!)` of the Poisson log-likelihood
    pub fn log_factorial_constant(&self) -> f64 {
        -self
            .counts
            .iter()
            .map(|&count| math::ln_factorial(count))
            .sum::<f64>()
    }
}

impl TryFrom<Vec<u64>> for CountSeries {
    type Error = Error;

    fn try_from(counts: Vec<u64>) -> Result<Self> {
        Self::new(counts)
    }
}

impl fmt::Display for CountSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountSeries {{ len: {}, total: {} }}", self.len(), self.total())
    }
}

fn integer_to_count<T>(index: usize, value: T) -> Result<u64>
where
    T: PrimInt + fmt::Display,
{
    if value < T::zero() {
        return Err(Error::negative_count(index, value));
    }
    value.to_u64().ok_or_else(|| {
        Error::InvalidInput(format!(
            "Count {value} at index {index} does not fit into u64"
        ))
    })
}

fn float_to_count(index: usize, value: f64) -> Result<u64> {
    if !value.is_finite() {
        return Err(Error::non_integer_count(index, value));
    }
    if value < 0.0 {
        return Err(Error::negative_count(index, value));
    }

    let rounded = value.round();
    // u64::MAX as f64 rounds up to 2^64, which does not fit
    if (rounded - value).abs() > INTEGER_TOLERANCE || rounded >= u64::MAX as f64 {
        return Err(Error::non_integer_count(index, value));
    }

    Ok(rounded as u64)
}
