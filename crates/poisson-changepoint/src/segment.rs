//! Poisson segment likelihood kernel
//!
//! For a segment `(start, end]` with `n = end - start` steps and count sum
//! `S`, the MLE rate is `λ = S / n` and the log-likelihood without the
//! `ln(x!)` terms is `S·ln(λ) − λ·n`. An all-zero segment has `λ = 0` and
//! log-likelihood exactly `0`.

use crate::traits::SegmentLikelihood;
use crate::types::SegmentEstimate;
use poisson_core::{math, CountSeries, Error, Result};

/// Constant-time segment evaluator backed by the series' prefix sums
#[derive(Clone, Copy, Debug)]
pub struct PoissonSegmentKernel<'a> {
    series: &'a CountSeries,
}

impl<'a> PoissonSegmentKernel<'a> {
    pub fn new(series: &'a CountSeries) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &'a CountSeries {
        self.series
    }

    /// MLE rate of `(start, end]`
    pub fn rate(&self, start: usize, end: usize) -> Result<f64> {
        Ok(self.estimate(start, end)?.rate)
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start >= end || end > self.series.len() {
            return Err(Error::invalid_segment(start, end, self.series.len()));
        }
        Ok(())
    }
}

impl SegmentLikelihood for PoissonSegmentKernel<'_> {
    fn len(&self) -> usize {
        self.series.len()
    }

    fn estimate(&self, start: usize, end: usize) -> Result<SegmentEstimate> {
        self.check_range(start, end)?;

        let n = end - start;
        let total = self.series.range_sum(start, end);
        let rate = total as f64 / n as f64;
        // λ·n == S, so the second term is just the count sum
        let log_likelihood = if total == 0 {
            0.0
        } else {
            math::xlogy_rate(total, n) - total as f64
        };

        Ok(SegmentEstimate {
            start,
            end,
            total,
            rate,
            log_likelihood,
        })
    }
}
