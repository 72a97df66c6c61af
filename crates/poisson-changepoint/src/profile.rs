//! Piecewise-constant rate profiles

use crate::traits::SegmentLikelihood;
use crate::types::RateChange;
use poisson_core::{Error, Result};

/// Per-step rates of a partition and their compressed change table
#[derive(Debug, Clone, PartialEq)]
pub struct RateProfile {
    rates: Vec<f64>,
    changes: Vec<RateChange>,
}

impl RateProfile {
    /// Expand a partition into one rate per time step
    pub fn from_breakpoints<L: SegmentLikelihood>(
        likelihood: &L,
        breakpoints: &[usize],
    ) -> Result<Self> {
        let len = likelihood.len();
        if breakpoints.first() != Some(&0) || breakpoints.last() != Some(&len) {
            return Err(Error::InvalidParameter(format!(
                "breakpoints must start at 0 and end at {len}; got {breakpoints:?}"
            )));
        }

        let mut rates = Vec::with_capacity(len);
        for bounds in breakpoints.windows(2) {
            let estimate = likelihood.estimate(bounds[0], bounds[1])?;
            rates.extend(std::iter::repeat(estimate.rate).take(estimate.len()));
        }

        Ok(Self::from_rates(rates))
    }

    /// Build a profile from per-step rates
    pub fn from_rates(rates: Vec<f64>) -> Self {
        let changes = compress(&rates);
        Self { rates, changes }
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Compressed `(rate, start_index)` table
    pub fn changes(&self) -> &[RateChange] {
        &self.changes
    }

    /// Rate in effect at time step `t`
    pub fn rate_at(&self, t: usize) -> Option<f64> {
        self.rates.get(t).copied()
    }

    /// Time indices at which the rate differs from the previous step
    pub fn change_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().skip(1).map(|c| c.start_index)
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<RateChange>) {
        (self.rates, self.changes)
    }
}

/// Emit an entry for the first step and whenever the rate changes
fn compress(rates: &[f64]) -> Vec<RateChange> {
    let mut changes: Vec<RateChange> = Vec::new();
    for (start_index, &rate) in rates.iter().enumerate() {
        if changes.last().map_or(true, |last| last.rate != rate) {
            changes.push(RateChange { rate, start_index });
        }
    }
    changes
}
