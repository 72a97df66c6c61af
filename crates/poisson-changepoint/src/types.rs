//! Types used for Poisson change-point detection

use crate::dynamic::DpTable;
use crate::selection::InformationCriterion;
use poisson_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum-likelihood fit of a single segment `(start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentEstimate {
    /// Exclusive start boundary
    pub start: usize,
    /// Inclusive end boundary
    pub end: usize,
    /// Sum of counts in the segment
    pub total: u64,
    /// MLE rate `total / len`
    pub rate: f64,
    /// Log-likelihood contribution without the `ln(x!)` terms
    pub log_likelihood: f64,
}

impl SegmentEstimate {
    /// Number of time steps covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false for estimates produced by an evaluator
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Best partition found for a fixed number of change points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Number of change points `k`
    pub change_points: usize,
    /// Total log-likelihood `L_k` under the reporting convention
    pub log_likelihood: f64,
    /// Free parameters `B_k`
    pub parameter_count: usize,
    /// Information-criterion score
    pub score: f64,
    /// Boundaries `0 = τ_0 < … < τ_{k+1} = T`
    pub breakpoints: Vec<usize>,
    /// MLE rate of each of the `k + 1` segments
    pub rates: Vec<f64>,
}

impl Candidate {
    /// Number of segments (`k + 1`)
    pub fn segment_count(&self) -> usize {
        self.breakpoints.len().saturating_sub(1)
    }

    /// Interior boundaries only, i.e. the change-point locations
    pub fn change_locations(&self) -> &[usize] {
        let n = self.breakpoints.len();
        if n <= 2 {
            &[]
        } else {
            &self.breakpoints[1..n - 1]
        }
    }

    /// Segments as `(start, end, rate)` triples over `(start, end]`
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.breakpoints
            .windows(2)
            .zip(&self.rates)
            .map(|(bounds, &rate)| (bounds[0], bounds[1], rate))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k={} L={:.4} B={} score={:.4} breakpoints={:?}",
            self.change_points,
            self.log_likelihood,
            self.parameter_count,
            self.score,
            self.breakpoints
        )
    }
}

/// One row of the compressed change-point table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateChange {
    /// Rate in effect from `start_index` on
    pub rate: f64,
    /// 0-based time index at which the rate begins
    pub start_index: usize,
}

impl fmt::Display for RateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rate {:.4} from index {}", self.rate, self.start_index)
    }
}

/// Result of a multi-step Poisson detection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    criterion: InformationCriterion,
    sample_size: usize,
    log_factorial_included: bool,
    candidates: Vec<Candidate>,
    selected: usize,
    rates: Vec<f64>,
    changes: Vec<RateChange>,
    table: DpTable,
}

impl DetectionResult {
    pub(crate) fn new(
        criterion: InformationCriterion,
        sample_size: usize,
        log_factorial_included: bool,
        candidates: Vec<Candidate>,
        selected: usize,
        profile: crate::profile::RateProfile,
        table: DpTable,
    ) -> Self {
        let (rates, changes) = profile.into_parts();
        Self {
            criterion,
            sample_size,
            log_factorial_included,
            candidates,
            selected,
            rates,
            changes,
            table,
        }
    }

    /// Criterion used for model selection
    pub fn criterion(&self) -> InformationCriterion {
        self.criterion
    }

    /// Number of time steps analyzed
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Whether reported log-likelihoods include `-Σ ln(x_i!)`
    pub fn log_factorial_included(&self) -> bool {
        self.log_factorial_included
    }

    /// All candidates, indexed by number of change points
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidate with exactly `k` change points
    pub fn candidate(&self, k: usize) -> Result<&Candidate> {
        self.candidates
            .get(k)
            .ok_or_else(|| Error::change_points_out_of_range(k, self.candidates.len()))
    }

    /// The selected number of change points `k*`
    pub fn selected_change_points(&self) -> usize {
        self.selected
    }

    /// The selected candidate
    pub fn selected(&self) -> &Candidate {
        &self.candidates[self.selected]
    }

    /// Per-time-step rate of the selected model
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Compressed `(rate, start_index)` table of the selected model
    pub fn changes(&self) -> &[RateChange] {
        &self.changes
    }

    /// Raw dynamic-programming tables for auditing
    pub fn dp_table(&self) -> &DpTable {
        &self.table
    }

    /// `L_k` for every candidate
    pub fn log_likelihoods(&self) -> Vec<f64> {
        self.candidates.iter().map(|c| c.log_likelihood).collect()
    }

    /// `B_k` for every candidate
    pub fn parameter_counts(&self) -> Vec<usize> {
        self.candidates.iter().map(|c| c.parameter_count).collect()
    }

    /// Criterion score for every candidate
    pub fn scores(&self) -> Vec<f64> {
        self.candidates.iter().map(|c| c.score).collect()
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Poisson Change-Point Detection Result:")?;
        writeln!(f, "  Criterion: {}", self.criterion)?;
        writeln!(f, "  Sample size: {}", self.sample_size)?;
        writeln!(f, "  Candidates evaluated: {}", self.candidates.len())?;
        writeln!(f, "  Selected change points: {}", self.selected)?;
        writeln!(f, "  Rate segments:")?;
        for change in &self.changes {
            writeln!(f, "    {}", change)?;
        }

        Ok(())
    }
}
