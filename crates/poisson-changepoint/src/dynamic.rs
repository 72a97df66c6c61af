//! Exact segmentation by dynamic programming (segment neighbourhood)
//!
//! For every number of change points `k` the solver fills one row of
//! `L_k(t)`, the best log-likelihood of the first `t` observations split into
//! exactly `k + 1` non-empty segments:
//!
//! ```text
//! L_0(t) = ℓ(0, t)
//! L_k(t) = max_{k ≤ s < t} L_{k-1}(s) + ℓ(s, t)        for t ≥ k + 1
//! ```
//!
//! The argmax `s` of each cell is kept so that the breakpoints of any
//! candidate can be recovered by walking back from `(k, T)`. When several
//! splits reach the same value the earliest one wins.
//!
//! Time is `O(K·T²)` likelihood evaluations and memory `O(K·T)`, where `K`
//! is the number of rows requested (at most `T`).

use crate::traits::SegmentLikelihood;
use poisson_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

type Cell = (Option<f64>, Option<usize>);

/// DP likelihood table and split matrix
///
/// Row `k` holds `L_k(t)` for `t` in `0..=T`. Cells that admit no valid
/// partition (`t ≤ k`) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpTable {
    len: usize,
    rows: usize,
    log_likelihood: Vec<Option<f64>>,
    splits: Vec<Option<usize>>,
}

impl DpTable {
    /// Length `T` of the analyzed series
    pub fn sample_size(&self) -> usize {
        self.len
    }

    /// Number of change-point rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of prefix-length columns (`T + 1`)
    pub fn columns(&self) -> usize {
        self.len + 1
    }

    fn offset(&self, k: usize, t: usize) -> Option<usize> {
        (k < self.rows && t <= self.len).then(|| k * self.columns() + t)
    }

    /// `L_k(t)`, or `None` when no partition exists
    pub fn log_likelihood(&self, k: usize, t: usize) -> Option<f64> {
        self.offset(k, t).and_then(|i| self.log_likelihood[i])
    }

    /// Start of the last segment in the optimum for `(k, t)`
    pub fn split(&self, k: usize, t: usize) -> Option<usize> {
        self.offset(k, t).and_then(|i| self.splits[i])
    }

    /// Row `k` of the likelihood table
    pub fn likelihood_row(&self, k: usize) -> Option<&[Option<f64>]> {
        let start = self.offset(k, 0)?;
        Some(&self.log_likelihood[start..start + self.columns()])
    }

    /// Row `k` of the split matrix
    pub fn split_row(&self, k: usize) -> Option<&[Option<usize>]> {
        let start = self.offset(k, 0)?;
        Some(&self.splits[start..start + self.columns()])
    }

    /// Recover `0 = τ_0 < … < τ_{k+1} = T` for the candidate with `k` change points
    pub fn backtrack(&self, k: usize) -> Result<Vec<usize>> {
        if k >= self.rows {
            return Err(Error::change_points_out_of_range(k, self.rows));
        }

        let mut breakpoints = Vec::with_capacity(k + 2);
        let mut t = self.len;
        breakpoints.push(t);
        for row in (0..=k).rev() {
            let s = self.split(row, t).ok_or_else(|| {
                Error::Computation(format!("backtracking failed at k={row}, t={t}"))
            })?;
            if s >= t {
                return Err(Error::Computation(format!(
                    "non-increasing split {s} at k={row}, t={t}"
                )));
            }
            breakpoints.push(s);
            t = s;
        }
        if t != 0 {
            return Err(Error::Computation(format!(
                "backtracking for k={k} ended at {t} instead of 0"
            )));
        }

        breakpoints.reverse();
        Ok(breakpoints)
    }
}

/// Optimal partition for one change-point count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Number of change points `k`
    pub change_points: usize,
    /// `L_k(T)`, without the `ln(x!)` terms
    pub log_likelihood: f64,
    /// `0 = τ_0 < … < τ_{k+1} = T`
    pub breakpoints: Vec<usize>,
}

/// All optimal partitions of a sweep together with the DP tables
#[derive(Debug, Clone)]
pub struct SegmentationSweep {
    table: DpTable,
    segmentations: Vec<Segmentation>,
}

impl SegmentationSweep {
    pub fn table(&self) -> &DpTable {
        &self.table
    }

    /// Optimal partitions indexed by `k`
    pub fn segmentations(&self) -> &[Segmentation] {
        &self.segmentations
    }

    pub fn into_parts(self) -> (DpTable, Vec<Segmentation>) {
        (self.table, self.segmentations)
    }
}

/// Segment-neighbourhood solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentNeighbourhood {
    max_change_points: Option<usize>,
}

impl SegmentNeighbourhood {
    /// Solver sweeping every `k` in `0..T`
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the sweep to at most `max` change points
    pub fn with_max_change_points(mut self, max: Option<usize>) -> Self {
        self.max_change_points = max;
        self
    }

    /// Largest `k` swept for a series of length `len`
    pub fn max_change_points_for(&self, len: usize) -> usize {
        let full = len.saturating_sub(1);
        self.max_change_points.map_or(full, |max| max.min(full))
    }

    /// Fill the DP tables and backtrack every candidate
    pub fn solve<L: SegmentLikelihood>(&self, likelihood: &L) -> Result<SegmentationSweep> {
        let len = likelihood.len();
        if len == 0 {
            return Err(Error::empty_input("segmentation"));
        }

        let rows = self.max_change_points_for(len) + 1;
        let columns = len + 1;
        debug!(len, rows, "starting segment neighbourhood sweep");

        let mut log_likelihood = Vec::with_capacity(rows * columns);
        let mut splits = Vec::with_capacity(rows * columns);

        // k = 0: one segment covering the prefix
        log_likelihood.push(None);
        splits.push(None);
        for t in 1..=len {
            let value = likelihood.log_likelihood(0, t)?;
            if !value.is_finite() {
                return Err(Error::Computation(format!(
                    "non-finite segment log-likelihood on (0, {t}]"
                )));
            }
            log_likelihood.push(Some(value));
            splits.push(Some(0));
        }

        for k in 1..rows {
            let cells = {
                let previous = &log_likelihood[(k - 1) * columns..k * columns];
                fill_row(likelihood, k, previous)?
            };
            for (value, split) in cells {
                log_likelihood.push(value);
                splits.push(split);
            }
            trace!(k, best = ?log_likelihood[k * columns + len], "dp row complete");
        }

        let table = DpTable {
            len,
            rows,
            log_likelihood,
            splits,
        };

        let segmentations = (0..rows)
            .map(|k| {
                let log_likelihood = table.log_likelihood(k, len).ok_or_else(|| {
                    Error::Computation(format!("no feasible partition for k={k}"))
                })?;
                Ok(Segmentation {
                    change_points: k,
                    log_likelihood,
                    breakpoints: table.backtrack(k)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SegmentationSweep {
            table,
            segmentations,
        })
    }
}

fn best_split<L: SegmentLikelihood>(
    likelihood: &L,
    k: usize,
    t: usize,
    previous: &[Option<f64>],
) -> Result<Cell> {
    if t <= k {
        return Ok((None, None));
    }

    let mut best: Option<(f64, usize)> = None;
    for (s, head) in previous.iter().enumerate().take(t).skip(k) {
        let Some(head) = head else { continue };
        let objective = head + likelihood.log_likelihood(s, t)?;
        if !objective.is_finite() {
            return Err(Error::Computation(format!(
                "non-finite objective at k={k}, s={s}, t={t}"
            )));
        }
        // strict comparison keeps the earliest split on ties
        if best.map_or(true, |(value, _)| objective > value) {
            best = Some((objective, s));
        }
    }

    Ok(match best {
        Some((value, s)) => (Some(value), Some(s)),
        None => (None, None),
    })
}

#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
fn fill_row_sequential<L: SegmentLikelihood>(
    likelihood: &L,
    k: usize,
    previous: &[Option<f64>],
) -> Result<Vec<Cell>> {
    (0..previous.len())
        .map(|t| best_split(likelihood, k, t, previous))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn fill_row<L: SegmentLikelihood>(
    likelihood: &L,
    k: usize,
    previous: &[Option<f64>],
) -> Result<Vec<Cell>> {
    fill_row_sequential(likelihood, k, previous)
}

#[cfg(feature = "parallel")]
fn fill_row<L: SegmentLikelihood>(
    likelihood: &L,
    k: usize,
    previous: &[Option<f64>],
) -> Result<Vec<Cell>> {
    use rayon::prelude::*;

    (0..previous.len())
        .into_par_iter()
        .map(|t| best_split(likelihood, k, t, previous))
        .collect()
}
