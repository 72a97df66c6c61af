//! Multi-step Poisson change-point detection
//!
//! Runs the full pipeline on a count series: segment likelihoods, the
//! segment-neighbourhood sweep over every number of change points, scoring
//! with an information criterion, and reconstruction of the selected rate
//! profile.

use crate::dynamic::SegmentNeighbourhood;
use crate::profile::RateProfile;
use crate::segment::PoissonSegmentKernel;
use crate::selection::{parameter_count, select_minimum, InformationCriterion};
use crate::traits::{
    ChangePointDetectorProperties, ConfigurableDetector, CountDetector, SegmentLikelihood,
};
use crate::types::{Candidate, DetectionResult};
use num_traits::PrimInt;
use poisson_core::{CountSeries, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Multi-step detector parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoissonSegmentationParameters {
    /// Criterion used to pick the number of change points
    pub criterion: InformationCriterion,
    /// Upper bound on the change points swept (clamped to `T - 1`)
    pub max_change_points: Option<usize>,
    /// Report log-likelihoods including `-Σ ln(x_i!)`
    pub include_log_factorial: bool,
}

impl PoissonSegmentationParameters {
    pub fn with_criterion(mut self, criterion: InformationCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_max_change_points(mut self, max: usize) -> Self {
        self.max_change_points = Some(max);
        self
    }

    pub fn with_log_factorial(mut self, include: bool) -> Self {
        self.include_log_factorial = include;
        self
    }
}

/// Exact multi-segment detector for Poisson rate changes
#[derive(Debug, Clone, Default)]
pub struct MultiStepPoissonDetector {
    params: PoissonSegmentationParameters,
}

impl MultiStepPoissonDetector {
    /// Detector with AIC selection over every change-point count
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw integer counts and detect
    pub fn detect_counts<T>(&self, counts: &[T]) -> Result<DetectionResult>
    where
        T: PrimInt + fmt::Display,
    {
        let series = CountSeries::from_integers(counts)?;
        self.detect(&series)
    }

    /// Detect rate changes in a validated series
    #[instrument(skip_all, fields(len = series.len(), criterion = %self.params.criterion))]
    pub fn detect(&self, series: &CountSeries) -> Result<DetectionResult> {
        let kernel = PoissonSegmentKernel::new(series);
        let sweep = SegmentNeighbourhood::new()
            .with_max_change_points(self.params.max_change_points)
            .solve(&kernel)?;
        let (table, segmentations) = sweep.into_parts();

        let sample_size = series.len();
        let offset = if self.params.include_log_factorial {
            series.log_factorial_constant()
        } else {
            0.0
        };

        let candidates = segmentations
            .into_iter()
            .map(|segmentation| {
                let k = segmentation.change_points;
                let log_likelihood = segmentation.log_likelihood + offset;
                let parameter_count = parameter_count(k);
                let rates = segmentation
                    .breakpoints
                    .windows(2)
                    .map(|bounds| kernel.estimate(bounds[0], bounds[1]).map(|e| e.rate))
                    .collect::<Result<Vec<_>>>()?;

                Ok(Candidate {
                    change_points: k,
                    log_likelihood,
                    parameter_count,
                    score: self
                        .params
                        .criterion
                        .score(log_likelihood, parameter_count, sample_size),
                    breakpoints: segmentation.breakpoints,
                    rates,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let scores: Vec<f64> = candidates.iter().map(|c| c.score).collect();
        let selected = select_minimum(&scores)?;
        debug!(
            selected,
            score = scores[selected],
            candidates = candidates.len(),
            "selected change-point count"
        );

        let profile = RateProfile::from_breakpoints(&kernel, &candidates[selected].breakpoints)?;

        Ok(DetectionResult::new(
            self.params.criterion,
            sample_size,
            self.params.include_log_factorial,
            candidates,
            selected,
            profile,
            table,
        ))
    }
}

impl ChangePointDetectorProperties for MultiStepPoissonDetector {
    fn algorithm_name(&self) -> &'static str {
        "Poisson segment neighbourhood"
    }

    fn minimum_sample_size(&self) -> usize {
        1
    }
}

impl CountDetector for MultiStepPoissonDetector {
    fn detect_series(&self, series: &CountSeries) -> Result<DetectionResult> {
        self.detect(series)
    }
}

impl ConfigurableDetector for MultiStepPoissonDetector {
    type Parameters = PoissonSegmentationParameters;

    fn with_parameters(params: Self::Parameters) -> Self {
        Self { params }
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) {
        self.params = params;
    }
}

/// Detect with default parameters
pub fn detect_changes(counts: &[u64]) -> Result<DetectionResult> {
    MultiStepPoissonDetector::new().detect_counts(counts)
}
