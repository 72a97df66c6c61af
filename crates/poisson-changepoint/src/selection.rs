//! Information-criterion model selection
//!
//! Each candidate with `k` change points carries `B_k = 2k + 1` free
//! parameters: one rate per segment and one location per change point.

use poisson_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Criterion used to rank candidates; lower is better
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InformationCriterion {
    /// Akaike: `−2L + 2B`
    #[default]
    Aic,
    /// Schwarz/Bayesian: `−2L + B·ln T`
    Bic,
}

impl InformationCriterion {
    /// Score a candidate
    pub fn score(&self, log_likelihood: f64, parameter_count: usize, sample_size: usize) -> f64 {
        let penalty = match self {
            Self::Aic => 2.0,
            Self::Bic => (sample_size as f64).ln(),
        };
        -2.0 * log_likelihood + penalty * parameter_count as f64
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Aic => "AIC",
            Self::Bic => "BIC",
        }
    }
}

impl fmt::Display for InformationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Free parameters of a candidate with `k` change points
#[inline]
pub fn parameter_count(change_points: usize) -> usize {
    2 * change_points + 1
}

/// Index of the lowest score; ties go to the smaller index
pub fn select_minimum(scores: &[f64]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            return Err(Error::Computation(format!("criterion score for k={k} is NaN")));
        }
        if best.map_or(true, |(_, lowest)| score < lowest) {
            best = Some((k, score));
        }
    }

    best.map(|(k, _)| k)
        .ok_or_else(|| Error::empty_input("model selection"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parameter_count_convention() {
        assert_eq!(parameter_count(0), 1);
        assert_eq!(parameter_count(1), 3);
        assert_eq!(parameter_count(4), 9);
    }

    #[test]
    fn test_aic_score() {
        let aic = InformationCriterion::Aic;
        assert_relative_eq!(aic.score(-10.0, 3, 50), 26.0);
        assert_relative_eq!(aic.score(0.0, 1, 3), 2.0);
    }

    #[test]
    fn test_bic_score_uses_sample_size() {
        let bic = InformationCriterion::Bic;
        assert_relative_eq!(
            bic.score(-10.0, 3, 100),
            20.0 + 3.0 * (100.0f64).ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_select_minimum_prefers_smaller_k_on_ties() {
        assert_eq!(select_minimum(&[5.0, 3.0, 3.0, 4.0]).unwrap(), 1);
        assert_eq!(select_minimum(&[2.0, 2.0]).unwrap(), 0);
        assert_eq!(select_minimum(&[9.0, 8.0, 7.0]).unwrap(), 2);
    }

    #[test]
    fn test_select_minimum_errors() {
        assert!(select_minimum(&[]).is_err());
        assert!(select_minimum(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(InformationCriterion::default().to_string(), "AIC");
        assert_eq!(InformationCriterion::Bic.to_string(), "BIC");
    }
}
