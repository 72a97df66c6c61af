//! Property-based invariants of the segmentation engine

use poisson_changepoint::{
    detect_changes, CountSeries, PoissonSegmentKernel, SegmentLikelihood, SegmentNeighbourhood,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn counts_strategy(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..30, 1..=max_len)
}

/// Best log-likelihood over every placement of `k` change points
fn brute_force_best(kernel: &PoissonSegmentKernel<'_>, k: usize) -> f64 {
    fn recurse(
        kernel: &PoissonSegmentKernel<'_>,
        start: usize,
        remaining: usize,
        acc: f64,
        best: &mut f64,
    ) {
        let len = kernel.len();
        if remaining == 0 {
            let total = acc + kernel.log_likelihood(start, len).unwrap();
            if total > *best {
                *best = total;
            }
            return;
        }
        for split in start + 1..=len - remaining {
            let head = acc + kernel.log_likelihood(start, split).unwrap();
            recurse(kernel, split, remaining - 1, head, best);
        }
    }

    let mut best = f64::NEG_INFINITY;
    recurse(kernel, 0, k, 0.0, &mut best);
    best
}

proptest! {
    // Property: every candidate is a gap-free partition with strictly increasing bounds
    #[test]
    fn prop_breakpoints_partition_series(counts in counts_strategy(40)) {
        let len = counts.len();
        let result = detect_changes(&counts).unwrap();

        prop_assert_eq!(result.candidates().len(), len);
        for (k, candidate) in result.candidates().iter().enumerate() {
            let bp = &candidate.breakpoints;
            prop_assert_eq!(candidate.change_points, k);
            prop_assert_eq!(bp.len(), k + 2);
            prop_assert_eq!(bp[0], 0);
            prop_assert_eq!(bp[k + 1], len);
            prop_assert!(bp.windows(2).all(|w| w[0] < w[1]));

            let covered: usize = candidate.segments().map(|(s, e, _)| e - s).sum();
            prop_assert_eq!(covered, len);
            prop_assert_eq!(candidate.parameter_count, 2 * k + 1);
        }
    }

    // Property: adding a change point never lowers the best likelihood
    #[test]
    fn prop_likelihood_non_decreasing_in_k(counts in counts_strategy(40)) {
        let result = detect_changes(&counts).unwrap();
        let likelihoods = result.log_likelihoods();

        for pair in likelihoods.windows(2) {
            prop_assert!(pair[1] >= pair[0] - TOLERANCE,
                "L_k decreased: {} -> {}", pair[0], pair[1]);
        }
    }

    // Property: the DP optimum matches exhaustive search on short series
    #[test]
    fn prop_dp_matches_brute_force(counts in counts_strategy(9)) {
        let series = CountSeries::new(counts).unwrap();
        let kernel = PoissonSegmentKernel::new(&series);
        let sweep = SegmentNeighbourhood::new().solve(&kernel).unwrap();

        for segmentation in sweep.segmentations() {
            let expected = brute_force_best(&kernel, segmentation.change_points);
            prop_assert!((segmentation.log_likelihood - expected).abs() < TOLERANCE,
                "k={}: dp={} brute={}", segmentation.change_points,
                segmentation.log_likelihood, expected);

            let recomputed: f64 = segmentation.breakpoints.windows(2)
                .map(|w| kernel.log_likelihood(w[0], w[1]).unwrap())
                .sum();
            prop_assert!((recomputed - segmentation.log_likelihood).abs() < TOLERANCE);
        }
    }

    // Property: rates are non-negative and zero exactly on all-zero segments
    #[test]
    fn prop_rates_consistent_with_segments(counts in counts_strategy(30)) {
        let result = detect_changes(&counts).unwrap();
        let selected = result.selected();

        for (start, end, rate) in selected.segments() {
            let total: u64 = counts[start..end].iter().sum();
            prop_assert!(rate >= 0.0);
            prop_assert_eq!(rate == 0.0, total == 0);
            for t in start..end {
                prop_assert_eq!(result.rates()[t], rate);
            }
        }
    }

    // Property: the compressed table never repeats a rate and reproduces the profile
    #[test]
    fn prop_compressed_table_is_minimal(counts in counts_strategy(30)) {
        let result = detect_changes(&counts).unwrap();
        let changes = result.changes();

        prop_assert_eq!(changes[0].start_index, 0);
        for pair in changes.windows(2) {
            prop_assert!(pair[0].rate != pair[1].rate);
            prop_assert!(pair[0].start_index < pair[1].start_index);
        }

        let mut expanded = Vec::with_capacity(counts.len());
        for (i, change) in changes.iter().enumerate() {
            let end = changes.get(i + 1).map_or(counts.len(), |next| next.start_index);
            expanded.extend(std::iter::repeat(change.rate).take(end - change.start_index));
        }
        prop_assert_eq!(expanded.as_slice(), result.rates());
    }

    // Property: the selected candidate has the lowest score and the smallest k among ties
    #[test]
    fn prop_selection_is_first_minimum(counts in counts_strategy(25)) {
        let result = detect_changes(&counts).unwrap();
        let scores = result.scores();
        let selected = result.selected_change_points();

        for (k, &score) in scores.iter().enumerate() {
            if k < selected {
                prop_assert!(score > scores[selected]);
            } else {
                prop_assert!(score >= scores[selected]);
            }
        }
    }

    // Property: repeated runs agree exactly
    #[test]
    fn prop_detection_is_deterministic(counts in counts_strategy(25)) {
        let first = detect_changes(&counts).unwrap();
        let second = detect_changes(&counts).unwrap();

        prop_assert_eq!(first.candidates(), second.candidates());
        prop_assert_eq!(first.rates(), second.rates());
        prop_assert_eq!(first.changes(), second.changes());
    }
}
