//! End-to-end tracking on DataFrames

mod common;

use approx::assert_relative_eq;
use common::{f64_values, labelled_counts, u64_values, TWO_STEP};
use poisson_polars::{
    InformationCriterion, PoissonSegmentationParameters, PoissonTrackingExt, TrackingOptions,
};
use polars::prelude::*;

#[test]
fn test_two_step_model_frame() -> anyhow::Result<()> {
    let df = labelled_counts(&TWO_STEP);
    let options = TrackingOptions::default().with_index_column("day");
    let frames = df.poisson_tracking("count", &options)?;

    assert_eq!(frames.result.selected_change_points(), 2);
    assert_eq!(u64_values(&frames.model, "start_index"), vec![0, 4, 8]);

    let rates = f64_values(&frames.model, "rate");
    assert_relative_eq!(rates[0], 1.0);
    assert_relative_eq!(rates[1], 12.5);
    assert_relative_eq!(rates[2], 1.0);

    let labels: Vec<&str> = frames
        .model
        .column("start_label")?
        .str()?
        .into_no_null_iter()
        .collect();
    assert_eq!(labels, vec!["d0", "d4", "d8"]);
    Ok(())
}

#[test]
fn test_rate_column_appended_to_input() -> anyhow::Result<()> {
    let df = labelled_counts(&[1, 1, 1, 10, 10, 10]);
    let frames = df.poisson_tracking("count", &TrackingOptions::default())?;

    assert_eq!(frames.rates.height(), 6);
    assert_eq!(frames.rates.width(), 3);
    assert_eq!(
        f64_values(&frames.rates, "mle"),
        vec![1.0, 1.0, 1.0, 10.0, 10.0, 10.0]
    );
    // input columns are carried through untouched
    assert_eq!(u64_values(&frames.rates, "count"), vec![1, 1, 1, 10, 10, 10]);
    Ok(())
}

#[test]
fn test_model_frame_without_labels() -> anyhow::Result<()> {
    let df = labelled_counts(&[1, 1, 1, 10, 10, 10]);
    let frames = df.poisson_tracking("count", &TrackingOptions::default())?;

    assert_eq!(frames.model.width(), 2);
    assert!(frames.model.column("start_label").is_err());
    assert_eq!(u64_values(&frames.model, "start_index"), vec![0, 3]);
    Ok(())
}

#[test]
fn test_criteria_frame_matches_result() -> anyhow::Result<()> {
    let df = labelled_counts(&TWO_STEP);
    let frames = df.poisson_tracking("count", &TrackingOptions::default())?;

    assert_eq!(frames.criteria.height(), TWO_STEP.len());
    assert_eq!(
        u64_values(&frames.criteria, "k"),
        (0..TWO_STEP.len() as u64).collect::<Vec<_>>()
    );
    let parameter_counts = u64_values(&frames.criteria, "parameter_count");
    assert_eq!(&parameter_counts[..3], &[1, 3, 5]);

    let scores = f64_values(&frames.criteria, "aic");
    for (score, expected) in scores.iter().zip(frames.result.scores()) {
        assert_relative_eq!(*score, expected);
    }
    let likelihoods = f64_values(&frames.criteria, "log_likelihood");
    assert_eq!(likelihoods, frames.result.log_likelihoods());
    Ok(())
}

#[test]
fn test_bic_score_column_name() -> anyhow::Result<()> {
    let df = labelled_counts(&TWO_STEP);
    let options = TrackingOptions::new(
        PoissonSegmentationParameters::default().with_criterion(InformationCriterion::Bic),
    );
    let frames = df.poisson_tracking("count", &options)?;

    assert!(frames.criteria.column("bic").is_ok());
    assert!(frames.criteria.column("aic").is_err());
    Ok(())
}

#[test]
fn test_capped_sweep_shrinks_tables() -> anyhow::Result<()> {
    let df = labelled_counts(&TWO_STEP);
    let options = TrackingOptions::new(
        PoissonSegmentationParameters::default().with_max_change_points(3),
    );
    let frames = df.poisson_tracking("count", &options)?;

    assert_eq!(frames.criteria.height(), 4);
    assert_eq!(frames.likelihood_table.height(), 4);
    assert_eq!(frames.split_table.height(), 4);
    Ok(())
}

#[test]
fn test_dp_matrix_frames() -> anyhow::Result<()> {
    let counts = [2u64, 3, 9, 8, 2];
    let df = labelled_counts(&counts);
    let frames = df.poisson_tracking("count", &TrackingOptions::default())?;
    let table = frames.result.dp_table();

    // k column plus t0..=T
    assert_eq!(frames.likelihood_table.width(), counts.len() + 2);
    assert_eq!(frames.likelihood_table.height(), counts.len());

    for t in 0..=counts.len() {
        let name = format!("t{t}");
        let likelihood = frames.likelihood_table.column(&name)?.f64()?.clone();
        let splits = frames.split_table.column(&name)?.u64()?.clone();
        for k in 0..counts.len() {
            assert_eq!(likelihood.get(k), table.log_likelihood(k, t));
            assert_eq!(splits.get(k), table.split(k, t).map(|s| s as u64));
            if t <= k {
                assert_eq!(likelihood.get(k), None);
            }
        }
    }
    Ok(())
}

#[test]
fn test_log_factorial_shifts_reported_likelihoods() -> anyhow::Result<()> {
    let df = labelled_counts(&TWO_STEP);
    let plain = df.poisson_tracking("count", &TrackingOptions::default())?;
    let full = df.poisson_tracking(
        "count",
        &TrackingOptions::new(PoissonSegmentationParameters::default().with_log_factorial(true)),
    )?;

    let shift = df.poisson_counts("count")?.log_factorial_constant();
    let plain_ll = f64_values(&plain.criteria, "log_likelihood");
    let full_ll = f64_values(&full.criteria, "log_likelihood");
    for (a, b) in plain_ll.iter().zip(&full_ll) {
        assert_relative_eq!(*b, *a + shift, epsilon = 1e-9);
    }
    assert_eq!(
        plain.result.selected_change_points(),
        full.result.selected_change_points()
    );
    Ok(())
}
