//! Common test utilities for poisson-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// Two rate shifts: 1 -> 12.5 -> 1
pub const TWO_STEP: [u64; 12] = [1, 0, 2, 1, 12, 14, 11, 13, 1, 2, 0, 1];

/// Frame with a `count` column and a string `day` label column
pub fn labelled_counts(counts: &[u64]) -> DataFrame {
    let days: Vec<String> = (0..counts.len()).map(|i| format!("d{i}")).collect();
    df![
        "day" => days,
        "count" => counts,
    ]
    .unwrap()
}

/// Extract a full f64 column, panicking on nulls
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Extract a full u64 column, panicking on nulls
pub fn u64_values(df: &DataFrame, name: &str) -> Vec<u64> {
    df.column(name)
        .unwrap()
        .u64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}
