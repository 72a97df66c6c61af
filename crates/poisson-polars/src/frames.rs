//! DataFrame rendering of detection results

use crate::config::RATE_COLUMN;
use crate::{Error, PoissonTrackingExt, Result, TrackingOptions};
use poisson_changepoint::{ConfigurableDetector, DetectionResult, DpTable, MultiStepPoissonDetector};
use poisson_core::CountSeries;
use polars::prelude::*;
use tracing::debug;

/// Detection result together with its tabular renderings
#[derive(Debug, Clone)]
pub struct TrackingFrames {
    /// Full detection result
    pub result: DetectionResult,
    /// Input frame with the per-step rate column appended
    pub rates: DataFrame,
    /// One row per segment of the selected model
    pub model: DataFrame,
    /// One row per candidate change-point count
    pub criteria: DataFrame,
    /// DP log-likelihood matrix, nulls for infeasible cells
    pub likelihood_table: DataFrame,
    /// DP split matrix, nulls for infeasible cells
    pub split_table: DataFrame,
}

impl PoissonTrackingExt for DataFrame {
    fn poisson_counts(&self, column: &str) -> Result<CountSeries> {
        let col = self
            .column(column)
            .map_err(|_| Error::InvalidColumn(column.to_string()))?;

        // integer columns never pass through f64
        let series = match col.dtype() {
            DataType::UInt32 | DataType::UInt64 => {
                let cast = col.cast(&DataType::UInt64)?;
                CountSeries::from_nullable_integers(cast.u64()?.into_iter())?
            }
            DataType::Int32 | DataType::Int64 => {
                let cast = col.cast(&DataType::Int64)?;
                CountSeries::from_nullable_integers(cast.i64()?.into_iter())?
            }
            DataType::Float32 | DataType::Float64 => {
                let cast = col.cast(&DataType::Float64)?;
                CountSeries::from_nullable_floats(cast.f64()?.into_iter())?
            }
            other => {
                return Err(Error::TypeMismatch {
                    expected: "numeric count column".to_string(),
                    got: format!("{other:?}"),
                })
            }
        };

        Ok(series)
    }

    fn poisson_tracking(&self, column: &str, options: &TrackingOptions) -> Result<TrackingFrames> {
        let series = self.poisson_counts(column)?;
        let detector = MultiStepPoissonDetector::with_parameters(options.parameters);
        let result = detector.detect(&series)?;
        debug!(
            column,
            selected = result.selected_change_points(),
            "rendering tracking frames"
        );

        let mut rates = self.clone();
        rates.with_column(Series::new(RATE_COLUMN.into(), result.rates().to_vec()))?;

        let model = model_frame(self, &result, options.index_column.as_deref())?;
        let criteria = criteria_frame(&result)?;
        let likelihood_table = likelihood_frame(result.dp_table())?;
        let split_table = split_frame(result.dp_table())?;

        Ok(TrackingFrames {
            result,
            rates,
            model,
            criteria,
            likelihood_table,
            split_table,
        })
    }
}

/// Compressed rate table, optionally labelled from another column
fn model_frame(
    source: &DataFrame,
    result: &DetectionResult,
    index_column: Option<&str>,
) -> Result<DataFrame> {
    let changes = result.changes();
    let rates: Vec<f64> = changes.iter().map(|c| c.rate).collect();
    let starts: Vec<u64> = changes.iter().map(|c| c.start_index as u64).collect();

    let mut columns: Vec<Column> = vec![
        Series::new("rate".into(), rates).into(),
        Series::new("start_index".into(), starts).into(),
    ];

    if let Some(name) = index_column {
        let labels = source
            .column(name)
            .map_err(|_| Error::InvalidColumn(name.to_string()))?;
        let indices: Vec<IdxSize> = changes.iter().map(|c| c.start_index as IdxSize).collect();
        let taken = labels.take_slice(&indices)?;
        columns.push(taken.with_name("start_label".into()));
    }

    Ok(DataFrame::new(columns)?)
}

fn criteria_frame(result: &DetectionResult) -> Result<DataFrame> {
    let candidates = result.candidates();
    let k: Vec<u64> = candidates.iter().map(|c| c.change_points as u64).collect();
    let log_likelihood: Vec<f64> = candidates.iter().map(|c| c.log_likelihood).collect();
    let parameter_count: Vec<u64> = candidates
        .iter()
        .map(|c| c.parameter_count as u64)
        .collect();
    let scores: Vec<f64> = candidates.iter().map(|c| c.score).collect();
    let score_name = result.criterion().name().to_lowercase();

    Ok(DataFrame::new(vec![
        Series::new("k".into(), k).into(),
        Series::new("log_likelihood".into(), log_likelihood).into(),
        Series::new("parameter_count".into(), parameter_count).into(),
        Series::new(score_name.as_str().into(), scores).into(),
    ])?)
}

fn row_index_column(table: &DpTable) -> Column {
    let k: Vec<u64> = (0..table.rows() as u64).collect();
    Series::new("k".into(), k).into()
}

fn likelihood_frame(table: &DpTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.columns() + 1);
    columns.push(row_index_column(table));
    for t in 0..table.columns() {
        let values: Vec<Option<f64>> = (0..table.rows())
            .map(|k| table.log_likelihood(k, t))
            .collect();
        columns.push(Series::new(format!("t{t}").as_str().into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}

fn split_frame(table: &DpTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.columns() + 1);
    columns.push(row_index_column(table));
    for t in 0..table.columns() {
        let values: Vec<Option<u64>> = (0..table.rows())
            .map(|k| table.split(k, t).map(|s| s as u64))
            .collect();
        columns.push(Series::new(format!("t{t}").as_str().into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}
