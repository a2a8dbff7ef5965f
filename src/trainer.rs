//! Model training, evaluation and persistence

use crate::config::PipelineConfig;
use crate::data::{self, EnrichedRecord, FEATURE_NAMES};
use crate::error::{PipelineError, Result};
use crate::frequency::Frequency;
use crate::metrics::{self, RegressionMetrics};
use crate::model::LinearRegression;
use crate::plot;
use chrono::NaiveDate;
use log::info;
use ndarray::{Array1, Array2};
use std::path::PathBuf;

/// Ordered train/test partition of the enriched series.
///
/// The target for each row is the *next* row's close, so the final row of
/// the input has no target and is excluded before splitting.
#[derive(Debug)]
pub struct SplitData {
    pub x_train: Array2<f64>,
    pub y_train: Array1<f64>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<f64>,
    /// Period-start dates of the test rows, for charting
    pub test_dates: Vec<NaiveDate>,
}

/// Outcome of one training run
#[derive(Debug)]
pub struct TrainingReport {
    pub metrics: RegressionMetrics,
    pub model_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Partition the enriched series into a leading training fraction and
/// trailing test fraction, by position and in original time order.
pub fn train_test_split(records: &[EnrichedRecord], test_ratio: f64) -> Result<SplitData> {
    if test_ratio <= 0.0 || test_ratio >= 1.0 {
        return Err(PipelineError::InvalidParameter(format!(
            "Test ratio must be in (0, 1), got {}",
            test_ratio
        )));
    }

    // Shift the target by one period: the last row has no defined target.
    let usable = records.len().saturating_sub(1);
    let test_size = (usable as f64 * test_ratio).ceil() as usize;
    let train_size = usable.saturating_sub(test_size);
    if train_size == 0 || test_size == 0 {
        return Err(PipelineError::DataError(format!(
            "Not enough rows to split: {} usable rows", usable
        )));
    }

    let features: Vec<f64> = records[..usable].iter().flat_map(|r| r.features()).collect();
    let x = Array2::from_shape_vec((usable, FEATURE_NAMES.len()), features)
        .map_err(|e| PipelineError::DataError(e.to_string()))?;
    let y = Array1::from_iter(records[1..].iter().map(|r| r.close));

    let (x_train, x_test) = x.view().split_at(ndarray::Axis(0), train_size);
    let (y_train, y_test) = y.view().split_at(ndarray::Axis(0), train_size);

    Ok(SplitData {
        x_train: x_train.to_owned(),
        y_train: y_train.to_owned(),
        x_test: x_test.to_owned(),
        y_test: y_test.to_owned(),
        test_dates: records[train_size..usable].iter().map(|r| r.date).collect(),
    })
}

/// Train on the enriched dataset for one frequency, report test MSE,
/// persist the model and render the actual-vs-predicted chart.
pub fn train_and_evaluate(config: &PipelineConfig, frequency: Frequency) -> Result<TrainingReport> {
    let records = data::read_enriched(config.processed_path(frequency))?;
    let split = train_test_split(&records, 0.2)?;

    let model = LinearRegression::default().fit(
        &split.x_train,
        &split.y_train,
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    )?;

    let predicted = model.predict(&split.x_test)?.to_vec();
    let actual = split.y_test.to_vec();
    let metrics = metrics::evaluate(&predicted, &actual)?;
    info!("Test MSE for {} model: {:.2}", frequency, metrics.mse);

    let model_path = config.model_path();
    model.save(&model_path)?;

    let chart_path = config.chart_path(frequency);
    plot::render_prediction_chart(&chart_path, &split.test_dates, &actual, &predicted)?;

    Ok(TrainingReport {
        metrics,
        model_path,
        chart_path,
    })
}
