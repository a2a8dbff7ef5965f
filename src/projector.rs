//! Iterative future projection with the persisted model
//!
//! Deliberately naive: each synthetic row copies the previous row's
//! non-close features unchanged, so moving averages and the other
//! indicators go stale as the synthetic tail grows. Prediction quality
//! degrades with the step count; that is an accepted limitation of the
//! approach, not something to correct here.

use crate::config::PipelineConfig;
use crate::data::{self, EnrichedRecord};
use crate::error::{PipelineError, Result};
use crate::frequency::Frequency;
use crate::model::TrainedLinearModel;
use chrono::NaiveDate;
use log::info;

/// One projected future period
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub date: NaiveDate,
    pub predicted_close: f64,
}

/// Load the persisted model and enriched dataset for `frequency` and
/// extend the series `steps` periods forward, feeding each prediction
/// back in as the next synthetic close.
pub fn project_forward(
    config: &PipelineConfig,
    frequency: Frequency,
    steps: usize,
) -> Result<Vec<Projection>> {
    let records = data::read_enriched(config.processed_path(frequency))?;
    let model = TrainedLinearModel::load(config.model_path())?;

    let mut last = records.into_iter().last().ok_or_else(|| {
        PipelineError::DataError("Enriched dataset has no rows to project from".to_string())
    })?;
    let mut projections = Vec::with_capacity(steps);

    for _ in 0..steps {
        let predicted_close = model.predict_row(&last.features())?;
        let next_date = frequency.advance(last.date)?;

        projections.push(Projection {
            date: next_date,
            predicted_close,
        });

        // Synthetic row: stale features, fresh close
        last = EnrichedRecord {
            date: next_date,
            close: predicted_close,
            ..last
        };
    }

    info!(
        "Projected {} {} periods forward",
        projections.len(),
        frequency
    );
    Ok(projections)
}
