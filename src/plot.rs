//! Chart rendering for the model trainer

use crate::error::{PipelineError, Result};
use chrono::NaiveDate;
use log::info;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

/// Render actual vs. predicted test-set closes as a PNG line chart.
///
/// Rows are plotted by position; the x axis labels show the corresponding
/// period-start dates.
pub fn render_prediction_chart<P: AsRef<Path>>(
    output_path: P,
    dates: &[NaiveDate],
    actual: &[f64],
    predicted: &[f64],
) -> Result<()> {
    if actual.len() != predicted.len() || actual.len() != dates.len() || actual.is_empty() {
        return Err(PipelineError::InvalidParameter(
            "Chart series must have the same non-zero length".to_string(),
        ));
    }

    if let Some(parent) = output_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let min_price = actual
        .iter()
        .chain(predicted.iter())
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let max_price = actual
        .iter()
        .chain(predicted.iter())
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = (max_price - min_price).max(1.0) * 0.05;

    let root = BitMapBackend::new(output_path.as_ref(), (1280, 720)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PipelineError::PlotError(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Linear Regression - Bitcoin Price Prediction",
            ("sans-serif", 30).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..actual.len(), (min_price - pad)..(max_price + pad))
        .map_err(|e| PipelineError::PlotError(e.to_string()))?;

    chart
        .configure_mesh()
        .x_label_formatter(&|idx| {
            dates
                .get(*idx)
                .map(|d| d.to_string())
                .unwrap_or_default()
        })
        .y_desc("Close Price")
        .draw()
        .map_err(|e| PipelineError::PlotError(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            actual.iter().enumerate().map(|(i, v)| (i, *v)),
            &BLUE,
        ))
        .map_err(|e| PipelineError::PlotError(e.to_string()))?
        .label("Actual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            predicted.iter().enumerate().map(|(i, v)| (i, *v)),
            &RED,
        ))
        .map_err(|e| PipelineError::PlotError(e.to_string()))?
        .label("Predicted")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()
        .map_err(|e| PipelineError::PlotError(e.to_string()))?;

    root.present()
        .map_err(|e| PipelineError::PlotError(e.to_string()))?;

    info!("Chart saved to {:?}", output_path.as_ref());
    Ok(())
}
