//! Data types and CSV handling for the pipeline stages
//!
//! Each stage reads its input from a flat CSV file and writes its output
//! to another; these are the only handoff points between stages.

use crate::error::{PipelineError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One raw minute-level row as stored in the downloaded dataset.
///
/// The timestamp is optional at this layer so that missing values can be
/// rejected with a row-level error during normalization instead of being
/// silently included.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTick {
    /// Unix timestamp in seconds
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<i64>,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,
}

/// A raw tick with its timestamp parsed into a time-zone-aware instant
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// An OHLCV bar aggregated over one resampling bucket.
///
/// Invariants: `open` is the first tick's open in the bucket, `high` the
/// maximum high, `low` the minimum low, `close` the last tick's close and
/// `volume` the sum of volumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Start of the bucket this bar aggregates
    pub period_start: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A bar extended with indicator values.
///
/// Indicators inside their lookback warm-up, and the oscillator when the
/// average loss is exactly zero, are `None`. EMAs and the MACD pair are
/// seeded from the first observation and therefore always defined.
#[derive(Debug, Clone)]
pub struct IndicatorBar {
    pub bar: Bar,
    pub sma_10: Option<f64>,
    pub sma_20: Option<f64>,
    pub ema_10: f64,
    pub ema_20: f64,
    pub rsi_14: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

/// One fully-defined row of the enriched dataset, as written to
/// `bitcoin_<frequency>.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,
    #[serde(rename = "SMA_10")]
    pub sma_10: f64,
    #[serde(rename = "SMA_20")]
    pub sma_20: f64,
    #[serde(rename = "EMA_10")]
    pub ema_10: f64,
    #[serde(rename = "EMA_20")]
    pub ema_20: f64,
    #[serde(rename = "RSI_14")]
    pub rsi_14: f64,
    #[serde(rename = "MACD")]
    pub macd: f64,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: f64,
    #[serde(rename = "Bollinger_Upper")]
    pub bollinger_upper: f64,
    #[serde(rename = "Bollinger_Lower")]
    pub bollinger_lower: f64,
}

/// Names of the model's feature columns, in the order produced by
/// [`EnrichedRecord::features`]. Every column except `Close`.
pub const FEATURE_NAMES: [&str; 13] = [
    "Open",
    "High",
    "Low",
    "Volume",
    "SMA_10",
    "SMA_20",
    "EMA_10",
    "EMA_20",
    "RSI_14",
    "MACD",
    "MACD_Signal",
    "Bollinger_Upper",
    "Bollinger_Lower",
];

impl EnrichedRecord {
    /// Feature vector for the regression model: all columns except `Close`,
    /// in [`FEATURE_NAMES`] order
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.open,
            self.high,
            self.low,
            self.volume,
            self.sma_10,
            self.sma_20,
            self.ema_10,
            self.ema_20,
            self.rsi_14,
            self.macd,
            self.macd_signal,
            self.bollinger_upper,
            self.bollinger_lower,
        ]
    }
}

/// Load raw minute-level ticks from the downloaded CSV file
pub fn load_raw_ticks<P: AsRef<Path>>(path: P) -> Result<Vec<RawTick>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut ticks = Vec::new();

    for (i, row) in reader.deserialize::<RawTick>().enumerate() {
        let tick = row.map_err(|e| {
            PipelineError::DataError(format!("Invalid raw tick at line {}: {}", i + 2, e))
        })?;
        ticks.push(tick);
    }

    info!("Loaded {} raw ticks from {:?}", ticks.len(), path.as_ref());
    Ok(ticks)
}

/// Write the enriched dataset, creating parent directories as needed
pub fn write_enriched<P: AsRef<Path>>(path: P, records: &[EnrichedRecord]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(
        "Wrote {} enriched rows to {:?}",
        records.len(),
        path.as_ref()
    );
    Ok(())
}

/// Load an enriched dataset produced by the feature pipeline
pub fn read_enriched<P: AsRef<Path>>(path: P) -> Result<Vec<EnrichedRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();

    for (i, row) in reader.deserialize::<EnrichedRecord>().enumerate() {
        let record: EnrichedRecord = row.map_err(|e| {
            PipelineError::DataError(format!("Invalid enriched row at line {}: {}", i + 2, e))
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(PipelineError::DataError(format!(
            "No rows found in {:?}",
            path.as_ref()
        )));
    }

    info!(
        "Loaded {} enriched rows from {:?}",
        records.len(),
        path.as_ref()
    );
    Ok(records)
}
