//! File-path configuration shared by all pipeline stages
//!
//! Every stage takes an explicit [`PipelineConfig`] instead of relying on
//! process-wide constants, so tests can point the whole pipeline at a
//! temporary directory.

use crate::frequency::Frequency;
use std::path::{Path, PathBuf};

/// Raw minute-data file name inside the raw data directory
pub const RAW_DATA_FILE: &str = "btcusd_1-min_data.csv";

/// Serialized model artifact file name inside the model directory
pub const MODEL_FILE: &str = "linear_reg.json";

/// Directory layout for the pipeline stages
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the downloaded raw dataset
    pub raw_dir: PathBuf,
    /// Directory holding the processed (resampled + enriched) datasets
    pub processed_dir: PathBuf,
    /// Directory holding the model artifact and charts
    pub model_dir: PathBuf,
}

impl PipelineConfig {
    /// Create a configuration rooted at the given base directory,
    /// using the conventional `data/` and `models/` layout.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base = base_dir.as_ref();
        Self {
            raw_dir: base.join("data").join("bitcoin-historical-data"),
            processed_dir: base.join("data").join("processed"),
            model_dir: base.join("models"),
        }
    }

    /// Path of the raw minute-level dataset
    pub fn raw_data_path(&self) -> PathBuf {
        self.raw_dir.join(RAW_DATA_FILE)
    }

    /// Path of the enriched dataset for the given frequency,
    /// e.g. `data/processed/bitcoin_daily.csv`
    pub fn processed_path(&self, frequency: Frequency) -> PathBuf {
        self.processed_dir
            .join(format!("bitcoin_{}.csv", frequency.name()))
    }

    /// Path of the serialized model artifact
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(MODEL_FILE)
    }

    /// Path of the rendered actual-vs-predicted chart for the given frequency
    pub fn chart_path(&self, frequency: Frequency) -> PathBuf {
        self.model_dir
            .join(format!("prediction_{}.png", frequency.name()))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
