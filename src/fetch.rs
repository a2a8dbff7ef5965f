//! Dataset acquisition
//!
//! Downloads the raw minute-resolution price history into local storage.
//! Pure I/O: no transformation happens here. The download blocks until
//! complete; there are no retries.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use log::info;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::PathBuf;

/// Default source for the Bitcoin historical minute data: the per-file
/// download endpoint for the Kaggle dataset the pipeline was built around.
pub const DEFAULT_DATASET_URL: &str =
    "https://www.kaggle.com/api/v1/datasets/download/mczielinski/bitcoin-historical-data/btcusd_1-min_data.csv";

/// Leading bytes of a zip local file header
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Download the raw dataset from `url` into the configured raw data
/// directory, creating it as needed. Returns the path written.
///
/// The URL must serve the flat CSV itself (`Timestamp,Open,High,Low,
/// Close,Volume,...`). Some dataset hosts wrap downloads in a zip
/// archive; such payloads are detected and rejected so the preprocess
/// stage never receives an archive misnamed as CSV. Extract the CSV
/// into the raw data directory manually in that case, or point at a
/// mirror serving the raw file.
///
/// The response body is streamed straight to disk; the dataset is a few
/// hundred megabytes and is never buffered in memory.
pub fn fetch_dataset(config: &PipelineConfig, url: &str) -> Result<PathBuf> {
    fs::create_dir_all(&config.raw_dir)?;

    let mut response = reqwest::blocking::get(url)?.error_for_status()?;

    let dest = config.raw_data_path();
    let mut file = File::create(&dest)?;
    let bytes = io::copy(&mut response, &mut file)?;
    drop(file);

    let mut magic = [0u8; 4];
    let read = File::open(&dest)?.read(&mut magic)?;
    if read == magic.len() && magic == ZIP_MAGIC {
        fs::remove_file(&dest)?;
        return Err(PipelineError::DataError(format!(
            "Payload from {} is a zip archive, not the flat CSV; \
             extract {} into {:?} manually or use a URL serving the raw file",
            url,
            crate::config::RAW_DATA_FILE,
            config.raw_dir
        )));
    }

    info!("Downloaded {} bytes to {:?}", bytes, dest);
    Ok(dest)
}
