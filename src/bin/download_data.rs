//! Stage 1: download the raw minute-level dataset into local storage

use btc_forecast::config::PipelineConfig;
use btc_forecast::fetch::{fetch_dataset, DEFAULT_DATASET_URL};

fn main() {
    env_logger::init();

    let config = PipelineConfig::default();
    match fetch_dataset(&config, DEFAULT_DATASET_URL) {
        Ok(path) => println!("Dataset saved to: {}", path.display()),
        Err(e) => {
            eprintln!("Download failed: {}", e);
            std::process::exit(1);
        }
    }
}
