//! Stage 2: resample the raw ticks and enrich them with indicators

use btc_forecast::cli::prompt_frequency_retrying;
use btc_forecast::config::PipelineConfig;
use btc_forecast::pipeline::preprocess;

fn main() {
    env_logger::init();

    let frequency = match prompt_frequency_retrying("Resample frequency (daily/weekly/monthly): ")
    {
        Ok(frequency) => frequency,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = PipelineConfig::default();
    match preprocess(&config, frequency) {
        Ok(records) => {
            println!(
                "Processed dataset saved to: {}",
                config.processed_path(frequency).display()
            );
            println!("{} rows, {} through {}",
                records.len(),
                records[0].date,
                records[records.len() - 1].date
            );
        }
        Err(e) => {
            eprintln!("Preprocessing failed: {}", e);
            std::process::exit(1);
        }
    }
}
