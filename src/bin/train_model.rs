//! Stage 3: fit the linear model, report test error, persist the artifact

use btc_forecast::cli::prompt_frequency;
use btc_forecast::config::PipelineConfig;
use btc_forecast::trainer::train_and_evaluate;

fn main() {
    env_logger::init();

    // Invalid choice aborts before any file I/O
    let frequency = match prompt_frequency("Choose dataset (daily/weekly/monthly): ") {
        Ok(frequency) => frequency,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = PipelineConfig::default();
    match train_and_evaluate(&config, frequency) {
        Ok(report) => {
            println!("Test MSE: {:.2}", report.metrics.mse);
            println!("Model saved to: {}", report.model_path.display());
            println!("Chart saved to: {}", report.chart_path.display());
        }
        Err(e) => {
            eprintln!("Training failed: {}", e);
            std::process::exit(1);
        }
    }
}
