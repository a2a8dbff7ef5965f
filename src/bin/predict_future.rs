//! Stage 4: project future closes with the persisted model

use btc_forecast::cli::{prompt_frequency, prompt_steps};
use btc_forecast::config::PipelineConfig;
use btc_forecast::projector::project_forward;

fn main() {
    env_logger::init();

    let frequency = match prompt_frequency("Choose dataset (daily/weekly/monthly): ") {
        Ok(frequency) => frequency,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let steps = match prompt_steps("How many steps to predict? ") {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = PipelineConfig::default();
    match project_forward(&config, frequency, steps) {
        Ok(projections) => {
            println!("{:<12} {:>14}", "Date", "Predicted_Close");
            for p in &projections {
                println!("{:<12} {:>14.2}", p.date.to_string(), p.predicted_close);
            }
        }
        Err(e) => {
            eprintln!("Prediction failed: {}", e);
            std::process::exit(1);
        }
    }
}
