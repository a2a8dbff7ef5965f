//! Interactive prompt helpers for the stage binaries
//!
//! The pipeline operations only ever see parsed, enumerated parameters;
//! these helpers are the thin adapter between stdin and those parameters.

use crate::error::{PipelineError, Result};
use crate::frequency::Frequency;
use std::io::{self, Write};

/// Print a prompt and read one trimmed line from stdin
pub fn prompt_line(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Err(PipelineError::DataError(
            "Unexpected end of input".to_string(),
        ));
    }
    Ok(input.trim().to_string())
}

/// Ask for a frequency once; an invalid answer is an error
pub fn prompt_frequency(message: &str) -> Result<Frequency> {
    prompt_line(message)?.parse()
}

/// Ask for a frequency repeatedly until a valid answer is given
pub fn prompt_frequency_retrying(message: &str) -> Result<Frequency> {
    loop {
        match prompt_frequency(message) {
            Ok(frequency) => return Ok(frequency),
            Err(PipelineError::InvalidFrequency(_)) => {
                println!("Invalid input. Please enter 'daily', 'weekly', or 'monthly'.");
            }
            Err(e) => return Err(e),
        }
    }
}

/// Ask for a non-negative integer step count
pub fn prompt_steps(message: &str) -> Result<usize> {
    let input = prompt_line(message)?;
    input.parse().map_err(|_| {
        PipelineError::InvalidParameter(format!("Not a valid step count: {}", input))
    })
}
