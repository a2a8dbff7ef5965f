//! Rolling and exponential technical indicators
//!
//! All functions operate on an ordered series of closing prices and return
//! one output per input row. Rolling indicators yield `None` inside their
//! lookback warm-up; exponential indicators are seeded with the first
//! observation and are defined everywhere.

use crate::error::{PipelineError, Result};
use statrs::statistics::Statistics;

/// Simple moving average over a trailing window.
///
/// The first `window - 1` outputs are `None`.
pub fn sma(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(PipelineError::InvalidParameter(
            "SMA window must be positive".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(values.len());
    let mut running_sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        running_sum += value;
        if i >= window {
            running_sum -= values[i - window];
        }

        if i + 1 >= window {
            out.push(Some(running_sum / window as f64));
        } else {
            out.push(None);
        }
    }

    Ok(out)
}

/// Exponential moving average with smoothing factor `alpha = 2 / (span + 1)`,
/// seeded by the first observation (recursive form, no warm-up gap).
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>> {
    if span == 0 {
        return Err(PipelineError::InvalidParameter(
            "EMA span must be positive".to_string(),
        ));
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = match values.first() {
        Some(&first) => first,
        None => return Ok(out),
    };
    out.push(current);

    for &value in &values[1..] {
        current = alpha * value + (1.0 - alpha) * current;
        out.push(current);
    }

    Ok(out)
}

/// Relative strength index over trailing simple means of gains and losses.
///
/// The first `period` outputs are `None` (the first delta only exists at
/// row 1). When the average loss over the window is exactly zero the ratio
/// is undefined and the output is `None` for that row.
pub fn rsi(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    if period == 0 {
        return Err(PipelineError::InvalidParameter(
            "RSI period must be positive".to_string(),
        ));
    }

    let mut gains = Vec::with_capacity(values.len());
    let mut losses = Vec::with_capacity(values.len());
    for pair in values.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let mut out = vec![None; values.len().min(period)];
    for i in period..values.len() {
        // Trailing window over the deltas ending at row i
        let window = &gains[i - period..i];
        let avg_gain = window.iter().sum::<f64>() / period as f64;
        let avg_loss = losses[i - period..i].iter().sum::<f64>() / period as f64;

        if avg_loss == 0.0 {
            out.push(None);
        } else {
            let rs = avg_gain / avg_loss;
            out.push(Some(100.0 - 100.0 / (1.0 + rs)));
        }
    }

    Ok(out)
}

/// Trend/divergence pair: the MACD line (fast EMA minus slow EMA) and its
/// own EMA as the signal line.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let fast_ema = ema(values, fast)?;
    let slow_ema = ema(values, slow)?;

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, signal)?;

    Ok((macd_line, signal_line))
}

/// Volatility bands: SMA over `window` plus/minus `num_std` times the
/// sample standard deviation over the same window.
pub fn bollinger_bands(
    values: &[f64],
    window: usize,
    num_std: f64,
) -> Result<(Vec<Option<f64>>, Vec<Option<f64>>)> {
    let middle = sma(values, window)?;

    let mut upper = Vec::with_capacity(values.len());
    let mut lower = Vec::with_capacity(values.len());

    for (i, mid) in middle.into_iter().enumerate() {
        match mid {
            Some(mean) => {
                let std = values[i + 1 - window..=i].iter().std_dev();
                upper.push(Some(mean + num_std * std));
                lower.push(Some(mean - num_std * std));
            }
            None => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    Ok((upper, lower))
}
