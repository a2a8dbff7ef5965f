//! The feature pipeline: normalize, resample, enrich, finalize
//!
//! Transforms the raw minute-level tick series into a regular-interval,
//! indicator-enriched bar series suitable for supervised learning. This is
//! a single-pass batch job: indicators are computed eagerly over the full
//! resampled history, never incrementally.

use crate::config::PipelineConfig;
use crate::data::{self, Bar, EnrichedRecord, IndicatorBar, RawTick, Tick};
use crate::error::{PipelineError, Result};
use crate::frequency::Frequency;
use crate::indicators;
use chrono::DateTime;
use log::info;

/// Parse each tick's epoch-seconds timestamp into a time-zone-aware
/// instant and sort the series ascending.
///
/// Rows with a missing or out-of-range timestamp are rejected with an
/// explicit error rather than silently included.
pub fn normalize(raw: &[RawTick]) -> Result<Vec<Tick>> {
    let mut ticks = Vec::with_capacity(raw.len());

    for (i, tick) in raw.iter().enumerate() {
        let seconds = tick.timestamp.ok_or_else(|| {
            PipelineError::DataError(format!("Missing timestamp in raw tick {}", i))
        })?;
        let time = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
            PipelineError::DataError(format!(
                "Timestamp {} out of range in raw tick {}",
                seconds, i
            ))
        })?;

        ticks.push(Tick {
            time,
            open: tick.open,
            high: tick.high,
            low: tick.low,
            close: tick.close,
            volume: tick.volume,
        });
    }

    ticks.sort_by_key(|t| t.time);
    Ok(ticks)
}

/// Aggregate ticks into non-overlapping OHLCV bars at the given frequency.
///
/// Ticks must already be in ascending time order (as produced by
/// [`normalize`]). Buckets with no contributing ticks are dropped, not
/// zero-filled. The output is in ascending period-start order.
pub fn resample(ticks: &[Tick], frequency: Frequency) -> Vec<Bar> {
    let mut bars: Vec<Bar> = Vec::new();

    for tick in ticks {
        let bucket = frequency.bucket_start(tick.time.date_naive());

        match bars.last_mut() {
            Some(bar) if bar.period_start == bucket => {
                bar.high = bar.high.max(tick.high);
                bar.low = bar.low.min(tick.low);
                bar.close = tick.close;
                bar.volume += tick.volume;
            }
            _ => bars.push(Bar {
                period_start: bucket,
                open: tick.open,
                high: tick.high,
                low: tick.low,
                close: tick.close,
                volume: tick.volume,
            }),
        }
    }

    bars
}

/// Compute the full indicator set over the ordered bar sequence:
/// SMA 10/20, EMA 10/20, RSI 14, MACD (12, 26, 9) and Bollinger Bands
/// (20 periods, 2 standard deviations).
pub fn add_indicators(bars: &[Bar]) -> Result<Vec<IndicatorBar>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let sma_10 = indicators::sma(&closes, 10)?;
    let sma_20 = indicators::sma(&closes, 20)?;
    let ema_10 = indicators::ema(&closes, 10)?;
    let ema_20 = indicators::ema(&closes, 20)?;
    let rsi_14 = indicators::rsi(&closes, 14)?;
    let (macd, macd_signal) = indicators::macd(&closes, 12, 26, 9)?;
    let (bollinger_upper, bollinger_lower) = indicators::bollinger_bands(&closes, 20, 2.0)?;

    let enriched = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorBar {
            bar: bar.clone(),
            sma_10: sma_10[i],
            sma_20: sma_20[i],
            ema_10: ema_10[i],
            ema_20: ema_20[i],
            rsi_14: rsi_14[i],
            macd: macd[i],
            macd_signal: macd_signal[i],
            bollinger_upper: bollinger_upper[i],
            bollinger_lower: bollinger_lower[i],
        })
        .collect();

    Ok(enriched)
}

/// Drop every row containing any undefined indicator value.
///
/// This removes the indicator warm-up (the 20-period lookback dominates)
/// plus any row where the oscillator is undefined. The result may be
/// empty; the caller decides whether that is an error.
pub fn finalize(bars: Vec<IndicatorBar>) -> Vec<EnrichedRecord> {
    bars.into_iter()
        .filter_map(|row| {
            Some(EnrichedRecord {
                date: row.bar.period_start,
                open: row.bar.open,
                high: row.bar.high,
                low: row.bar.low,
                close: row.bar.close,
                volume: row.bar.volume,
                sma_10: row.sma_10?,
                sma_20: row.sma_20?,
                ema_10: row.ema_10,
                ema_20: row.ema_20,
                rsi_14: row.rsi_14?,
                macd: row.macd,
                macd_signal: row.macd_signal,
                bollinger_upper: row.bollinger_upper?,
                bollinger_lower: row.bollinger_lower?,
            })
        })
        .collect()
}

/// Run the whole feature pipeline for one frequency and persist the result
/// to `bitcoin_<frequency>.csv`.
///
/// The output file is only written once the full table has been computed,
/// so a failed run leaves no partial output behind. An empty finalized
/// table is an explicit error, not a silently written zero-row file.
pub fn preprocess(config: &PipelineConfig, frequency: Frequency) -> Result<Vec<EnrichedRecord>> {
    let raw = data::load_raw_ticks(config.raw_data_path())?;
    let ticks = normalize(&raw)?;
    if ticks.is_empty() {
        return Err(PipelineError::DataError(
            "Raw dataset contains no usable ticks".to_string(),
        ));
    }

    let bars = resample(&ticks, frequency);
    info!("Resampled {} ticks into {} {} bars", ticks.len(), bars.len(), frequency);

    let enriched = finalize(add_indicators(&bars)?);
    if enriched.is_empty() {
        return Err(PipelineError::DataError(format!(
            "No rows survived indicator warm-up for {} resampling ({} bars in)",
            frequency,
            bars.len()
        )));
    }

    data::write_enriched(config.processed_path(frequency), &enriched)?;
    Ok(enriched)
}
