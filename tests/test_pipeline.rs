use btc_forecast::config::PipelineConfig;
use btc_forecast::data::{RawTick, Tick};
use btc_forecast::pipeline::{add_indicators, finalize, normalize, preprocess, resample};
use btc_forecast::Frequency;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn tick(ymd: (i32, u32, u32), hms: (u32, u32, u32), o: f64, h: f64, l: f64, c: f64, v: f64) -> Tick {
    Tick {
        time: Utc
            .with_ymd_and_hms(ymd.0, ymd.1, ymd.2, hms.0, hms.1, hms.2)
            .unwrap(),
        open: o,
        high: h,
        low: l,
        close: c,
        volume: v,
    }
}

/// Alternating up/down closes so gains and losses both appear in every
/// RSI window. One tick per day.
fn alternating_daily_ticks(days: u32) -> Vec<Tick> {
    (0..days)
        .map(|i| {
            let close = if i % 2 == 0 { 100.0 } else { 104.0 };
            let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Days::new(i as u64);
            Tick {
                time: Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
                open: close - 1.0,
                high: close + 2.0,
                low: close - 2.0,
                close,
                volume: 10.0,
            }
        })
        .collect()
}

#[test]
fn normalize_rejects_missing_timestamp() {
    let raw = vec![RawTick {
        timestamp: None,
        open: 1.0,
        high: 1.0,
        low: 1.0,
        close: 1.0,
        volume: 0.0,
    }];
    assert!(normalize(&raw).is_err());
}

#[test]
fn normalize_sorts_ascending() {
    let raw = vec![
        RawTick {
            timestamp: Some(1_672_617_600), // 2023-01-02
            open: 2.0,
            high: 2.0,
            low: 2.0,
            close: 2.0,
            volume: 1.0,
        },
        RawTick {
            timestamp: Some(1_672_531_200), // 2023-01-01
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1.0,
        },
    ];
    let ticks = normalize(&raw).unwrap();
    assert!(ticks[0].time < ticks[1].time);
}

#[test]
fn resample_aggregates_one_bucket() {
    let ticks = vec![
        tick((2023, 3, 6), (0, 1, 0), 10.0, 12.0, 9.0, 11.0, 1.0),
        tick((2023, 3, 6), (9, 30, 0), 11.0, 15.0, 10.5, 14.0, 2.0),
        tick((2023, 3, 6), (23, 59, 0), 14.0, 14.5, 8.0, 9.0, 3.0),
    ];

    let bars = resample(&ticks, Frequency::Daily);
    assert_eq!(bars.len(), 1);

    let bar = &bars[0];
    assert_eq!(bar.period_start, NaiveDate::from_ymd_opt(2023, 3, 6).unwrap());
    assert_eq!(bar.open, 10.0);
    assert_eq!(bar.high, 15.0);
    assert_eq!(bar.low, 8.0);
    assert_eq!(bar.close, 9.0);
    assert_eq!(bar.volume, 6.0);
}

#[test]
fn resample_drops_empty_buckets() {
    // Two ticks three days apart: no zero-filled bar in between
    let ticks = vec![
        tick((2023, 3, 6), (12, 0, 0), 10.0, 10.0, 10.0, 10.0, 1.0),
        tick((2023, 3, 9), (12, 0, 0), 11.0, 11.0, 11.0, 11.0, 1.0),
    ];

    let bars = resample(&ticks, Frequency::Daily);
    assert_eq!(bars.len(), 2);
}

#[rstest]
#[case::daily(Frequency::Daily)]
#[case::weekly(Frequency::Weekly)]
#[case::monthly(Frequency::Monthly)]
fn resampled_bars_satisfy_ohlc_invariants(#[case] frequency: Frequency) {
    let ticks = alternating_daily_ticks(90);
    let bars = resample(&ticks, frequency);

    assert!(!bars.is_empty());
    for pair in bars.windows(2) {
        assert!(pair[0].period_start < pair[1].period_start);
    }
    for bar in &bars {
        assert!(bar.high >= bar.low);
        assert!(bar.high >= bar.open.max(bar.close));
        assert!(bar.low <= bar.open.min(bar.close));
    }
}

#[test]
fn weekly_bars_start_on_monday() {
    let ticks = alternating_daily_ticks(30);
    for bar in resample(&ticks, Frequency::Weekly) {
        assert_eq!(bar.period_start.weekday(), chrono::Weekday::Mon);
    }
}

#[test]
fn monthly_bars_align_to_calendar_months() {
    let ticks = alternating_daily_ticks(90);
    let bars = resample(&ticks, Frequency::Monthly);
    assert_eq!(bars.len(), 3);
    for bar in &bars {
        assert_eq!(bar.period_start.day(), 1);
    }
}

#[test]
fn resample_is_idempotent_at_same_granularity() {
    let ticks = alternating_daily_ticks(30);
    let bars = resample(&ticks, Frequency::Daily);

    // Feed the daily bars back in as midnight ticks: no further bucketing
    let bar_ticks: Vec<Tick> = bars
        .iter()
        .map(|b| Tick {
            time: Utc
                .from_utc_datetime(&b.period_start.and_hms_opt(0, 0, 0).unwrap()),
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
        })
        .collect();

    assert_eq!(resample(&bar_ticks, Frequency::Daily), bars);
}

#[test]
fn finalize_drops_warmup_rows() {
    let ticks = alternating_daily_ticks(60);
    let bars = resample(&ticks, Frequency::Daily);
    let enriched = finalize(add_indicators(&bars).unwrap());

    // The 20-period lookback dominates: the first 19 rows are dropped
    assert_eq!(enriched.len(), 60 - 19);
    assert_eq!(
        enriched[0].date,
        NaiveDate::from_ymd_opt(2023, 1, 20).unwrap()
    );
}

#[test]
fn constant_series_yields_empty_finalized_table() {
    // 30 bars of constant close: SMA/EMA/Bollinger all equal the constant,
    // but the oscillator is undefined everywhere (avg_loss == 0), so the
    // whole-row drop rule empties the table.
    let ticks: Vec<Tick> = (1..=30)
        .map(|d| tick((2023, 1, d), (12, 0, 0), 100.0, 100.0, 100.0, 100.0, 1.0))
        .collect();
    let bars = resample(&ticks, Frequency::Daily);
    let with_indicators = add_indicators(&bars).unwrap();

    for row in with_indicators.iter().skip(19) {
        assert_eq!(row.sma_20, Some(100.0));
        assert_eq!(row.ema_10, 100.0);
        assert_eq!(row.ema_20, 100.0);
        assert_eq!(row.bollinger_upper, Some(100.0));
        assert_eq!(row.bollinger_lower, Some(100.0));
        assert_eq!(row.rsi_14, None);
    }

    assert!(finalize(with_indicators).is_empty());
}

fn write_raw_csv(config: &PipelineConfig, days: u32) {
    fs::create_dir_all(&config.raw_dir).unwrap();
    let mut file = fs::File::create(config.raw_data_path()).unwrap();
    writeln!(file, "Timestamp,Open,High,Low,Close,Volume").unwrap();

    let base = 1_672_531_200i64; // 2023-01-01 00:00:00 UTC
    for i in 0..days {
        let close = if i % 2 == 0 { 100.0 } else { 104.0 };
        writeln!(
            file,
            "{},{},{},{},{},{}",
            base + i as i64 * 86_400,
            close - 1.0,
            close + 2.0,
            close - 2.0,
            close,
            10.0
        )
        .unwrap();
    }
}

#[test]
fn preprocess_writes_enriched_csv() {
    let dir = tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    write_raw_csv(&config, 60);

    let records = preprocess(&config, Frequency::Daily).unwrap();
    assert_eq!(records.len(), 41);

    let reloaded = btc_forecast::data::read_enriched(config.processed_path(Frequency::Daily)).unwrap();
    assert_eq!(reloaded, records);
}

#[test]
fn preprocess_leaves_no_partial_file_on_failure() {
    // Too little history for any row to survive the warm-up
    let dir = tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    write_raw_csv(&config, 10);

    assert!(preprocess(&config, Frequency::Daily).is_err());
    assert!(!config.processed_path(Frequency::Daily).exists());
}

#[test]
fn preprocess_fails_on_missing_input_file() {
    let dir = tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    assert!(preprocess(&config, Frequency::Daily).is_err());
}
