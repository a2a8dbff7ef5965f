use btc_forecast::config::PipelineConfig;
use btc_forecast::data::{write_enriched, EnrichedRecord, FEATURE_NAMES};
use btc_forecast::projector::project_forward;
use btc_forecast::{Frequency, TrainedLinearModel};
use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::tempdir;

fn record(date: NaiveDate, close: f64) -> EnrichedRecord {
    EnrichedRecord {
        date,
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume: 500.0,
        sma_10: close - 0.5,
        sma_20: close - 1.0,
        ema_10: close - 0.3,
        ema_20: close - 0.8,
        rsi_14: 55.0,
        macd: 0.2,
        macd_signal: 0.1,
        bollinger_upper: close + 3.0,
        bollinger_lower: close - 3.0,
    }
}

/// A model whose prediction is `open + 5`: one non-zero coefficient,
/// easy to verify by hand.
fn open_plus_five_model() -> TrainedLinearModel {
    let mut coefficients = vec![0.0; FEATURE_NAMES.len()];
    coefficients[0] = 1.0; // Open
    TrainedLinearModel {
        coefficients,
        intercept: 5.0,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    }
}

fn setup(frequency: Frequency, last_date: NaiveDate) -> (tempfile::TempDir, PipelineConfig) {
    let dir = tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());

    let records = vec![record(last_date, 200.0)];
    write_enriched(config.processed_path(frequency), &records).unwrap();
    open_plus_five_model().save(config.model_path()).unwrap();

    (dir, config)
}

#[test]
fn zero_steps_returns_empty_sequence() {
    let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    let (_dir, config) = setup(Frequency::Daily, date);

    let projections = project_forward(&config, Frequency::Daily, 0).unwrap();
    assert!(projections.is_empty());
}

#[rstest]
#[case::daily(Frequency::Daily, NaiveDate::from_ymd_opt(2023, 5, 2).unwrap())]
#[case::weekly(Frequency::Weekly, NaiveDate::from_ymd_opt(2023, 5, 8).unwrap())]
#[case::monthly(Frequency::Monthly, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap())]
fn one_step_advances_one_period(#[case] frequency: Frequency, #[case] expected: NaiveDate) {
    let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    let (_dir, config) = setup(frequency, date);

    let projections = project_forward(&config, frequency, 1).unwrap();
    assert_eq!(projections.len(), 1);
    assert_eq!(projections[0].date, expected);
    // open = 199, prediction = open + 5
    assert_approx_eq!(projections[0].predicted_close, 204.0);
}

#[test]
fn synthetic_rows_reuse_stale_features() {
    // Non-close features are copied forward unchanged, so every later
    // prediction equals the first one. Known limitation of the approach.
    let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    let (_dir, config) = setup(Frequency::Daily, date);

    let projections = project_forward(&config, Frequency::Daily, 5).unwrap();
    assert_eq!(projections.len(), 5);

    for p in &projections {
        assert_approx_eq!(p.predicted_close, projections[0].predicted_close);
    }

    // Dates keep advancing one period at a time
    for pair in projections.windows(2) {
        assert_eq!(pair[1].date, pair[0].date + chrono::Days::new(1));
    }
}

#[test]
fn monthly_advance_follows_the_calendar() {
    let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let (_dir, config) = setup(Frequency::Monthly, date);

    let projections = project_forward(&config, Frequency::Monthly, 14).unwrap();
    assert_eq!(
        projections[0].date,
        NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()
    );
    // Crosses a year boundary without drift
    assert_eq!(
        projections[13].date,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );
}

#[test]
fn fails_without_persisted_model() {
    let dir = tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());

    let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    write_enriched(
        config.processed_path(Frequency::Daily),
        &[record(date, 100.0)],
    )
    .unwrap();

    assert!(project_forward(&config, Frequency::Daily, 1).is_err());
}

#[test]
fn fails_without_enriched_dataset() {
    let dir = tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    open_plus_five_model().save(config.model_path()).unwrap();

    assert!(project_forward(&config, Frequency::Weekly, 1).is_err());
}
