use chrono::NaiveDate;
use forecast_compare::error::CompareError;
use forecast_compare::{preprocess, PreprocessConfig, PriceSeries};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily_prices(label: &str, start: NaiveDate, close: Vec<Option<f64>>) -> PriceSeries {
    let dates = (0..close.len())
        .map(|i| start + chrono::Days::new(i as u64))
        .collect();
    PriceSeries::new(label, dates, close).unwrap()
}

#[test]
fn test_price_series_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
    writeln!(file, "2024-01-01,100.0,105.0,98.0,103.0,1000").unwrap();
    writeln!(file, "2024-01-02,103.0,107.0,101.0,,1200").unwrap();
    writeln!(file, "2024-01-03,106.0,110.0,104.0,108.0,1500").unwrap();

    let series = PriceSeries::from_csv("DXY", file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.close()[0], Some(103.0));
    assert_eq!(series.close()[1], None);
    assert_eq!(series.close()[2], Some(108.0));
    assert_eq!(series.dates()[2], date(2024, 1, 3));
}

#[test]
fn test_price_series_missing_file() {
    let result = PriceSeries::from_csv("DXY", "nonexistent_prices.csv");
    assert!(matches!(result, Err(CompareError::MissingInput(_))));
}

#[test]
fn test_preprocess_derived_columns() {
    let close = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0]
        .into_iter()
        .map(Some)
        .collect();
    let series = daily_prices("DXY", date(2024, 1, 1), close);

    let config = PreprocessConfig {
        short_window: 3,
        long_window: 5,
        volatility_window: 3,
    };
    let processed = preprocess(&series, &config).unwrap();

    assert_eq!(processed.len(), 6);
    assert_eq!(processed.close(), &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);

    assert_eq!(processed.daily_change_pct()[0], None);
    assert!((processed.daily_change_pct()[1].unwrap() - 10.0).abs() < 1e-10);

    assert_eq!(processed.short_ma()[1], None);
    assert_eq!(processed.short_ma()[2], Some(11.0));
    assert_eq!(processed.short_ma()[5], Some(14.0));

    assert_eq!(processed.long_ma()[3], None);
    assert_eq!(processed.long_ma()[4], Some(12.0));

    // Sample standard deviation of three consecutive integers is 1
    assert!((processed.volatility()[2].unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_preprocess_forward_fills_gaps() {
    let close = vec![Some(10.0), None, None, Some(13.0)];
    let series = daily_prices("DXY", date(2024, 1, 1), close);

    let processed = preprocess(&series, &PreprocessConfig::default()).unwrap();

    assert_eq!(processed.close(), &[10.0, 10.0, 10.0, 13.0]);
}

#[test]
fn test_preprocess_drops_leading_gaps() {
    let close = vec![None, None, Some(5.0), Some(6.0)];
    let series = daily_prices("DXY", date(2024, 1, 1), close);

    let processed = preprocess(&series, &PreprocessConfig::default()).unwrap();

    assert_eq!(processed.len(), 2);
    assert_eq!(processed.dates()[0], date(2024, 1, 3));
    assert_eq!(processed.close(), &[5.0, 6.0]);
}

#[test]
fn test_preprocess_all_gaps() {
    let series = daily_prices("DXY", date(2024, 1, 1), vec![None, None]);

    let result = preprocess(&series, &PreprocessConfig::default());
    assert!(matches!(result, Err(CompareError::DataError(_))));
}

#[test]
fn test_preprocess_invalid_windows() {
    let series = daily_prices("DXY", date(2024, 1, 1), vec![Some(1.0), Some(2.0)]);

    let config = PreprocessConfig {
        short_window: 0,
        ..PreprocessConfig::default()
    };
    assert!(matches!(
        preprocess(&series, &config),
        Err(CompareError::InvalidParameter(_))
    ));

    let config = PreprocessConfig {
        volatility_window: 1,
        ..PreprocessConfig::default()
    };
    assert!(matches!(
        preprocess(&series, &config),
        Err(CompareError::InvalidParameter(_))
    ));
}

#[test]
fn test_processed_csv_export() {
    let close = (0..10).map(|i| Some(100.0 + i as f64)).collect();
    let series = daily_prices("DXY", date(2024, 1, 1), close);

    let config = PreprocessConfig {
        short_window: 3,
        long_window: 5,
        volatility_window: 3,
    };
    let processed = preprocess(&series, &config).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("dxy_processed.csv");
    processed.write_csv(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Date,Close,Daily_Change_%,3_Day_MA,5_Day_MA,Volatility"
    );
    assert_eq!(lines.count(), 10);

    // Warm-up rows serialize as empty cells
    assert!(contents.contains("2024-01-01,100,,,,"));
}

#[test]
fn test_price_series_length_mismatch() {
    let result = PriceSeries::new("DXY", vec![date(2024, 1, 1)], vec![Some(1.0), Some(2.0)]);
    assert!(matches!(result, Err(CompareError::DataError(_))));
}
