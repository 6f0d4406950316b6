use forecast_compare::error::CompareError;
use forecast_compare::utils::{
    forward_fill, normalize_data, parse_timestamp, pearson_correlation, percent_change,
    rolling_mean, rolling_std,
};
use pretty_assertions::assert_eq;

#[test]
fn test_normalize_data() {
    let data = vec![10.0, 20.0, 30.0, 40.0, 50.0];

    let normalized = normalize_data(&data).unwrap();

    assert_eq!(normalized.len(), data.len());
    assert_eq!(normalized[0], 0.0);
    assert_eq!(normalized[4], 1.0);
    assert_eq!(normalized[2], 0.5);

    // Everything stays inside [0, 1]
    assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_normalize_data_degenerate_range() {
    let data = vec![100.0, 100.0, 100.0];

    let result = normalize_data(&data);
    assert!(matches!(result, Err(CompareError::DegenerateRange(_))));
}

#[test]
fn test_normalize_data_empty() {
    let result = normalize_data(&[]);
    assert!(matches!(result, Err(CompareError::DataError(_))));
}

#[test]
fn test_pearson_correlation_perfectly_linear() {
    let a = vec![1.0, 2.0, 3.0, 4.0];
    let b = vec![10.0, 20.0, 30.0, 40.0];

    let r = pearson_correlation(&a, &b).unwrap();
    assert!((r - 1.0).abs() < 1e-10);

    let inverse: Vec<f64> = b.iter().map(|v| -v).collect();
    let r = pearson_correlation(&a, &inverse).unwrap();
    assert!((r + 1.0).abs() < 1e-10);
}

#[test]
fn test_pearson_correlation_is_symmetric() {
    let a = vec![1.0, 2.0, 4.0, 3.0, 5.0];
    let b = vec![2.0, 1.0, 3.0, 5.0, 4.0];

    let r_ab = pearson_correlation(&a, &b).unwrap();
    let r_ba = pearson_correlation(&b, &a).unwrap();

    assert!((r_ab - r_ba).abs() < 1e-12);
    assert!((-1.0..=1.0).contains(&r_ab));
}

#[test]
fn test_pearson_correlation_insufficient_data() {
    let result = pearson_correlation(&[1.0], &[2.0]);
    assert!(matches!(result, Err(CompareError::InsufficientData(_))));
}

#[test]
fn test_pearson_correlation_zero_variance() {
    let constant = vec![5.0, 5.0, 5.0];
    let varying = vec![1.0, 2.0, 3.0];

    let result = pearson_correlation(&constant, &varying);
    assert!(matches!(result, Err(CompareError::DegenerateRange(_))));
}

#[test]
fn test_pearson_correlation_length_mismatch() {
    let result = pearson_correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(CompareError::DataError(_))));
}

#[test]
fn test_rolling_mean() {
    let data = vec![10.0, 20.0, 30.0, 40.0, 50.0];

    let ma = rolling_mean(&data, 3).unwrap();

    assert_eq!(ma.len(), data.len());
    assert_eq!(ma[0], None);
    assert_eq!(ma[1], None);
    assert_eq!(ma[2], Some(20.0));
    assert_eq!(ma[4], Some(40.0));

    // Window larger than the data leaves every row empty
    let ma = rolling_mean(&data, 10).unwrap();
    assert!(ma.iter().all(|v| v.is_none()));

    assert!(rolling_mean(&data, 0).is_err());
}

#[test]
fn test_rolling_std() {
    let data = vec![1.0, 2.0, 3.0, 4.0];

    let std = rolling_std(&data, 3).unwrap();

    assert_eq!(std.len(), data.len());
    assert_eq!(std[0], None);
    assert_eq!(std[1], None);
    // Sample standard deviation of [1, 2, 3] is exactly 1
    assert!((std[2].unwrap() - 1.0).abs() < 1e-12);
    assert!((std[3].unwrap() - 1.0).abs() < 1e-12);

    // ddof = 1 makes a window of 1 meaningless
    assert!(rolling_std(&data, 1).is_err());
}

#[test]
fn test_percent_change() {
    let data = vec![100.0, 102.0, 98.0];

    let changes = percent_change(&data);

    assert_eq!(changes.len(), data.len());
    assert_eq!(changes[0], None);
    assert!((changes[1].unwrap() - 2.0).abs() < 1e-10);
    assert!((changes[2].unwrap() - (98.0 / 102.0 - 1.0) * 100.0).abs() < 1e-10);

    // A zero base has no defined change
    let changes = percent_change(&[0.0, 5.0]);
    assert_eq!(changes[1], None);
}

#[test]
fn test_forward_fill() {
    let data = vec![None, Some(1.0), None, None, Some(4.0), None];

    let filled = forward_fill(&data);

    assert_eq!(
        filled,
        vec![None, Some(1.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)]
    );
}

#[test]
fn test_parse_timestamp_formats() {
    let date = parse_timestamp("2023-01-15").unwrap();
    assert_eq!(date.to_string(), "2023-01-15 00:00:00");

    let us_date = parse_timestamp("01/15/2023").unwrap();
    assert_eq!(us_date.date(), date.date());

    let datetime = parse_timestamp("2023-01-15T14:30:45").unwrap();
    assert_eq!(datetime.to_string(), "2023-01-15 14:30:45");

    let spaced = parse_timestamp("2023-01-15 14:30:45").unwrap();
    assert_eq!(spaced, datetime);

    let rfc3339 = parse_timestamp("2023-01-15T14:30:45+00:00").unwrap();
    assert_eq!(rfc3339, datetime);

    assert!(parse_timestamp("not-a-date").is_err());
}
