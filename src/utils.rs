//! Shared numeric kernels for the comparator and preprocessing stages

use crate::error::{CompareError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use statrs::statistics::Statistics;

/// Min-max normalize a series onto the [0, 1] range
///
/// The minimum input value maps to 0 and the maximum to 1. A constant series
/// has no scale and fails with [`CompareError::DegenerateRange`] instead of
/// producing NaN.
pub fn normalize_data(data: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(CompareError::DataError(
            "Cannot normalize an empty series".to_string(),
        ));
    }

    let min = data.min();
    let max = data.max();
    let range = max - min;

    if range == 0.0 {
        return Err(CompareError::DegenerateRange(format!(
            "All values equal {}; min-max scale is undefined",
            min
        )));
    }

    Ok(data.iter().map(|v| (v - min) / range).collect())
}

/// Pearson correlation coefficient between two equal-length series
///
/// Requires at least 2 points and non-zero variance in both inputs; both
/// conditions fail explicitly rather than propagating NaN.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(CompareError::DataError(format!(
            "Series lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.len() < 2 {
        return Err(CompareError::InsufficientData(format!(
            "Correlation needs at least 2 points, got {}",
            a.len()
        )));
    }

    let std_a = a.std_dev();
    let std_b = b.std_dev();
    let denominator = std_a * std_b;

    if denominator == 0.0 {
        return Err(CompareError::DegenerateRange(
            "Correlation is undefined for a zero-variance series".to_string(),
        ));
    }

    Ok(a.covariance(b) / denominator)
}

/// Rolling mean over a fixed window, row-aligned with the input
///
/// The first `window - 1` slots are `None`, matching how a spreadsheet or
/// dataframe rolling mean leaves the warm-up rows empty.
pub fn rolling_mean(data: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(CompareError::InvalidParameter(
            "Rolling mean window must be positive".to_string(),
        ));
    }

    let mut out = vec![None; data.len()];
    if window > data.len() {
        return Ok(out);
    }

    for i in (window - 1)..data.len() {
        let slice = &data[i + 1 - window..=i];
        out[i] = Some(slice.mean());
    }

    Ok(out)
}

/// Rolling sample standard deviation over a fixed window, row-aligned
///
/// Uses the n-1 denominator, so a window below 2 is rejected up front.
pub fn rolling_std(data: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window < 2 {
        return Err(CompareError::InvalidParameter(
            "Rolling standard deviation window must be at least 2".to_string(),
        ));
    }

    let mut out = vec![None; data.len()];
    if window > data.len() {
        return Ok(out);
    }

    for i in (window - 1)..data.len() {
        let slice = &data[i + 1 - window..=i];
        out[i] = Some(slice.std_dev());
    }

    Ok(out)
}

/// Percentage change between consecutive values, in percent
///
/// The first slot is `None` (no previous value), as is any step off a zero
/// base, where the change is undefined.
pub fn percent_change(data: &[f64]) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];

    for i in 1..data.len() {
        if data[i - 1] != 0.0 {
            out[i] = Some((data[i] / data[i - 1] - 1.0) * 100.0);
        }
    }

    out
}

/// Forward-fill gaps in a series
///
/// Each `None` takes the most recent preceding value; leading gaps stay
/// `None` because there is nothing to carry forward.
pub fn forward_fill(data: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;

    data.iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

/// Parse a timestamp from the formats forecast CSVs show up in
///
/// Accepts plain ISO dates, ISO datetimes with a `T` or space separator
/// (with optional fractional seconds), RFC 3339, datetimes with a numeric
/// offset, and US-style `MM/DD/YYYY` dates.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%z") {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_time(NaiveTime::default()));
        }
    }

    Err(CompareError::DataError(format!(
        "Unrecognized date format: '{}'",
        trimmed
    )))
}
