//! Forecast series ingestion and in-memory representation

use crate::error::{CompareError, Result};
use crate::utils::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// A single forecast observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Timestamp as produced by the forecasting collaborator; may carry a
    /// time-of-day component that the comparator strips during alignment
    pub timestamp: NaiveDateTime,
    /// Predicted value
    pub value: f64,
}

/// A date-indexed sequence of predicted values for one asset
///
/// Produced externally by a forecasting collaborator and immutable once
/// loaded. One instance per tracked asset.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastSeries {
    label: String,
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Create a series from already-built points
    pub fn new(label: &str, points: Vec<ForecastPoint>) -> Self {
        Self {
            label: label.to_string(),
            points,
        }
    }

    /// Create a series from plain (date, value) pairs
    pub fn from_dated_values(label: &str, rows: Vec<(NaiveDate, f64)>) -> Self {
        let points = rows
            .into_iter()
            .map(|(date, value)| ForecastPoint {
                timestamp: date.and_time(NaiveTime::default()),
                value,
            })
            .collect();

        Self::new(label, points)
    }

    /// Load a forecast series from a CSV file
    ///
    /// The file needs a date column (`ds`, `date`, `time`, ...) and a
    /// predicted-value column (`yhat`, `forecast`, ...); any uncertainty
    /// bound columns such as `yhat_lower`/`yhat_upper` are ignored. A
    /// missing file maps to [`CompareError::MissingInput`] so a host can
    /// report it as an absent upstream artifact rather than a raw IO fault.
    pub fn from_csv<P: AsRef<Path>>(label: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CompareError::MissingInput(path.display().to_string())
            } else {
                CompareError::IoError(e)
            }
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers()?.clone();

        let date_idx = detect_column(&headers, &["ds", "date", "time", "timestamp"])
            .ok_or_else(|| {
                CompareError::DataError(format!(
                    "No date column found in {}",
                    path.display()
                ))
            })?;
        let value_idx = detect_column(&headers, &["yhat", "forecast", "predict", "value", "close"])
            .ok_or_else(|| {
                CompareError::DataError(format!(
                    "No predicted-value column found in {}",
                    path.display()
                ))
            })?;

        let mut points = Vec::new();
        for record in reader.records() {
            let record = record?;

            let raw_date = record.get(date_idx).ok_or_else(|| {
                CompareError::DataError(format!("Row {} has no date field", points.len() + 1))
            })?;
            let raw_value = record.get(value_idx).ok_or_else(|| {
                CompareError::DataError(format!("Row {} has no value field", points.len() + 1))
            })?;

            let timestamp = parse_timestamp(raw_date)?;
            let value: f64 = raw_value.trim().parse().map_err(|_| {
                CompareError::DataError(format!(
                    "Cannot parse '{}' as a predicted value",
                    raw_value
                ))
            })?;

            points.push(ForecastPoint { timestamp, value });
        }

        if points.is_empty() {
            return Err(CompareError::DataError(format!(
                "{} contains no forecast rows",
                path.display()
            )));
        }

        debug!(
            "loaded {} forecast rows for {} from {}",
            points.len(),
            label,
            path.display()
        );

        Ok(Self::new(label, points))
    }

    /// Asset label this series belongs to
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The forecast points in file order
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// The predicted values in file order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Find a column whose header matches one of the candidates
///
/// Exact (case-insensitive) matches win over substring matches so that
/// `yhat` is picked ahead of `yhat_lower`.
pub(crate) fn detect_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(candidate))
        {
            return Some(idx);
        }
    }

    for candidate in candidates {
        if let Some(idx) = headers
            .iter()
            .position(|h| h.trim().to_lowercase().contains(candidate))
        {
            return Some(idx);
        }
    }

    None
}
