//! Price-series preprocessing: gap filling, daily change, moving averages
//! and rolling volatility for the upstream forecasting collaborator

use crate::data::detect_column;
use crate::error::{CompareError, Result};
use crate::utils::{forward_fill, parse_timestamp, percent_change, rolling_mean, rolling_std};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// Window sizes for the derived columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Short moving-average window in rows (trading days)
    pub short_window: usize,
    /// Long moving-average window in rows
    pub long_window: usize,
    /// Rolling volatility window in rows
    pub volatility_window: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            short_window: 7,
            long_window: 30,
            volatility_window: 7,
        }
    }
}

/// Raw daily closing prices for one asset, possibly with gaps
#[derive(Debug, Clone)]
pub struct PriceSeries {
    label: String,
    dates: Vec<NaiveDate>,
    close: Vec<Option<f64>>,
}

impl PriceSeries {
    /// Create a series from parallel date and close vectors
    pub fn new(label: &str, dates: Vec<NaiveDate>, close: Vec<Option<f64>>) -> Result<Self> {
        if dates.len() != close.len() {
            return Err(CompareError::DataError(format!(
                "Date and close lengths differ: {} vs {}",
                dates.len(),
                close.len()
            )));
        }

        Ok(Self {
            label: label.to_string(),
            dates,
            close,
        })
    }

    /// Load a price series from a CSV file with date and close columns
    ///
    /// Extra OHLCV columns are ignored. Empty or unparsable close cells
    /// become gaps for the preprocessing stage to fill.
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

        let date_idx = detect_column(&headers, &["date", "ds", "time", "timestamp"])
            .ok_or_else(|| {
                CompareError::DataError(format!("No date column found in {}", path.display()))
            })?;
        let close_idx = detect_column(&headers, &["close", "price", "value"]).ok_or_else(|| {
            CompareError::DataError(format!("No close column found in {}", path.display()))
        })?;

        let mut dates = Vec::new();
        let mut close = Vec::new();
        for record in reader.records() {
            let record = record?;

            let raw_date = record.get(date_idx).ok_or_else(|| {
                CompareError::DataError(format!("Row {} has no date field", dates.len() + 1))
            })?;
            dates.push(parse_timestamp(raw_date)?.date());

            let cell = record.get(close_idx).unwrap_or("").trim();
            close.push(cell.parse::<f64>().ok());
        }

        if dates.is_empty() {
            return Err(CompareError::DataError(format!(
                "{} contains no price rows",
                path.display()
            )));
        }

        debug!("loaded {} price rows for {} from {}", dates.len(), label, path.display());

        Self::new(label, dates, close)
    }

    /// Asset label this series belongs to
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The calendar dates in file order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The closing prices in file order, gaps included
    pub fn close(&self) -> &[Option<f64>] {
        &self.close
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// A price series with its derived columns, row-aligned
///
/// Warm-up rows of the rolling columns are `None`, the way a dataframe
/// leaves them NaN, so downstream charting keeps the date axis intact.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedSeries {
    label: String,
    short_window: usize,
    long_window: usize,
    dates: Vec<NaiveDate>,
    close: Vec<f64>,
    daily_change_pct: Vec<Option<f64>>,
    short_ma: Vec<Option<f64>>,
    long_ma: Vec<Option<f64>>,
    volatility: Vec<Option<f64>>,
}

impl ProcessedSeries {
    /// Asset label this series belongs to
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The calendar dates, gap rows filled
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Closing prices after forward filling
    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// Day-over-day change in percent; first row is `None`
    pub fn daily_change_pct(&self) -> &[Option<f64>] {
        &self.daily_change_pct
    }

    /// Short rolling mean of the close
    pub fn short_ma(&self) -> &[Option<f64>] {
        &self.short_ma
    }

    /// Long rolling mean of the close
    pub fn long_ma(&self) -> &[Option<f64>] {
        &self.long_ma
    }

    /// Rolling sample standard deviation of the close
    pub fn volatility(&self) -> &[Option<f64>] {
        &self.volatility
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Write the processed table as CSV
    ///
    /// Moving-average headers carry their window, e.g. `7_Day_MA`; empty
    /// cells stand in for warm-up rows.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record([
            "Date".to_string(),
            "Close".to_string(),
            "Daily_Change_%".to_string(),
            format!("{}_Day_MA", self.short_window),
            format!("{}_Day_MA", self.long_window),
            "Volatility".to_string(),
        ])?;

        for i in 0..self.dates.len() {
            writer.write_record([
                self.dates[i].to_string(),
                self.close[i].to_string(),
                optional_cell(self.daily_change_pct[i]),
                optional_cell(self.short_ma[i]),
                optional_cell(self.long_ma[i]),
                optional_cell(self.volatility[i]),
            ])?;
        }
        writer.flush()?;

        Ok(())
    }
}

fn optional_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Derive change, moving-average and volatility columns from raw prices
///
/// Gaps in the close are forward-filled first; rows before the first
/// observed close cannot be filled and are dropped.
pub fn preprocess(series: &PriceSeries, config: &PreprocessConfig) -> Result<ProcessedSeries> {
    if config.short_window == 0 || config.long_window == 0 {
        return Err(CompareError::InvalidParameter(
            "Moving-average windows must be positive".to_string(),
        ));
    }
    if config.volatility_window < 2 {
        return Err(CompareError::InvalidParameter(
            "Volatility window must be at least 2".to_string(),
        ));
    }

    let filled = forward_fill(series.close());
    let first = filled.iter().position(|v| v.is_some()).ok_or_else(|| {
        CompareError::DataError(format!("{} has no close values at all", series.label()))
    })?;

    if first > 0 {
        warn!(
            "{}: dropping {} leading row(s) with no close to fill from",
            series.label(),
            first
        );
    }

    let dates = series.dates()[first..].to_vec();
    let close: Vec<f64> = filled[first..].iter().filter_map(|v| *v).collect();

    let daily_change_pct = percent_change(&close);
    let short_ma = rolling_mean(&close, config.short_window)?;
    let long_ma = rolling_mean(&close, config.long_window)?;
    let volatility = rolling_std(&close, config.volatility_window)?;

    Ok(ProcessedSeries {
        label: series.label().to_string(),
        short_window: config.short_window,
        long_window: config.long_window,
        dates,
        close,
        daily_change_pct,
        short_ma,
        long_ma,
        volatility,
    })
}
