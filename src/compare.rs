//! The Forecast Comparator: align two forecast series on calendar date,
//! rescale each onto [0, 1] and summarize their linear association

use crate::data::ForecastSeries;
use crate::error::{CompareError, Result};
use crate::utils::{normalize_data, pearson_correlation};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Correlation above which two forecasts are considered strongly positive
pub const STRONG_POSITIVE_THRESHOLD: f64 = 0.5;

/// Correlation below which two forecasts are considered strongly negative
pub const STRONG_NEGATIVE_THRESHOLD: f64 = -0.5;

/// How duplicate calendar dates within one input series are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the last value seen for a date (the freshest forecast revision)
    KeepLast,
    /// Reject the series with [`CompareError::DuplicateDate`]
    Reject,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::KeepLast
    }
}

/// Qualitative label for a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    /// Correlation below -0.5
    StrongNegative,
    /// Correlation above 0.5
    StrongPositive,
    /// Anything in between
    Weak,
}

impl Classification {
    /// Classify a correlation coefficient against the fixed thresholds
    pub fn from_correlation(correlation: f64) -> Self {
        if correlation < STRONG_NEGATIVE_THRESHOLD {
            Classification::StrongNegative
        } else if correlation > STRONG_POSITIVE_THRESHOLD {
            Classification::StrongPositive
        } else {
            Classification::Weak
        }
    }

    /// One-sentence reading of the relationship, for direct display
    pub fn summary(&self) -> &'static str {
        match self {
            Classification::StrongNegative => {
                "A significant inverse relationship exists between the two forecasts."
            }
            Classification::StrongPositive => {
                "A significant positive relationship exists between the two forecasts."
            }
            Classification::Weak => {
                "The relationship between the two forecasts is weak or inconsistent."
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::StrongNegative => "strong-negative",
            Classification::StrongPositive => "strong-positive",
            Classification::Weak => "weak/inconsistent",
        };
        write!(f, "{}", label)
    }
}

/// One aligned row of the merged forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedRow {
    /// Calendar date shared by both inputs
    pub date: NaiveDate,
    /// Raw predicted value from the first series
    pub value_a: f64,
    /// Raw predicted value from the second series
    pub value_b: f64,
    /// First value rescaled onto [0, 1]
    pub normalized_a: f64,
    /// Second value rescaled onto [0, 1]
    pub normalized_b: f64,
}

/// Inner join of two forecast series on calendar date
///
/// Rows are sorted ascending by date with no duplicates; dates present in
/// only one input are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct MergedForecast {
    label_a: String,
    label_b: String,
    rows: Vec<MergedRow>,
}

impl MergedForecast {
    /// Label of the first input series
    pub fn label_a(&self) -> &str {
        &self.label_a
    }

    /// Label of the second input series
    pub fn label_b(&self) -> &str {
        &self.label_b
    }

    /// The aligned rows, ascending by date
    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    /// Number of aligned dates
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the merge produced no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw values of the first series over the aligned dates
    pub fn values_a(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value_a).collect()
    }

    /// Raw values of the second series over the aligned dates
    pub fn values_b(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value_b).collect()
    }

    /// Write the merged table as CSV for the presentation collaborator
    ///
    /// The header is the fixed `Date,Value_A,Value_B,Normalized_A,Normalized_B`
    /// contract regardless of asset labels.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(["Date", "Value_A", "Value_B", "Normalized_A", "Normalized_B"])?;
        for row in &self.rows {
            writer.write_record([
                row.date.to_string(),
                row.value_a.to_string(),
                row.value_b.to_string(),
                row.normalized_a.to_string(),
                row.normalized_b.to_string(),
            ])?;
        }
        writer.flush()?;

        Ok(())
    }
}

/// Full output of one comparator invocation
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// The aligned and normalized table
    pub merged: MergedForecast,
    /// Pearson correlation over the raw value columns
    pub correlation: f64,
    /// Qualitative label for the correlation
    pub classification: Classification,
}

impl ComparisonReport {
    /// Serialize the report as pretty JSON for a dashboard host
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Forecast comparison: {} vs {}",
            self.merged.label_a(),
            self.merged.label_b()
        )?;
        writeln!(f, "  Aligned dates: {}", self.merged.len())?;
        writeln!(f, "  Correlation:   {:.4}", self.correlation)?;
        writeln!(f, "  Relationship:  {}", self.classification)?;
        writeln!(f, "  {}", self.classification.summary())?;
        Ok(())
    }
}

/// Pure, deterministic comparator over two already-loaded forecast series
///
/// Stateless per invocation; a host may re-run it on every refresh without
/// any carryover between calls.
#[derive(Debug, Clone, Default)]
pub struct ForecastComparator {
    duplicate_policy: DuplicatePolicy,
}

impl ForecastComparator {
    /// Create a comparator with the default keep-last duplicate policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a comparator with an explicit duplicate policy
    pub fn with_duplicate_policy(policy: DuplicatePolicy) -> Self {
        Self {
            duplicate_policy: policy,
        }
    }

    /// Align two series on calendar date
    ///
    /// Timestamps are first stripped to a pure date, then inner-joined; the
    /// result is ascending by date. Zero overlap is
    /// [`CompareError::EmptyIntersection`], which hosts should report as
    /// "no overlapping dates" rather than crash on.
    pub fn align(
        &self,
        a: &ForecastSeries,
        b: &ForecastSeries,
    ) -> Result<Vec<(NaiveDate, f64, f64)>> {
        let by_date_a = self.collapse(a)?;
        let by_date_b = self.collapse(b)?;

        let rows: Vec<(NaiveDate, f64, f64)> = by_date_a
            .iter()
            .filter_map(|(date, value_a)| {
                by_date_b.get(date).map(|value_b| (*date, *value_a, *value_b))
            })
            .collect();

        if rows.is_empty() {
            return Err(CompareError::EmptyIntersection);
        }

        debug!(
            "aligned {} dates out of {} ({}) and {} ({})",
            rows.len(),
            a.len(),
            a.label(),
            b.len(),
            b.label()
        );

        Ok(rows)
    }

    /// Run the full align / normalize / correlate / classify pipeline
    pub fn compare(&self, a: &ForecastSeries, b: &ForecastSeries) -> Result<ComparisonReport> {
        let aligned = self.align(a, b)?;

        if aligned.len() < 2 {
            return Err(CompareError::InsufficientData(format!(
                "Only {} aligned date(s); correlation needs at least 2",
                aligned.len()
            )));
        }

        let values_a: Vec<f64> = aligned.iter().map(|(_, va, _)| *va).collect();
        let values_b: Vec<f64> = aligned.iter().map(|(_, _, vb)| *vb).collect();

        let normalized_a = normalize_data(&values_a)?;
        let normalized_b = normalize_data(&values_b)?;

        // Correlation is over the raw columns, not the rescaled ones
        let correlation = pearson_correlation(&values_a, &values_b)?;
        let classification = Classification::from_correlation(correlation);

        let rows = aligned
            .iter()
            .enumerate()
            .map(|(i, (date, value_a, value_b))| MergedRow {
                date: *date,
                value_a: *value_a,
                value_b: *value_b,
                normalized_a: normalized_a[i],
                normalized_b: normalized_b[i],
            })
            .collect();

        Ok(ComparisonReport {
            merged: MergedForecast {
                label_a: a.label().to_string(),
                label_b: b.label().to_string(),
                rows,
            },
            correlation,
            classification,
        })
    }

    /// Collapse a series to one value per calendar date
    fn collapse(&self, series: &ForecastSeries) -> Result<BTreeMap<NaiveDate, f64>> {
        let mut by_date = BTreeMap::new();

        for point in series.points() {
            let date = point.timestamp.date();
            let previous = by_date.insert(date, point.value);

            if previous.is_some() && self.duplicate_policy == DuplicatePolicy::Reject {
                return Err(CompareError::DuplicateDate(date));
            }
        }

        Ok(by_date)
    }
}
