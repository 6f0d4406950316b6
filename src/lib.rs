//! # Forecast Compare
//!
//! A Rust library for comparing externally produced financial forecast
//! series across assets.
//!
//! ## Features
//!
//! - Forecast series ingestion from CSV (date + predicted value, extra
//!   uncertainty-bound columns ignored)
//! - Date alignment: calendar-date normalization and inner join of two
//!   series, with an explicit duplicate-date policy
//! - Min-max normalization of each value column onto [0, 1]
//! - Pearson correlation with a fixed strong-positive / strong-negative /
//!   weak classification
//! - Price-series preprocessing (forward fill, daily percentage change,
//!   rolling moving averages and volatility) feeding the forecasting stage
//!
//! Degenerate inputs (constant columns, fewer than two aligned dates, zero
//! date overlap) fail with explicit errors instead of propagating NaN.
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_compare::{ForecastComparator, ForecastSeries};
//!
//! # fn main() -> forecast_compare::Result<()> {
//! // Load forecasts produced by an external model
//! let dxy = ForecastSeries::from_csv("DXY", "processed_data/DXY_Forecast.csv")?;
//! let nifty = ForecastSeries::from_csv("Nifty 50", "processed_data/Nifty_Forecast.csv")?;
//!
//! // Align on date, normalize and correlate
//! let report = ForecastComparator::new().compare(&dxy, &nifty)?;
//!
//! println!("{}", report);
//! report.merged.write_csv("processed_data/merged_forecast.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod data;
pub mod error;
pub mod preprocess;
pub mod utils;

// Re-export commonly used types
pub use crate::compare::{
    Classification, ComparisonReport, DuplicatePolicy, ForecastComparator, MergedForecast,
    MergedRow,
};
pub use crate::data::{ForecastPoint, ForecastSeries};
pub use crate::error::{CompareError, Result};
pub use crate::preprocess::{preprocess, PreprocessConfig, PriceSeries, ProcessedSeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
