//! Compare two synthetic forecast series the way a dashboard host would:
//! align on date, normalize, correlate, and export the merged table.

use chrono::NaiveDate;
use forecast_compare::{ForecastComparator, ForecastSeries};

fn main() -> forecast_compare::Result<()> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    // A dollar-index style forecast drifting down...
    let dxy = ForecastSeries::from_dated_values(
        "DXY",
        (0..14)
            .map(|i| (start + chrono::Days::new(i), 106.0 - 0.2 * i as f64))
            .collect(),
    );

    // ...and an equity-index forecast climbing over a shifted date range
    let nifty = ForecastSeries::from_dated_values(
        "Nifty 50",
        (0..14)
            .map(|i| (start + chrono::Days::new(i + 3), 18400.0 + 30.0 * i as f64))
            .collect(),
    );

    let report = ForecastComparator::new().compare(&dxy, &nifty)?;
    print!("{}", report);

    println!("\nMerged table:");
    println!("{:<12} {:>10} {:>12} {:>8} {:>8}", "Date", "DXY", "Nifty", "norm_A", "norm_B");
    for row in report.merged.rows() {
        println!(
            "{:<12} {:>10.2} {:>12.2} {:>8.3} {:>8.3}",
            row.date, row.value_a, row.value_b, row.normalized_a, row.normalized_b
        );
    }

    let out = std::env::temp_dir().join("merged_forecast.csv");
    report.merged.write_csv(&out)?;
    println!("\nMerged forecast saved to {}", out.display());

    Ok(())
}
