//! Preprocess a synthetic daily price series: forward fill, daily change,
//! moving averages and rolling volatility.

use chrono::NaiveDate;
use forecast_compare::{preprocess, PreprocessConfig, PriceSeries};

fn main() -> forecast_compare::Result<()> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..45).map(|i| start + chrono::Days::new(i)).collect();

    // A gently oscillating close with a couple of missing sessions
    let close: Vec<Option<f64>> = (0..45)
        .map(|i| {
            if i == 10 || i == 11 {
                None
            } else {
                Some(104.0 + (i as f64 * 0.4).sin() * 2.0 + i as f64 * 0.05)
            }
        })
        .collect();

    let series = PriceSeries::new("DXY", dates, close)?;
    let processed = preprocess(&series, &PreprocessConfig::default())?;

    println!("Processed {} rows for {}", processed.len(), processed.label());
    println!(
        "{:<12} {:>8} {:>9} {:>8} {:>8} {:>10}",
        "Date", "Close", "Change%", "7d MA", "30d MA", "Volatility"
    );
    for i in (processed.len() - 5)..processed.len() {
        println!(
            "{:<12} {:>8.2} {:>9.3} {:>8.2} {:>8.2} {:>10.4}",
            processed.dates()[i],
            processed.close()[i],
            processed.daily_change_pct()[i].unwrap_or(f64::NAN),
            processed.short_ma()[i].unwrap_or(f64::NAN),
            processed.long_ma()[i].unwrap_or(f64::NAN),
            processed.volatility()[i].unwrap_or(f64::NAN),
        );
    }

    let out = std::env::temp_dir().join("dxy_processed.csv");
    processed.write_csv(&out)?;
    println!("\nProcessed series saved to {}", out.display());

    Ok(())
}
