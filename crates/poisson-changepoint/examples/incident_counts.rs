//! Tracking the rate of daily incident counts
//!
//! Run with `RUST_LOG=poisson_changepoint=debug` to see the sweep progress.

use poisson_changepoint::{
    ConfigurableDetector, InformationCriterion, MultiStepPoissonDetector,
    PoissonSegmentationParameters,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Poisson Change-Point Tracking ===\n");

    // Four weeks of daily counts: quiet, an incident spike, then a new baseline
    let daily: Vec<u32> = vec![
        2, 1, 3, 2, 0, 2, 1, 3, 2, 1, //
        9, 11, 8, 12, 10, 9, 11, //
        4, 5, 3, 4, 6, 4, 5, 3, 4, 5, 4,
    ];

    // Example 1: default AIC selection
    println!("1. AIC selection");
    let detector = MultiStepPoissonDetector::new();
    let result = detector.detect_counts(&daily)?;
    println!("{result}");

    println!("  Candidate scores:");
    for candidate in result.candidates().iter().take(6) {
        println!("    {candidate}");
    }

    // Example 2: BIC with the full likelihood (including ln x! terms)
    println!("\n2. BIC selection, full log-likelihood");
    let params = PoissonSegmentationParameters::default()
        .with_criterion(InformationCriterion::Bic)
        .with_log_factorial(true);
    let detector = MultiStepPoissonDetector::with_parameters(params);
    let result = detector.detect_counts(&daily)?;
    println!("  Selected k = {}", result.selected_change_points());
    println!("  Log-likelihood = {:.4}", result.selected().log_likelihood);
    for change in result.changes() {
        println!("    {change}");
    }

    // Example 3: audit view of the DP table
    println!("\n3. DP audit (k = 1 row, last five prefixes)");
    let table = result.dp_table();
    if let Some(row) = table.likelihood_row(1) {
        for (t, value) in row.iter().enumerate().skip(table.columns() - 5) {
            println!(
                "    t={t:>2}  L={:>10.4}  split={:?}",
                value.unwrap_or(f64::NAN),
                table.split(1, t)
            );
        }
    }

    Ok(())
}
