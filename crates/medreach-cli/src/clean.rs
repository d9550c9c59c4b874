//! `clean` and `census` command handlers.

use std::path::Path;

use anyhow::Context;
use medreach_core::{CleaningReport, FacilityCensus};

/// Clean a raw facility export and write the result as a JSON array.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the output
/// cannot be written.
pub(crate) fn run_clean(input: &Path, output: &Path) -> anyhow::Result<()> {
    let raw = medreach_core::read_raw_facilities(input)
        .with_context(|| format!("failed to read raw facilities from {}", input.display()))?;
    let (facilities, report) = medreach_core::clean_facilities(raw);

    crate::output::write_json(output, &facilities)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        kept = report.output_rows,
        "facility dataset cleaned"
    );

    print_cleaning_report(&report);
    println!("wrote {}", output.display());
    Ok(())
}

/// Print per-category counts for a cleaned dataset.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded.
pub(crate) fn run_census(path: &Path) -> anyhow::Result<()> {
    let facilities = medreach_core::load_facilities(path)
        .with_context(|| format!("failed to load facilities from {}", path.display()))?;

    if facilities.is_empty() {
        println!("no facilities in {}; run `medreach clean` first", path.display());
        return Ok(());
    }

    print_census(&medreach_core::census(&facilities));
    Ok(())
}

fn print_cleaning_report(report: &CleaningReport) {
    println!("input rows:           {}", report.input_rows);
    println!("invalid coordinates:  {}", report.invalid_coordinates);
    println!("duplicate positions:  {}", report.duplicate_positions);
    println!("duplicate ids:        {}", report.duplicate_ids);
    println!("unnamed (kept):       {}", report.unnamed);
    println!("output rows:          {}", report.output_rows);
}

pub(crate) fn print_census(census: &FacilityCensus) {
    println!("{:<28}{:>8}{:>9}", "CATEGORY", "COUNT", "SHARE");
    for entry in &census.categories {
        println!(
            "{:<28}{:>8}{:>8.1}%",
            entry.category, entry.count, entry.percent
        );
    }
    println!("{:<28}{:>8}", "TOTAL", census.total);
}
