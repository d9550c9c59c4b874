//! `analyze` and `config` command handlers.
//!
//! Settings resolve in three layers: built-in defaults, then the YAML file
//! (`--settings` or `MEDREACH_SETTINGS_PATH`), then individual flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use medreach_core::{AnalysisSettings, AppConfig};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Cleaned facility dataset (defaults to `MEDREACH_FACILITIES_PATH`)
    #[arg(long)]
    pub facilities: Option<PathBuf>,
    /// Output directory (defaults to `MEDREACH_OUTPUT_DIR`)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// YAML settings file (defaults to `MEDREACH_SETTINGS_PATH`)
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Grid side length
    #[arg(long)]
    pub resolution: Option<usize>,
    /// Bounding box padding in degrees
    #[arg(long)]
    pub padding: Option<f64>,
    /// Category to evaluate; repeat to evaluate several (replaces the configured list)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Coverage threshold in km; repeat for several (replaces the configured list)
    #[arg(long = "threshold")]
    pub thresholds: Vec<f64>,
    /// Distance beyond which a grid point counts as underserved
    #[arg(long)]
    pub underserved_km: Option<f64>,
    /// Number of underserved points to print
    #[arg(long)]
    pub top: Option<usize>,
    /// Print the report without writing output files
    #[arg(long)]
    pub dry_run: bool,
}

/// Merge defaults, the settings file and command-line overrides.
///
/// # Errors
///
/// Returns an error if the settings file cannot be loaded or the merged
/// settings fail validation.
pub(crate) fn resolve_settings(
    config: &AppConfig,
    args: &AnalyzeArgs,
) -> anyhow::Result<AnalysisSettings> {
    let settings_path = args.settings.as_ref().or(config.settings_path.as_ref());
    let mut settings = match settings_path {
        Some(path) => medreach_core::load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => AnalysisSettings::default(),
    };

    if let Some(resolution) = args.resolution {
        settings.grid_resolution = resolution;
    }
    if let Some(padding) = args.padding {
        settings.padding_degrees = padding;
    }
    if !args.categories.is_empty() {
        settings.categories.clone_from(&args.categories);
    }
    if !args.thresholds.is_empty() {
        settings.coverage_thresholds_km.clone_from(&args.thresholds);
    }
    if let Some(km) = args.underserved_km {
        settings.underserved_threshold_km = km;
    }
    if let Some(top) = args.top {
        settings.underserved_report_limit = top;
    }

    settings.validate()?;
    Ok(settings)
}

/// Run the accessibility analysis end to end.
///
/// # Errors
///
/// Returns an error if the settings or dataset cannot be loaded, the
/// analysis hits a structural failure, or the output files cannot be
/// written. Empty category subsets are reported, not propagated.
pub(crate) fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(config, args)?;
    let facilities_path = args
        .facilities
        .clone()
        .unwrap_or_else(|| config.facilities_path.clone());
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.output_dir.clone());

    let facilities = medreach_core::load_facilities(&facilities_path)
        .with_context(|| format!("failed to load facilities from {}", facilities_path.display()))?;
    if facilities.is_empty() {
        anyhow::bail!(
            "no usable facilities in {}; run `medreach clean` first",
            facilities_path.display()
        );
    }
    tracing::info!(
        path = %facilities_path.display(),
        facilities = facilities.len(),
        "facility dataset loaded"
    );

    let report = medreach_grid::run_analysis(&facilities, &settings)?;

    crate::output::print_report(&report);

    if args.dry_run {
        println!("dry-run: skipping output files in {}", out_dir.display());
        return Ok(());
    }

    let written = crate::output::write_outputs(&report, &out_dir)?;
    for path in &written {
        println!("wrote {}", path.display());
    }

    Ok(())
}

/// Print the resolved configuration and the effective analysis settings.
///
/// # Errors
///
/// Returns an error if the configured settings file cannot be loaded.
pub(crate) fn run_show_config(config: &AppConfig) -> anyhow::Result<()> {
    let settings = match &config.settings_path {
        Some(path) => medreach_core::load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => AnalysisSettings::default(),
    };

    println!("environment:      {}", config.env);
    println!("log level:        {}", config.log_level);
    println!("facilities:       {}", config.facilities_path.display());
    println!("output directory: {}", config.output_dir.display());
    println!(
        "settings file:    {}",
        config
            .settings_path
            .as_ref()
            .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
    );
    println!("{}", serde_json::to_string_pretty(&settings)?);

    Ok(())
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
