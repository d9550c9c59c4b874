mod analyze;
mod clean;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::analyze::AnalyzeArgs;

#[derive(Debug, Parser)]
#[command(name = "medreach")]
#[command(about = "Healthcare accessibility grid analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the grid analysis and write the grid and summary documents
    Analyze(AnalyzeArgs),
    /// Validate and deduplicate a raw facility export
    Clean {
        /// Raw facility JSON array
        #[arg(long)]
        input: PathBuf,
        /// Destination for the cleaned dataset
        #[arg(long)]
        output: PathBuf,
    },
    /// Print per-category facility counts
    Census {
        /// Cleaned facility dataset (defaults to `MEDREACH_FACILITIES_PATH`)
        #[arg(long)]
        facilities: Option<PathBuf>,
    },
    /// Print the resolved configuration and analysis settings
    Config,
}

fn main() -> anyhow::Result<()> {
    let config = medreach_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&config, &args)?,
        Some(Commands::Clean { input, output }) => clean::run_clean(&input, &output)?,
        Some(Commands::Census { facilities }) => {
            let path = facilities.unwrap_or_else(|| config.facilities_path.clone());
            clean::run_census(&path)?;
        }
        Some(Commands::Config) => analyze::run_show_config(&config)?,
        None => println!("medreach: run `medreach --help` for available commands"),
    }

    Ok(())
}
