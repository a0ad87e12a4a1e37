//! Squad Selector
//!
//! Loads a player snapshot, projects scores, selects the optimal squad and
//! emits it as a JSON report.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use squad_selector_service::{initialize_logging, load_configuration, SelectionPipeline};

#[derive(Parser, Debug)]
#[command(name = "squad-selector", version, about = "Select an optimal fantasy squad from a player snapshot")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot JSON file
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Gameweek to anchor scoring at (defaults to the snapshot's)
    #[arg(short, long)]
    gameweek: Option<u32>,

    /// Budget override in currency units
    #[arg(long)]
    budget: Option<f64>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long)]
    log_format: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_configuration(args.config.as_deref())?;
    if let Some(snapshot) = args.snapshot {
        config.input.snapshot_path = snapshot;
    }
    if let Some(gameweek) = args.gameweek {
        config.input.gameweek = Some(gameweek);
    }
    if let Some(output) = args.output {
        config.input.output_path = Some(output);
    }
    if let Some(budget) = args.budget {
        config.optimizer.total_budget = budget;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    squad_selector_service::config::validate_config(&config)?;

    initialize_logging(&config.logging)?;
    info!("Starting Squad Selector v{}", env!("CARGO_PKG_VERSION"));

    let snapshot_path = config.input.snapshot_path.clone();
    let output_path = config.input.output_path.clone();
    let pipeline = SelectionPipeline::new(config);

    let report = pipeline
        .run_from_file(&snapshot_path)
        .with_context(|| format!("Selection failed for snapshot {:?}", snapshot_path))?;
    let json = report.to_json_pretty().context("Failed to serialize report")?;

    match output_path {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
            info!("Report written to {:?}", path);
        }
        None => println!("{json}"),
    }

    Ok(())
}
