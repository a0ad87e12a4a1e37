//! Service configuration management

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use score_estimator::EstimatorConfig;
use squad_optimizer::{OptimizerConfig, PoolFilter};

/// Environment variable prefix, e.g. `SQUAD_OPTIMIZER__TOTAL_BUDGET`
pub const ENV_PREFIX: &str = "SQUAD";

/// Main service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// ScoreEstimator configuration
    pub estimator: EstimatorConfig,

    /// Candidate eligibility thresholds
    pub pool: PoolFilter,

    /// SquadOptimizer configuration
    pub optimizer: OptimizerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Snapshot input and report output
    pub input: InputSettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    pub level: String,

    /// Log format (pretty, compact, json)
    pub format: String,
}

/// Where the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Snapshot JSON file
    pub snapshot_path: PathBuf,

    /// Gameweek override; the snapshot's current gameweek when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameweek: Option<u32>,

    /// Report destination; stdout when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { snapshot_path: PathBuf::from("./data/snapshot.json"), gameweek: None, output_path: None }
    }
}

/// Load configuration: defaults, then an optional TOML file, then environment
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        tracing::debug!("Loading configuration from file: {:?}", path);
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("building config")?;

    let config: ServiceConfig = settings.try_deserialize().context("deserializing config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    anyhow::ensure!(
        !config.input.snapshot_path.as_os_str().is_empty(),
        "input.snapshot_path must not be empty"
    );

    config.estimator.validate().context("invalid estimator configuration")?;
    config.optimizer.validate().context("invalid optimizer configuration")?;
    Ok(())
}

/// Save configuration to a TOML file
pub fn save_config(config: &ServiceConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write config: {:?}", path))?;
    Ok(())
}
