//! Squad Selector Service Library
//!
//! Wires the snapshot loader, score estimator and squad optimizer into one
//! pipeline, together with layered configuration and logging setup for the
//! `squad-selector` binary.

use anyhow::{Context, Result};
use std::path::Path;

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;

pub use config::{InputSettings, LoggingConfig, ServiceConfig};
pub use error::PipelineError;
pub use logging::initialize_logging;
pub use pipeline::SelectionPipeline;
pub use report::{ReportEntry, SquadReport};

/// Load configuration from an optional file and `SQUAD_` environment variables
pub fn load_configuration(path: Option<&Path>) -> Result<ServiceConfig> {
    config::load_config(path).context("Failed to load service configuration")
}
