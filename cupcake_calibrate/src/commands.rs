//! `check`, `show` and `init` subcommands.
//!
//! Each command returns its result instead of printing, so the binary
//! decides where output goes and tests can inspect it.

use std::path::{Path, PathBuf};

use cupcake_common::config::ConfigError;
use cupcake_common::servo::ServoConfig;
use thiserror::Error;
use tracing::info;

use crate::report::ConfigReport;

/// Error type for calibration tool commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Loading, validating or writing the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Refusing to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    /// JSON rendering failed.
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Load and validate `path`.
///
/// Errors are returned, not logged. The caller reports them once.
pub fn check(path: &Path) -> Result<ServoConfig, CommandError> {
    info!("Checking {}", path.display());
    let config = ServoConfig::load(path)?;
    info!("{}: configuration is valid", path.display());
    Ok(config)
}

/// Load `path` and render it.
pub fn show(path: &Path, format: OutputFormat) -> Result<String, CommandError> {
    let config = ServoConfig::load(path)?;
    let report = ConfigReport::new(&config);
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => Ok(report.to_json()?),
    }
}

/// Write the factory configuration to `path`.
pub fn init(path: &Path, force: bool) -> Result<(), CommandError> {
    if path.exists() && !force {
        return Err(CommandError::AlreadyExists(path.to_path_buf()));
    }
    ServoConfig::default().save(path)?;
    Ok(())
}
