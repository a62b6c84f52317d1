//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cupcake_common::config::{ConfigLoader, ConfigError};
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct MyToolConfig {
//!     port: u16,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = MyToolConfig::load(Path::new("tool.toml"))?;
//!     println!("Port: {}", config.port);
//!     Ok(())
//! }
//! ```

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::ValidationErrors;

/// Error type for configuration loading and saving.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Writing the configuration failed.
    #[error("Failed to write configuration: {0}")]
    WriteError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid or a
///   value does not fit its field
///
/// Semantic validation is the caller's job; see
/// [`ServoConfig::load`](crate::servo::ServoConfig::load).
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Serialize `value` as TOML and atomically replace `path` with it.
///
/// The content goes to a temporary file in the same directory, which is
/// then renamed over `path`. Readers see either the old file or the new one.
pub fn write_toml<T: serde::Serialize>(value: &T, path: &Path) -> Result<(), ConfigError> {
    let content =
        toml::to_string_pretty(value).map_err(|e| ConfigError::WriteError(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp =
        NamedTempFile::new_in(dir).map_err(|e| ConfigError::WriteError(e.to_string()))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| ConfigError::WriteError(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| ConfigError::WriteError(e.error.to_string()))?;
    Ok(())
}
