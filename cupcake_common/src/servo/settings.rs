//! Complete servo configuration record.
//!
//! [`ServoConfig`] is built once at startup, validated, and passed by
//! reference to the servo engine. A config that fails validation is never
//! handed out: `load` and `save` both validate first and never clamp.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ConfigError, ConfigLoader, write_toml};
use crate::error::ValidationErrors;
use crate::servo::address::DeviceAddress;
use crate::servo::calibration::{CalibrationTable, ServoCalibration, TravelRange};
use crate::servo::channel::ServoChannel;
use crate::servo::timing::TimingConfig;

/// Bus address, travel bound, per-channel calibration and timing.
///
/// # TOML Example
///
/// ```toml
/// device_address = 0x40
///
/// [travel]
/// min = 0
/// max = 180
///
/// [calibration.jaw]
/// min = 60
/// neutral = 90
/// max = 120
///
/// [timing]
/// max_servo_speed = 5
/// servo_timeout = 10000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServoConfig {
    /// PWM driver bus address.
    #[serde(default)]
    pub device_address: DeviceAddress,

    /// Physical travel bound shared by all channels.
    #[serde(default)]
    pub travel: TravelRange,

    /// Per-channel limits.
    #[serde(default)]
    pub calibration: CalibrationTable,

    /// Animation timing and safety bounds.
    #[serde(default)]
    pub timing: TimingConfig,
}

impl ServoConfig {
    /// Calibration for one channel.
    pub fn channel(&self, channel: ServoChannel) -> ServoCalibration {
        self.calibration.get(channel)
    }

    /// Run every check and return all errors found.
    ///
    /// # Validation Rules
    /// 1. `device_address` within `0x08..=0x77`
    /// 2. `travel.min < travel.max`
    /// 3. Each channel: `travel.min <= min <= neutral <= max <= travel.max`
    /// 4. Each timing value `> 0`
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if let Err(e) = self.device_address.validate() {
            errors.push(e);
        }
        if let Err(e) = self.travel.validate() {
            errors.push(e);
        }
        self.calibration.collect_errors(&self.travel, &mut errors);
        self.timing.collect_errors(&mut errors);

        ValidationErrors::check(errors)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// - `ConfigError::FileNotFound` / `ConfigError::ParseError` from loading
    /// - `ConfigError::Validation` listing every rejected value
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading servo configuration from {}", path.display());
        let config = <Self as ConfigLoader>::load(path)?;
        config.validate()?;
        info!(
            "Servo configuration loaded: PWM driver at {}, {} channels",
            config.device_address,
            ServoChannel::ALL.len()
        );
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = <Self as ConfigLoader>::from_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    /// Validate, then write to `path`.
    ///
    /// # Errors
    ///
    /// `ConfigError::Validation` if the config is invalid (nothing is
    /// written), `ConfigError::WriteError` on serialization or I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        write_toml(self, path)?;
        info!("Servo configuration saved to {}", path.display());
        Ok(())
    }
}
