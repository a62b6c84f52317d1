//! Prelude module for common re-exports.
//!
//! ```rust
//! use cupcake_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader};
pub use crate::shared::{ReloadError, SharedServoConfig};

// ─── Data Contract ──────────────────────────────────────────────────
pub use crate::servo::{
    CalibrationTable, DeviceAddress, ServoCalibration, ServoChannel, ServoConfig, TimingConfig,
    TimingField, TravelRange,
};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{CalibrationFault, ValidationError, ValidationErrors};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{CHANNEL_COUNT, DEFAULT_CONFIG_PATH};
