//! Cupcake Common Library
//!
//! Servo calibration data contract for the cupcake animatronic: per-channel
//! angle limits, PWM driver bus address, animation timing and safety
//! bounds. The servo engine, I2C framing and hardware access live elsewhere;
//! this crate only defines, loads and validates the data they consume.
//!
//! # Module Structure
//!
//! - [`servo`] - Channel enumeration, calibration table, timing, address
//! - [`config`] - TOML loading trait and error type
//! - [`shared`] - Validated snapshot with runtime replacement
//! - [`error`] - Validation error taxonomy
//! - [`consts`] - Limits and factory defaults
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust,no_run
//! use cupcake_common::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ServoConfig::load(Path::new(DEFAULT_CONFIG_PATH))?;
//!     let jaw = config.channel(ServoChannel::Jaw);
//!     println!("jaw rests at {}°", jaw.neutral);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod prelude;
pub mod servo;
pub mod shared;
