//! System-wide constants for the cupcake workspace.
//!
//! Single source of truth for channel counts, travel limits, bus address
//! bounds and the factory timing values.

use static_assertions::const_assert;

/// Number of servo channels driven by the PWM board.
pub const CHANNEL_COUNT: usize = 7;

/// Lowest angle a hobby servo can be commanded to [deg].
pub const TRAVEL_MIN_DEG: u8 = 0;

/// Highest angle a hobby servo can be commanded to [deg].
pub const TRAVEL_MAX_DEG: u8 = 180;

/// Factory PCA9685 bus address.
pub const DEFAULT_DEVICE_ADDRESS: u8 = 0x40;

/// Lowest non-reserved 7-bit I2C address.
pub const I2C_ADDRESS_MIN: u8 = 0x08;

/// Highest non-reserved 7-bit I2C address.
pub const I2C_ADDRESS_MAX: u8 = 0x77;

/// Time between idle movements [ms].
pub const IDLE_ANIMATION_INTERVAL_MS: i64 = 5000;

/// Time between eye blinks [ms].
pub const BLINK_INTERVAL_MS: i64 = 3000;

/// Jaw opening step delay [ms].
pub const JAW_OPEN_SPEED_MS: i64 = 15;

/// Jaw closing step delay [ms].
pub const JAW_CLOSE_SPEED_MS: i64 = 10;

/// Minimum delay between servo steps [ms].
pub const MAX_SERVO_SPEED_MS: i64 = 5;

/// Abort threshold for a single servo move [ms].
pub const SERVO_TIMEOUT_MS: i64 = 10_000;

/// Verbose diagnostics in the servo engine.
pub const DEBUG_MODE: bool = true;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/cupcake/servo.toml";

const_assert!(TRAVEL_MIN_DEG < TRAVEL_MAX_DEG);
const_assert!(I2C_ADDRESS_MIN <= DEFAULT_DEVICE_ADDRESS && DEFAULT_DEVICE_ADDRESS <= I2C_ADDRESS_MAX);
const_assert!(I2C_ADDRESS_MAX < 0x80);
