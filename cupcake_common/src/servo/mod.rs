//! Servo calibration data contract.
//!
//! - [`channel`] - Channel identities in PWM output order
//! - [`calibration`] - Per-channel `(min, neutral, max)` limits
//! - [`timing`] - Animation timing and safety bounds
//! - [`address`] - PWM driver bus address
//! - [`settings`] - The complete, validated [`ServoConfig`]

pub mod address;
pub mod calibration;
pub mod channel;
pub mod settings;
pub mod timing;

pub use address::DeviceAddress;
pub use calibration::{CalibrationTable, ServoCalibration, TravelRange};
pub use channel::ServoChannel;
pub use settings::ServoConfig;
pub use timing::{TimingConfig, TimingField};
