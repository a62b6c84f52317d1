//! Animation timing and servo safety bounds.
//!
//! All values are milliseconds. They are stored signed so a persisted
//! `0` or negative value surfaces as `InvalidTimingValue` with the field
//! name instead of a generic parse failure.
//!
//! `max_servo_speed` and `servo_timeout` are contractual bounds for the
//! servo engine: it must never step faster than `max_servo_speed` and must
//! abort any move running longer than `servo_timeout`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BLINK_INTERVAL_MS, DEBUG_MODE, IDLE_ANIMATION_INTERVAL_MS, JAW_CLOSE_SPEED_MS,
    JAW_OPEN_SPEED_MS, MAX_SERVO_SPEED_MS, SERVO_TIMEOUT_MS,
};
use crate::error::{ValidationError, ValidationErrors};

/// Names of the timing values, as reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingField {
    IdleAnimationInterval,
    BlinkInterval,
    JawOpenSpeed,
    JawCloseSpeed,
    MaxServoSpeed,
    ServoTimeout,
}

impl TimingField {
    pub const ALL: [TimingField; 6] = [
        Self::IdleAnimationInterval,
        Self::BlinkInterval,
        Self::JawOpenSpeed,
        Self::JawCloseSpeed,
        Self::MaxServoSpeed,
        Self::ServoTimeout,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdleAnimationInterval => "IDLE_ANIMATION_INTERVAL",
            Self::BlinkInterval => "BLINK_INTERVAL",
            Self::JawOpenSpeed => "JAW_OPEN_SPEED",
            Self::JawCloseSpeed => "JAW_CLOSE_SPEED",
            Self::MaxServoSpeed => "MAX_SERVO_SPEED",
            Self::ServoTimeout => "SERVO_TIMEOUT",
        }
    }
}

impl fmt::Display for TimingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_idle_animation_interval() -> i64 {
    IDLE_ANIMATION_INTERVAL_MS
}
fn default_blink_interval() -> i64 {
    BLINK_INTERVAL_MS
}
fn default_jaw_open_speed() -> i64 {
    JAW_OPEN_SPEED_MS
}
fn default_jaw_close_speed() -> i64 {
    JAW_CLOSE_SPEED_MS
}
fn default_max_servo_speed() -> i64 {
    MAX_SERVO_SPEED_MS
}
fn default_servo_timeout() -> i64 {
    SERVO_TIMEOUT_MS
}
fn default_debug() -> bool {
    DEBUG_MODE
}

/// Timing and safety configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Time between idle movements [ms].
    #[serde(default = "default_idle_animation_interval")]
    pub idle_animation_interval: i64,

    /// Time between eye blinks [ms].
    #[serde(default = "default_blink_interval")]
    pub blink_interval: i64,

    /// Jaw opening step delay [ms].
    #[serde(default = "default_jaw_open_speed")]
    pub jaw_open_speed: i64,

    /// Jaw closing step delay [ms].
    #[serde(default = "default_jaw_close_speed")]
    pub jaw_close_speed: i64,

    /// Minimum delay between servo steps [ms].
    #[serde(default = "default_max_servo_speed")]
    pub max_servo_speed: i64,

    /// Servo movement timeout [ms].
    #[serde(default = "default_servo_timeout")]
    pub servo_timeout: i64,

    /// Verbose diagnostics in the servo engine.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            idle_animation_interval: IDLE_ANIMATION_INTERVAL_MS,
            blink_interval: BLINK_INTERVAL_MS,
            jaw_open_speed: JAW_OPEN_SPEED_MS,
            jaw_close_speed: JAW_CLOSE_SPEED_MS,
            max_servo_speed: MAX_SERVO_SPEED_MS,
            servo_timeout: SERVO_TIMEOUT_MS,
            debug: DEBUG_MODE,
        }
    }
}

impl TimingConfig {
    /// Raw value of a named field [ms].
    pub fn value(&self, field: TimingField) -> i64 {
        match field {
            TimingField::IdleAnimationInterval => self.idle_animation_interval,
            TimingField::BlinkInterval => self.blink_interval,
            TimingField::JawOpenSpeed => self.jaw_open_speed,
            TimingField::JawCloseSpeed => self.jaw_close_speed,
            TimingField::MaxServoSpeed => self.max_servo_speed,
            TimingField::ServoTimeout => self.servo_timeout,
        }
    }

    pub(crate) fn collect_errors(&self, errors: &mut Vec<ValidationError>) {
        for name in TimingField::ALL {
            let value = self.value(name);
            if value <= 0 {
                errors.push(ValidationError::InvalidTimingValue { name, value });
            }
        }
    }

    /// Validate that every value is strictly positive.
    ///
    /// # Errors
    ///
    /// One `InvalidTimingValue` per non-positive field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        ValidationErrors::check(errors)
    }

    /// Value of `field` as a `Duration`.
    ///
    /// # Errors
    ///
    /// `InvalidTimingValue` for a non-positive value. Never clamps.
    pub fn duration(&self, field: TimingField) -> Result<Duration, ValidationError> {
        let value = self.value(field);
        match u64::try_from(value) {
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(ValidationError::InvalidTimingValue { name: field, value }),
        }
    }

    pub fn idle_animation_interval(&self) -> Result<Duration, ValidationError> {
        self.duration(TimingField::IdleAnimationInterval)
    }

    pub fn blink_interval(&self) -> Result<Duration, ValidationError> {
        self.duration(TimingField::BlinkInterval)
    }

    pub fn jaw_open_step(&self) -> Result<Duration, ValidationError> {
        self.duration(TimingField::JawOpenSpeed)
    }

    pub fn jaw_close_step(&self) -> Result<Duration, ValidationError> {
        self.duration(TimingField::JawCloseSpeed)
    }

    /// Smallest step interval the engine may command.
    pub fn min_step_interval(&self) -> Result<Duration, ValidationError> {
        self.duration(TimingField::MaxServoSpeed)
    }

    /// Longest a single move may run before it is aborted.
    pub fn servo_timeout(&self) -> Result<Duration, ValidationError> {
        self.duration(TimingField::ServoTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let timing = TimingConfig::default();
        assert!(timing.validate().is_ok());
        assert_eq!(timing.idle_animation_interval(), Ok(Duration::from_millis(5000)));
        assert_eq!(timing.blink_interval(), Ok(Duration::from_millis(3000)));
        assert_eq!(timing.jaw_open_step(), Ok(Duration::from_millis(15)));
        assert_eq!(timing.jaw_close_step(), Ok(Duration::from_millis(10)));
        assert_eq!(timing.min_step_interval(), Ok(Duration::from_millis(5)));
        assert_eq!(timing.servo_timeout(), Ok(Duration::from_secs(10)));
        assert!(timing.debug);
    }

    #[test]
    fn zero_step_delay_is_rejected() {
        let timing = TimingConfig {
            max_servo_speed: 0,
            ..TimingConfig::default()
        };
        let errors = timing.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors.as_slice()[0] {
            ValidationError::InvalidTimingValue { name, value } => {
                assert_eq!(name.as_str(), "MAX_SERVO_SPEED");
                assert_eq!(*value, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn every_non_positive_field_is_reported() {
        let timing = TimingConfig {
            blink_interval: -1,
            jaw_close_speed: 0,
            servo_timeout: -10_000,
            ..TimingConfig::default()
        };
        let names: Vec<TimingField> = timing
            .validate()
            .unwrap_err()
            .into_iter()
            .filter_map(|e| match e {
                ValidationError::InvalidTimingValue { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                TimingField::BlinkInterval,
                TimingField::JawCloseSpeed,
                TimingField::ServoTimeout
            ]
        );
    }

    #[test]
    fn negative_value_parses_then_fails_validation() {
        let timing: TimingConfig = toml::from_str("jaw_open_speed = -5").unwrap();
        assert_eq!(timing.jaw_open_speed, -5);
        assert_eq!(timing.blink_interval, BLINK_INTERVAL_MS);
        assert!(timing.validate().is_err());
    }

    #[test]
    fn negative_step_delay_is_not_read_as_zero() {
        let timing: TimingConfig = toml::from_str("max_servo_speed = -5").unwrap();
        assert_eq!(
            timing.min_step_interval(),
            Err(ValidationError::InvalidTimingValue {
                name: TimingField::MaxServoSpeed,
                value: -5
            })
        );
    }

    #[test]
    fn zero_timeout_is_not_a_duration() {
        let timing = TimingConfig {
            servo_timeout: 0,
            ..TimingConfig::default()
        };
        assert!(timing.servo_timeout().is_err());
        assert_eq!(timing.blink_interval(), Ok(Duration::from_millis(3000)));
    }
}
