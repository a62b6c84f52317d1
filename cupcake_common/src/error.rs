//! Validation error taxonomy.
//!
//! Every check in this crate runs at load time. Checks never stop at the
//! first failure: each one pushes into a `Vec<ValidationError>` and the
//! caller receives the full list as [`ValidationErrors`], so a single pass
//! surfaces every miscalibration before any servo moves.

use std::fmt;

use thiserror::Error;

use crate::servo::channel::ServoChannel;
use crate::servo::timing::TimingField;

/// Why a channel's calibration triple was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationFault {
    /// `min` is below the lower travel bound.
    BelowTravel { min: u8, bound: u8 },
    /// `max` is above the upper travel bound.
    AboveTravel { max: u8, bound: u8 },
    /// `min` is greater than `max`.
    Inverted { min: u8, max: u8 },
    /// `neutral` lies outside `[min, max]`.
    NeutralOutOfRange { min: u8, neutral: u8, max: u8 },
}

impl fmt::Display for CalibrationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowTravel { min, bound } => {
                write!(f, "min {min}° is below travel bound {bound}°")
            }
            Self::AboveTravel { max, bound } => {
                write!(f, "max {max}° is above travel bound {bound}°")
            }
            Self::Inverted { min, max } => write!(f, "min {min}° is greater than max {max}°"),
            Self::NeutralOutOfRange { min, neutral, max } => {
                write!(f, "neutral {neutral}° is outside [{min}°, {max}°]")
            }
        }
    }
}

/// A single rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Channel index outside the fixed enumeration.
    #[error("invalid channel index {index} (valid: 0..{count})", count = crate::consts::CHANNEL_COUNT)]
    InvalidChannel { index: usize },

    /// Ordering or range violation on a channel's triple.
    #[error("invalid calibration for {channel}: {reason}")]
    InvalidCalibration {
        channel: ServoChannel,
        reason: CalibrationFault,
    },

    /// Non-positive timing scalar.
    #[error("invalid timing value {name} = {value} (must be > 0)")]
    InvalidTimingValue { name: TimingField, value: i64 },

    /// Bus address outside the usable 7-bit range.
    #[error("invalid device address {address:#04x} (valid: 0x08..=0x77)")]
    InvalidAddress { address: u8 },

    /// Travel bound with `min >= max`.
    #[error("invalid travel range [{min}°, {max}°]")]
    InvalidTravelRange { min: u8, max: u8 },
}

/// Non-empty list of validation errors from one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// `Ok(())` when `errors` is empty, otherwise the collected list.
    pub fn check(errors: Vec<ValidationError>) -> Result<(), ValidationErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// Channels that carry at least one `InvalidCalibration` entry.
    pub fn miscalibrated_channels(&self) -> Vec<ServoChannel> {
        self.0
            .iter()
            .filter_map(|e| match e {
                ValidationError::InvalidCalibration { channel, .. } => Some(*channel),
                _ => None,
            })
            .collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s):", self.0.len())?;
        for e in &self.0 {
            write!(f, "\n  - {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
