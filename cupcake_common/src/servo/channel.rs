//! Servo channel identities.
//!
//! Channel order is the PWM output order on the driver board. The
//! discriminant is the output index, so `index()` is the slot the engine
//! writes to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::CHANNEL_COUNT;
use crate::error::ValidationError;

/// One physical servo output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServoChannel {
    /// Jaw (DS3225 high-torque servo).
    Jaw = 0,
    HeadPan = 1,
    HeadTilt = 2,
    EarLeft = 3,
    EarRight = 4,
    #[serde(rename = "extra_1")]
    Extra1 = 5,
    #[serde(rename = "extra_2")]
    Extra2 = 6,
}

impl ServoChannel {
    /// All channels in output order.
    pub const ALL: [ServoChannel; CHANNEL_COUNT] = [
        Self::Jaw,
        Self::HeadPan,
        Self::HeadTilt,
        Self::EarLeft,
        Self::EarRight,
        Self::Extra1,
        Self::Extra2,
    ];

    /// PWM output index (0-based).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a channel by raw output index.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidChannel` for `index >= CHANNEL_COUNT`.
    pub fn from_index(index: usize) -> Result<Self, ValidationError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ValidationError::InvalidChannel { index })
    }

    /// Configuration key (`jaw`, `head_pan`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jaw => "jaw",
            Self::HeadPan => "head_pan",
            Self::HeadTilt => "head_tilt",
            Self::EarLeft => "ear_left",
            Self::EarRight => "ear_right",
            Self::Extra1 => "extra_1",
            Self::Extra2 => "extra_2",
        }
    }
}

impl fmt::Display for ServoChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<usize> for ServoChannel {
    type Error = ValidationError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

impl From<ServoChannel> for usize {
    fn from(channel: ServoChannel) -> Self {
        channel.index()
    }
}

/// Error returned when parsing an unknown channel name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown servo channel '{0}'")]
pub struct UnknownChannel(pub String);

impl FromStr for ServoChannel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}
