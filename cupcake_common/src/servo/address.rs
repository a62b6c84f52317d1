//! PWM driver bus address.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DEVICE_ADDRESS, I2C_ADDRESS_MAX, I2C_ADDRESS_MIN};
use crate::error::ValidationError;

/// 7-bit I2C address of the PWM driver.
///
/// Deserialises without checks; [`DeviceAddress::validate`] runs with the
/// rest of the configuration so every error is reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceAddress(u8);

impl Default for DeviceAddress {
    fn default() -> Self {
        Self(DEFAULT_DEVICE_ADDRESS)
    }
}

impl DeviceAddress {
    /// # Errors
    ///
    /// `ValidationError::InvalidAddress` outside `0x08..=0x77`.
    pub fn new(address: u8) -> Result<Self, ValidationError> {
        let addr = Self(address);
        addr.validate()?;
        Ok(addr)
    }

    /// Wrap a raw address without checking it; call [`validate`](Self::validate)
    /// before handing it to the bus driver.
    pub const fn from_raw_unchecked(address: u8) -> Self {
        Self(address)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        (I2C_ADDRESS_MIN..=I2C_ADDRESS_MAX).contains(&self.0)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_valid() {
            return Err(ValidationError::InvalidAddress { address: self.0 });
        }
        Ok(())
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = ValidationError;

    fn try_from(address: u8) -> Result<Self, Self::Error> {
        Self::new(address)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
