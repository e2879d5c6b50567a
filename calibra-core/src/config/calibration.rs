//! Linear sensor calibration
//!
//! Every analog driver maps a normalized sample `r` to a physical value as
//! `r * scale * gain + offset`, where `gain` is fixed by the sensor and may
//! depend on the reference voltage. This type holds the user-adjustable part.
//!
//! With the `serde` feature the calibration can be stored with postcard,
//! e.g. in flash next to the rest of the application config.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default ADC reference voltage
pub const DEFAULT_REFERENCE_V: f32 = 5.0;

/// Errors from validating a calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reference voltage must be greater than zero
    InvalidReference,
    /// A value is NaN or infinite
    NonFinite,
    /// PWM period must be greater than zero
    InvalidPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReference => f.write_str("reference voltage must be > 0"),
            ConfigError::NonFinite => f.write_str("calibration value is not finite"),
            ConfigError::InvalidPeriod => f.write_str("PWM period must be > 0"),
        }
    }
}

/// User calibration of an analog sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Calibration {
    /// ADC reference voltage in volts
    pub reference_v: f32,
    /// Offset added after scaling, in output units
    pub offset: f32,
    /// Multiplier applied to the normalized sample
    pub scale: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}

impl Calibration {
    /// Factory calibration: 5.0 V reference, no offset, unit scale
    pub const fn new() -> Self {
        Self {
            reference_v: DEFAULT_REFERENCE_V,
            offset: 0.0,
            scale: 1.0,
        }
    }

    /// Check the values can be applied to a driver
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reference_v.is_finite() && self.offset.is_finite() && self.scale.is_finite()) {
            return Err(ConfigError::NonFinite);
        }
        if self.reference_v <= 0.0 {
            return Err(ConfigError::InvalidReference);
        }
        Ok(())
    }

    /// Apply scale, a sensor gain and offset to a normalized sample
    pub fn apply(&self, normalized: f32, gain: f32) -> f32 {
        normalized * self.scale * gain + self.offset
    }

    /// Serialize into `buf` with postcard, returning the used part
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize from postcard bytes
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
