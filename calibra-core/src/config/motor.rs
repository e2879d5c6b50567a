//! H-bridge configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::traits::MotorError;

/// PWM period used by DC mode unless configured otherwise (ms)
pub const DEFAULT_PWM_PERIOD_MS: u32 = 4;

/// DC mode setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct L298Config {
    /// PWM period in milliseconds
    pub pwm_period_ms: u32,
}

impl Default for L298Config {
    fn default() -> Self {
        Self {
            pwm_period_ms: DEFAULT_PWM_PERIOD_MS,
        }
    }
}

/// Stepper mode setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepperConfig {
    /// Full steps per mechanical revolution
    pub steps_per_revolution: u32,
    /// Initial speed in RPM (0 = leave unset)
    #[cfg_attr(feature = "serde", serde(default))]
    pub rpm: u32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            // 1.8° per step
            steps_per_revolution: 200,
            rpm: 0,
        }
    }
}

impl StepperConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), MotorError> {
        if self.steps_per_revolution == 0 {
            return Err(MotorError::InvalidConfig);
        }
        Ok(())
    }
}

impl L298Config {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pwm_period_ms == 0 {
            return Err(ConfigError::InvalidPeriod);
        }
        Ok(())
    }
}
