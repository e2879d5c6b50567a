//! Configuration types
//!
//! Calibration for the analog sensors and setup values for the H-bridge.

pub mod calibration;
pub mod motor;

pub use calibration::{Calibration, ConfigError};
pub use motor::{L298Config, StepperConfig, DEFAULT_PWM_PERIOD_MS};
