//! Motor direction and error types
//!
//! A DC motor behind an H-bridge has three direction states (both legs
//! low, forward, reverse). A stepper only has a sign, so its API takes
//! [`Direction`] and cannot express "none".

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation
    #[default]
    Clockwise,
    /// Counter-clockwise rotation
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Step increment for this direction (+1 / -1)
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// H-bridge leg state for a DC motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BridgeDirection {
    /// Both direction pins low (motor coasts)
    #[default]
    None,
    /// Pin 1 high, pin 2 low
    Clockwise,
    /// Pin 1 low, pin 2 high
    CounterClockwise,
}

impl BridgeDirection {
    /// Levels for (direction pin 1, direction pin 2)
    pub fn pin_levels(self) -> (bool, bool) {
        match self {
            BridgeDirection::None => (false, false),
            BridgeDirection::Clockwise => (true, false),
            BridgeDirection::CounterClockwise => (false, true),
        }
    }
}

impl From<Direction> for BridgeDirection {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Clockwise => BridgeDirection::Clockwise,
            Direction::CounterClockwise => BridgeDirection::CounterClockwise,
        }
    }
}

/// Operating mode of a dual H-bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorMode {
    /// One DC motor on PWM + two direction pins
    Dc,
    /// One 4-wire stepper on both bridges
    Stepper,
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Invalid speed value (stepper RPM of zero)
    InvalidSpeed,
    /// Invalid configuration (zero steps per revolution)
    InvalidConfig,
    /// The PWM backend rejected the request
    Unsupported,
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::InvalidSpeed => f.write_str("invalid motor speed"),
            MotorError::InvalidConfig => f.write_str("invalid motor configuration"),
            MotorError::Unsupported => f.write_str("not supported by PWM backend"),
        }
    }
}
