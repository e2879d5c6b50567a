//! Board-agnostic core types for the Calibra drivers
//!
//! This crate contains everything that does not depend on a concrete
//! driver or board:
//!
//! - Error taxonomy shared by all drivers
//! - Capability traits (sensor descriptors, pH/gas/voltage/audio readings,
//!   motor direction)
//! - Explicit registry of the sensor descriptors shipped with the drivers
//! - Calibration and motor configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod registry;
pub mod traits;
