//! Hardware driver implementations
//!
//! This crate provides concrete drivers on top of the `calibra-hal`
//! capability traits, implementing the interfaces in `calibra-core`:
//!
//! - Analog sensors: DFRobot pH probe, Grove O2 sensor, analog microphone
//! - Motor drivers: L298 dual H-bridge (one DC motor or one 4-wire stepper)
//!
//! Every driver owns its pins; dropping a driver releases them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod motor;
pub mod sensor;

#[cfg(test)]
pub(crate) mod mock;

pub use motor::L298;
pub use sensor::{DfrPh, GroveO2, Microphone};
