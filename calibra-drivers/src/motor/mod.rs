//! Motor driver implementations
//!
//! - L298 dual H-bridge: one PWM-controlled DC motor, or one 4-wire
//!   stepper driven through both bridges

pub mod l298;

pub use l298::{BridgeMode, Dc, L298, Stepper};
