//! Calibra Hardware Abstraction Layer
//!
//! This crate defines the small capability surface the Calibra drivers are
//! written against. A board support crate (or an adapter over an existing
//! I/O library) implements these traits; the drivers never touch hardware
//! registers themselves.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  calibra-drivers (pH, O2, L298, mic)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  calibra-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board support │       │ embedded-hal  │
//! │   (Platform)  │       │   adapters    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`analog::AnalogInput`] - ADC channel, normalized or raw counts
//! - [`pwm::PwmOutput`] - PWM channel with period, duty cycle and enable
//! - [`gpio::OutputPin`] - Digital output
//! - [`platform::Platform`] - Subsystem init and pin acquisition by number
//! - [`clock::Clock`] - Monotonic time source

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod analog;
pub mod clock;
pub mod eh;
pub mod gpio;
pub mod once;
pub mod platform;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use analog::AnalogInput;
pub use clock::Clock;
pub use gpio::OutputPin;
pub use once::InitOnce;
pub use platform::{HalError, PinId, Platform};
pub use pwm::PwmOutput;

#[cfg(feature = "std")]
pub use clock::StdClock;
