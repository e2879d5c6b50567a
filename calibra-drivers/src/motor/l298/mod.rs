//! L298 dual H-bridge motor driver
//!
//! The board can drive two DC motors (three pins each) or one 2-phase
//! stepper using both bridges (four phase pins plus enable). This driver
//! handles one DC motor or one stepper; the mode is fixed at construction
//! and encoded in the type:
//!
//! - [`L298<Dc<..>>`](Dc): PWM speed, three-state direction, output enable
//! - [`L298<Stepper<..>>`](Stepper): RPM, step direction, blocking `step(n)`
//!
//! Both modes carry a free-running millisecond clock for caller timing.
//!
//! # Usage
//!
//! ```ignore
//! let mut motor = L298::dc_from_pins(&platform, 3, 4, 7, clock)?;
//! motor.set_direction(BridgeDirection::Clockwise);
//! motor.set_speed(50);
//!
//! let mut stepper = L298::stepper_from_pins(&platform, config, 3, [4, 7, 8, 9], delay, clock)?;
//! stepper.enable(true);
//! stepper.set_speed(10)?; // RPM
//! stepper.step(100);
//! ```

mod dc;
mod stepper;

pub use dc::Dc;
pub use stepper::Stepper;

use calibra_core::registry;
use calibra_core::traits::{MotorMode, Sensor, SensorDescriptor};
use calibra_hal::Clock;

/// Pin set owned by an [`L298`] in one operating mode
pub trait BridgeMode {
    /// Mode flag for this pin set
    const MODE: MotorMode;
}

/// L298 dual H-bridge driver
///
/// Dropping the driver releases every pin of the active mode.
pub struct L298<M, C> {
    mode: M,
    clock: C,
    /// Clock reading at the last reset (µs)
    start_us: u64,
}

impl<M: BridgeMode, C: Clock> L298<M, C> {
    fn from_mode(mode: M, clock: C) -> Self {
        let start_us = clock.now_us();
        Self {
            mode,
            clock,
            start_us,
        }
    }

    /// Operating mode selected at construction
    pub fn mode(&self) -> MotorMode {
        M::MODE
    }

    /// Milliseconds since construction or the last [`reset_clock`](Self::reset_clock)
    pub fn get_elapsed_ms(&self) -> u64 {
        self.clock.now_us().saturating_sub(self.start_us) / 1000
    }

    /// Restart the elapsed-time counter
    pub fn reset_clock(&mut self) {
        self.start_us = self.clock.now_us();
    }

    /// Release all pins and destroy the driver
    pub fn close(self) {}
}

impl<M, C> Sensor for L298<M, C> {
    fn descriptor(&self) -> &'static SensorDescriptor {
        &registry::L298
    }
}
