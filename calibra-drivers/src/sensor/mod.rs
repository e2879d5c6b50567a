//! Analog sensor drivers
//!
//! All three sensors sit on a single ADC pin and turn a normalized sample
//! into a physical value with a fixed gain plus a user [`Calibration`].
//!
//! [`Calibration`]: calibra_core::config::Calibration

pub mod mic;
pub mod oxygen;
pub mod ph;

pub use mic::Microphone;
pub use oxygen::GroveO2;
pub use ph::DfrPh;

use calibra_core::traits::InitError;
use calibra_hal::{PinId, Platform};

/// Bring up the subsystem and acquire an analog input on `pin`
pub(crate) fn acquire_analog<P: Platform>(
    platform: &P,
    pin: PinId,
) -> Result<P::Analog, InitError> {
    if let Err(_e) = platform.initialize() {
        #[cfg(feature = "defmt")]
        defmt::warn!("I/O subsystem init failed: {}", _e);
        return Err(InitError::Subsystem);
    }

    platform.analog(pin).map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("analog pin {} unavailable: {}", pin, e);
        InitError::from(e)
    })
}
