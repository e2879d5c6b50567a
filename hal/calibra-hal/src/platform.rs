//! Platform: subsystem initialization and pin acquisition
//!
//! A platform hands out owned pin handles by board pin number. The drivers'
//! `init`-style constructors go through this trait; the `new`-style
//! constructors take handles the application acquired itself.

use core::fmt;

use crate::analog::AnalogInput;
use crate::gpio::OutputPin;
use crate::pwm::PwmOutput;

/// Board pin number
pub type PinId = u16;

/// Errors reported by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// The underlying I/O subsystem failed to initialize
    InitFailed,
    /// The pin does not exist, lacks the capability or is already in use
    PinUnavailable(PinId),
    /// The operation is not supported by this backend
    Unsupported,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::InitFailed => f.write_str("I/O subsystem initialization failed"),
            HalError::PinUnavailable(pin) => write!(f, "pin {pin} unavailable"),
            HalError::Unsupported => f.write_str("operation not supported"),
        }
    }
}

/// Board I/O subsystem
///
/// `initialize` must be idempotent: every driver constructor calls it, and
/// only the first successful call may do real work (see
/// [`InitOnce`](crate::InitOnce)).
pub trait Platform {
    /// Analog input handle
    type Analog: AnalogInput;
    /// PWM output handle
    type Pwm: PwmOutput;
    /// Digital output handle
    type Output: OutputPin;

    /// Bring up the I/O subsystem (idempotent)
    fn initialize(&self) -> Result<(), HalError>;

    /// Acquire an analog input on `pin`
    fn analog(&self, pin: PinId) -> Result<Self::Analog, HalError>;

    /// Acquire a PWM output on `pin`
    fn pwm(&self, pin: PinId) -> Result<Self::Pwm, HalError>;

    /// Acquire a digital output on `pin`
    fn output(&self, pin: PinId) -> Result<Self::Output, HalError>;
}
