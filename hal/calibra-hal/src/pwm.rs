//! PWM output abstractions

use crate::platform::HalError;

/// PWM channel bound to one pin
///
/// Dropping the value releases the pin.
pub trait PwmOutput {
    /// Set the PWM period in milliseconds
    ///
    /// Backends whose frequency is fixed by the timer setup return
    /// [`HalError::Unsupported`].
    fn set_period_ms(&mut self, ms: u32) -> Result<(), HalError>;

    /// Set the duty cycle as a fraction of the period (0.0 - 1.0)
    ///
    /// Values outside the range are clamped.
    fn set_duty_cycle(&mut self, fraction: f32);

    /// Enable or disable the output
    fn enable(&mut self, enabled: bool);
}
