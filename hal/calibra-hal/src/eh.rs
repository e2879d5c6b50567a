//! Adapters from `embedded-hal` 1.0 traits
//!
//! Lets any chip HAL that implements the ecosystem traits feed the Calibra
//! drivers without a dedicated [`Platform`](crate::Platform).
//!
//! ```ignore
//! let dir1 = EhOutput::new(Output::new(p.PIN_2, Level::Low));
//! let pwm = EhPwm::new(pwm_channel);
//! ```

use embedded_hal::digital::OutputPin as EhOutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::gpio::OutputPin;
use crate::platform::HalError;
use crate::pwm::PwmOutput;

/// [`OutputPin`] over an `embedded_hal::digital::OutputPin`
///
/// The logical state only changes when the underlying write succeeds.
pub struct EhOutput<T> {
    pin: T,
    high: bool,
}

impl<T: EhOutputPin> EhOutput<T> {
    /// Wrap a pin, driving it low
    ///
    /// A pin that cannot be driven low is reported as high.
    pub fn new(mut pin: T) -> Self {
        let high = pin.set_low().is_err();
        Self { pin, high }
    }

    /// Return the wrapped pin
    pub fn release(self) -> T {
        self.pin
    }
}

impl<T: EhOutputPin> OutputPin for EhOutput<T> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// [`PwmOutput`] over an `embedded_hal::pwm::SetDutyCycle` channel
///
/// `SetDutyCycle` has no enable or period control, so disabling holds the
/// channel fully off and re-enabling restores the last duty cycle. The
/// period is whatever the timer was configured with. Requested duty and
/// enable state are only recorded once the channel accepts the write.
pub struct EhPwm<T> {
    channel: T,
    fraction: f32,
    enabled: bool,
}

impl<T: SetDutyCycle> EhPwm<T> {
    /// Wrap a channel, starting disabled at 0% duty
    pub fn new(mut channel: T) -> Self {
        let _ = channel.set_duty_cycle_fully_off();
        Self {
            channel,
            fraction: 0.0,
            enabled: false,
        }
    }

    /// Return the wrapped channel
    pub fn release(self) -> T {
        self.channel
    }

    /// Last requested duty cycle fraction
    pub fn duty_cycle(&self) -> f32 {
        self.fraction
    }

    /// Whether the output is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn apply(&mut self, fraction: f32, enabled: bool) {
        let duty = if enabled {
            let max = self.channel.max_duty_cycle();
            (fraction * max as f32) as u16
        } else {
            0
        };
        if self.channel.set_duty_cycle(duty).is_ok() {
            self.fraction = fraction;
            self.enabled = enabled;
        }
    }
}

impl<T: SetDutyCycle> PwmOutput for EhPwm<T> {
    fn set_period_ms(&mut self, _ms: u32) -> Result<(), HalError> {
        Err(HalError::Unsupported)
    }

    fn set_duty_cycle(&mut self, fraction: f32) {
        self.apply(fraction.clamp(0.0, 1.0), self.enabled);
    }

    fn enable(&mut self, enabled: bool) {
        self.apply(self.fraction, enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind as DigitalErrorKind, ErrorType as DigitalErrorType};
    use embedded_hal::pwm::{ErrorKind as PwmErrorKind, ErrorType as PwmErrorType};

    #[derive(Default)]
    struct Pin {
        level: bool,
    }

    impl DigitalErrorType for Pin {
        type Error = Infallible;
    }

    impl EhOutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Channel {
        duty: u16,
    }

    impl PwmErrorType for Channel {
        type Error = Infallible;
    }

    impl SetDutyCycle for Channel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    /// Pin whose writes fail while `stuck` is set
    struct StuckPin {
        level: bool,
        stuck: bool,
    }

    impl DigitalErrorType for StuckPin {
        type Error = DigitalErrorKind;
    }

    impl EhOutputPin for StuckPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.stuck {
                return Err(DigitalErrorKind::Other);
            }
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.stuck {
                return Err(DigitalErrorKind::Other);
            }
            self.level = true;
            Ok(())
        }
    }

    /// Channel that rejects every duty write after construction
    #[derive(Default)]
    struct FaultyChannel {
        duty: u16,
        faulted: bool,
    }

    impl PwmErrorType for FaultyChannel {
        type Error = PwmErrorKind;
    }

    impl SetDutyCycle for FaultyChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.faulted {
                return Err(PwmErrorKind::Other);
            }
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_output_tracks_level() {
        let mut pin = EhOutput::new(Pin { level: true });
        assert!(pin.is_set_low());

        pin.set_high();
        assert!(pin.is_set_high());
        assert!(pin.release().level);
    }

    #[test]
    fn test_pwm_enable_gates_duty() {
        let mut pwm = EhPwm::new(Channel::default());

        pwm.set_duty_cycle(0.5);
        assert_eq!(pwm.channel.duty, 0);

        pwm.enable(true);
        assert_eq!(pwm.channel.duty, 500);

        pwm.set_duty_cycle(2.0);
        assert_eq!(pwm.channel.duty, 1000);
        assert_eq!(pwm.duty_cycle(), 1.0);

        pwm.enable(false);
        assert_eq!(pwm.release().duty, 0);
    }

    #[test]
    fn test_output_failed_write_keeps_state() {
        let mut pin = EhOutput::new(StuckPin {
            level: true,
            stuck: true,
        });
        assert!(pin.is_set_high());

        pin.set_low();
        assert!(pin.is_set_high());
        assert!(pin.release().level);

        let mut pin = EhOutput::new(StuckPin {
            level: true,
            stuck: false,
        });
        assert!(pin.is_set_low());
        pin.pin.stuck = true;
        pin.set_high();
        assert!(pin.is_set_low());
        assert!(!pin.release().level);
    }

    #[test]
    fn test_pwm_failed_write_keeps_state() {
        let mut pwm = EhPwm::new(FaultyChannel::default());
        pwm.set_duty_cycle(0.5);
        pwm.channel.faulted = true;

        pwm.enable(true);
        assert!(!pwm.is_enabled());

        pwm.set_duty_cycle(0.9);
        assert_eq!(pwm.duty_cycle(), 0.5);

        pwm.channel.faulted = false;
        pwm.enable(true);
        assert!(pwm.is_enabled());
        assert_eq!(pwm.release().duty, 500);
    }

    #[test]
    fn test_pwm_period_unsupported() {
        let mut pwm = EhPwm::new(Channel::default());
        assert_eq!(pwm.set_period_ms(4), Err(HalError::Unsupported));
    }
}
