//! DC motor mode
//!
//! Speed is the PWM duty cycle on the bridge enable input; the two direction
//! inputs select which leg of the bridge conducts.

use calibra_core::config::L298Config;
use calibra_core::traits::{BridgeDirection, InitError, MotorError, MotorMode};
use calibra_hal::{Clock, HalError, OutputPin, PinId, Platform, PwmOutput};

use super::{BridgeMode, L298};

/// DC mode pin set: PWM plus two direction pins
pub struct Dc<P, O> {
    pwm: P,
    dir1: O,
    dir2: O,
    direction: BridgeDirection,
    speed: u8,
    enabled: bool,
}

impl<P, O> BridgeMode for Dc<P, O> {
    const MODE: MotorMode = MotorMode::Dc;
}

impl<P: PwmOutput, O: OutputPin, C: Clock> L298<Dc<P, O>, C> {
    /// Create a DC motor driver from acquired handles
    ///
    /// Sets the PWM period to 4 ms, both direction pins low, 0% duty, and
    /// enables the PWM output.
    pub fn dc(pwm: P, dir1: O, dir2: O, clock: C) -> Result<Self, InitError> {
        Self::dc_with_config(pwm, dir1, dir2, clock, L298Config::default())
    }

    /// Create a DC motor driver with a custom PWM period
    ///
    /// Backends with a fixed PWM frequency are accepted as is.
    pub fn dc_with_config(
        pwm: P,
        dir1: O,
        dir2: O,
        clock: C,
        config: L298Config,
    ) -> Result<Self, InitError> {
        Self::build(pwm, dir1, dir2, clock, config).map_err(|(e, _)| e)
    }

    /// Acquire the PWM pin and both direction pins from the platform
    pub fn dc_from_pins<PL>(
        platform: &PL,
        pwm_pin: PinId,
        dir1_pin: PinId,
        dir2_pin: PinId,
        clock: C,
    ) -> Result<Self, InitError>
    where
        PL: Platform<Pwm = P, Output = O>,
    {
        platform.initialize()?;
        let pwm = platform.pwm(pwm_pin)?;
        Self::dc_with_pwm(platform, pwm, dir1_pin, dir2_pin, clock).map_err(|(e, _)| e)
    }

    /// Use an existing PWM handle and acquire the direction pins
    ///
    /// On failure the PWM handle is handed back with the error.
    pub fn dc_with_pwm<PL>(
        platform: &PL,
        pwm: P,
        dir1_pin: PinId,
        dir2_pin: PinId,
        clock: C,
    ) -> Result<Self, (InitError, P)>
    where
        PL: Platform<Pwm = P, Output = O>,
    {
        if let Err(e) = platform.initialize() {
            return Err((e.into(), pwm));
        }
        let dir1 = match platform.output(dir1_pin) {
            Ok(pin) => pin,
            Err(e) => return Err((e.into(), pwm)),
        };
        let dir2 = match platform.output(dir2_pin) {
            Ok(pin) => pin,
            Err(e) => return Err((e.into(), pwm)),
        };

        Self::build(pwm, dir1, dir2, clock, L298Config::default())
            .map_err(|(e, (pwm, _, _))| (e, pwm))
    }

    /// Set up the bridge, handing the pins back if the backend refuses
    fn build(
        pwm: P,
        dir1: O,
        dir2: O,
        clock: C,
        config: L298Config,
    ) -> Result<Self, (InitError, (P, O, O))> {
        if config.validate().is_err() {
            return Err((InitError::InvalidConfig, (pwm, dir1, dir2)));
        }

        let mut motor = Self::from_mode(
            Dc {
                pwm,
                dir1,
                dir2,
                direction: BridgeDirection::None,
                speed: 0,
                enabled: false,
            },
            clock,
        );

        match motor.mode.pwm.set_period_ms(config.pwm_period_ms) {
            Ok(()) => {}
            Err(HalError::Unsupported) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("L298: PWM period fixed by backend");
            }
            Err(e) => return Err((e.into(), motor.release())),
        }

        motor.set_direction(BridgeDirection::None);
        motor.set_speed(0);
        motor.enable(true);

        #[cfg(feature = "defmt")]
        defmt::debug!("L298 DC mode, period {} ms", config.pwm_period_ms);

        Ok(motor)
    }

    /// Drive the direction pins
    ///
    /// `None` pulls both low, `Clockwise` sets pin 1 high and pin 2 low,
    /// `CounterClockwise` the reverse.
    pub fn set_direction(&mut self, direction: BridgeDirection) {
        let (level1, level2) = direction.pin_levels();
        self.mode.dir1.set_state(level1);
        self.mode.dir2.set_state(level2);
        self.mode.direction = direction;
    }

    pub fn get_direction(&self) -> BridgeDirection {
        self.mode.direction
    }

    /// Set speed as a percentage (0-100, clamped)
    pub fn set_speed(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.mode.pwm.set_duty_cycle(f32::from(percent) / 100.0);
        self.mode.speed = percent;
    }

    pub fn get_speed(&self) -> u8 {
        self.mode.speed
    }

    /// Enable or disable the PWM output
    pub fn enable(&mut self, enabled: bool) {
        self.mode.pwm.enable(enabled);
        self.mode.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.mode.enabled
    }

    /// Change the PWM period
    pub fn set_period_ms(&mut self, ms: u32) -> Result<(), MotorError> {
        if ms == 0 {
            return Err(MotorError::InvalidConfig);
        }
        self.mode
            .pwm
            .set_period_ms(ms)
            .map_err(|_| MotorError::Unsupported)
    }

    /// Destroy the driver, returning the PWM and direction handles
    pub fn release(self) -> (P, O, O) {
        (self.mode.pwm, self.mode.dir1, self.mode.dir2)
    }
}
