//! 4-wire stepper mode
//!
//! Both bridges drive one bipolar stepper in full-step mode. Each step waits
//! the per-step delay derived from the RPM, moves the step counter one
//! position in the configured direction and energizes the phase pattern for
//! that position.

use calibra_core::config::StepperConfig;
use calibra_core::traits::{Direction, InitError, MotorError, MotorMode};
use calibra_hal::{Clock, OutputPin, PinId, Platform};
use embedded_hal::delay::DelayNs;

use super::{BridgeMode, L298};

/// Full-step phase pattern (IN1, IN2, IN3, IN4) indexed by step mod 4
const FULL_STEP: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// Microseconds per minute
const US_PER_MINUTE: u64 = 60_000_000;

/// Stepper mode pin set: enable plus four phase pins
pub struct Stepper<O, D> {
    enable: O,
    phases: [O; 4],
    delay: D,
    steps_per_revolution: u32,
    current_step: u32,
    step_delay_us: u32,
    direction: Direction,
    enabled: bool,
}

impl<O, D> BridgeMode for Stepper<O, D> {
    const MODE: MotorMode = MotorMode::Stepper;
}

impl<O: OutputPin, D: DelayNs, C: Clock> L298<Stepper<O, D>, C> {
    /// Create a stepper driver from acquired handles
    ///
    /// The driver starts disabled with all phases off, at step 0, stepping
    /// clockwise. If `config.rpm` is non-zero the speed is set from it.
    pub fn stepper(
        config: StepperConfig,
        enable: O,
        phases: [O; 4],
        delay: D,
        clock: C,
    ) -> Result<Self, InitError> {
        config.validate().map_err(|_| InitError::InvalidConfig)?;

        let mut stepper = Self::from_mode(
            Stepper {
                enable,
                phases,
                delay,
                steps_per_revolution: config.steps_per_revolution,
                current_step: 0,
                step_delay_us: 0,
                direction: Direction::Clockwise,
                enabled: false,
            },
            clock,
        );

        stepper.enable(false);
        for phase in stepper.mode.phases.iter_mut() {
            phase.set_low();
        }

        if config.rpm != 0 {
            stepper
                .set_speed(config.rpm)
                .map_err(|_| InitError::InvalidConfig)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "L298 stepper mode, {} steps/rev",
            config.steps_per_revolution
        );

        Ok(stepper)
    }

    /// Acquire the enable and phase pins from the platform
    pub fn stepper_from_pins<PL>(
        platform: &PL,
        config: StepperConfig,
        enable_pin: PinId,
        phase_pins: [PinId; 4],
        delay: D,
        clock: C,
    ) -> Result<Self, InitError>
    where
        PL: Platform<Output = O>,
    {
        config.validate().map_err(|_| InitError::InvalidConfig)?;
        platform.initialize()?;

        let enable = platform.output(enable_pin)?;
        let [i1, i2, i3, i4] = phase_pins;
        let phases = [
            platform.output(i1)?,
            platform.output(i2)?,
            platform.output(i3)?,
            platform.output(i4)?,
        ];

        Self::stepper(config, enable, phases, delay, clock)
    }

    /// Set the speed in RPM
    ///
    /// The per-step delay becomes `60 s / (rpm * steps_per_revolution)`.
    /// Zero RPM is rejected and leaves the current delay in place.
    pub fn set_speed(&mut self, rpm: u32) -> Result<(), MotorError> {
        if rpm == 0 {
            return Err(MotorError::InvalidSpeed);
        }

        let steps_per_minute = u64::from(self.mode.steps_per_revolution) * u64::from(rpm);
        let delay_us = US_PER_MINUTE / steps_per_minute;
        self.mode.step_delay_us = delay_us.min(u64::from(u32::MAX)) as u32;
        Ok(())
    }

    /// Set the step direction
    pub fn set_direction(&mut self, direction: Direction) {
        self.mode.direction = direction;
    }

    pub fn get_direction(&self) -> Direction {
        self.mode.direction
    }

    /// Drive the bridge enable pin
    pub fn enable(&mut self, enabled: bool) {
        self.mode.enable.set_state(enabled);
        self.mode.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.mode.enabled
    }

    /// Move `steps` full steps, blocking for the step delay before each
    pub fn step(&mut self, steps: u32) {
        for _ in 0..steps {
            self.mode.delay.delay_us(self.mode.step_delay_us);
            self.advance();
            self.energize();
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("L298 stepped {}, now at {}", steps, self.mode.current_step);
    }

    /// Position within the revolution, in `[0, steps_per_revolution)`
    pub fn current_step(&self) -> u32 {
        self.mode.current_step
    }

    /// Delay before each step in microseconds
    pub fn step_delay_us(&self) -> u32 {
        self.mode.step_delay_us
    }

    pub fn steps_per_revolution(&self) -> u32 {
        self.mode.steps_per_revolution
    }

    /// Destroy the driver, returning the enable pin, phase pins and delay
    pub fn release(self) -> (O, [O; 4], D) {
        (self.mode.enable, self.mode.phases, self.mode.delay)
    }

    fn advance(&mut self) {
        let spr = self.mode.steps_per_revolution;
        let current = self.mode.current_step;
        self.mode.current_step = match self.mode.direction {
            Direction::Clockwise => (current + 1) % spr,
            Direction::CounterClockwise => current.checked_sub(1).unwrap_or(spr - 1),
        };
    }

    fn energize(&mut self) {
        let pattern = FULL_STEP[(self.mode.current_step % 4) as usize];
        for (phase, &high) in self.mode.phases.iter_mut().zip(pattern.iter()) {
            phase.set_state(high);
        }
    }
}
