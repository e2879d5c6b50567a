//! Host-side mocks of the HAL capability traits
//!
//! Each mock handle shares its state with a probe so tests can script
//! samples and observe pin levels after the handle has moved into a driver.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use calibra_hal::{AnalogInput, Clock, HalError, InitOnce, OutputPin, PinId, Platform, PwmOutput};
use embedded_hal::delay::DelayNs;

#[derive(Default)]
struct AnalogState {
    normalized: Cell<f32>,
    counts: Cell<i32>,
    reads: Cell<u32>,
    released: Cell<bool>,
}

/// Test-side view of a mock analog input
#[derive(Clone, Default)]
pub struct AnalogProbe {
    state: Rc<AnalogState>,
}

impl AnalogProbe {
    pub fn new(normalized: f32) -> Self {
        let probe = Self::default();
        probe.set_normalized(normalized);
        probe
    }

    pub fn input(&self) -> MockAnalog {
        MockAnalog {
            state: self.state.clone(),
        }
    }

    pub fn set_normalized(&self, value: f32) {
        self.state.normalized.set(value);
    }

    pub fn set_counts(&self, value: i32) {
        self.state.counts.set(value);
    }

    pub fn reads(&self) -> u32 {
        self.state.reads.get()
    }

    pub fn released(&self) -> bool {
        self.state.released.get()
    }
}

pub struct MockAnalog {
    state: Rc<AnalogState>,
}

impl AnalogInput for MockAnalog {
    fn read_normalized(&mut self) -> f32 {
        self.state.reads.set(self.state.reads.get() + 1);
        self.state.normalized.get()
    }

    fn read_counts(&mut self) -> i32 {
        self.state.reads.set(self.state.reads.get() + 1);
        self.state.counts.get()
    }
}

impl Drop for MockAnalog {
    fn drop(&mut self) {
        self.state.released.set(true);
    }
}

#[derive(Default)]
struct PinState {
    high: Cell<bool>,
    writes: Cell<u32>,
    released: Cell<bool>,
}

/// Test-side view of a mock output pin
#[derive(Clone, Default)]
pub struct PinProbe {
    state: Rc<PinState>,
}

impl PinProbe {
    pub fn pin(&self) -> MockPin {
        MockPin {
            state: self.state.clone(),
        }
    }

    pub fn is_high(&self) -> bool {
        self.state.high.get()
    }

    pub fn writes(&self) -> u32 {
        self.state.writes.get()
    }

    pub fn released(&self) -> bool {
        self.state.released.get()
    }
}

pub struct MockPin {
    state: Rc<PinState>,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.state.high.set(true);
        self.state.writes.set(self.state.writes.get() + 1);
    }

    fn set_low(&mut self) {
        self.state.high.set(false);
        self.state.writes.set(self.state.writes.get() + 1);
    }

    fn is_set_high(&self) -> bool {
        self.state.high.get()
    }
}

impl Drop for MockPin {
    fn drop(&mut self) {
        self.state.released.set(true);
    }
}

struct PwmState {
    period_ms: Cell<u32>,
    duty: Cell<f32>,
    enabled: Cell<bool>,
    period_supported: Cell<bool>,
    released: Cell<bool>,
}

impl Default for PwmState {
    fn default() -> Self {
        Self {
            period_ms: Cell::new(0),
            duty: Cell::new(0.0),
            enabled: Cell::new(false),
            period_supported: Cell::new(true),
            released: Cell::new(false),
        }
    }
}

/// Test-side view of a mock PWM channel
#[derive(Clone, Default)]
pub struct PwmProbe {
    state: Rc<PwmState>,
}

impl PwmProbe {
    /// Channel whose backend cannot change the period
    pub fn fixed_period() -> Self {
        let probe = Self::default();
        probe.state.period_supported.set(false);
        probe
    }

    pub fn pwm(&self) -> MockPwm {
        MockPwm {
            state: self.state.clone(),
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.state.period_ms.get()
    }

    pub fn duty(&self) -> f32 {
        self.state.duty.get()
    }

    pub fn enabled(&self) -> bool {
        self.state.enabled.get()
    }

    pub fn released(&self) -> bool {
        self.state.released.get()
    }
}

pub struct MockPwm {
    state: Rc<PwmState>,
}

impl PwmOutput for MockPwm {
    fn set_period_ms(&mut self, ms: u32) -> Result<(), HalError> {
        if !self.state.period_supported.get() {
            return Err(HalError::Unsupported);
        }
        self.state.period_ms.set(ms);
        Ok(())
    }

    fn set_duty_cycle(&mut self, fraction: f32) {
        self.state.duty.set(fraction.clamp(0.0, 1.0));
    }

    fn enable(&mut self, enabled: bool) {
        self.state.enabled.set(enabled);
    }
}

impl Drop for MockPwm {
    fn drop(&mut self) {
        self.state.released.set(true);
    }
}

/// Simulated time shared by [`MockDelay`] and [`MockClock`]
#[derive(Clone, Default)]
pub struct SimTime {
    now_ns: Rc<Cell<u64>>,
    delayed_ns: Rc<Cell<u64>>,
}

impl SimTime {
    pub fn delay(&self) -> MockDelay {
        MockDelay { time: self.clone() }
    }

    pub fn clock(&self) -> MockClock {
        MockClock { time: self.clone() }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ns.set(self.now_ns.get() + ms * 1_000_000);
    }

    /// Total time spent blocked in `MockDelay`
    pub fn delayed_us(&self) -> u64 {
        self.delayed_ns.get() / 1000
    }
}

pub struct MockDelay {
    time: SimTime,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let ns = u64::from(ns);
        self.time.now_ns.set(self.time.now_ns.get() + ns);
        self.time.delayed_ns.set(self.time.delayed_ns.get() + ns);
    }
}

pub struct MockClock {
    time: SimTime,
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.time.now_ns.get() / 1000
    }
}

/// Mock I/O subsystem handing out probe-backed pins
#[derive(Default)]
pub struct MockPlatform {
    once: InitOnce,
    init_fails: Cell<bool>,
    init_calls: Cell<u32>,
    busy: RefCell<Vec<PinId>>,
    analog: RefCell<HashMap<PinId, AnalogProbe>>,
    outputs: RefCell<HashMap<PinId, PinProbe>>,
    pwm: RefCell<HashMap<PinId, PwmProbe>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform whose subsystem init always fails
    pub fn broken() -> Self {
        let platform = Self::default();
        platform.init_fails.set(true);
        platform
    }

    /// Make `pin` unavailable for acquisition
    pub fn mark_busy(&self, pin: PinId) {
        self.busy.borrow_mut().push(pin);
    }

    pub fn init_calls(&self) -> u32 {
        self.init_calls.get()
    }

    pub fn analog_probe(&self, pin: PinId) -> AnalogProbe {
        self.analog.borrow_mut().entry(pin).or_default().clone()
    }

    pub fn output_probe(&self, pin: PinId) -> PinProbe {
        self.outputs.borrow_mut().entry(pin).or_default().clone()
    }

    pub fn pwm_probe(&self, pin: PinId) -> PwmProbe {
        self.pwm.borrow_mut().entry(pin).or_default().clone()
    }

    fn check(&self, pin: PinId) -> Result<(), HalError> {
        if self.busy.borrow().contains(&pin) {
            Err(HalError::PinUnavailable(pin))
        } else {
            Ok(())
        }
    }
}

impl Platform for MockPlatform {
    type Analog = MockAnalog;
    type Pwm = MockPwm;
    type Output = MockPin;

    fn initialize(&self) -> Result<(), HalError> {
        self.once.call(|| {
            self.init_calls.set(self.init_calls.get() + 1);
            if self.init_fails.get() {
                Err(HalError::InitFailed)
            } else {
                Ok(())
            }
        })
    }

    fn analog(&self, pin: PinId) -> Result<MockAnalog, HalError> {
        self.check(pin)?;
        Ok(self.analog_probe(pin).input())
    }

    fn pwm(&self, pin: PinId) -> Result<MockPwm, HalError> {
        self.check(pin)?;
        Ok(self.pwm_probe(pin).pwm())
    }

    fn output(&self, pin: PinId) -> Result<MockPin, HalError> {
        self.check(pin)?;
        Ok(self.output_probe(pin).pin())
    }
}
