//! Analog microphone
//!
//! Reports the raw ADC count of an electret microphone module. For sound
//! level detection the driver can fill a window of samples at a fixed
//! period, and [`ThresholdContext`] keeps a running average across windows.

use calibra_core::registry;
use calibra_core::traits::{AudioSensor, InitError, Sensor, SensorDescriptor, SensorError};
use calibra_hal::{AnalogInput, PinId, Platform};
use embedded_hal::delay::DelayNs;

use super::acquire_analog;

/// Running average of sampled windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdContext {
    /// Mean of the most recent window
    pub average_reading: u32,
    /// Running average over `averaged_over` windows
    pub running_average: u32,
    /// Smoothing length in windows (at least 1)
    pub averaged_over: u32,
}

impl ThresholdContext {
    /// Create a context averaging over `averaged_over` windows
    pub fn new(averaged_over: u32) -> Self {
        Self {
            average_reading: 0,
            running_average: 0,
            averaged_over: averaged_over.max(1),
        }
    }

    /// Fold a window into the running average
    ///
    /// Returns the running average if it exceeds `threshold`, otherwise 0.
    /// An empty window leaves the context untouched.
    pub fn update(&mut self, threshold: u32, samples: &[u16]) -> u32 {
        if samples.is_empty() {
            return 0;
        }

        let sum: u64 = samples.iter().map(|&s| u64::from(s)).sum();
        self.average_reading = (sum / samples.len() as u64) as u32;

        let n = u64::from(self.averaged_over.max(1));
        let weighted = (n - 1) * u64::from(self.running_average) + u64::from(self.average_reading);
        self.running_average = (weighted / n) as u32;

        if self.running_average > threshold {
            self.running_average
        } else {
            0
        }
    }
}

/// Analog microphone module
pub struct Microphone<A> {
    adc: A,
}

impl<A: AnalogInput> Microphone<A> {
    /// Create a driver on an already acquired analog input
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Initialize the I/O subsystem and acquire the analog input on `pin`
    pub fn init<P>(platform: &P, pin: PinId) -> Result<Self, InitError>
    where
        P: Platform<Analog = A>,
    {
        Ok(Self::new(acquire_analog(platform, pin)?))
    }

    /// Read the current level in ADC counts
    pub fn read_value(&mut self) -> Result<f32, SensorError> {
        let counts = self.adc.read_counts();
        if counts < 0 {
            return Err(SensorError::OperationFailed);
        }
        Ok(counts as f32)
    }

    /// Fill `buf` with samples taken every `period_ms`
    ///
    /// Returns the number of samples taken (`buf.len()`), or 0 if the
    /// period or buffer is empty. Stops at the first failed read.
    pub fn sampled_window<D: DelayNs>(
        &mut self,
        delay: &mut D,
        period_ms: u32,
        buf: &mut [u16],
    ) -> Result<usize, SensorError> {
        if period_ms == 0 || buf.is_empty() {
            return Ok(0);
        }

        for slot in buf.iter_mut() {
            let counts = self.adc.read_counts();
            if counts < 0 {
                return Err(SensorError::OperationFailed);
            }
            *slot = counts.min(i32::from(u16::MAX)) as u16;
            delay.delay_ms(period_ms);
        }

        Ok(buf.len())
    }

    /// Release the analog input and destroy the driver
    pub fn close(self) {}

    /// Destroy the driver, returning the analog input
    pub fn release(self) -> A {
        self.adc
    }
}

impl<A> Sensor for Microphone<A> {
    fn descriptor(&self) -> &'static SensorDescriptor {
        &registry::MICROPHONE
    }
}

impl<A: AnalogInput> AudioSensor for Microphone<A> {
    fn audio_level(&mut self) -> Result<f32, SensorError> {
        self.read_value()
    }
}
