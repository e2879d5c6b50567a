//! DFRobot analog pH probe
//!
//! The probe amplifier outputs 0 V at pH 0 and `0.8 * Vref` at pH 14, so a
//! normalized sample is scaled by `1 / 0.8 = 1.25` and then by 14 to get pH.
//! Two-point calibration against buffer solutions is done by adjusting
//! `scale` and `offset`.

use calibra_core::config::{Calibration, ConfigError};
use calibra_core::registry;
use calibra_core::traits::{
    InitError, PhSensor, Sensor, SensorDescriptor, SensorError, VoltageSensor,
};
use calibra_hal::analog::READ_FAILED;
use calibra_hal::{AnalogInput, PinId, Platform};

use super::acquire_analog;

/// Normalized sample to pH: full scale is 0.8 of the reference
const PH_GAIN: f32 = 1.25 * 14.0;

/// DFRobot analog pH sensor
pub struct DfrPh<A> {
    adc: A,
    calibration: Calibration,
}

impl<A: AnalogInput> DfrPh<A> {
    /// Create a driver on an already acquired analog input
    ///
    /// Starts with a 5.0 V reference, no offset and unit scale.
    pub fn new(adc: A) -> Self {
        Self {
            adc,
            calibration: Calibration::new(),
        }
    }

    /// Initialize the I/O subsystem and acquire the analog input on `pin`
    pub fn init<P>(platform: &P, pin: PinId) -> Result<Self, InitError>
    where
        P: Platform<Analog = A>,
    {
        let adc = acquire_analog(platform, pin)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("DFRPH on analog pin {}", pin);
        Ok(Self::new(adc))
    }

    /// Set the ADC reference voltage
    pub fn set_reference(&mut self, volts: f32) {
        self.calibration.reference_v = volts;
    }

    /// Get the ADC reference voltage
    pub fn get_reference(&self) -> f32 {
        self.calibration.reference_v
    }

    /// Set the offset added to pH readings (in pH units)
    pub fn set_offset(&mut self, offset: f32) {
        self.calibration.offset = offset;
    }

    /// Get the pH offset
    pub fn get_offset(&self) -> f32 {
        self.calibration.offset
    }

    /// Set the multiplier applied to the normalized sample
    pub fn set_scale(&mut self, scale: f32) {
        self.calibration.scale = scale;
    }

    /// Get the sample multiplier
    pub fn get_scale(&self) -> f32 {
        self.calibration.scale
    }

    /// Current calibration
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Replace the calibration after validating it
    pub fn apply_calibration(&mut self, calibration: Calibration) -> Result<(), ConfigError> {
        calibration.validate()?;
        self.calibration = calibration;
        Ok(())
    }

    /// Read the probe output voltage
    ///
    /// Fails only on the ADC's `-1.0` failure sentinel.
    pub fn read_raw_voltage(&mut self) -> Result<f32, SensorError> {
        let sample = self.adc.read_normalized();
        if sample == READ_FAILED {
            #[cfg(feature = "defmt")]
            defmt::debug!("DFRPH voltage read failed");
            return Err(SensorError::OperationFailed);
        }

        Ok(sample * self.calibration.reference_v)
    }

    /// Read the calibrated pH value
    ///
    /// `pH = sample * scale * 17.5 + offset`. Fails on any negative sample.
    pub fn read_ph(&mut self) -> Result<f32, SensorError> {
        let sample = self.adc.read_normalized();
        if sample < 0.0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("DFRPH pH read failed ({})", sample);
            return Err(SensorError::OperationFailed);
        }

        Ok(self.calibration.apply(sample, PH_GAIN))
    }

    /// Release the analog input and destroy the driver
    pub fn close(self) {}

    /// Destroy the driver, returning the analog input
    pub fn release(self) -> A {
        self.adc
    }
}

impl<A> Sensor for DfrPh<A> {
    fn descriptor(&self) -> &'static SensorDescriptor {
        &registry::DFRPH
    }
}

impl<A: AnalogInput> PhSensor for DfrPh<A> {
    fn ph(&mut self) -> Result<f32, SensorError> {
        self.read_ph()
    }
}

impl<A: AnalogInput> VoltageSensor for DfrPh<A> {
    fn voltage(&mut self) -> Result<f32, SensorError> {
        self.read_raw_voltage()
    }
}
