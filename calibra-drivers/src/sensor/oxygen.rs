//! Grove electrochemical oxygen sensor
//!
//! The sensor response is linear. Its op-amp (gain 121) runs from a 3.3 V
//! regulator and covers 0-25% oxygen, so a normalized sample maps to percent
//! through `25 * Vref / 3.3`.

use calibra_core::config::{Calibration, ConfigError};
use calibra_core::registry;
use calibra_core::traits::{
    GasSensor, InitError, Sensor, SensorDescriptor, SensorError, VoltageSensor,
};
use calibra_hal::{AnalogInput, PinId, Platform};

use super::acquire_analog;

/// Oxygen range covered by the amplifier output (percent)
const O2_RANGE_PERCENT: f32 = 25.0;

/// Sensor board supply rail (volts)
const O2_SUPPLY_V: f32 = 3.3;

/// Grove O2 sensor
pub struct GroveO2<A> {
    adc: A,
    calibration: Calibration,
}

impl<A: AnalogInput> GroveO2<A> {
    /// Create a driver on an already acquired analog input
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
        defmt::debug!("O2 on analog pin {}", pin);
        Ok(Self::new(adc))
    }

    pub fn set_reference(&mut self, volts: f32) {
        self.calibration.reference_v = volts;
    }

    pub fn get_reference(&self) -> f32 {
        self.calibration.reference_v
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.calibration.offset = offset;
    }

    pub fn get_offset(&self) -> f32 {
        self.calibration.offset
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.calibration.scale = scale;
    }

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

    /// Read the raw ADC count
    pub fn get_counts(&mut self) -> Result<i32, SensorError> {
        let counts = self.adc.read_counts();
        if counts < 0 {
            return Err(SensorError::OperationFailed);
        }
        Ok(counts)
    }

    /// Read the sensor output voltage
    pub fn read_raw_voltage(&mut self) -> Result<f32, SensorError> {
        let sample = self.read_normalized()?;
        Ok(sample * self.calibration.reference_v)
    }

    /// Read the calibrated oxygen concentration in percent
    pub fn read_value(&mut self) -> Result<f32, SensorError> {
        let sample = self.read_normalized()?;
        let gain = O2_RANGE_PERCENT * self.calibration.reference_v / O2_SUPPLY_V;
        Ok(self.calibration.apply(sample, gain))
    }

    /// Release the analog input and destroy the driver
    pub fn close(self) {}

    /// Destroy the driver, returning the analog input
    pub fn release(self) -> A {
        self.adc
    }

    fn read_normalized(&mut self) -> Result<f32, SensorError> {
        let sample = self.adc.read_normalized();
        if sample < 0.0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("O2 read failed ({})", sample);
            return Err(SensorError::OperationFailed);
        }
        Ok(sample)
    }
}

impl<A> Sensor for GroveO2<A> {
    fn descriptor(&self) -> &'static SensorDescriptor {
        &registry::O2
    }
}

impl<A: AnalogInput> GasSensor for GroveO2<A> {
    fn concentration(&mut self) -> Result<f32, SensorError> {
        self.read_value()
    }
}

impl<A: AnalogInput> VoltageSensor for GroveO2<A> {
    fn voltage(&mut self) -> Result<f32, SensorError> {
        self.read_raw_voltage()
    }
}
