//! Sensor capability traits
//!
//! A driver advertises what it can measure by implementing [`Sensor`] plus
//! one capability trait per reading kind. Generic application code asks for
//! the capability it needs (`impl PhSensor`) instead of dispatching on a
//! runtime type tag.

use core::fmt;

use calibra_hal::{HalError, PinId};

/// Errors returned by sensor reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The converter returned an out-of-range sentinel
    OperationFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::OperationFailed => f.write_str("sensor read failed"),
        }
    }
}

/// Errors returned by driver constructors
///
/// No pin stays acquired when construction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// The I/O subsystem could not be initialized
    Subsystem,
    /// A pin could not be acquired
    PinUnavailable(PinId),
    /// The backend rejected part of the driver setup
    Unsupported,
    /// The driver configuration is invalid
    InvalidConfig,
}

impl From<HalError> for InitError {
    fn from(err: HalError) -> Self {
        match err {
            HalError::InitFailed => InitError::Subsystem,
            HalError::PinUnavailable(pin) => InitError::PinUnavailable(pin),
            HalError::Unsupported => InitError::Unsupported,
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Subsystem => f.write_str("I/O subsystem unavailable"),
            InitError::PinUnavailable(pin) => write!(f, "could not acquire pin {pin}"),
            InitError::Unsupported => f.write_str("setup not supported by backend"),
            InitError::InvalidConfig => f.write_str("invalid driver configuration"),
        }
    }
}

/// Bus or signal type a sensor is attached through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    /// ADC input
    Analog,
    /// Digital GPIO
    Gpio,
    /// PWM output
    Pwm,
}

/// Kind of quantity a sensor provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    /// Sound level
    Audio,
    /// Acidity (0-14 pH)
    Ph,
    /// Gas concentration (percent)
    Gas,
    /// Raw electrode/output voltage
    Voltage,
    /// Motor actuator
    Motor,
}

/// Static description of a sensor type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorDescriptor {
    /// Short name
    pub name: &'static str,
    /// Human readable description
    pub description: &'static str,
    /// How the device is attached
    pub protocols: &'static [Protocol],
    /// What the device measures or drives
    pub categories: &'static [Category],
}

impl SensorDescriptor {
    /// Check if the device belongs to `category`
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Check if the device is attached through `protocol`
    pub fn uses_protocol(&self, protocol: Protocol) -> bool {
        self.protocols.contains(&protocol)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorDescriptor {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str} ({=str})", self.name, self.description)
    }
}

/// Base trait for every driver
pub trait Sensor {
    /// Descriptor for this driver
    fn descriptor(&self) -> &'static SensorDescriptor;
}

/// Sensors that report pH
pub trait PhSensor: Sensor {
    /// Read the calibrated pH value
    fn ph(&mut self) -> Result<f32, SensorError>;
}

/// Sensors that report a gas concentration
pub trait GasSensor: Sensor {
    /// Read the calibrated concentration in percent
    fn concentration(&mut self) -> Result<f32, SensorError>;
}

/// Sensors that expose their raw output voltage
pub trait VoltageSensor: Sensor {
    /// Read the output voltage in volts
    fn voltage(&mut self) -> Result<f32, SensorError>;
}

/// Sensors that report a sound level
pub trait AudioSensor: Sensor {
    /// Read the current level in ADC counts
    fn audio_level(&mut self) -> Result<f32, SensorError>;
}
