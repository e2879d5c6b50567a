//! Driver capability traits
//!
//! These traits define the interface between applications and the
//! concrete drivers in `calibra-drivers`.

pub mod motor;
pub mod sensor;

pub use motor::{BridgeDirection, Direction, MotorError, MotorMode};
pub use sensor::{
    AudioSensor, Category, GasSensor, InitError, PhSensor, Protocol, Sensor, SensorDescriptor,
    SensorError, VoltageSensor,
};
