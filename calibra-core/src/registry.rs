//! Explicit registry of the sensor descriptors shipped with the drivers
//!
//! Applications that discover devices at runtime look descriptors up here
//! instead of going through per-driver function tables.

use heapless::Vec;

use crate::traits::{Category, Protocol, SensorDescriptor};

/// DFRobot analog pH probe
pub const DFRPH: SensorDescriptor = SensorDescriptor {
    name: "DFRPH",
    description: "Analog pH Sensor",
    protocols: &[Protocol::Analog],
    categories: &[Category::Ph, Category::Voltage],
};

/// Grove O2 electrochemical oxygen sensor
pub const O2: SensorDescriptor = SensorDescriptor {
    name: "O2",
    description: "Oxygen Gas Sensor",
    protocols: &[Protocol::Analog],
    categories: &[Category::Gas, Category::Voltage],
};

/// Analog microphone
pub const MICROPHONE: SensorDescriptor = SensorDescriptor {
    name: "Microphone",
    description: "Analog Microphone",
    protocols: &[Protocol::Analog],
    categories: &[Category::Audio],
};

/// L298 dual H-bridge motor driver
pub const L298: SensorDescriptor = SensorDescriptor {
    name: "L298",
    description: "Dual H-bridge Motor Driver",
    protocols: &[Protocol::Gpio, Protocol::Pwm],
    categories: &[Category::Motor],
};

/// Every descriptor in the registry
pub const DESCRIPTORS: &[SensorDescriptor] = &[DFRPH, O2, MICROPHONE, L298];

/// Maximum number of descriptors a query can return
pub const MAX_DESCRIPTORS: usize = 8;

/// Look a descriptor up by name (case-insensitive)
pub fn find(name: &str) -> Option<&'static SensorDescriptor> {
    DESCRIPTORS
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(name))
}

/// All descriptors in `category`
pub fn by_category(category: Category) -> Vec<&'static SensorDescriptor, MAX_DESCRIPTORS> {
    DESCRIPTORS
        .iter()
        .filter(|d| d.has_category(category))
        .take(MAX_DESCRIPTORS)
        .collect()
}
