//! Analog input abstractions
//!
//! An analog input is a pin read through an analog-to-digital converter.
//! Reads are infallible at the type level: like most ADC libraries the
//! backend reports a failed conversion by returning a negative sentinel
//! (typically `-1.0` / `-1`), and it is up to the driver to decide which
//! sentinel it treats as a failure.

/// Sentinel returned by [`AnalogInput::read_normalized`] on a failed read
pub const READ_FAILED: f32 = -1.0;

/// Sentinel returned by [`AnalogInput::read_counts`] on a failed read
pub const COUNTS_FAILED: i32 = -1;

/// ADC channel bound to one pin
///
/// Dropping the value releases the pin.
pub trait AnalogInput {
    /// Read the sample as a fraction of the reference voltage
    ///
    /// Returns a value in `[0.0, 1.0]`, or a negative value if the
    /// conversion failed.
    fn read_normalized(&mut self) -> f32;

    /// Read the raw converter count
    ///
    /// Returns a value in `[0, 2^resolution_bits)`, or a negative value if
    /// the conversion failed.
    fn read_counts(&mut self) -> i32;

    /// Converter resolution in bits
    fn resolution_bits(&self) -> u8 {
        10
    }

    /// Largest count the converter can return
    ///
    /// Saturates at `i32::MAX` for resolutions of 31 bits and above.
    fn max_counts(&self) -> i32 {
        1_i32
            .checked_shl(u32::from(self.resolution_bits()))
            .map_or(i32::MAX, |v| v.wrapping_sub(1))
    }
}

impl<A: AnalogInput + ?Sized> AnalogInput for &mut A {
    fn read_normalized(&mut self) -> f32 {
        (**self).read_normalized()
    }

    fn read_counts(&mut self) -> i32 {
        (**self).read_counts()
    }

    fn resolution_bits(&self) -> u8 {
        (**self).resolution_bits()
    }
}
