mod ldr;

use thiserror_no_std::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The ADC returned a code at either end of its range, where the divider
    /// ratio (and therefore the lux value) is undefined.
    #[error("{sensor}: raw reading {raw} is at the ADC rails (max count {max_count})")]
    RailReading {
        sensor: &'static str,
        raw: u32,
        max_count: u32,
    },
}

/// Trait for sensor reading data structures.
/// Provides compile-time guarantees about the number of values and their conversion to arrays.
pub trait SensorReadings<const COUNT: usize> {
    /// Convert the readings into a fixed-size array.
    fn to_array(self) -> [i32; COUNT];
}

/// Trait for sensors that produce typed readings.
///
/// Reads are synchronous single shots taken on the caller's thread.
pub trait Sensor<const COUNT: usize> {
    /// The type of readings this sensor produces.
    type Readings: SensorReadings<COUNT>;

    /// Read the sensor and return typed readings.
    fn read(&mut self) -> Result<Self::Readings, SensorError>;
}

pub use ldr::{LdrReadings, LightDependentResistor};
