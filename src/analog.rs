//! Analog input abstraction
//!
//! The estimator never talks to ADC registers itself. Boards implement
//! [`AnalogSource`] on top of whatever HAL they use and hand it over (by value
//! or as a `&mut` borrow) at construction.

/// A single-shot analog input.
///
/// Not every ADC can change its resolution at runtime. Sources that can
/// should return `true` from [`supports_runtime_resolution`] and apply the
/// requested bit count in [`set_resolution`]; everything else keeps the
/// defaults and the estimator skips the call.
///
/// [`supports_runtime_resolution`]: AnalogSource::supports_runtime_resolution
/// [`set_resolution`]: AnalogSource::set_resolution
pub trait AnalogSource {
    /// Identifier of the pin/channel to sample.
    type Channel: Copy;

    /// Read one raw sample from `channel`, in `[0, 2^bits - 1]`.
    fn read_raw(&mut self, channel: Self::Channel) -> u32;

    /// Whether [`AnalogSource::set_resolution`] has any effect on this source.
    fn supports_runtime_resolution(&self) -> bool {
        false
    }

    /// Configure the ADC resolution in bits.
    fn set_resolution(&mut self, _bits: u8) {}
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    type Channel = T::Channel;

    fn read_raw(&mut self, channel: Self::Channel) -> u32 {
        T::read_raw(self, channel)
    }

    fn supports_runtime_resolution(&self) -> bool {
        T::supports_runtime_resolution(self)
    }

    fn set_resolution(&mut self, bits: u8) {
        T::set_resolution(self, bits)
    }
}
