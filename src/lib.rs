//! Illuminance from a light dependent resistor
//!
//! Reads a photocell wired in a voltage divider on one ADC channel, derives
//! its resistance, and maps it to lux (or foot-candles) through a power-law
//! model. Readings can optionally be smoothed with a fixed-window moving
//! average.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).
//!
//! ```ignore
//! use photocell_rs::{LdrConfig, LightDependentResistor, PhotocellKind};
//!
//! let config = LdrConfig::new(10_000.0)
//!     .with_photocell(PhotocellKind::Gl5528)
//!     .with_smoothing_window(10);
//! let mut ldr = LightDependentResistor::new(adc, channel, config)?;
//!
//! let lux = ldr.sample_smoothed_lux();
//! ```

#![no_std]

extern crate alloc;

pub mod analog;
pub mod config;
pub mod divider;
pub mod photocell;
pub mod sensors;
pub mod smoothing;
pub mod units;

pub use analog::AnalogSource;
pub use config::{ConfigError, LdrConfig};
pub use divider::DividerOrientation;
pub use photocell::{PhotocellKind, PhotocellModel, PowerLaw};
pub use sensors::{LdrReadings, LightDependentResistor, Sensor, SensorError, SensorReadings};
pub use smoothing::MovingAverage;
pub use units::{footcandles_to_lux, lux_to_footcandles};
