use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::divider::{DividerOrientation, MAX_ADC_BITS};
use crate::photocell::{PhotocellKind, PhotocellModel, PowerLaw};

/// ADC resolution used when none is configured
pub const DEFAULT_ADC_BITS: u8 = 10;

/// Construction-time settings for a [`LightDependentResistor`].
///
/// The analog channel is not part of the config: it is a board handle and is
/// passed next to the source at construction.
///
/// [`LightDependentResistor`]: crate::sensors::LightDependentResistor
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LdrConfig {
    /// Resistor paired with the photocell in the voltage divider, in ohms
    pub reference_resistance: f32,
    /// Preset photocell or explicit power-law parameters
    #[serde(default)]
    pub model: PhotocellModel,
    /// ADC resolution in bits
    #[serde(default = "default_adc_bits")]
    pub adc_bits: u8,
    /// Number of past lux values averaged by the smoothed reads (0 disables)
    #[serde(default)]
    pub smoothing_window: usize,
    #[serde(default)]
    pub divider_orientation: DividerOrientation,
}

fn default_adc_bits() -> u8 {
    DEFAULT_ADC_BITS
}

impl LdrConfig {
    /// Default photocell, 10-bit ADC, no smoothing, photocell on ground.
    pub fn new(reference_resistance: f32) -> Self {
        Self {
            reference_resistance,
            model: PhotocellModel::default(),
            adc_bits: DEFAULT_ADC_BITS,
            smoothing_window: 0,
            divider_orientation: DividerOrientation::default(),
        }
    }

    pub fn with_photocell(mut self, kind: PhotocellKind) -> Self {
        self.model = PhotocellModel::Preset(kind);
        self
    }

    pub fn with_power_law(mut self, coefficient: f32, exponent: f32) -> Self {
        self.model = PhotocellModel::Custom(PowerLaw::new(coefficient, exponent));
        self
    }

    pub fn with_adc_bits(mut self, adc_bits: u8) -> Self {
        self.adc_bits = adc_bits;
        self
    }

    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window;
        self
    }

    pub fn with_divider_orientation(mut self, orientation: DividerOrientation) -> Self {
        self.divider_orientation = orientation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.reference_resistance.is_finite() && self.reference_resistance > 0.0) {
            return Err(ConfigError::InvalidReferenceResistance {
                ohms: self.reference_resistance,
            });
        }

        let exponent = self.model.power_law().exponent;
        if !(exponent.is_finite() && exponent > 0.0) {
            return Err(ConfigError::InvalidExponent { exponent });
        }

        if self.adc_bits == 0 || self.adc_bits > MAX_ADC_BITS {
            return Err(ConfigError::InvalidAdcBits {
                bits: self.adc_bits,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("Reference resistance must be a positive number of ohms (got {ohms})")]
    InvalidReferenceResistance { ohms: f32 },

    #[error("Power-law exponent must be positive (got {exponent})")]
    InvalidExponent { exponent: f32 },

    #[error("ADC resolution must be between 1 and 16 bits (got {bits})")]
    InvalidAdcBits { bits: u8 },
}
