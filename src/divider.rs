//! Voltage divider math
//!
//! ```text
//!  Ground:                     ^
//!             _____        ___/___
//!   VCC |----|_____|------|__/____|----| GND
//!             Reference      /
//!             resistor    Photocell
//!
//!  Supply:                     ^
//!             _____        ___/___
//!   GND |----|_____|------|__/____|----| VCC
//!             Reference      /
//!             resistor    Photocell
//! ```

use serde::{Deserialize, Serialize};

/// Which side of the divider the photocell sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DividerOrientation {
    /// Photocell between the signal node and ground
    #[default]
    Ground,
    /// Photocell between the supply and the signal node
    Supply,
}

impl DividerOrientation {
    pub const fn from_on_ground(on_ground: bool) -> Self {
        if on_ground { Self::Ground } else { Self::Supply }
    }

    pub const fn is_on_ground(self) -> bool {
        matches!(self, Self::Ground)
    }
}

/// Largest supported ADC resolution.
pub const MAX_ADC_BITS: u8 = 16;

/// `2^bits`, the number of distinct codes of an ADC.
///
/// Only `1..=MAX_ADC_BITS` is meaningful; 32 bits and up saturate at `u32::MAX`.
pub const fn max_count(adc_bits: u8) -> u32 {
    match 1u32.checked_shl(adc_bits as u32) {
        Some(count) => count,
        None => u32::MAX,
    }
}

/// A reading pinned to either end of the ADC range.
pub const fn is_rail_reading(raw: u32, adc_bits: u8) -> bool {
    raw == 0 || raw >= max_count(adc_bits)
}

/// `max_count / raw - 1` after applying the saturation guard.
///
/// A raw value equal to `2^bits` is pulled down by one count. A raw value of
/// zero is *not* guarded and yields an infinite ratio.
pub fn divider_ratio(raw: u32, adc_bits: u8) -> f32 {
    let max = max_count(adc_bits);
    let raw = if raw == max { raw - 1 } else { raw };
    max as f32 / raw as f32 - 1.0
}

/// Resistance of the photocell in ohms for a given divider ratio.
pub fn photocell_resistance(
    ratio: f32,
    reference_resistance: f32,
    orientation: DividerOrientation,
) -> f32 {
    match orientation {
        DividerOrientation::Ground => reference_resistance / ratio,
        DividerOrientation::Supply => reference_resistance * ratio,
    }
}
