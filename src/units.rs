//! Illuminance unit conversion

/// One foot-candle expressed in lux
pub const LUX_PER_FOOTCANDLE: f32 = 10.764;

pub fn lux_to_footcandles(lux: f32) -> f32 {
    lux / LUX_PER_FOOTCANDLE
}

pub fn footcandles_to_lux(footcandles: f32) -> f32 {
    footcandles * LUX_PER_FOOTCANDLE
}
