//! Light dependent resistor (photocell) in a voltage divider
//!
//! Schematic with the default [`DividerOrientation::Ground`]:
//!
//! ```text
//!                              ^
//!             _____        ___/___
//!   VCC |----|_____|------|__/____|----| GND
//!             Reference  |   /
//!             resistor   |  Photocell
//!                        |
//!                     ADC channel
//! ```

use log::{debug, info, warn};

use super::{Sensor, SensorError, SensorReadings};
use crate::analog::AnalogSource;
use crate::config::{ConfigError, LdrConfig};
use crate::divider::{
    DividerOrientation, divider_ratio, is_rail_reading, max_count, photocell_resistance,
};
use crate::photocell::PowerLaw;
use crate::smoothing::MovingAverage;
use crate::units::lux_to_footcandles;

const SENSOR_NAME: &str = "LDR";

/// Typed readings from the photocell, in fixed-point milli-units.
///
/// An `i32` of milli-lux tops out at about 2.1 million lux. Brighter values
/// (a 16-bit ADC close to its low rail can report ~6e8 lux) saturate at
/// `i32::MAX`, and NaN becomes 0.
pub struct LdrReadings {
    pub milli_lux: i32,
    pub milli_footcandles: i32,
}

impl SensorReadings<2> for LdrReadings {
    fn to_array(self) -> [i32; 2] {
        [self.milli_lux, self.milli_footcandles]
    }
}

/// Illuminance estimator for a photocell read through an ADC.
///
/// Every read is a synchronous single shot on the caller's thread. The
/// smoothing buffer is sized once from [`LdrConfig::smoothing_window`].
pub struct LightDependentResistor<S: AnalogSource> {
    source: S,
    channel: S::Channel,
    reference_resistance: f32,
    law: PowerLaw,
    orientation: DividerOrientation,
    adc_bits: u8,
    smoothing: MovingAverage,
}

impl<S: AnalogSource> LightDependentResistor<S> {
    pub fn new(source: S, channel: S::Channel, config: LdrConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let law = config.model.power_law();
        info!(
            "LDR: {} Ω reference, I = {} / R^{}, {}-bit ADC, smoothing over {} samples",
            config.reference_resistance,
            law.coefficient,
            law.exponent,
            config.adc_bits,
            config.smoothing_window
        );

        Ok(Self {
            source,
            channel,
            reference_resistance: config.reference_resistance,
            law,
            orientation: config.divider_orientation,
            adc_bits: config.adc_bits,
            smoothing: MovingAverage::new(config.smoothing_window),
        })
    }

    /// Take one raw sample, configuring the resolution first where supported.
    fn acquire_raw(&mut self) -> u32 {
        if self.source.supports_runtime_resolution() {
            self.source.set_resolution(self.adc_bits);
        }
        self.source.read_raw(self.channel)
    }

    /// Convert a raw ADC code to lux with the current parameters.
    ///
    /// A code of `2^bits` is pulled down by one. A code of 0 is passed through:
    /// it gives `inf` lux with the photocell on ground and `0` lux on supply.
    pub fn lux_from_raw(&self, raw: u32) -> f32 {
        let ratio = divider_ratio(raw, self.adc_bits);
        let resistance = photocell_resistance(ratio, self.reference_resistance, self.orientation);
        let lux = self.law.lux(resistance);

        debug!(
            "LDR: raw={} ratio={} resistance={}Ω lux={}",
            raw, ratio, resistance, lux
        );

        lux
    }

    /// Read the photocell once and return the illuminance in lux.
    ///
    /// Never fails. Readings at the ADC rails produce meaningless values
    /// (`inf`, `0` or NaN); use [`try_sample_lux`](Self::try_sample_lux) to
    /// reject them instead.
    pub fn sample_lux(&mut self) -> f32 {
        let raw = self.acquire_raw();
        if raw == 0 {
            warn!("LDR: raw reading is 0, lux value is undefined");
        }
        self.lux_from_raw(raw)
    }

    /// Read the photocell once, rejecting readings at either ADC rail.
    pub fn try_sample_lux(&mut self) -> Result<f32, SensorError> {
        let raw = self.acquire_raw();
        if is_rail_reading(raw, self.adc_bits) {
            let max_count = max_count(self.adc_bits);
            warn!("LDR: rejected rail reading {} (max count {})", raw, max_count);
            return Err(SensorError::RailReading {
                sensor: SENSOR_NAME,
                raw,
                max_count,
            });
        }
        Ok(self.lux_from_raw(raw))
    }

    pub fn sample_footcandles(&mut self) -> f32 {
        lux_to_footcandles(self.sample_lux())
    }

    /// Read the photocell and return the moving average of the last readings.
    ///
    /// Identical to [`sample_lux`](Self::sample_lux) when smoothing is
    /// disabled. Rail readings are averaged in like any other value.
    pub fn sample_smoothed_lux(&mut self) -> f32 {
        let lux = self.sample_lux();
        self.smoothing.push(lux)
    }

    /// Like [`sample_smoothed_lux`](Self::sample_smoothed_lux), but a rail
    /// reading is returned as an error and kept out of the average.
    pub fn try_sample_smoothed_lux(&mut self) -> Result<f32, SensorError> {
        let lux = self.try_sample_lux()?;
        Ok(self.smoothing.push(lux))
    }

    pub fn sample_smoothed_footcandles(&mut self) -> f32 {
        lux_to_footcandles(self.sample_smoothed_lux())
    }

    /// Replace the power-law parameters. Not validated.
    pub fn update_photocell_parameters(&mut self, coefficient: f32, exponent: f32) {
        self.law = PowerLaw::new(coefficient, exponent);
    }

    pub fn power_law(&self) -> PowerLaw {
        self.law
    }

    pub fn set_divider_orientation(&mut self, orientation: DividerOrientation) {
        self.orientation = orientation;
    }

    /// `true` if the photocell is wired to ground, `false` if to the supply.
    pub fn set_photocell_on_ground(&mut self, on_ground: bool) {
        self.orientation = DividerOrientation::from_on_ground(on_ground);
    }

    pub fn divider_orientation(&self) -> DividerOrientation {
        self.orientation
    }

    pub fn reference_resistance(&self) -> f32 {
        self.reference_resistance
    }

    pub fn adc_bits(&self) -> u8 {
        self.adc_bits
    }

    pub fn channel(&self) -> S::Channel {
        self.channel
    }

    pub fn smoothing(&self) -> &MovingAverage {
        &self.smoothing
    }

    /// Drop every buffered reading; the next smoothed read starts a new warm-up.
    pub fn reset_smoothing(&mut self) {
        self.smoothing.reset();
    }

    /// Give the analog source back.
    pub fn release(self) -> S {
        self.source
    }
}

impl<S: AnalogSource> Sensor<2> for LightDependentResistor<S> {
    type Readings = LdrReadings;

    fn read(&mut self) -> Result<LdrReadings, SensorError> {
        let lux = self.try_sample_smoothed_lux()?;
        let footcandles = lux_to_footcandles(lux);

        // Stored as milli-units to keep three decimals in an i32
        Ok(LdrReadings {
            milli_lux: to_milli(lux),
            milli_footcandles: to_milli(footcandles),
        })
    }
}

/// Fixed-point milli-units; `as` saturates out-of-range values and maps NaN to 0.
fn to_milli(value: f32) -> i32 {
    (value * 1000.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photocell::PhotocellKind;
    use alloc::vec;
    use alloc::vec::Vec;

    /// ADC returning a fixed script of raw values, repeating the last one.
    struct ScriptedAdc {
        raws: Vec<u32>,
        next: usize,
        runtime_resolution: bool,
        resolution: Option<u8>,
        channels: Vec<u8>,
    }

    impl ScriptedAdc {
        fn new(raws: &[u32]) -> Self {
            Self {
                raws: raws.to_vec(),
                next: 0,
                runtime_resolution: false,
                resolution: None,
                channels: Vec::new(),
            }
        }

        fn with_runtime_resolution(mut self) -> Self {
            self.runtime_resolution = true;
            self
        }
    }

    impl AnalogSource for ScriptedAdc {
        type Channel = u8;

        fn read_raw(&mut self, channel: u8) -> u32 {
            self.channels.push(channel);
            let raw = self.raws[self.next.min(self.raws.len() - 1)];
            self.next += 1;
            raw
        }

        fn supports_runtime_resolution(&self) -> bool {
            self.runtime_resolution
        }

        fn set_resolution(&mut self, bits: u8) {
            self.resolution = Some(bits);
        }
    }

    fn ldr(raws: &[u32], config: LdrConfig) -> LightDependentResistor<ScriptedAdc> {
        LightDependentResistor::new(ScriptedAdc::new(raws), 3, config).unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * b.abs().max(1.0)
    }

    #[test]
    fn test_midscale_reading() {
        let mut sensor = ldr(&[512], LdrConfig::new(10_000.0));

        // Half scale: photocell resistance equals the reference resistor
        let lux = sensor.sample_lux();
        assert_eq!(lux, PhotocellKind::Gl5528.power_law().lux(10_000.0));
        assert!(lux.is_finite() && lux > 0.0);
    }

    #[test]
    fn test_valid_range_is_finite_positive_and_deterministic() {
        let config = LdrConfig::new(10_000.0).with_photocell(PhotocellKind::Gl5549);
        let sensor = ldr(&[1], config);

        for raw in 1..1024 {
            let lux = sensor.lux_from_raw(raw);
            assert!(lux.is_finite() && lux > 0.0, "raw {} -> {}", raw, lux);
            assert_eq!(lux, sensor.lux_from_raw(raw));
        }
    }

    #[test]
    fn test_brighter_light_raises_reading_on_ground() {
        // Photocell on ground: more light, lower resistance, lower voltage
        let sensor = ldr(&[1], LdrConfig::new(10_000.0));
        assert!(sensor.lux_from_raw(100) > sensor.lux_from_raw(900));
    }

    #[test]
    fn test_orientation_inverts_resistance() {
        // raw 256 of 1024: ratio 3
        let config = LdrConfig::new(10_000.0).with_power_law(1_000_000.0, 1.0);
        let mut sensor = ldr(&[256], config);

        let ground = sensor.sample_lux();
        assert!(close(ground, 1_000_000.0 / (10_000.0 / 3.0)));

        sensor.set_photocell_on_ground(false);
        assert_eq!(sensor.divider_orientation(), DividerOrientation::Supply);
        let supply = sensor.sample_lux();
        assert!(close(supply, 1_000_000.0 / 30_000.0));

        sensor.set_divider_orientation(DividerOrientation::Ground);
        assert_eq!(sensor.sample_lux(), ground);
    }

    #[test]
    fn test_saturated_reading_is_guarded() {
        let mut sensor = ldr(&[1024, 1023], LdrConfig::new(10_000.0));

        let saturated = sensor.sample_lux();
        assert!(saturated.is_finite());
        assert_eq!(saturated, sensor.sample_lux());
    }

    #[test]
    fn test_zero_reading_passes_through() {
        let mut sensor = ldr(&[0], LdrConfig::new(10_000.0));
        assert!(sensor.sample_lux().is_infinite());

        sensor.set_divider_orientation(DividerOrientation::Supply);
        assert_eq!(sensor.sample_lux(), 0.0);
    }

    #[test]
    fn test_try_sample_rejects_rails() {
        let mut sensor = ldr(&[0, 1024, 600], LdrConfig::new(10_000.0));

        assert_eq!(
            sensor.try_sample_lux(),
            Err(SensorError::RailReading {
                sensor: "LDR",
                raw: 0,
                max_count: 1024
            })
        );
        assert!(matches!(
            sensor.try_sample_lux(),
            Err(SensorError::RailReading { raw: 1024, .. })
        ));
        assert_eq!(sensor.try_sample_lux(), Ok(sensor.lux_from_raw(600)));
    }

    #[test]
    fn test_rejected_readings_stay_out_of_the_average() {
        let config = LdrConfig::new(10_000.0).with_smoothing_window(4);
        let mut sensor = ldr(&[500, 0, 700], config);

        let first = sensor.try_sample_smoothed_lux().unwrap();
        assert!(sensor.try_sample_smoothed_lux().is_err());
        assert_eq!(sensor.smoothing().len(), 1);

        let second = sensor.try_sample_smoothed_lux().unwrap();
        let expected = (first + sensor.lux_from_raw(700)) / 2.0;
        assert!(close(second, expected));
    }

    #[test]
    fn test_smoothing_warm_up_and_steady_state() {
        // Ground, 4-bit ADC, R_ref = 1 Ω, I = 10 / R: lux = 10 * ratio
        let config = LdrConfig::new(1.0)
            .with_power_law(10.0, 1.0)
            .with_adc_bits(4)
            .with_smoothing_window(3);
        // ratios 1, 3, 7, 15
        let mut sensor = ldr(&[8, 4, 2, 1], config);

        assert!(close(sensor.sample_smoothed_lux(), 10.0));
        assert!(close(sensor.sample_smoothed_lux(), 20.0));
        assert!(close(sensor.sample_smoothed_lux(), 110.0 / 3.0));
        assert!(sensor.smoothing().is_warm());
        assert!(close(sensor.sample_smoothed_lux(), 250.0 / 3.0));
    }

    #[test]
    fn test_bright_burst_does_not_bias_later_average() {
        let config = LdrConfig::new(10_000.0).with_smoothing_window(3);
        let mut sensor = ldr(&[1, 1, 1, 1000], config);
        let dark = sensor.lux_from_raw(1000);

        let mut smoothed = 0.0;
        for _ in 0..23 {
            smoothed = sensor.sample_smoothed_lux();
        }

        assert!((smoothed - dark).abs() <= dark * 1e-5, "{} vs {}", smoothed, dark);
    }

    #[test]
    fn test_smoothing_disabled_matches_instant_reading() {
        let raws = [123, 456, 789];
        let mut smoothed = ldr(&raws, LdrConfig::new(10_000.0));
        let mut instant = ldr(&raws, LdrConfig::new(10_000.0));

        for _ in 0..raws.len() {
            assert_eq!(smoothed.sample_smoothed_lux(), instant.sample_lux());
        }
        assert!(smoothed.smoothing().is_empty());
    }

    #[test]
    fn test_reset_smoothing() {
        let config = LdrConfig::new(10_000.0).with_smoothing_window(2);
        let mut sensor = ldr(&[100, 900], config);

        sensor.sample_smoothed_lux();
        sensor.reset_smoothing();

        assert_eq!(sensor.sample_smoothed_lux(), sensor.lux_from_raw(900));
    }

    #[test]
    fn test_footcandles() {
        let mut sensor = ldr(&[300], LdrConfig::new(10_000.0).with_smoothing_window(5));
        let lux = sensor.lux_from_raw(300);

        assert!(close(sensor.sample_footcandles(), lux / 10.764));
        assert!(close(sensor.sample_smoothed_footcandles(), lux / 10.764));
    }

    #[test]
    fn test_update_photocell_parameters() {
        let mut sensor = ldr(&[512], LdrConfig::new(10_000.0));

        sensor.update_photocell_parameters(20_000.0, 1.0);
        assert_eq!(sensor.power_law(), PowerLaw::new(20_000.0, 1.0));
        assert!(close(sensor.sample_lux(), 2.0));

        // Not validated
        sensor.update_photocell_parameters(1.0, -1.0);
        assert_eq!(sensor.power_law().exponent, -1.0);
    }

    #[test]
    fn test_runtime_resolution_only_where_supported() {
        let config = LdrConfig::new(10_000.0).with_adc_bits(12);

        let mut fixed = ldr(&[2048], config);
        fixed.sample_lux();
        assert_eq!(fixed.release().resolution, None);

        let adc = ScriptedAdc::new(&[2048]).with_runtime_resolution();
        let mut configurable = LightDependentResistor::new(adc, 3, config).unwrap();
        configurable.sample_lux();
        assert_eq!(configurable.release().resolution, Some(12));
    }

    #[test]
    fn test_borrowed_source_and_channel() {
        let mut adc = ScriptedAdc::new(&[512]);
        {
            let mut sensor =
                LightDependentResistor::new(&mut adc, 7, LdrConfig::new(10_000.0)).unwrap();
            assert_eq!(sensor.channel(), 7);
            sensor.sample_lux();
            sensor.sample_lux();
        }
        assert_eq!(adc.channels, vec![7, 7]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result =
            LightDependentResistor::new(ScriptedAdc::new(&[512]), 0, LdrConfig::new(0.0));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidReferenceResistance { .. })
        ));
    }

    #[test]
    fn test_sensor_trait_readings() {
        let config = LdrConfig::new(10_000.0).with_power_law(20_000.0, 1.0);
        let mut sensor = ldr(&[512, 0], config);

        let readings = Sensor::read(&mut sensor).unwrap().to_array();
        assert_eq!(readings[0], 2000);
        assert_eq!(readings[1], (2.0f32 / 10.764 * 1000.0) as i32);

        assert!(matches!(
            Sensor::read(&mut sensor),
            Err(SensorError::RailReading { raw: 0, .. })
        ));
    }

    #[test]
    fn test_sensor_readings_saturate_out_of_range() {
        // 1e12 / 10 kΩ = 1e8 lux, beyond the milli-lux range of an i32
        let config = LdrConfig::new(10_000.0).with_power_law(1.0e12, 1.0);
        let mut sensor = ldr(&[512], config);

        let readings = Sensor::read(&mut sensor).unwrap();
        assert_eq!(readings.milli_lux, i32::MAX);
        assert_eq!(readings.milli_footcandles, i32::MAX);
        assert_eq!(to_milli(f32::NAN), 0);
    }
}
