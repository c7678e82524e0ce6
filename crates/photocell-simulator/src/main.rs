//! Desktop simulator for the photocell-rs estimator.
//!
//! Feeds a [`LightDependentResistor`] from a simulated ADC whose photocell
//! sees a synthetic light curve: a slow day/night swing plus mains flicker.
//! Instantaneous and smoothed readings are logged side by side so the effect
//! of the moving average is visible without hardware.
//!
//! Run with `RUST_LOG=info` (or `debug` to see every conversion step).

use std::time::Duration;

use log::{info, warn};

use photocell_rs::{
    AnalogSource, DividerOrientation, LdrConfig, LightDependentResistor, PhotocellKind, PowerLaw,
    Sensor, SensorReadings,
};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// Reference resistor in the divider, in ohms.
const REFERENCE_RESISTANCE: f32 = 10_000.0;

const ADC_BITS: u8 = 12;

const SMOOTHING_WINDOW: usize = 8;

/// Number of samples taken before exiting.
const SAMPLE_COUNT: usize = 120;

/// Wall-clock pause between samples.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Simulated time that passes with every ADC read.
const SIMULATED_STEP_SECS: f64 = 60.0;

// ---------------------------------------------------------------------------
// Simulated hardware
// ---------------------------------------------------------------------------

/// ADC wired to a photocell lit by a synthetic light curve.
struct SimulatedAdc {
    /// Simulated seconds since start.
    elapsed_secs: f64,
    law: PowerLaw,
    orientation: DividerOrientation,
    reference_resistance: f32,
    /// Resolution last requested through `set_resolution`.
    bits: u8,
}

impl SimulatedAdc {
    fn new(kind: PhotocellKind, orientation: DividerOrientation) -> Self {
        Self {
            elapsed_secs: 0.0,
            law: kind.power_law(),
            orientation,
            reference_resistance: REFERENCE_RESISTANCE,
            bits: 10,
        }
    }

    /// Illuminance seen by the photocell at the current simulated time.
    fn illuminance(&self) -> f64 {
        let t = self.elapsed_secs;

        // Day/night: 2 lux at night up to ~800 lux at noon, one cycle per day
        let daylight = 401.0 - 399.0 * (t * std::f64::consts::TAU / 86_400.0).cos();

        // Flicker and sensor noise, up to ±8 %
        let noise = 0.05 * (t / 7.0).sin() + 0.03 * (t / 3.0).cos();

        daylight * (1.0 + noise)
    }

    /// Raw ADC code the divider would produce for `lux`.
    fn raw_for_lux(&self, lux: f64) -> u32 {
        let coefficient = self.law.coefficient as f64;
        let exponent = self.law.exponent as f64;
        let reference = self.reference_resistance as f64;

        let resistance = (coefficient / lux).powf(1.0 / exponent);
        let ratio = match self.orientation {
            DividerOrientation::Ground => reference / resistance,
            DividerOrientation::Supply => resistance / reference,
        };

        let max_count = (1u32 << self.bits) as f64;
        let raw = (max_count / (ratio + 1.0)).round();
        raw.clamp(0.0, max_count - 1.0) as u32
    }
}

impl AnalogSource for SimulatedAdc {
    type Channel = u8;

    fn read_raw(&mut self, _channel: u8) -> u32 {
        let raw = self.raw_for_lux(self.illuminance());
        self.elapsed_secs += SIMULATED_STEP_SECS;
        raw
    }

    fn supports_runtime_resolution(&self) -> bool {
        true
    }

    fn set_resolution(&mut self, bits: u8) {
        self.bits = bits;
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting photocell-rs simulator");

    let kind = PhotocellKind::Gl5528;
    let orientation = DividerOrientation::Ground;
    let config = LdrConfig::new(REFERENCE_RESISTANCE)
        .with_photocell(kind)
        .with_adc_bits(ADC_BITS)
        .with_smoothing_window(SMOOTHING_WINDOW)
        .with_divider_orientation(orientation);

    let adc = SimulatedAdc::new(kind, orientation);
    let mut ldr = match LightDependentResistor::new(adc, 0, config) {
        Ok(ldr) => ldr,
        Err(e) => {
            log::error!("Invalid photocell configuration: {}", e);
            return;
        }
    };

    info!(
        "Photocell {} on {:?}, {} Ω reference, {}-bit ADC, window {}",
        kind.name(),
        orientation,
        REFERENCE_RESISTANCE,
        ADC_BITS,
        SMOOTHING_WINDOW
    );

    for i in 0..SAMPLE_COUNT {
        match Sensor::read(&mut ldr) {
            Ok(readings) => {
                let [milli_lux, milli_fc] = readings.to_array();
                // The conversion that fed this reading's average
                let instant = ldr.smoothing().latest().unwrap_or(f32::NAN);
                info!(
                    "#{:3} instant {:8.2} lux | smoothed {:8.2} lux ({:7.2} fc)",
                    i,
                    instant,
                    milli_lux as f32 / 1000.0,
                    milli_fc as f32 / 1000.0
                );
            }
            Err(e) => warn!("#{:3} skipped: {}", i, e),
        }

        std::thread::sleep(SAMPLE_INTERVAL);
    }

    info!("Simulator exiting");
}
