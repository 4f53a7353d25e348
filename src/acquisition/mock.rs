//! Mock sensor generator
//!
//! Stand-in for real telemetry: produces [`SensorReading`] snapshots from a
//! seeded RNG so runs are reproducible with `--seed`.

use std::fmt;

use clap::ValueEnum;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEGRADING_RAMP_TICKS, DROPOUT_PROBABILITY, LOUD_SOUND_PROBABILITY};
use crate::types::SensorReading;

/// Shape of the generated data stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Healthy rig, dashboard value ranges
    #[default]
    Nominal,
    /// Every channel drifts linearly past its danger anchor
    Degrading,
    /// Nominal values with fields randomly missing
    Dropout,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Nominal => write!(f, "nominal"),
            Scenario::Degrading => write!(f, "degrading"),
            Scenario::Dropout => write!(f, "dropout"),
        }
    }
}

// ============================================================================
// Degrading ramp endpoints (start, end) and noise
// ============================================================================

const RAMP_BEARING_TEMP: (f64, f64) = (60.0, 100.0);
const RAMP_VIBRATION: (f64, f64) = (2.0, 9.0);
const RAMP_PRESSURE: (f64, f64) = (3700.0, 1700.0);
const RAMP_FLOW: (f64, f64) = (135.0, 55.0);
const RAMP_SOUND: (f64, f64) = (75.0, 112.0);

const NOISE_BEARING_TEMP: f64 = 1.0;
const NOISE_VIBRATION: f64 = 0.1;
const NOISE_PRESSURE: f64 = 30.0;
const NOISE_FLOW: f64 = 2.0;
const NOISE_SOUND: f64 = 1.5;

/// Reproducible reading generator.
pub struct MockGenerator {
    rng: StdRng,
    scenario: Scenario,
    tick: u32,
}

impl MockGenerator {
    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn new(scenario: Scenario, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng, scenario, tick: 0 }
    }

    /// Readings produced so far.
    pub fn ticks(&self) -> u32 {
        self.tick
    }

    pub fn next_reading(&mut self) -> SensorReading {
        let reading = match self.scenario {
            Scenario::Nominal => self.nominal(),
            Scenario::Degrading => self.degrading(),
            Scenario::Dropout => {
                let full = self.nominal();
                self.drop_fields(full)
            }
        };
        self.tick = self.tick.saturating_add(1);
        reading
    }

    fn nominal(&mut self) -> SensorReading {
        let temp = self.rng.gen_range(50.0..75.0);
        let vibration = round2(self.rng.gen_range(2.5..5.5));
        let pressure = self.rng.gen_range(3500.0..4000.0);
        let flow = self.rng.gen_range(120.0..150.0);
        let sound = if self.rng.gen_bool(LOUD_SOUND_PROBABILITY) {
            self.rng.gen_range(85_i32..100)
        } else {
            self.rng.gen_range(70_i32..85)
        };

        SensorReading::new()
            .with_bearing_temp(temp)
            .with_vibration_level(vibration)
            .with_pressure(pressure)
            .with_flow_rate(flow)
            .with_acoustic_level(f64::from(sound))
    }

    fn degrading(&mut self) -> SensorReading {
        let progress = (f64::from(self.tick) / f64::from(DEGRADING_RAMP_TICKS)).min(1.0);

        let temp = self.ramp(RAMP_BEARING_TEMP, progress, NOISE_BEARING_TEMP);
        let vibration = round2(self.ramp(RAMP_VIBRATION, progress, NOISE_VIBRATION));
        let pressure = self.ramp(RAMP_PRESSURE, progress, NOISE_PRESSURE);
        let flow = self.ramp(RAMP_FLOW, progress, NOISE_FLOW);
        let sound = self.ramp(RAMP_SOUND, progress, NOISE_SOUND).round();

        SensorReading::new()
            .with_bearing_temp(temp)
            .with_vibration_level(vibration)
            .with_pressure(pressure)
            .with_flow_rate(flow)
            .with_acoustic_level(sound)
    }

    fn ramp(&mut self, (start, end): (f64, f64), progress: f64, std_dev: f64) -> f64 {
        let base = start + (end - start) * progress;
        (base + self.noise(std_dev)).max(0.0)
    }

    fn noise(&mut self, std_dev: f64) -> f64 {
        Normal::new(0.0, std_dev).map_or(0.0, |n| n.sample(&mut self.rng))
    }

    fn drop_fields(&mut self, mut reading: SensorReading) -> SensorReading {
        if self.rng.gen_bool(DROPOUT_PROBABILITY) {
            reading.vibration.main_bearing_temp = None;
        }
        if self.rng.gen_bool(DROPOUT_PROBABILITY) {
            reading.vibration.level = None;
        }
        if self.rng.gen_bool(DROPOUT_PROBABILITY) {
            reading.hydraulic.pressure = None;
        }
        if self.rng.gen_bool(DROPOUT_PROBABILITY) {
            reading.hydraulic.flow_rate = None;
        }
        if self.rng.gen_bool(DROPOUT_PROBABILITY) {
            reading.acoustic.level = None;
        }
        reading
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
