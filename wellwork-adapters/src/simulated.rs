//! Seeded synthetic sensors for running the monitor off-device.
//!
//! Temperature, humidity and light follow bounded random walks. The climate
//! sensor can drop readings with a fixed probability to exercise the
//! sensor-failure path.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wellwork_core::hal::{ClimateSensor, LightSensor};
use wellwork_core::{ClimateReading, SensorError};

const TEMPERATURE_RANGE: (f32, f32) = (12.0, 36.0);
const HUMIDITY_RANGE: (f32, f32) = (15.0, 90.0);
const TEMPERATURE_STEP: f32 = 0.4;
const HUMIDITY_STEP: f32 = 1.5;

/// Full scale of a 12-bit ADC.
pub const LIGHT_MAX: u16 = 4095;
const LIGHT_STEP: i32 = 40;
const LIGHT_NOISE: i32 = 15;

/// Settings shared by the synthetic climate and light sensors.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticEnvironment {
    pub seed: u64,
    /// Probability in `0.0..=1.0` that a climate read fails.
    pub dropout: f64,
    pub start: ClimateReading,
    pub start_light: u16,
}

impl Default for SyntheticEnvironment {
    fn default() -> Self {
        Self {
            seed: 0,
            dropout: 0.0,
            start: ClimateReading::new(23.0, 50.0),
            start_light: 800,
        }
    }
}

impl SyntheticEnvironment {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn starting_at(mut self, reading: ClimateReading, light: u16) -> Self {
        self.start = reading;
        self.start_light = light;
        self
    }

    /// Build the two sensors. They draw from independent streams derived
    /// from the seed.
    pub fn into_sensors(self) -> (SyntheticClimate, SyntheticLight) {
        let climate = SyntheticClimate {
            rng: StdRng::seed_from_u64(self.seed),
            temperature_c: self.start.temperature_c,
            humidity_pct: self.start.humidity_pct,
            dropout: self.dropout.clamp(0.0, 1.0),
        };
        let light = SyntheticLight {
            rng: StdRng::seed_from_u64(self.seed.wrapping_add(1)),
            level: self.start_light.min(LIGHT_MAX),
        };
        (climate, light)
    }
}

/// Random-walk temperature and humidity.
#[derive(Debug, Clone)]
pub struct SyntheticClimate {
    rng: StdRng,
    temperature_c: f32,
    humidity_pct: f32,
    dropout: f64,
}

impl ClimateSensor for SyntheticClimate {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        if self.dropout > 0.0 && self.rng.random_bool(self.dropout) {
            return Err(SensorError::Unavailable);
        }

        let dt = self.rng.random_range(-TEMPERATURE_STEP..=TEMPERATURE_STEP);
        let dh = self.rng.random_range(-HUMIDITY_STEP..=HUMIDITY_STEP);
        self.temperature_c =
            (self.temperature_c + dt).clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1);
        self.humidity_pct = (self.humidity_pct + dh).clamp(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1);

        Ok(ClimateReading::new(self.temperature_c, self.humidity_pct))
    }
}

/// Random-walk ambient light with per-read noise.
#[derive(Debug, Clone)]
pub struct SyntheticLight {
    rng: StdRng,
    level: u16,
}

impl LightSensor for SyntheticLight {
    fn read_raw(&mut self) -> u16 {
        let max = i32::from(LIGHT_MAX);
        let drift = self.rng.random_range(-LIGHT_STEP..=LIGHT_STEP);
        let level = (i32::from(self.level) + drift).clamp(0, max);
        self.level = level as u16;

        let noise = self.rng.random_range(-LIGHT_NOISE..=LIGHT_NOISE);
        (level + noise).clamp(0, max) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_readings() {
        let (mut a, mut la) = SyntheticEnvironment::new(42).into_sensors();
        let (mut b, mut lb) = SyntheticEnvironment::new(42).into_sensors();
        for _ in 0..100 {
            assert_eq!(a.read(), b.read());
            assert_eq!(la.read_raw(), lb.read_raw());
        }
    }

    #[test]
    fn readings_stay_in_bounds() {
        let (mut climate, mut light) = SyntheticEnvironment::new(7)
            .starting_at(ClimateReading::new(35.9, 89.0), 4090)
            .into_sensors();
        for _ in 0..10_000 {
            let r = climate.read().unwrap();
            assert!((TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&r.temperature_c));
            assert!((HUMIDITY_RANGE.0..=HUMIDITY_RANGE.1).contains(&r.humidity_pct));
            assert!(light.read_raw() <= LIGHT_MAX);
        }
    }

    #[test]
    fn full_dropout_always_fails() {
        let (mut climate, _) = SyntheticEnvironment::new(1).with_dropout(1.0).into_sensors();
        for _ in 0..50 {
            assert_eq!(climate.read(), Err(SensorError::Unavailable));
        }
    }

    #[test]
    fn dropout_is_clamped() {
        let (mut climate, _) = SyntheticEnvironment::new(1).with_dropout(3.0).into_sensors();
        assert_eq!(climate.read(), Err(SensorError::Unavailable));

        let (mut climate, _) = SyntheticEnvironment::new(1).with_dropout(-1.0).into_sensors();
        assert!(climate.read().is_ok());
    }

    #[test]
    fn partial_dropout_mixes_outcomes() {
        let (mut climate, _) = SyntheticEnvironment::new(99).with_dropout(0.5).into_sensors();
        let failures = (0..1_000).filter(|_| climate.read().is_err()).count();
        assert!((300..700).contains(&failures));
    }
}
