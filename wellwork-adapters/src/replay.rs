//! Sensors that replay recorded readings from a JSON-lines file.
//!
//! One record per line, one line per monitoring cycle:
//!
//! ```text
//! {"temperature_c": 22.5, "humidity_pct": 48.0, "light": 812}
//! {"temperature_c": null, "humidity_pct": null, "light": 40}
//! ```
//!
//! A null temperature or humidity replays a failed read. Blank lines and
//! lines starting with `#` are ignored. The feed wraps around at the end.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use wellwork_core::hal::{ClimateSensor, LightSensor};
use wellwork_core::light::LIGHT_SAMPLES;
use wellwork_core::{ClimateReading, SensorError};

use crate::AdapterError;

/// One recorded cycle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReplayRecord {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub light: u16,
}

impl ReplayRecord {
    fn climate(&self) -> Result<ClimateReading, SensorError> {
        match (self.temperature_c, self.humidity_pct) {
            (Some(t), Some(h)) => Ok(ClimateReading::new(t, h)),
            _ => Err(SensorError::Unavailable),
        }
    }
}

/// A parsed replay file.
#[derive(Debug, Clone)]
pub struct ReplayFeed {
    records: Arc<[ReplayRecord]>,
}

impl ReplayFeed {
    /// Read and parse a replay file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let feed = Self::parse(&content)?;
        debug!(path = %path.display(), records = feed.len(), "replay feed loaded");
        Ok(feed)
    }

    /// Parse JSON-lines replay content.
    pub fn parse(content: &str) -> Result<Self, AdapterError> {
        let mut records = Vec::new();
        for (n, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|e| AdapterError::Parse {
                what: format!("replay line {}", n + 1),
                message: e.to_string(),
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(AdapterError::Parse {
                what: "replay feed".to_string(),
                message: "no records".to_string(),
            });
        }

        Ok(Self {
            records: records.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into climate and light sensors that walk the feed in step.
    pub fn into_sensors(self) -> (ReplayClimate, ReplayLight) {
        (
            ReplayClimate {
                records: Arc::clone(&self.records),
                cursor: 0,
            },
            ReplayLight {
                records: self.records,
                reads: 0,
            },
        )
    }
}

/// Replays the climate half of each record, one record per read.
#[derive(Debug, Clone)]
pub struct ReplayClimate {
    records: Arc<[ReplayRecord]>,
    cursor: usize,
}

impl ClimateSensor for ReplayClimate {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let record = self.records[self.cursor % self.records.len()];
        self.cursor = self.cursor.wrapping_add(1);
        record.climate()
    }
}

/// Replays the light value of each record.
///
/// The loop samples light several times per cycle, so the feed advances
/// once every [`LIGHT_SAMPLES`] reads.
#[derive(Debug, Clone)]
pub struct ReplayLight {
    records: Arc<[ReplayRecord]>,
    reads: usize,
}

impl LightSensor for ReplayLight {
    fn read_raw(&mut self) -> u16 {
        let index = (self.reads / LIGHT_SAMPLES) % self.records.len();
        self.reads = self.reads.wrapping_add(1);
        self.records[index].light
    }
}
