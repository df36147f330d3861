//! Monitor configuration.

use std::num::NonZeroU32;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Real seconds per virtual hour unless configured otherwise.
pub const DEFAULT_SECONDS_PER_VIRTUAL_HOUR: u32 = 5;

/// Virtual hour the simulation starts at.
pub const DEFAULT_START_HOUR: u8 = 7;

/// Real-time delay between cycles.
pub const DEFAULT_CYCLE_PERIOD_MS: u64 = 2_500;

/// Length of one averaging window.
pub const DEFAULT_UPLOAD_INTERVAL_MS: u64 = 15_000;

/// Timing parameters of the monitoring loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Real seconds that make up one virtual hour.
    pub seconds_per_virtual_hour: u32,
    /// Virtual hour at simulation start.
    pub start_hour: u8,
    /// Delay between cycles, in milliseconds.
    pub cycle_period_ms: u64,
    /// Minimum time between telemetry emissions, in milliseconds.
    pub upload_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            seconds_per_virtual_hour: DEFAULT_SECONDS_PER_VIRTUAL_HOUR,
            start_hour: DEFAULT_START_HOUR,
            cycle_period_ms: DEFAULT_CYCLE_PERIOD_MS,
            upload_interval_ms: DEFAULT_UPLOAD_INTERVAL_MS,
        }
    }
}

impl MonitorConfig {
    /// Check the configuration for values the loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hour_length()?;
        if self.start_hour >= 24 {
            return Err(ConfigError::StartHourOutOfRange(self.start_hour));
        }
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        Ok(())
    }

    /// Seconds per virtual hour as a non-zero value.
    pub fn hour_length(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.seconds_per_virtual_hour).ok_or(ConfigError::ZeroHourLength)
    }

    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(self.cycle_period_ms)
    }

    pub fn upload_interval(&self) -> Duration {
        Duration::from_millis(self.upload_interval_ms)
    }
}
