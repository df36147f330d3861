//! Mapping from monotonic real time to the compressed virtual day.

use std::num::NonZeroU32;

use wellwork_types::{VirtualTime, HOURS_PER_DAY, MINUTES_PER_HOUR};

use crate::config::MonitorConfig;
use crate::error::ConfigError;

fn elapsed_secs(now_ms: u64, start_ms: u64) -> u64 {
    now_ms.saturating_sub(start_ms) / 1000
}

/// Virtual hour for `now_ms`, in `0..24`.
///
/// A `now_ms` earlier than `start_ms` counts as zero elapsed time.
pub fn virtual_hour(
    now_ms: u64,
    start_ms: u64,
    seconds_per_virtual_hour: NonZeroU32,
    start_hour: u8,
) -> u8 {
    let hours = elapsed_secs(now_ms, start_ms) / u64::from(seconds_per_virtual_hour.get());
    ((hours + u64::from(start_hour)) % u64::from(HOURS_PER_DAY)) as u8
}

/// Virtual minute for `now_ms`, in `0..60`.
///
/// This is elapsed real seconds modulo 60. It does not follow the hour
/// boundary and is never reset when the hour changes.
pub fn virtual_minute(now_ms: u64, start_ms: u64) -> u8 {
    (elapsed_secs(now_ms, start_ms) % u64::from(MINUTES_PER_HOUR)) as u8
}

/// The virtual clock of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualClock {
    start_ms: u64,
    seconds_per_virtual_hour: NonZeroU32,
    start_hour: u8,
}

impl VirtualClock {
    pub fn new(
        start_ms: u64,
        seconds_per_virtual_hour: NonZeroU32,
        start_hour: u8,
    ) -> Result<Self, ConfigError> {
        if start_hour >= HOURS_PER_DAY {
            return Err(ConfigError::StartHourOutOfRange(start_hour));
        }
        Ok(Self {
            start_ms,
            seconds_per_virtual_hour,
            start_hour,
        })
    }

    /// Build a clock starting at `start_ms` from a monitor configuration.
    pub fn from_config(config: &MonitorConfig, start_ms: u64) -> Result<Self, ConfigError> {
        Self::new(start_ms, config.hour_length()?, config.start_hour)
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// The same clock, re-anchored so the start hour begins at `start_ms`.
    pub fn rebased(&self, start_ms: u64) -> Self {
        Self { start_ms, ..*self }
    }

    pub fn now(&self, now_ms: u64) -> VirtualTime {
        VirtualTime {
            hour: virtual_hour(
                now_ms,
                self.start_ms,
                self.seconds_per_virtual_hour,
                self.start_hour,
            ),
            minute: virtual_minute(now_ms, self.start_ms),
        }
    }
}
