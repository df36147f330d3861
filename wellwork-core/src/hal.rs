//! Collaborator interfaces consumed by the monitoring loop.
//!
//! Sensors, indicators and the uplink are injected so the decision logic can
//! run against real hardware, simulations or test doubles alike.

use std::time::Instant;

use async_trait::async_trait;
use wellwork_types::{ClimateReading, Indicator, TelemetryPoint, Tone};

use crate::error::{SensorError, UploadError};

/// Temperature/humidity source.
pub trait ClimateSensor {
    /// Read one sample. Implementations may return a NaN reading instead of
    /// an error; the loop treats both as unavailable.
    fn read(&mut self) -> Result<ClimateReading, SensorError>;
}

/// Ambient light source returning raw ADC intensity.
pub trait LightSensor {
    fn read_raw(&mut self) -> u16;
}

/// Fire-and-forget actuators: the four LEDs and the buzzer.
pub trait Indicators {
    fn set_indicator(&mut self, indicator: Indicator, on: bool);

    fn sound_alert(&mut self, tone: Tone);
}

/// Telemetry uplink.
#[async_trait]
pub trait Uplink: Send + Sync {
    /// Whether the network is currently usable. Uploads are skipped when
    /// this returns false.
    fn is_connected(&self) -> bool;

    /// Send one averaged point.
    async fn upload(&self, point: &TelemetryPoint) -> Result<(), UploadError>;
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by [`Instant`], counting from its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl<T: ClimateSensor + ?Sized> ClimateSensor for Box<T> {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        (**self).read()
    }
}

impl<T: LightSensor + ?Sized> LightSensor for Box<T> {
    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}

impl<T: Indicators + ?Sized> Indicators for Box<T> {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        (**self).set_indicator(indicator, on)
    }

    fn sound_alert(&mut self, tone: Tone) {
        (**self).sound_alert(tone)
    }
}

#[async_trait]
impl<T: Uplink + ?Sized> Uplink for Box<T> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    async fn upload(&self, point: &TelemetryPoint) -> Result<(), UploadError> {
        (**self).upload(point).await
    }
}

/// Uplink that is never connected, for running without a network.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

#[async_trait]
impl Uplink for Disconnected {
    fn is_connected(&self) -> bool {
        false
    }

    async fn upload(&self, _point: &TelemetryPoint) -> Result<(), UploadError> {
        Err(UploadError::Offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[tokio::test]
    async fn disconnected_uplink_refuses() {
        let uplink = Disconnected;
        assert!(!uplink.is_connected());
        assert_eq!(
            uplink.upload(&TelemetryPoint::default()).await,
            Err(UploadError::Offline)
        );
    }
}
