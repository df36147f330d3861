//! Averaging window for telemetry.

use wellwork_types::{SensorSample, TelemetryPoint};

/// Running sums of the samples taken since the last emission.
///
/// The accumulator does not reject NaN values; callers filter invalid
/// readings before calling [`SampleAccumulator::accumulate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleAccumulator {
    sum_temp: f64,
    sum_humidity: f64,
    sum_light: u64,
    sum_score: u64,
    count: u32,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample and its health score to the window.
    pub fn accumulate(&mut self, sample: &SensorSample, score: u8) {
        self.sum_temp += f64::from(sample.temperature_c);
        self.sum_humidity += f64::from(sample.humidity_pct);
        self.sum_light += u64::from(sample.light_raw);
        self.sum_score += u64::from(score);
        self.count += 1;
    }

    /// Number of samples in the current window.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true once `interval_ms` has elapsed since `last_emit_ms` and
    /// the window holds at least one sample.
    pub fn should_emit(&self, now_ms: u64, last_emit_ms: u64, interval_ms: u64) -> bool {
        self.count > 0 && now_ms.saturating_sub(last_emit_ms) >= interval_ms
    }

    /// Compute the window means and start a new window.
    ///
    /// Temperature and humidity are float means; light and score are
    /// truncating integer means. Returns `None` for an empty window.
    pub fn drain_means(&mut self) -> Option<TelemetryPoint> {
        if self.count == 0 {
            return None;
        }

        let n = self.count;
        let point = TelemetryPoint {
            temperature_c: (self.sum_temp / f64::from(n)) as f32,
            humidity_pct: (self.sum_humidity / f64::from(n)) as f32,
            light: (self.sum_light / u64::from(n)) as u32,
            score: (self.sum_score / u64::from(n)) as u8,
            samples: n,
        };

        *self = Self::default();
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f32, h: f32, light: u16) -> SensorSample {
        SensorSample {
            temperature_c: t,
            humidity_pct: h,
            light_raw: light,
        }
    }

    #[test]
    fn means_of_known_samples() {
        let mut acc = SampleAccumulator::new();
        acc.accumulate(&sample(20.0, 40.0, 100), 100);
        acc.accumulate(&sample(22.0, 50.0, 201), 75);
        acc.accumulate(&sample(27.0, 60.0, 300), 70);

        let point = acc.drain_means().unwrap();
        assert!((point.temperature_c - 23.0).abs() < 1e-4);
        assert!((point.humidity_pct - 50.0).abs() < 1e-4);
        // 601 / 3 truncates
        assert_eq!(point.light, 200);
        // 245 / 3 truncates
        assert_eq!(point.score, 81);
        assert_eq!(point.samples, 3);
    }

    #[test]
    fn drain_resets_to_empty_state() {
        let mut acc = SampleAccumulator::new();
        acc.accumulate(&sample(30.0, 80.0, 50), 25);
        acc.drain_means();

        assert_eq!(acc, SampleAccumulator::default());
        assert!(acc.is_empty());
    }

    #[test]
    fn second_drain_without_samples_emits_nothing() {
        let mut acc = SampleAccumulator::new();
        acc.accumulate(&sample(21.0, 45.0, 900), 100);
        assert!(acc.drain_means().is_some());
        assert!(acc.drain_means().is_none());
    }

    #[test]
    fn window_after_drain_ignores_previous_data() {
        let mut acc = SampleAccumulator::new();
        acc.accumulate(&sample(35.0, 90.0, 4000), 0);
        acc.drain_means();

        acc.accumulate(&sample(21.0, 45.0, 800), 100);
        let point = acc.drain_means().unwrap();
        assert!((point.temperature_c - 21.0).abs() < 1e-4);
        assert_eq!(point.light, 800);
        assert_eq!(point.score, 100);
        assert_eq!(point.samples, 1);
    }

    #[test]
    fn should_emit_false_when_empty() {
        let acc = SampleAccumulator::new();
        assert!(!acc.should_emit(1_000_000, 0, 15_000));
    }

    #[test]
    fn should_emit_after_interval() {
        let mut acc = SampleAccumulator::new();
        acc.accumulate(&sample(21.0, 45.0, 800), 100);

        assert!(!acc.should_emit(14_999, 0, 15_000));
        assert!(acc.should_emit(15_000, 0, 15_000));
        assert!(acc.should_emit(40_000, 0, 15_000));
    }

    #[test]
    fn should_emit_tolerates_clock_behind_last_emit() {
        let mut acc = SampleAccumulator::new();
        acc.accumulate(&sample(21.0, 45.0, 800), 100);
        assert!(!acc.should_emit(1_000, 5_000, 15_000));
    }
}
