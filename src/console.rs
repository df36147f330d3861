//! Indicators rendered as log events on a host without LEDs or a buzzer.

use tracing::{debug, info};
use wellwork_core::hal::Indicators;
use wellwork_types::{Indicator, IndicatorStates, Tone};

fn led_name(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Temperature => "red (temperature)",
        Indicator::Humidity => "blue (humidity)",
        Indicator::DarkAtWork => "yellow (dark at work)",
        Indicator::BrightAtNight => "green (bright at night)",
    }
}

/// Logs LED transitions and buzzer tones.
///
/// Writes that leave an LED unchanged are only logged at debug level.
#[derive(Debug, Default)]
pub struct ConsoleIndicators {
    states: IndicatorStates,
    tones: u32,
}

impl ConsoleIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> IndicatorStates {
        self.states
    }

    /// Number of tones sounded so far.
    pub fn tones(&self) -> u32 {
        self.tones
    }
}

impl Indicators for ConsoleIndicators {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        let led = led_name(indicator);
        if self.states.get(indicator) == on {
            debug!(led, on, "indicator unchanged");
            return;
        }
        self.states.set(indicator, on);
        info!(led, on, "indicator {}", if on { "on" } else { "off" });
    }

    fn sound_alert(&mut self, tone: Tone) {
        self.tones += 1;
        info!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration_ms,
            "buzzer"
        );
    }
}
