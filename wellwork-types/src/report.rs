//! Per-cycle observations: health tier, advice, indicator states and upload outcome.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{BreakKind, BreakStatus, ClimateReading, DayMessage, TelemetryPoint, VirtualTime};

/// Health tier derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tier {
    /// Score 85 and above.
    Ideal,
    /// Score 60 to 84.
    Regular,
    /// Score below 60.
    Critical,
}

impl Tier {
    pub const fn from_score(score: u8) -> Self {
        if score >= 85 {
            Tier::Ideal
        } else if score >= 60 {
            Tier::Regular
        } else {
            Tier::Critical
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Tier::Ideal => "IDEAL",
            Tier::Regular => "REGULAR",
            Tier::Critical => "CRITICAL",
        }
    }
}

/// An environmental condition that costs health points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Concern {
    Hot,
    Cold,
    Humid,
    Dry,
    DarkAtWork,
    LitAtNight,
}

/// A suggested corrective action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Advice {
    pub concern: Concern,
    /// Imperative wording for critical environments.
    pub urgent: bool,
}

impl Advice {
    pub const fn message(&self) -> &'static str {
        match (self.concern, self.urgent) {
            (Concern::Hot, false) => "Ventilate the room or adjust the air conditioning",
            // Cold rooms are only advised on in critical environments.
            (Concern::Cold, _) => "Heat the room now",
            (Concern::Humid, false) => "Ventilate to reduce humidity",
            (Concern::Dry, false) => "Use a humidifier",
            (Concern::DarkAtWork, false) => "Brighten the workspace, preferably with daylight",
            (Concern::LitAtNight, false) => "Dim the lights to rest",
            (Concern::Hot, true) => "Cool the room down now",
            (Concern::Humid, true) => "Reduce humidity now",
            (Concern::Dry, true) => "Raise humidity now",
            (Concern::DarkAtWork, true) => "Lighting inadequate: turn the lights on!",
            (Concern::LitAtNight, true) => "Excessive light: reduce lighting!",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The four alert LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Indicator {
    /// Red: temperature outside 18 to 28 °C.
    Temperature,
    /// Blue: humidity outside 30 to 70 %.
    Humidity,
    /// Yellow: dark room during work hours.
    DarkAtWork,
    /// Green: bright light at night.
    BrightAtNight,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Temperature,
        Indicator::Humidity,
        Indicator::DarkAtWork,
        Indicator::BrightAtNight,
    ];
}

/// Last written state of each indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorStates {
    pub temperature: bool,
    pub humidity: bool,
    pub dark_at_work: bool,
    pub bright_at_night: bool,
}

impl IndicatorStates {
    pub fn get(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Temperature => self.temperature,
            Indicator::Humidity => self.humidity,
            Indicator::DarkAtWork => self.dark_at_work,
            Indicator::BrightAtNight => self.bright_at_night,
        }
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        match indicator {
            Indicator::Temperature => self.temperature = on,
            Indicator::Humidity => self.humidity = on,
            Indicator::DarkAtWork => self.dark_at_work = on,
            Indicator::BrightAtNight => self.bright_at_night = on,
        }
    }
}

/// Health evaluation of a valid climate reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assessment {
    pub score: u8,
    pub tier: Tier,
    /// Number of independent alert conditions, 0 to 4.
    pub alerts: u8,
    pub advice: Vec<Advice>,
}

/// What happened to the telemetry window this cycle.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum UploadOutcome {
    /// The window has not elapsed, or holds no samples.
    #[default]
    Idle,
    /// Means were accepted by the endpoint.
    Sent { point: TelemetryPoint },
    /// No network; the window was discarded.
    Offline { point: TelemetryPoint },
    /// The endpoint rejected the upload or the transport failed; the window was discarded.
    Failed { point: TelemetryPoint, reason: String },
}

impl UploadOutcome {
    /// The drained point, if the window was emitted this cycle.
    pub fn point(&self) -> Option<&TelemetryPoint> {
        match self {
            UploadOutcome::Idle => None,
            UploadOutcome::Sent { point }
            | UploadOutcome::Offline { point }
            | UploadOutcome::Failed { point, .. } => Some(point),
        }
    }
}

/// Everything observable about one monitoring cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleReport {
    /// Monotonic cycle counter, starting at 1.
    pub cycle: u64,
    pub time: VirtualTime,
    /// Smoothed light level.
    pub light: u16,
    pub dark: bool,
    pub bright: bool,
    /// `None` when the climate sensor had no reading.
    pub climate: Option<ClimateReading>,
    pub assessment: Option<Assessment>,
    pub indicators: IndicatorStates,
    /// Samples waiting in the averaging window after this cycle.
    pub buffered: u32,
    pub upload: UploadOutcome,
    pub break_status: BreakStatus,
    pub breaks_taken: u32,
    /// Breaks that fired this cycle.
    pub fired: Vec<BreakKind>,
    /// True when the daily break reset ran this cycle.
    pub day_reset: bool,
    pub day_message: Option<DayMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_score(100), Tier::Ideal);
        assert_eq!(Tier::from_score(85), Tier::Ideal);
        assert_eq!(Tier::from_score(84), Tier::Regular);
        assert_eq!(Tier::from_score(60), Tier::Regular);
        assert_eq!(Tier::from_score(59), Tier::Critical);
        assert_eq!(Tier::from_score(0), Tier::Critical);
    }

    #[test]
    fn urgent_advice_uses_imperative_wording() {
        let calm = Advice {
            concern: Concern::Dry,
            urgent: false,
        };
        let urgent = Advice {
            concern: Concern::Dry,
            urgent: true,
        };
        assert_eq!(calm.message(), "Use a humidifier");
        assert_eq!(urgent.message(), "Raise humidity now");
    }

    #[test]
    fn cold_advice_has_only_urgent_wording() {
        for urgent in [false, true] {
            let advice = Advice {
                concern: Concern::Cold,
                urgent,
            };
            assert_eq!(advice.message(), "Heat the room now");
        }
    }

    #[test]
    fn indicator_states_round_trip_by_kind() {
        let mut states = IndicatorStates::default();
        for indicator in Indicator::ALL {
            assert!(!states.get(indicator));
            states.set(indicator, true);
            assert!(states.get(indicator));
        }
    }

    #[test]
    fn idle_outcome_has_no_point() {
        assert!(UploadOutcome::Idle.point().is_none());
        let sent = UploadOutcome::Sent {
            point: TelemetryPoint::default(),
        };
        assert!(sent.point().is_some());
    }
}
