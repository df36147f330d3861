//! Environmental health score, alert conditions and advice.
//!
//! The score starts at 100 and loses a fixed number of points for each
//! condition that holds:
//!
//! | condition | penalty |
//! |-----------|---------|
//! | temperature above 28 °C or below 18 °C | 30 |
//! | humidity above 70 % or below 30 % | 25 |
//! | dark during work hours (8 to 17) | 20 |
//! | not dark during the night (20 to 5) | 15 |
//!
//! Penalties are independent and additive; the result is floored at 0.

use wellwork_types::{Advice, Assessment, Concern, Tier, VirtualTime};

pub const TEMP_HIGH_C: f32 = 28.0;
pub const TEMP_LOW_C: f32 = 18.0;
pub const HUMIDITY_HIGH_PCT: f32 = 70.0;
pub const HUMIDITY_LOW_PCT: f32 = 30.0;

const TEMPERATURE_PENALTY: i16 = 30;
const HUMIDITY_PENALTY: i16 = 25;
const DARK_AT_WORK_PENALTY: i16 = 20;
const LIT_AT_NIGHT_PENALTY: i16 = 15;

/// The penalty conditions for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conditions {
    pub hot: bool,
    pub cold: bool,
    pub humid: bool,
    pub dry: bool,
    pub dark_at_work: bool,
    pub lit_at_night: bool,
}

impl Conditions {
    pub fn evaluate(temp: f32, humidity: f32, hour: u8, is_dark: bool) -> Self {
        let time = VirtualTime::new(hour, 0);
        Self {
            hot: temp > TEMP_HIGH_C,
            cold: temp < TEMP_LOW_C,
            humid: humidity > HUMIDITY_HIGH_PCT,
            dry: humidity < HUMIDITY_LOW_PCT,
            dark_at_work: is_dark && time.is_work_hours(),
            lit_at_night: !is_dark && time.is_night(),
        }
    }

    pub fn temperature_out_of_range(&self) -> bool {
        self.hot || self.cold
    }

    pub fn humidity_out_of_range(&self) -> bool {
        self.humid || self.dry
    }

    /// Number of active alerts, counting each penalty condition once.
    pub fn alert_count(&self) -> u8 {
        [
            self.temperature_out_of_range(),
            self.humidity_out_of_range(),
            self.dark_at_work,
            self.lit_at_night,
        ]
        .iter()
        .filter(|&&c| c)
        .count() as u8
    }

    pub fn score(&self) -> u8 {
        let mut score: i16 = 100;
        if self.temperature_out_of_range() {
            score -= TEMPERATURE_PENALTY;
        }
        if self.humidity_out_of_range() {
            score -= HUMIDITY_PENALTY;
        }
        if self.dark_at_work {
            score -= DARK_AT_WORK_PENALTY;
        }
        if self.lit_at_night {
            score -= LIT_AT_NIGHT_PENALTY;
        }
        score.max(0) as u8
    }

    fn concerns(&self) -> impl Iterator<Item = Concern> + '_ {
        [
            (self.hot, Concern::Hot),
            (self.cold, Concern::Cold),
            (self.humid, Concern::Humid),
            (self.dry, Concern::Dry),
            (self.dark_at_work, Concern::DarkAtWork),
            (self.lit_at_night, Concern::LitAtNight),
        ]
        .into_iter()
        .filter_map(|(active, concern)| active.then_some(concern))
    }
}

/// Health score in `0..=100`.
pub fn score(temp: f32, humidity: f32, hour: u8, is_dark: bool) -> u8 {
    Conditions::evaluate(temp, humidity, hour, is_dark).score()
}

/// Number of independent alert conditions, `0..=4`.
pub fn alert_count(temp: f32, humidity: f32, hour: u8, is_dark: bool) -> u8 {
    Conditions::evaluate(temp, humidity, hour, is_dark).alert_count()
}

/// Suggested actions for a score and its conditions.
///
/// An ideal environment gets no advice. A regular one gets gentle
/// suggestions, and never one for a cold room. A critical one gets urgent
/// wording for every condition.
pub fn advice(score: u8, conditions: &Conditions) -> Vec<Advice> {
    match Tier::from_score(score) {
        Tier::Ideal => Vec::new(),
        Tier::Regular => conditions
            .concerns()
            .filter(|c| *c != Concern::Cold)
            .map(|concern| Advice {
                concern,
                urgent: false,
            })
            .collect(),
        Tier::Critical => conditions
            .concerns()
            .map(|concern| Advice {
                concern,
                urgent: true,
            })
            .collect(),
    }
}

/// Full evaluation of one reading: score, tier, alert count and advice.
pub fn assess(conditions: &Conditions) -> Assessment {
    let score = conditions.score();
    Assessment {
        score,
        tier: Tier::from_score(score),
        alerts: conditions.alert_count(),
        advice: advice(score, conditions),
    }
}
