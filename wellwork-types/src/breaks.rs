//! Work-break kinds, statuses and alert tones.

use core::fmt;

use crate::VirtualTime;

/// A buzzer pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tone {
    pub frequency_hz: u16,
    pub duration_ms: u16,
}

impl Tone {
    /// Soft reminder used by the scheduled breaks.
    pub const SOFT: Tone = Tone {
        frequency_hz: 1000,
        duration_ms: 200,
    };

    /// Lower tone used by the stretch micro-break.
    pub const LOW: Tone = Tone {
        frequency_hz: 600,
        duration_ms: 200,
    };
}

/// The four daily breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BreakKind {
    /// 9:00 coffee break.
    Coffee,
    /// 12:00 lunch.
    Lunch,
    /// 15:00 afternoon break.
    Afternoon,
    /// Stretch micro-break in the second half of the 10th and 14th hours.
    Stretch,
}

impl BreakKind {
    /// All kinds, in the order they are checked each cycle.
    pub const ALL: [BreakKind; 4] = [
        BreakKind::Coffee,
        BreakKind::Lunch,
        BreakKind::Afternoon,
        BreakKind::Stretch,
    ];

    /// Trigger hour for the fixed-hour breaks. `None` for the micro-break.
    pub const fn trigger_hour(&self) -> Option<u8> {
        match self {
            BreakKind::Coffee => Some(9),
            BreakKind::Lunch => Some(12),
            BreakKind::Afternoon => Some(15),
            BreakKind::Stretch => None,
        }
    }

    /// Returns true while `time` is inside this break's trigger window.
    pub const fn is_due(&self, time: VirtualTime) -> bool {
        match self.trigger_hour() {
            Some(hour) => time.hour == hour,
            None => (time.hour == 10 || time.hour == 14) && time.minute >= 30,
        }
    }

    /// Tone played when the break fires.
    pub const fn tone(&self) -> Tone {
        match self {
            BreakKind::Stretch => Tone::LOW,
            _ => Tone::SOFT,
        }
    }

    /// Position in [`BreakKind::ALL`].
    pub const fn index(&self) -> usize {
        match self {
            BreakKind::Coffee => 0,
            BreakKind::Lunch => 1,
            BreakKind::Afternoon => 2,
            BreakKind::Stretch => 3,
        }
    }

    /// Reminder text shown when the break fires.
    pub const fn reminder(&self) -> &'static str {
        match self {
            BreakKind::Coffee => "Coffee break: have a coffee, stretch your wrists and drink some water",
            BreakKind::Lunch => "Lunch time: step away from the screen, eat well and take a short walk",
            BreakKind::Afternoon => "Afternoon break: rest your eyes and drink water",
            BreakKind::Stretch => "Micro-break: stretch your back and neck for two minutes",
        }
    }
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreakKind::Coffee => "coffee",
            BreakKind::Lunch => "lunch",
            BreakKind::Afternoon => "afternoon",
            BreakKind::Stretch => "stretch",
        };
        f.write_str(name)
    }
}

/// The currently active break, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BreakStatus {
    #[default]
    None,
    Active(BreakKind),
}

impl BreakStatus {
    /// Numeric status code: 0 for none, then 1 to 4 in [`BreakKind::ALL`] order.
    pub const fn code(&self) -> u8 {
        match self {
            BreakStatus::None => 0,
            BreakStatus::Active(kind) => kind.index() as u8 + 1,
        }
    }

    pub const fn is_active(&self, kind: BreakKind) -> bool {
        match self {
            BreakStatus::Active(active) => active.index() == kind.index(),
            BreakStatus::None => false,
        }
    }
}

/// Contextual messages tied to the start and end of the working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayMessage {
    /// Shown throughout the 7th hour.
    GoodMorning,
    /// Shown throughout the 17th hour.
    EndOfDay,
}

impl DayMessage {
    /// Message for the given hour.
    pub const fn for_hour(hour: u8) -> Option<Self> {
        match hour {
            7 => Some(DayMessage::GoodMorning),
            17 => Some(DayMessage::EndOfDay),
            _ => None,
        }
    }

    pub const fn text(&self) -> &'static str {
        match self {
            DayMessage::GoodMorning => "Good morning! Have a productive day",
            DayMessage::EndOfDay => "End of the workday: rest and recharge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hour_windows_ignore_minutes() {
        assert!(BreakKind::Coffee.is_due(VirtualTime::new(9, 0)));
        assert!(BreakKind::Coffee.is_due(VirtualTime::new(9, 59)));
        assert!(!BreakKind::Coffee.is_due(VirtualTime::new(10, 0)));
        assert!(BreakKind::Lunch.is_due(VirtualTime::new(12, 17)));
        assert!(BreakKind::Afternoon.is_due(VirtualTime::new(15, 3)));
    }

    #[test]
    fn stretch_window_needs_second_half_of_hour() {
        assert!(!BreakKind::Stretch.is_due(VirtualTime::new(10, 29)));
        assert!(BreakKind::Stretch.is_due(VirtualTime::new(10, 30)));
        assert!(BreakKind::Stretch.is_due(VirtualTime::new(14, 59)));
        assert!(!BreakKind::Stretch.is_due(VirtualTime::new(11, 45)));
    }

    #[test]
    fn status_codes_follow_check_order() {
        assert_eq!(BreakStatus::None.code(), 0);
        assert_eq!(BreakStatus::Active(BreakKind::Coffee).code(), 1);
        assert_eq!(BreakStatus::Active(BreakKind::Lunch).code(), 2);
        assert_eq!(BreakStatus::Active(BreakKind::Afternoon).code(), 3);
        assert_eq!(BreakStatus::Active(BreakKind::Stretch).code(), 4);
    }

    #[test]
    fn stretch_uses_lower_tone() {
        assert_eq!(BreakKind::Stretch.tone(), Tone::LOW);
        assert_eq!(BreakKind::Lunch.tone(), Tone::SOFT);
    }

    #[test]
    fn day_messages_at_seven_and_seventeen() {
        assert_eq!(DayMessage::for_hour(7), Some(DayMessage::GoodMorning));
        assert_eq!(DayMessage::for_hour(17), Some(DayMessage::EndOfDay));
        assert_eq!(DayMessage::for_hour(12), None);
    }
}
