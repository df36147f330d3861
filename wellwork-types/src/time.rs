//! Virtual wall-clock reading.

use core::fmt;

/// Hours in a virtual day.
pub const HOURS_PER_DAY: u8 = 24;

/// Range of the virtual minute counter.
pub const MINUTES_PER_HOUR: u8 = 60;

/// A reading of the compressed virtual clock.
///
/// `minute` is the elapsed real seconds modulo 60, so it is not aligned with
/// the hour boundary. Consumers must not assume `minute` reaches 59 before a
/// new hour starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualTime {
    /// Hour of the virtual day, `0..24`.
    pub hour: u8,
    /// Minute counter, `0..60`.
    pub minute: u8,
}

impl VirtualTime {
    /// Create a reading, wrapping out-of-range components.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
        }
    }

    /// Returns true inside the working day, 8:00 through the whole 17th hour.
    pub const fn is_work_hours(&self) -> bool {
        self.hour >= 8 && self.hour <= 17
    }

    /// Returns true during the night, 20:00 to 5:59.
    pub const fn is_night(&self) -> bool {
        self.hour >= 20 || self.hour < 6
    }
}

impl fmt::Display for VirtualTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}
