//! One-shot daily break scheduling.
//!
//! Each break kind has a `taken` flag that goes from not-taken to taken the
//! first time its trigger window is seen, and back only through the daily
//! reset. The stretch micro-break is the exception: its flag clears as soon
//! as its window is left, so it fires once in each of its two daily windows.
//!
//! The daily reset runs when the clock enters 7:00 to 7:04. A latch keeps it
//! from running more than once per entry into that window.

use wellwork_types::{BreakKind, BreakStatus, Tone, VirtualTime};

/// A break that fired this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakEvent {
    pub kind: BreakKind,
    pub tone: Tone,
    /// Total breaks taken today, including this one.
    pub total_taken: u32,
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    pub fired: Vec<BreakEvent>,
    pub day_reset: bool,
}

fn is_rollover_window(time: VirtualTime) -> bool {
    time.hour == 7 && time.minute < 5
}

/// Break state for one virtual day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakScheduler {
    taken: [bool; 4],
    /// Set once the daily reset has run for the current entry into the
    /// rollover window.
    processed_today: bool,
    status: BreakStatus,
    total_taken: u32,
}

impl BreakScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BreakStatus {
        self.status
    }

    /// Breaks taken since the last daily reset.
    pub fn total_taken(&self) -> u32 {
        self.total_taken
    }

    pub fn is_taken(&self, kind: BreakKind) -> bool {
        self.taken[kind.index()]
    }

    pub fn processed_today(&self) -> bool {
        self.processed_today
    }

    /// Evaluate one break kind against the current time.
    ///
    /// Fixed-hour breaks fire once when their hour is reached; their status
    /// clears when the hour is left but the flag stays set until the daily
    /// reset. The stretch break clears both its status and its flag whenever
    /// the clock is outside its window.
    ///
    /// The status is owned per kind: a check only clears the status its own
    /// kind set, so a coffee status survives the stretch check that follows
    /// it in the same tick.
    pub fn check(&mut self, kind: BreakKind, time: VirtualTime) -> Option<BreakEvent> {
        let due = kind.is_due(time);
        let idx = kind.index();

        if due && !self.taken[idx] {
            self.taken[idx] = true;
            self.total_taken += 1;
            self.status = BreakStatus::Active(kind);
            return Some(BreakEvent {
                kind,
                tone: kind.tone(),
                total_taken: self.total_taken,
            });
        }

        if !due {
            if kind == BreakKind::Stretch {
                self.taken[idx] = false;
            }
            if (self.taken[idx] || kind == BreakKind::Stretch) && self.status.is_active(kind) {
                self.status = BreakStatus::None;
            }
        }

        None
    }

    /// Run the daily reset if the clock has just entered the rollover window.
    ///
    /// Returns true when the reset ran.
    pub fn check_rollover(&mut self, time: VirtualTime) -> bool {
        if !is_rollover_window(time) {
            self.processed_today = false;
            return false;
        }
        if self.processed_today {
            return false;
        }
        self.reset_day();
        self.processed_today = true;
        true
    }

    /// Clear every flag, the counter and the status.
    pub fn reset_day(&mut self) {
        self.taken = [false; 4];
        self.total_taken = 0;
        self.status = BreakStatus::None;
    }

    /// Check every break kind in order, then the daily rollover.
    pub fn tick(&mut self, time: VirtualTime) -> Tick {
        let fired = BreakKind::ALL
            .iter()
            .filter_map(|&kind| self.check(kind, time))
            .collect();
        let day_reset = self.check_rollover(time);
        Tick { fired, day_reset }
    }
}
