//! The day's counter record and the fixed counting policy.

use serde::{Deserialize, Serialize};

/// Movement count whose first attainment time is recorded.
pub const TARGET_COUNT: u32 = 10;

/// Hour of day (24h local) at which the running count is snapshotted once.
pub const CUTOFF_HOUR: u32 = 21;

/// Clock ticks without user input after which the session asks to terminate.
pub const SECONDS_INACTIVE_MAX: u32 = 15;

/// Repeat interval for press-and-hold increment/decrement. This is a
/// presentation-layer concern; it is exposed for hosts that implement
/// button repeat and never consulted by the machine itself.
pub const BUTTON_REPEAT_INTERVAL_MS: u64 = 250;

/// Wall-clock time of day, 24-hour local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

/// The authoritative counter state for the current day.
///
/// Owned and mutated exclusively by the counter machine; everything else
/// reads immutable snapshots. The record has no notion of multiple days --
/// it is "today's counter" until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Total movements counted today. Never goes below zero.
    pub move_count: u32,
    /// When the count first reached [`TARGET_COUNT`]. Cleared again if a
    /// decrement brings the count back below the target.
    #[serde(default)]
    pub target_time: Option<ClockTime>,
    /// Snapshot of the count taken at the first event or tick observed at
    /// or after [`CUTOFF_HOUR`]. Once captured it is only revised downward.
    #[serde(default)]
    pub cutoff_count: Option<u32>,
}

impl CounterRecord {
    /// Display gating: has the target count been reached?
    pub fn target_reached(&self) -> bool {
        self.move_count >= TARGET_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_fully_unset() {
        let record = CounterRecord::default();
        assert_eq!(record.move_count, 0);
        assert_eq!(record.target_time, None);
        assert_eq!(record.cutoff_count, None);
        assert!(!record.target_reached());
    }

    #[test]
    fn target_reached_at_exact_target() {
        let mut record = CounterRecord::default();
        record.move_count = TARGET_COUNT - 1;
        assert!(!record.target_reached());
        record.move_count = TARGET_COUNT;
        assert!(record.target_reached());
        record.move_count = TARGET_COUNT + 5;
        assert!(record.target_reached());
    }
}
