use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::counter::{ClockTime, ExitReason};

/// Every state change in the machine produces an Event.
/// Hosts log or render them; `StateSnapshot` is what presentation layers draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountChanged {
        move_count: u32,
        at: DateTime<Utc>,
    },
    /// The count first reached the target; carries the wall-clock time of
    /// the triggering event.
    TargetReached {
        move_count: u32,
        time: ClockTime,
        at: DateTime<Utc>,
    },
    /// A decrement brought the count back below the target; the recorded
    /// attainment time was discarded.
    TargetCleared {
        move_count: u32,
        at: DateTime<Utc>,
    },
    /// First observation at or after the cutoff hour captured the count.
    CutoffCaptured {
        cutoff_count: u32,
        at: DateTime<Utc>,
    },
    /// A decrement brought the count below the captured cutoff value.
    CutoffLowered {
        cutoff_count: u32,
        at: DateTime<Utc>,
    },
    CounterReset {
        at: DateTime<Utc>,
    },
    ExitRequested {
        reason: ExitReason,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        move_count: u32,
        target_reached: bool,
        target_time: Option<ClockTime>,
        cutoff_count: Option<u32>,
        seconds_inactive: u32,
        at: DateTime<Utc>,
    },
}
