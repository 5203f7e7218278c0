//! Wall-clock sources.
//!
//! The machine queries hour/minute on demand at the moment an event is
//! applied; periodic ticks carry their own time from the host's tick source.

use std::cell::Cell;

use chrono::Timelike;

use crate::counter::ClockTime;

/// On-demand local time source.
pub trait Clock {
    /// Current local time of day.
    fn local_time(&self) -> ClockTime;
}

/// System local time via chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_time(&self) -> ClockTime {
        let now = chrono::Local::now();
        ClockTime::new(now.hour(), now.minute())
    }
}

/// Settable clock for tests and simulation.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: Cell<ClockTime>,
}

impl ManualClock {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            time: Cell::new(ClockTime::new(hour, minute)),
        }
    }

    pub fn set(&self, hour: u32, minute: u32) {
        self.time.set(ClockTime::new(hour, minute));
    }
}

impl Clock for ManualClock {
    fn local_time(&self) -> ClockTime {
        self.time.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_settable_through_shared_ref() {
        let clock = ManualClock::new(14, 5);
        assert_eq!(clock.local_time(), ClockTime::new(14, 5));
        clock.set(21, 30);
        assert_eq!(clock.local_time(), ClockTime::new(21, 30));
    }

    #[test]
    fn system_clock_returns_valid_time_of_day() {
        let now = SystemClock.local_time();
        assert!(now.hour < 24);
        assert!(now.minute < 60);
    }
}
