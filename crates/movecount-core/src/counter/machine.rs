//! Movement-counting state machine.
//!
//! The machine is a synchronous event handler with no internal threads --
//! the host delivers one [`Input`] at a time and renders a snapshot
//! afterwards. Ticks arrive from the host once per second-equivalent unit
//! whether or not the user is active.
//!
//! ## Transitions
//!
//! ```text
//! Increment  -> count+1, may record target time, may capture cutoff
//! Decrement  -> count-1 (stops at zero), may clear target / lower cutoff
//! Reset      -> default record
//! Tap x|y    -> count+1 (raw count only)
//! Tap z      -> exit requested (user)
//! Tick       -> inactivity accounting, may capture cutoff, may exit
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::record::{ClockTime, CounterRecord, CUTOFF_HOUR, SECONDS_INACTIVE_MAX, TARGET_COUNT};
use crate::clock::Clock;
use crate::events::Event;

/// Accelerometer axis of a classified tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TapAxis {
    X,
    Y,
    Z,
}

/// One semantic input delivered by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Increment,
    Decrement,
    Reset,
    Tap(TapAxis),
    /// Periodic clock signal carrying the current local time.
    Tick(ClockTime),
}

/// Why the machine asked the host to terminate the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitReason {
    /// Z-axis tap: the user asked to leave.
    UserRequested,
    /// More than [`SECONDS_INACTIVE_MAX`] ticks without user input.
    Inactivity,
}

/// Result of applying one input.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub events: Vec<Event>,
    pub exit: Option<ExitReason>,
}

impl Outcome {
    fn events(events: Vec<Event>) -> Self {
        Self { events, exit: None }
    }
}

/// Core counting state machine.
///
/// Owns the [`CounterRecord`] exclusively. Wall-clock time for target
/// attainment is queried from the clock at the moment of the event, never
/// cached.
#[derive(Debug, Clone)]
pub struct CounterMachine<C: Clock> {
    clock: C,
    record: CounterRecord,
    /// Ticks since the last user-originated input. Volatile, never persisted.
    seconds_inactive: u32,
}

impl<C: Clock> CounterMachine<C> {
    /// Create a machine over a fresh default record.
    pub fn new(clock: C) -> Self {
        Self::with_record(clock, CounterRecord::default())
    }

    /// Resume from a previously persisted record.
    pub fn with_record(clock: C, record: CounterRecord) -> Self {
        Self {
            clock,
            record,
            seconds_inactive: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn record(&self) -> &CounterRecord {
        &self.record
    }

    pub fn seconds_inactive(&self) -> u32 {
        self.seconds_inactive
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Build a full state snapshot event for presentation.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            move_count: self.record.move_count,
            target_reached: self.record.target_reached(),
            target_time: self.record.target_time,
            cutoff_count: self.record.cutoff_count,
            seconds_inactive: self.seconds_inactive,
            at: Utc::now(),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Apply one input. Total over the input domain: no transition fails,
    /// and the only terminal outcome is an exit request.
    pub fn apply(&mut self, input: Input) -> Outcome {
        match input {
            Input::Increment => self.increment(),
            Input::Decrement => self.decrement(),
            Input::Reset => self.reset(),
            Input::Tap(axis) => self.tap(axis),
            Input::Tick(time) => self.tick(time),
        }
    }

    fn increment(&mut self) -> Outcome {
        self.seconds_inactive = 0;
        let now = self.clock.local_time();
        let at = Utc::now();

        self.record.move_count = self.record.move_count.saturating_add(1);
        let mut events = vec![Event::CountChanged {
            move_count: self.record.move_count,
            at,
        }];

        if self.record.move_count == TARGET_COUNT {
            // An attainment at exactly 00:00 is indistinguishable from
            // "unset" in the persisted key set, so it stays unset.
            self.record.target_time = (now != ClockTime::new(0, 0)).then_some(now);
            events.push(Event::TargetReached {
                move_count: self.record.move_count,
                time: now,
                at,
            });
        }

        if self.record.cutoff_count.is_none() && now.hour >= CUTOFF_HOUR {
            self.record.cutoff_count = Some(self.record.move_count);
            events.push(Event::CutoffCaptured {
                cutoff_count: self.record.move_count,
                at,
            });
        }

        Outcome::events(events)
    }

    fn decrement(&mut self) -> Outcome {
        self.seconds_inactive = 0;
        if self.record.move_count == 0 {
            // Keep the counter at zero.
            return Outcome::events(Vec::new());
        }

        self.record.move_count -= 1;
        let at = Utc::now();
        let mut events = vec![Event::CountChanged {
            move_count: self.record.move_count,
            at,
        }];

        if self.record.move_count < TARGET_COUNT && self.record.target_time.is_some() {
            // Invalidate the previously recorded attainment time.
            self.record.target_time = None;
            events.push(Event::TargetCleared {
                move_count: self.record.move_count,
                at,
            });
        }

        if let Some(cutoff) = self.record.cutoff_count {
            if self.record.move_count < cutoff {
                // Invalidate the previously captured cutoff value.
                self.record.cutoff_count = Some(self.record.move_count);
                events.push(Event::CutoffLowered {
                    cutoff_count: self.record.move_count,
                    at,
                });
            }
        }

        Outcome::events(events)
    }

    fn reset(&mut self) -> Outcome {
        self.seconds_inactive = 0;
        self.record = CounterRecord::default();
        Outcome::events(vec![Event::CounterReset { at: Utc::now() }])
    }

    fn tap(&mut self, axis: TapAxis) -> Outcome {
        self.seconds_inactive = 0;
        match axis {
            // Punch or twist: raw count only. Target attainment and cutoff
            // capture stay on the button path.
            TapAxis::X | TapAxis::Y => {
                self.record.move_count = self.record.move_count.saturating_add(1);
                Outcome::events(vec![Event::CountChanged {
                    move_count: self.record.move_count,
                    at: Utc::now(),
                }])
            }
            TapAxis::Z => Outcome {
                events: vec![Event::ExitRequested {
                    reason: ExitReason::UserRequested,
                    at: Utc::now(),
                }],
                exit: Some(ExitReason::UserRequested),
            },
        }
    }

    fn tick(&mut self, time: ClockTime) -> Outcome {
        self.seconds_inactive = self.seconds_inactive.saturating_add(1);
        let at = Utc::now();
        let mut events = Vec::new();
        let mut exit = None;

        // Signal once, on the tick that first crosses the threshold.
        if self.seconds_inactive == SECONDS_INACTIVE_MAX + 1 {
            events.push(Event::ExitRequested {
                reason: ExitReason::Inactivity,
                at,
            });
            exit = Some(ExitReason::Inactivity);
        }

        if self.record.cutoff_count.is_none() && time.hour >= CUTOFF_HOUR {
            self.record.cutoff_count = Some(self.record.move_count);
            events.push(Event::CutoffCaptured {
                cutoff_count: self.record.move_count,
                at,
            });
        }

        Outcome { events, exit }
    }
}
