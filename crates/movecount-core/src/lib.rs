//! # Movecount Core Library
//!
//! This library provides the core business logic for Movecount, a daily
//! movement counter for wearable-style hosts. All counting semantics live
//! here; front ends (the CLI binary, or any other presentation layer) are
//! thin adapters that feed inputs in and render snapshots out.
//!
//! ## Architecture
//!
//! - **Counter Machine**: A synchronous, tick-driven state machine that owns
//!   the day's counter record and applies all transition rules
//! - **Storage**: SQLite-based key-value persistence for the counter record
//!   and TOML-based host configuration
//! - **Session**: Load-once / save-once lifecycle wrapper around the machine
//! - **Display**: Text formatting of the record for line-oriented hosts
//!
//! ## Key Components
//!
//! - [`CounterMachine`]: Core counting state machine
//! - [`Session`]: Session lifecycle (persistence round-trip, exit reasons)
//! - [`Database`]: Persisted counter record storage
//! - [`Config`]: Host preferences

pub mod clock;
pub mod counter;
pub mod display;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use counter::{
    ClockTime, CounterMachine, CounterRecord, ExitReason, Input, Outcome, TapAxis,
    BUTTON_REPEAT_INTERVAL_MS, CUTOFF_HOUR, SECONDS_INACTIVE_MAX, TARGET_COUNT,
};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use session::Session;
pub use storage::{Config, CounterStore, Database};
