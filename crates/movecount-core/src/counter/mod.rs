mod machine;
mod record;

pub use machine::{CounterMachine, ExitReason, Input, Outcome, TapAxis};
pub use record::{
    ClockTime, CounterRecord, BUTTON_REPEAT_INTERVAL_MS, CUTOFF_HOUR, SECONDS_INACTIVE_MAX,
    TARGET_COUNT,
};
