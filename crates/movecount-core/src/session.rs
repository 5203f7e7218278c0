//! Session lifecycle around the counter machine.
//!
//! A session loads the persisted record exactly once when it opens and saves
//! it exactly once when it closes, on every termination path: Z-tap exit,
//! inactivity exit, or host-level shutdown.

use crate::clock::Clock;
use crate::counter::{CounterMachine, ExitReason, Input, Outcome};
use crate::error::CoreError;
use crate::storage::CounterStore;

pub struct Session<S: CounterStore, C: Clock> {
    store: S,
    machine: CounterMachine<C>,
    exit_reason: Option<ExitReason>,
    closed: bool,
}

impl<S: CounterStore, C: Clock> Session<S, C> {
    /// Load the persisted record and start a session over it.
    pub fn open(store: S, clock: C) -> Result<Self, CoreError> {
        let record = store.load_record()?;
        Ok(Self {
            machine: CounterMachine::with_record(clock, record),
            store,
            exit_reason: None,
            closed: false,
        })
    }

    pub fn machine(&self) -> &CounterMachine<C> {
        &self.machine
    }

    /// Why the session ended, once a terminal signal has been seen.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Apply one input. A terminal outcome closes the session (persisting
    /// the record) before this returns.
    pub fn handle(&mut self, input: Input) -> Result<Outcome, CoreError> {
        if self.closed {
            return Ok(Outcome {
                events: Vec::new(),
                exit: self.exit_reason,
            });
        }
        let outcome = self.machine.apply(input);
        if let Some(reason) = outcome.exit {
            self.exit_reason = Some(reason);
            self.close()?;
        }
        Ok(outcome)
    }

    /// Persist the record. Idempotent: only the first call writes.
    pub fn close(&mut self) -> Result<(), CoreError> {
        if self.closed {
            return Ok(());
        }
        self.store.save_record(self.machine.record())?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::counter::{CounterRecord, TapAxis, SECONDS_INACTIVE_MAX};
    use crate::counter::ClockTime;
    use crate::error::StorageError;
    use crate::storage::Database;
    use std::cell::{Cell, RefCell};

    /// Store that counts persistence calls.
    struct RecordingStore {
        record: RefCell<CounterRecord>,
        loads: Cell<u32>,
        saves: Cell<u32>,
    }

    impl RecordingStore {
        fn new(record: CounterRecord) -> Self {
            Self {
                record: RefCell::new(record),
                loads: Cell::new(0),
                saves: Cell::new(0),
            }
        }
    }

    impl CounterStore for RecordingStore {
        fn load_record(&self) -> Result<CounterRecord, StorageError> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.record.borrow().clone())
        }

        fn save_record(&self, record: &CounterRecord) -> Result<(), StorageError> {
            self.saves.set(self.saves.get() + 1);
            *self.record.borrow_mut() = record.clone();
            Ok(())
        }
    }

    fn tick() -> Input {
        Input::Tick(ClockTime::new(14, 5))
    }

    #[test]
    fn open_loads_exactly_once() {
        let store = RecordingStore::new(CounterRecord {
            move_count: 5,
            ..Default::default()
        });
        let session = Session::open(&store, ManualClock::new(14, 5)).unwrap();
        assert_eq!(store.loads.get(), 1);
        assert_eq!(session.machine().record().move_count, 5);
    }

    #[test]
    fn z_tap_exit_saves_exactly_once() {
        let store = RecordingStore::new(CounterRecord::default());
        let mut session = Session::open(&store, ManualClock::new(14, 5)).unwrap();
        session.handle(Input::Increment).unwrap();

        let outcome = session.handle(Input::Tap(TapAxis::Z)).unwrap();
        assert_eq!(outcome.exit, Some(ExitReason::UserRequested));
        assert!(session.is_closed());
        assert_eq!(store.saves.get(), 1);
        assert_eq!(store.record.borrow().move_count, 1);

        // Explicit close after a terminal signal writes nothing more.
        session.close().unwrap();
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn inactivity_exit_saves_and_reports_reason() {
        let store = RecordingStore::new(CounterRecord::default());
        let mut session = Session::open(&store, ManualClock::new(14, 5)).unwrap();

        for _ in 0..SECONDS_INACTIVE_MAX {
            let outcome = session.handle(tick()).unwrap();
            assert!(outcome.exit.is_none());
        }
        let outcome = session.handle(tick()).unwrap();
        assert_eq!(outcome.exit, Some(ExitReason::Inactivity));
        assert_eq!(session.exit_reason(), Some(ExitReason::Inactivity));
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn host_shutdown_close_saves_once() {
        let store = RecordingStore::new(CounterRecord::default());
        let mut session = Session::open(&store, ManualClock::new(14, 5)).unwrap();
        session.handle(Input::Increment).unwrap();

        session.close().unwrap();
        session.close().unwrap();
        assert_eq!(store.saves.get(), 1);
        assert_eq!(session.exit_reason(), None);
    }

    #[test]
    fn inputs_after_close_are_ignored() {
        let store = RecordingStore::new(CounterRecord::default());
        let mut session = Session::open(&store, ManualClock::new(14, 5)).unwrap();
        session.handle(Input::Tap(TapAxis::Z)).unwrap();

        let outcome = session.handle(Input::Increment).unwrap();
        assert!(outcome.events.is_empty());
        assert_eq!(session.machine().record().move_count, 0);
    }

    #[test]
    fn session_round_trips_through_sqlite() {
        let db = Database::open_memory().unwrap();
        {
            let mut session = Session::open(&db, ManualClock::new(14, 5)).unwrap();
            for _ in 0..10 {
                session.handle(Input::Increment).unwrap();
            }
            session.close().unwrap();
        }
        let session = Session::open(&db, ManualClock::new(14, 5)).unwrap();
        let record = session.machine().record();
        assert_eq!(record.move_count, 10);
        assert_eq!(record.target_time, Some(ClockTime::new(14, 5)));
    }
}
