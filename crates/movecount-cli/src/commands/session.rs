//! Interactive counting session.
//!
//! Reads key lines from stdin while a background timer delivers one tick per
//! second of channel inactivity. The session loads the record once, saves it
//! once on any exit path, and reports the exit reason per config.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use movecount_core::{
    Clock, Config, Database, ExitReason, Input, Session, SystemClock, TapAxis,
};

use super::counter::print_display;

/// One tick per second of inactivity; the inactivity threshold counts these.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut session = Session::open(db, SystemClock)?;

    print_display(&config, session.machine().record());
    println!("keys: + count, - uncount, 0 reset, x/y tap, z or q quit");

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let input = match rx.recv_timeout(TICK_INTERVAL) {
            Ok(line) => match parse_key(line.trim()) {
                Some(input) => input,
                None => continue,
            },
            Err(mpsc::RecvTimeoutError::Timeout) => Input::Tick(SystemClock.local_time()),
            // stdin closed: host-level shutdown.
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        let outcome = session.handle(input)?;
        if !outcome.events.is_empty() {
            print_display(&config, session.machine().record());
        }
        if outcome.exit.is_some() {
            break;
        }
    }

    session.close()?;
    tracing::debug!(reason = ?session.exit_reason(), "session closed");

    if config.session.announce_exit {
        match session.exit_reason() {
            Some(ExitReason::Inactivity) => println!("session ended: inactive"),
            Some(ExitReason::UserRequested) | None => println!("session ended"),
        }
    }
    Ok(())
}

fn parse_key(key: &str) -> Option<Input> {
    match key {
        "+" => Some(Input::Increment),
        "-" => Some(Input::Decrement),
        "0" => Some(Input::Reset),
        "x" => Some(Input::Tap(TapAxis::X)),
        "y" => Some(Input::Tap(TapAxis::Y)),
        "z" | "q" => Some(Input::Tap(TapAxis::Z)),
        _ => None,
    }
}
