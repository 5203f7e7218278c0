use clap::{Subcommand, ValueEnum};
use movecount_core::{
    display, Clock, ClockTime, Config, CounterMachine, CounterStore, Database, Input, SystemClock,
    TapAxis,
};

#[derive(Subcommand)]
pub enum CounterAction {
    /// Count one movement
    Increment,
    /// Uncount one movement (stops at zero)
    Decrement,
    /// Reset today's counter to defaults
    Reset,
    /// Feed a classified accelerometer tap
    Tap {
        /// Tap axis: x and y count a movement, z requests exit
        #[arg(value_enum)]
        axis: AxisArg,
    },
    /// Feed one clock tick
    Tick {
        /// Hour override (24h); defaults to the system clock
        #[arg(long)]
        hour: Option<u32>,
        /// Minute override; defaults to the system clock
        #[arg(long)]
        minute: Option<u32>,
    },
    /// Print current counter state as JSON
    Status,
    /// Print the display lines
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for TapAxis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::X => TapAxis::X,
            AxisArg::Y => TapAxis::Y,
            AxisArg::Z => TapAxis::Z,
        }
    }
}

pub fn run(action: CounterAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let record = db.load_record()?;
    let mut machine = CounterMachine::with_record(SystemClock, record);

    let input = match action {
        CounterAction::Increment => Input::Increment,
        CounterAction::Decrement => Input::Decrement,
        CounterAction::Reset => Input::Reset,
        CounterAction::Tap { axis } => Input::Tap(axis.into()),
        CounterAction::Tick { hour, minute } => {
            let now = SystemClock.local_time();
            Input::Tick(ClockTime::new(
                hour.unwrap_or(now.hour),
                minute.unwrap_or(now.minute),
            ))
        }
        CounterAction::Status => {
            println!("{}", serde_json::to_string_pretty(&machine.snapshot())?);
            return Ok(());
        }
        CounterAction::Show => {
            let config = Config::load_or_default();
            print_display(&config, machine.record());
            return Ok(());
        }
    };

    let outcome = machine.apply(input);
    for event in &outcome.events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    println!("{}", serde_json::to_string_pretty(&machine.snapshot())?);
    db.save_record(machine.record())?;

    if let Some(reason) = outcome.exit {
        tracing::debug!(?reason, "exit requested");
    }
    Ok(())
}

pub fn print_display(config: &Config, record: &movecount_core::CounterRecord) {
    println!("{}", config.display.header);
    println!("{}", display::count_line(record));
    if config.display.show_target {
        println!("{}", display::target_line(record));
    }
    if config.display.show_cutoff {
        println!("{}", display::cutoff_line(record));
    }
}
