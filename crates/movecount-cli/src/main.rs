use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "movecount", version, about = "Movecount CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Counter control
    Counter {
        #[command(subcommand)]
        action: commands::counter::CounterAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Interactive counting session on stdin
    Run,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Counter { action } => commands::counter::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Run => commands::session::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
