use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    geom::{self, GeomArgs},
    plan::{self, PlanArgs},
    run::{self, RunArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tdsweep", about = "Timedemo parameter sweep driver")]
struct Cli {
    /// Log verbosity (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Back up artifacts and run every tuple of a plan through the benchmark.
    Run(RunArgs),
    /// Print the tuples a plan generates without running anything.
    Plan(PlanArgs),
    /// n-ball volume and radius conversions.
    Geom(GeomArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn dispatch(command: Command) -> Result<i32, Box<dyn Error>> {
    match command {
        Command::Run(args) => run::run(&args),
        Command::Plan(args) => plan::run(&args).map(|()| 0),
        Command::Geom(args) => geom::run(&args).map(|()| 0),
        Command::Version(args) => version::run(&args).map(|()| 0),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli.command) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            tracing::error!(error = %err, "sweep driver failed");
            ExitCode::FAILURE
        }
    }
}
