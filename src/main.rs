//! loopsim - run the control demonstrations from the command line
//!
//! ```text
//! loopsim list
//! loopsim run pi-disturbance --out pi_disturbance.csv
//! loopsim dump pid-damping > pid.json
//! loopsim run-config pid.json --parallel
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};
use loopsim::{demos, Experiment, Result};

#[derive(Parser)]
#[command(name = "loopsim", version, about = "Closed-loop P/PI/PID step response demonstrations")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in demonstrations
    List,
    /// Run a built-in demonstration
    Run {
        /// Demonstration name (see `list`)
        demo: String,

        /// Write the aligned time series to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Simulate each loop on its own thread
        #[arg(short, long)]
        parallel: bool,
    },
    /// Run an experiment described by a JSON file
    RunConfig {
        file: PathBuf,

        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long)]
        parallel: bool,
    },
    /// Print a built-in demonstration as JSON
    Dump { demo: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<()> {
    match command {
        Command::List => {
            println!("{:<16} {}", "Name", "Title");
            for settings in demos::all() {
                println!("{:<16} {}", settings.name, settings.title);
            }
            Ok(())
        }
        Command::Run {
            demo,
            out,
            parallel,
        } => {
            let settings = demos::by_name(&demo)?;
            let experiment = Experiment::from_settings(&settings)?;
            run(&experiment, out.as_deref(), parallel)
        }
        Command::RunConfig {
            file,
            out,
            parallel,
        } => {
            let experiment = Experiment::load(&file)?;
            run(&experiment, out.as_deref(), parallel)
        }
        Command::Dump { demo } => {
            let settings = demos::by_name(&demo)?;
            println!("{}", settings.to_json()?);
            Ok(())
        }
    }
}

fn run(experiment: &Experiment, out: Option<&Path>, parallel: bool) -> Result<()> {
    let report = experiment.run(parallel)?;
    print!("{}", report.summary());

    if let Some(path) = out {
        report.save_csv(path)?;
        info!("saved {} loops to {}", report.comparison.len(), path.display());
    }
    Ok(())
}
