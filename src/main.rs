//! Pinsim - LED and push-button workbench simulator
//!
//! Replays a scenario script against the workbench and prints toasts, LED
//! transitions, status panels and generated sketches.
//!
//! # Usage
//!
//! ```bash
//! pinsim blink.pin
//! pinsim -vv --quiet blink.pin
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use pinsim_core::{console::ConsoleFrontend, error::Result, scenario, Workbench};
use tracing_subscriber::filter::LevelFilter;

/// LED and push-button workbench simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario script
    #[arg(value_name = "SCENARIO_FILE")]
    scenario_file: PathBuf,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // Parse the scenario
    let script = scenario::parse_file(&args.scenario_file)?;

    // Build the workbench
    let frontend = ConsoleFrontend::new().quiet(args.quiet);
    let mut workbench = Workbench::manual(Box::new(frontend));

    // Replay
    let mut stdout = io::stdout().lock();
    scenario::run(&script, &mut workbench, &mut stdout)?;
    Ok(())
}
