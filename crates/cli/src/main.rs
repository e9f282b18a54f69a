// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # nodestat CLI
//!
//! Replays recorded node events and prints the derived status as JSON.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use nodestat_cli::{load_config, replay, ReplayOptions};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "nodestat",
    version,
    about = "Derives node status records from recorded node events."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold a newline-delimited JSON event log and print the resulting snapshots.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Event log to read, or `-` for stdin.
    #[clap(long, default_value = "-")]
    events: String,
    /// TOML file with a status configuration.
    #[clap(long, env = "NODESTAT_CONFIG")]
    config: Option<PathBuf>,
    /// Print a snapshot after every event.
    #[clap(long)]
    every: bool,
    /// Dump Prometheus metrics to stderr when the replay ends.
    #[clap(long)]
    metrics: bool,
    /// Fail on the first malformed line instead of skipping it.
    #[clap(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    nodestat_telemetry::init::init_tracing("info")?;

    match cli.command {
        Commands::Replay(args) => run_replay(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    // The engine picks up the global sink at construction.
    if args.metrics {
        let sink = nodestat_telemetry::prometheus::install()?;
        nodestat_telemetry::sinks::SINK
            .set(sink)
            .map_err(|_| anyhow!("metrics sink already installed"))?;
    }

    let input: Box<dyn BufRead> = if args.events == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.events)
            .with_context(|| format!("failed to open event log {}", args.events))?;
        Box::new(BufReader::new(file))
    };

    let options = ReplayOptions {
        every: args.every,
        strict: args.strict,
    };
    let mut stdout = io::stdout().lock();
    let outcome = replay(&config, input, &mut stdout, options)?;

    if args.metrics {
        eprint!("{}", nodestat_telemetry::prometheus::gather_text()?);
    }
    if outcome.skipped > 0 {
        tracing::warn!(
            target: "replay",
            event = "lines_skipped",
            skipped = outcome.skipped,
            "Some lines were not valid events"
        );
    }
    Ok(())
}
