//! stepgrid: edit a drum pattern as a grid or as live-coding text

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use stepgrid::repl::{self, read_pattern_file};
use stepgrid::{Output, SessionConfig};
use stepgrid_core::types::config::{DEFAULT_BPM, DEFAULT_PATTERN, DEFAULT_VOLUME};
use tracing::Level;

/// Step sequencer that keeps a drum grid and a pattern string in sync
#[derive(Parser)]
#[command(name = "stepgrid")]
#[command(version)]
struct Cli {
    /// File the live-coding runtime watches; programs go to stdout if omitted
    #[arg(short, long, env = "STEPGRID_OUT")]
    out: Option<PathBuf>,

    /// Initial tempo (clamped to 60-200)
    #[arg(short, long, default_value_t = DEFAULT_BPM)]
    bpm: f32,

    /// Initial output gain (clamped to 0-1)
    #[arg(short, long, default_value_t = DEFAULT_VOLUME)]
    volume: f32,

    /// Load the initial pattern from a file
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Log engine and reconciliation details to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // keep the prompt readable unless asked for more
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let mut config = SessionConfig::new(cli.bpm, cli.volume, DEFAULT_PATTERN);
    if let Some(path) = &cli.pattern {
        config = config.with_pattern(read_pattern_file(path)?);
    }
    let output = cli.out.map_or(Output::Stdout, Output::File);

    repl::start(config, output)
}
