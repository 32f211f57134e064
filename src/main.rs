//! Sunwood -- a greedy turn agent for the hex tree and sun game.
//!
//! Reads the board and one block per turn from stdin and writes exactly one
//! action line per turn to stdout. Diagnostics go to stderr.
//!
//! Usage:
//!   sunwood [OPTIONS]
//!
//! Options:
//!   --config PATH   JSON agent configuration (default: built-in)
//!   --trace PATH    Write a JSONL decision trace to PATH
//!   --help          Show this message

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use sunwood::config::AgentConfig;
use sunwood::engine::{run_session, AgentError};

struct Args {
    config: Option<PathBuf>,
    trace: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (warnings and errors by default).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(None)` when help was requested.
fn parse_args<I>(mut iter: I) -> Result<Option<Args>, String>
where
    I: Iterator<Item = String>,
{
    let mut args = Args {
        config: None,
        trace: None,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("missing value for --config")?;
                args.config = Some(PathBuf::from(path));
            }
            "--trace" => {
                let path = iter.next().ok_or("missing value for --trace")?;
                args.trace = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Some(args))
}

fn run(args: Args) -> Result<(), AgentError> {
    let config = match &args.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };

    let mut trace = match &args.trace {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    run_session(
        stdin.lock(),
        &mut out,
        config,
        trace.as_mut().map(|w| w as &mut dyn Write),
    )?;
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: sunwood [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config PATH   JSON agent configuration (default: built-in)");
    eprintln!("  --trace PATH    Write a JSONL decision trace to PATH");
    eprintln!("  --help          Show this message");
}
