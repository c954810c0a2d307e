//! `forgelog`: summarise a Crucible game transcript.
//!
//! Reads one transcript file, folds it into a game state and prints either
//! two text tables or the full state as JSON.
//!
//! # Startup
//!
//! ```text
//! args --> config (defaults, YAML, env, flags) --> logging --> read --> fold --> render
//! ```
//!
//! Logs go to stderr so the report on stdout stays clean.

mod cli;
mod config;
mod error;
mod report;
mod transcript;

use std::process::ExitCode;

use forgelog_core::{FoldOptions, parse_reader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, USAGE};
use crate::config::ForgelogConfig;
use crate::error::CliError;

/// Application entry point.
fn main() -> ExitCode {
    if let Err(e) = run() {
        error!(error = %e, "forgelog failed");
        eprintln!("forgelog: {e}");
        return e.exit_code();
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), CliError> {
    let args = match Command::parse(std::env::args().skip(1))? {
        Command::Report(args) => args,
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let mut config = ForgelogConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level())),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        transcript = %args.transcript.display(),
        debug = config.debug,
        format = ?config.format,
        "forgelog starting"
    );

    let text = transcript::read_transcript(&args.transcript)?;
    let state = parse_reader(text.as_bytes(), FoldOptions { trace: config.debug })?;

    info!(
        lines_read = state.lines_read,
        events_applied = state.events_applied,
        diagnostics = state.diagnostics.len(),
        "transcript folded"
    );

    let source = args.transcript.display().to_string();
    print!("{}", report::render(&state, &source, config.format)?);
    Ok(())
}
