//! Command-line argument handling.
//!
//! ```text
//! forgelog <transcript> [--debug] [--format table|json] [--config <file>]
//! ```

use std::path::PathBuf;

use crate::config::{ForgelogConfig, OutputFormat};
use crate::error::CliError;

/// Usage line shown on argument errors and `--help`.
pub const USAGE: &str =
    "usage: forgelog <transcript> [--debug] [--format table|json] [--config <file>]";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Report on a transcript.
    Report(CliArgs),
    /// Print usage and exit.
    Help,
}

impl Command {
    /// Parse arguments, excluding the program name.
    ///
    /// `--help` anywhere on the line wins over every other argument.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] when a report was requested with bad
    /// arguments.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        if args.iter().any(|arg| arg == "--help" || arg == "-h") {
            return Ok(Self::Help);
        }
        CliArgs::parse(args).map(Self::Report)
    }
}

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Path of the transcript to read.
    pub transcript: PathBuf,
    /// `--debug` was given.
    pub debug: bool,
    /// `--format` value, if given.
    pub format: Option<OutputFormat>,
    /// `--config` file, if given.
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] for a missing transcript path, an unknown
    /// flag, a flag missing its value or a bad format name.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut transcript = None;
        let mut debug = false;
        let mut format = None;
        let mut config = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--debug" | "-d" => debug = true,
                "--format" | "-f" => {
                    let value = required_value(&mut args, "--format")?;
                    format = Some(
                        value
                            .parse::<OutputFormat>()
                            .map_err(|e| CliError::Usage(format!("{e}\n{USAGE}")))?,
                    );
                }
                "--config" | "-c" => {
                    config = Some(PathBuf::from(required_value(&mut args, "--config")?));
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(CliError::Usage(format!("unknown option: {flag}\n{USAGE}")));
                }
                _ if transcript.is_some() => {
                    return Err(CliError::Usage(format!("unexpected argument: {arg}\n{USAGE}")));
                }
                _ => transcript = Some(PathBuf::from(arg)),
            }
        }

        let transcript = transcript
            .ok_or_else(|| CliError::Usage(format!("missing transcript path\n{USAGE}")))?;
        Ok(Self {
            transcript,
            debug,
            format,
            config,
        })
    }

    /// Apply flag values on top of loaded configuration.
    pub const fn apply_to(&self, config: &mut ForgelogConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
    }
}

fn required_value(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a value\n{USAGE}")))
}
