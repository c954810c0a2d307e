//! Error types for the `forgelog` binary.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::ConfigError;

/// Errors that can stop a `forgelog` run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The transcript file could not be opened or read.
    #[error("cannot read transcript {}: {source}", path.display())]
    InputUnavailable {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The command line could not be understood.
    #[error("{0}")]
    Usage(String),

    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transcript stream failed part way through.
    #[error("parse error: {0}")]
    Parse(#[from] forgelog_core::ParseError),

    /// The JSON report could not be produced.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error. Usage problems exit with 2.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}
