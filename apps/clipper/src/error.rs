//! CLI error handling

use std::fmt;
use std::path::PathBuf;

use clipper_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Errors from config, network and other library crates
    Clipper(clipper_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// The config file already exists and `--force` was not given
    ConfigExists(PathBuf),
    /// Reading or parsing a JSON input file
    InputFile { path: PathBuf, message: String },
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Clipper(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::ConfigExists(path) => write!(
                f,
                "Config file {} already exists (use --force to overwrite)",
                path.display()
            ),
            CliError::InputFile { path, message } => {
                write!(f, "Cannot use {}: {message}", path.display())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Clipper(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<clipper_errors::Error> for CliError {
    fn from(e: clipper_errors::Error) -> Self {
        CliError::Clipper(e)
    }
}

impl From<clipper_errors::ConfigError> for CliError {
    fn from(e: clipper_errors::ConfigError) -> Self {
        CliError::Clipper(e.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
