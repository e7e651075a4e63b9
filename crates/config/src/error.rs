//! Error types for environment configuration.
//!
//! Responsibilities:
//! - Define error variants for every load, lookup, validation and save failure.
//! - Carry enough context (names, paths, formats) for debugging.
//!
//! Does NOT handle:
//! - Malformed process environment variables; those are logged and dropped
//!   when the `os_env` snapshot is captured.
//!
//! Invariants:
//! - `ValidationFailed` always carries every violation, never only the first.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::persistence::ConfigFormat;

/// Errors returned by environment configuration operations.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("environment name cannot be blank")]
    InvalidName,

    #[error("no config file found matching {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid {format} found while loading the config file: {message}")]
    InvalidFormat {
        format: ConfigFormat,
        message: String,
    },

    #[error("environment '{0}' does not exist in this environments list")]
    EnvDoesNotExist(String),

    #[error("environment '{0}' was found but not defined")]
    EnvNotDefined(String),

    #[error("no environments defined, nothing to write")]
    NoEnvironmentsDefined,

    #[error("invalid config: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    #[error("failed to encode config as {format}: {message}")]
    Encode {
        format: ConfigFormat,
        message: String,
    },

    #[error("failed to write config file at {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
