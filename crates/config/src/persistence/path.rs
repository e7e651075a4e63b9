//! Config file path resolution.
//!
//! Responsibilities:
//! - Match a nominal config path to an existing file and its format.
//! - Determine the default config file location.
//!
//! Does NOT handle:
//! - Reading or decoding file contents (see codec.rs, store.rs).
//!
//! Invariants:
//! - Extensions are checked in the fixed order yml, yaml, json.
//! - A candidate matches only if it exists AND the caller's path carries that
//!   same extension. There is no fallback to a sibling with another extension.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CONFIG_FILE, ENV_CONFIG_PATH, SUPPORTED_EXTENSIONS};
use crate::error::EnvError;
use crate::loader::env_var_or_none;

/// Serialization format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Maps a file extension (without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "yml" | "yaml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Format used when writing to `path`: JSON for `.json`, YAML otherwise.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(ConfigFormat::Yaml)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "yaml"),
            ConfigFormat::Json => write!(f, "json"),
        }
    }
}

/// Resolves `config_path` to an existing config file and its format.
///
/// # Errors
///
/// Returns `EnvError::NotFound` if no supported extension matches.
pub fn resolve_config_path(config_path: &Path) -> Result<(PathBuf, ConfigFormat), EnvError> {
    let not_found = || EnvError::NotFound {
        path: config_path.to_path_buf(),
    };
    let file_name = config_path.file_name().ok_or_else(not_found)?;
    let requested_ext = requested_extension(file_name);
    let dir = config_path.parent().unwrap_or_else(|| Path::new(""));

    for ext in SUPPORTED_EXTENSIONS {
        if requested_ext != Some(ext) {
            continue;
        }
        // With the extension matching, `<stem>.<ext>` is the file name itself.
        let candidate = dir.join(file_name);
        if candidate.exists()
            && let Some(format) = ConfigFormat::from_extension(ext)
        {
            return Ok((candidate, format));
        }
    }

    Err(not_found())
}

/// Text after the last `.` of a file name, leading dot included, so
/// `.yml` has the extension `yml`.
fn requested_extension(file_name: &OsStr) -> Option<&str> {
    let bytes = file_name.as_encoded_bytes();
    let dot = bytes.iter().rposition(|&b| b == b'.')?;
    std::str::from_utf8(&bytes[dot + 1..]).ok()
}

/// Returns the default config file path.
///
/// `ENVKIT_CONFIG_PATH` wins when set; otherwise `config.yml` in the
/// working directory.
pub fn default_config_path() -> PathBuf {
    env_var_or_none(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
