//! Centralized constants for environment configuration.
//!
//! This module contains default values, bounds and variable names used
//! across the crate to avoid magic value duplication.

// =============================================================================
// Defaults
// =============================================================================

/// Default working directory for an environment.
pub const DEFAULT_DIRECTORY: &str = ".";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file used when neither a path nor `ENVKIT_CONFIG_PATH` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

// =============================================================================
// Bounds
// =============================================================================

/// Maximum allowed timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

// =============================================================================
// File Formats
// =============================================================================

/// Config file extensions, in resolution priority order.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_PASSWORD: &str = "ENVKIT_PASSWORD";
pub const ENV_THEME_ID: &str = "ENVKIT_THEME_ID";
pub const ENV_DOMAIN: &str = "ENVKIT_DOMAIN";
pub const ENV_DIRECTORY: &str = "ENVKIT_DIRECTORY";
pub const ENV_IGNORE_FILES: &str = "ENVKIT_IGNORE_FILES";
pub const ENV_IGNORES: &str = "ENVKIT_IGNORES";
pub const ENV_PROXY: &str = "ENVKIT_PROXY";
pub const ENV_TIMEOUT: &str = "ENVKIT_TIMEOUT";
pub const ENV_READONLY: &str = "ENVKIT_READONLY";

/// Overrides the default config file location.
pub const ENV_CONFIG_PATH: &str = "ENVKIT_CONFIG_PATH";

/// Set to `true` or `1` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
