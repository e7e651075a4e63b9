//! Built-in default environment.
//!
//! Responsibilities:
//! - Define the fallback `Env` used when no other source sets a field.
//!
//! Invariants:
//! - Default values are: directory=".", timeout=30s.
//! - The value is built once and never mutated; stores hold their own copy.

use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{DEFAULT_DIRECTORY, DEFAULT_TIMEOUT_SECS};
use crate::types::Env;

static DEFAULT_ENV: LazyLock<Env> = LazyLock::new(|| Env {
    directory: DEFAULT_DIRECTORY.to_string(),
    timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    ..Default::default()
});

/// The process-wide default environment.
pub fn default_env() -> &'static Env {
    &DEFAULT_ENV
}
