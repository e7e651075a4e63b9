//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define the `Env` record and its field-level validation.
//! - Define `EnvEntry`, the declared/defined slot stored per environment name.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Merging, defaulting or process environment binding (see `loader` module).
//! - Reading or writing config files (see `persistence` module).
//!
//! Invariants:
//! - Secrets use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod entry;
mod env;

pub use entry::EnvEntry;
pub use env::{Env, ZeroValue};
