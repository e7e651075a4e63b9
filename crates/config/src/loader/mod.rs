//! Environment sources and merging.
//!
//! Responsibilities:
//! - Capture process environment variables as an `Env` snapshot.
//! - Provide the built-in default `Env`.
//! - Merge a base `Env` with an ordered chain of overrides and the defaults.
//!
//! Does NOT handle:
//! - Reading or writing config files (see `persistence`).
//!
//! Invariants / Assumptions:
//! - Later overrides take precedence over earlier ones and over the base.
//! - Defaults only supply fields no other source set.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod defaults;
mod env;
mod merge;

pub use defaults::default_env;
pub use env::{env_var_or_none, load_dotenv, os_env};
pub use merge::{merge_env, merge_env_with_defaults};
