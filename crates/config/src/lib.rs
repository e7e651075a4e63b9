//! Layered environment configuration.
//!
//! This crate loads named environments from a YAML or JSON config file,
//! merges them with process environment variables, caller overrides and
//! built-in defaults, validates them, and writes changes back to disk.

pub mod constants;
mod error;
mod loader;
pub mod persistence;
pub mod types;

pub use error::EnvError;
pub use loader::{
    default_env, env_var_or_none, load_dotenv, merge_env, merge_env_with_defaults, os_env,
};
pub use persistence::{ConfigFormat, ConfigStore, default_config_path, resolve_config_path};
pub use types::{Env, EnvEntry, ZeroValue};
