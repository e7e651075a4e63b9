//! Config file persistence for named environments.
//!
//! Responsibilities:
//! - Resolve a nominal config path to an existing YAML or JSON file.
//! - Decode and encode the environment map.
//! - Own the environments in a `ConfigStore` with load, get, set and save.
//!
//! Does NOT handle:
//! - Reading process environment variables (see `loader`).
//! - The merge rule itself (see `loader::merge`).
//!
//! Invariants:
//! - Environment names are unique within a configuration file.
//! - Values equal to the defaults are never written.
//! - An empty environment map is never written.

mod codec;
mod path;
mod store;

#[cfg(test)]
mod tests;

pub use path::{ConfigFormat, default_config_path, resolve_config_path};
pub use store::ConfigStore;
