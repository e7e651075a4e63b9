//! Tests for the environment store.
//!
//! Responsibilities:
//! - Test get/set merging and the unknown/undefined distinction.
//! - Test loading from YAML and JSON files, including failure modes.
//! - Test default-suppression and writing on save.
//!
//! Invariants:
//! - Stores are built with an empty `os_env` unless a test sets process
//!   variables, in which case it is marked `#[serial]`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::Path;

use super::ConfigStore;
use crate::types::Env;


/// A store at `path` that ignores the process environment.
pub fn isolated_store(path: &Path) -> ConfigStore {
    ConfigStore::new(path).with_os_env(Env::default())
}

/// Writes `contents` to `dir/name` and returns the path.
pub fn write_config(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
