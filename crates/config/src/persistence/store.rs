//! The environment store.
//!
//! Responsibilities:
//! - Own the named environments loaded from (and saved to) one config file.
//! - Apply the process environment snapshot and caller overrides on `get`/`set`.
//! - Validate every defined environment, aggregating all failures.
//! - Suppress default values and write the file on `save`.
//!
//! Does NOT handle:
//! - Path resolution (see path.rs) or encoding (see codec.rs).
//! - Concurrent access; mutation requires `&mut self`.
//!
//! Invariants:
//! - Environment names are non-empty and unique (map keys).
//! - `os_env` is captured once at construction and never changes afterwards.
//! - `get` never mutates the store.
//! - `save` writes nothing when no defined environment remains.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::codec::{EnvMap, decode, encode};
use super::path::{ConfigFormat, resolve_config_path};
use crate::error::EnvError;
use crate::loader::{default_env, merge_env_with_defaults, os_env};
use crate::types::{Env, EnvEntry, ZeroValue};

/// Named environments backed by a config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    envs: EnvMap,
    os_env: Env,
    defaults: Env,
    path: PathBuf,
}

impl ConfigStore {
    /// Creates an empty store for `config_path`.
    ///
    /// The file is not touched. The current process environment is captured
    /// as the `os_env` override layer.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            envs: EnvMap::new(),
            os_env: os_env(),
            defaults: default_env().clone(),
            path: config_path.into(),
        }
    }

    /// Loads the store from `config_path`.
    ///
    /// Use [`ConfigStore::new`] followed by [`ConfigStore::reload`] to keep
    /// the partially loaded store when loading fails.
    pub fn load(config_path: impl Into<PathBuf>) -> Result<Self, EnvError> {
        let mut store = Self::new(config_path);
        store.reload()?;
        Ok(store)
    }

    /// Replaces the process environment snapshot.
    pub fn with_os_env(mut self, os_env: Env) -> Self {
        self.os_env = os_env;
        self
    }

    /// Replaces the defaults used for merging and save-suppression.
    pub fn with_defaults(mut self, defaults: Env) -> Self {
        self.defaults = defaults;
        self
    }

    /// Reads the config file into this store, replacing its environments.
    ///
    /// A file that vanishes between resolution and reading leaves the store
    /// empty without error. On a validation failure the decoded environments
    /// stay in the store.
    ///
    /// # Errors
    ///
    /// - `EnvError::NotFound` if the path matches no supported file.
    /// - `EnvError::Read` if the file exists but cannot be read.
    /// - `EnvError::InvalidFormat` if the contents do not parse.
    /// - `EnvError::ValidationFailed` if any environment is invalid.
    pub fn reload(&mut self) -> Result<(), EnvError> {
        let (path, format) = resolve_config_path(&self.path)?;

        match std::fs::read(&path) {
            Ok(bytes) => {
                let mut envs = decode(&bytes, format)?;
                for (name, entry) in envs.iter_mut() {
                    if let EnvEntry::Defined(env) = entry {
                        env.name = name.clone();
                    }
                }
                self.envs = envs;
                tracing::debug!(
                    path = %path.display(),
                    %format,
                    environments = self.envs.len(),
                    "Config loaded"
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file not found, starting empty");
                self.envs.clear();
            }
            Err(source) => return Err(EnvError::Read { path, source }),
        }

        self.validate()
    }

    /// Returns `name` merged with the process environment and `overrides`.
    ///
    /// The stored environment is left unchanged.
    ///
    /// # Errors
    ///
    /// - `EnvError::EnvDoesNotExist` if `name` is not in the store.
    /// - `EnvError::EnvNotDefined` if `name` is declared without configuration.
    pub fn get(&self, name: &str, overrides: &[&Env]) -> Result<Env, EnvError> {
        match self.envs.get(name) {
            None => Err(EnvError::EnvDoesNotExist(name.to_string())),
            Some(EnvEntry::Undefined) => Err(EnvError::EnvNotDefined(name.to_string())),
            Some(EnvEntry::Defined(env)) => self.merge(name, env, overrides),
        }
    }

    /// Stores `initial` merged with the process environment and `overrides`
    /// under `name`, replacing any previous entry.
    ///
    /// The merged environment is stored before it is validated: on
    /// `EnvError::ValidationFailed` the entry is still present.
    ///
    /// # Errors
    ///
    /// - `EnvError::InvalidName` if `name` is empty; nothing is stored.
    /// - `EnvError::ValidationFailed` if the merged environment is invalid.
    pub fn set(&mut self, name: &str, initial: Env, overrides: &[&Env]) -> Result<Env, EnvError> {
        if name.is_empty() {
            return Err(EnvError::InvalidName);
        }
        let env = self.merge(name, &initial, overrides)?;
        self.envs
            .insert(name.to_string(), EnvEntry::Defined(env.clone()));
        env.validate()?;
        Ok(env)
    }

    /// Declares `name` without configuring it. Existing entries are kept.
    pub fn declare(&mut self, name: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::InvalidName);
        }
        self.envs
            .entry(name.to_string())
            .or_insert(EnvEntry::Undefined);
        Ok(())
    }

    fn merge(&self, name: &str, base: &Env, overrides: &[&Env]) -> Result<Env, EnvError> {
        let mut chain = Vec::with_capacity(overrides.len() + 1);
        chain.push(&self.os_env);
        chain.extend_from_slice(overrides);
        merge_env_with_defaults(name, &self.defaults, base, &chain)
    }

    /// Validates every defined environment.
    ///
    /// # Errors
    ///
    /// `EnvError::ValidationFailed` listing the failures of all environments,
    /// each prefixed with its name.
    pub fn validate(&self) -> Result<(), EnvError> {
        let errors: Vec<String> = self
            .envs
            .iter()
            .filter_map(|(name, entry)| entry.as_env().map(|env| (name, env)))
            .flat_map(|(name, env)| {
                env.validation_errors()
                    .into_iter()
                    .map(move |msg| format!("{}: {}", name, msg))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EnvError::ValidationFailed(errors))
        }
    }

    /// Writes the defined environments to the store's path.
    ///
    /// Undefined entries are removed and fields equal to the defaults are
    /// reset to unset before writing; both changes are kept in the store.
    /// The file is JSON when the path ends in `.json`, YAML otherwise.
    ///
    /// # Errors
    ///
    /// - `EnvError::NoEnvironmentsDefined` if nothing is left to write; the
    ///   file is not touched.
    /// - `EnvError::Encode` or `EnvError::Write` on serialization or I/O failure.
    pub fn save(&mut self) -> Result<(), EnvError> {
        self.envs.retain(|_, entry| entry.is_defined());
        for entry in self.envs.values_mut() {
            if let EnvEntry::Defined(env) = entry {
                suppress_defaults(env, &self.defaults);
            }
        }

        if self.envs.is_empty() {
            return Err(EnvError::NoEnvironmentsDefined);
        }

        let format = ConfigFormat::for_path(&self.path);
        let contents = encode(&self.envs, format)?;
        self.write_file(&contents)?;

        tracing::debug!(
            path = %self.path.display(),
            %format,
            environments = self.envs.len(),
            "Config saved"
        );
        Ok(())
    }

    fn write_file(&self, contents: &[u8]) -> Result<(), EnvError> {
        let write_err = |source: std::io::Error| EnvError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(contents).map_err(write_err)?;
        file.flush().map_err(write_err)
    }

    /// Names of all entries, defined or not, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.envs.keys().map(String::as_str)
    }

    /// The raw stored entry for `name`, without merging.
    pub fn entry(&self, name: &str) -> Option<&EnvEntry> {
        self.envs.get(name)
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    /// The config file this store saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The process environment snapshot applied on every merge.
    pub fn os_env(&self) -> &Env {
        &self.os_env
    }

    pub fn defaults(&self) -> &Env {
        &self.defaults
    }
}

fn suppress_field<T: ZeroValue + Default + PartialEq>(field: &mut T, default: &T) {
    if !default.is_zero() && *field == *default {
        *field = T::default();
    }
}

fn suppress_defaults(env: &mut Env, defaults: &Env) {
    suppress_field(&mut env.directory, &defaults.directory);
    suppress_field(&mut env.timeout, &defaults.timeout);
    suppress_field(&mut env.theme_id, &defaults.theme_id);
    suppress_field(&mut env.domain, &defaults.domain);
    suppress_field(&mut env.proxy, &defaults.proxy);
    suppress_field(&mut env.ignore_files, &defaults.ignore_files);
    suppress_field(&mut env.ignores, &defaults.ignores);
    suppress_field(&mut env.readonly, &defaults.readonly);
}
