//! Store entries: declared-but-undefined vs. defined environments.

use serde::{Deserialize, Serialize};

use super::env::Env;

/// A named slot in the environment store.
///
/// A config file may name an environment without configuring it
/// (`staging:` with no body); that decodes to `Undefined`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Env>", into = "Option<Env>")]
pub enum EnvEntry {
    Undefined,
    Defined(Env),
}

impl EnvEntry {
    /// Returns the environment if this entry is defined.
    pub fn as_env(&self) -> Option<&Env> {
        match self {
            EnvEntry::Defined(env) => Some(env),
            EnvEntry::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, EnvEntry::Defined(_))
    }
}

impl From<Option<Env>> for EnvEntry {
    fn from(value: Option<Env>) -> Self {
        match value {
            Some(env) => EnvEntry::Defined(env),
            None => EnvEntry::Undefined,
        }
    }
}

impl From<EnvEntry> for Option<Env> {
    fn from(entry: EnvEntry) -> Self {
        match entry {
            EnvEntry::Defined(env) => Some(env),
            EnvEntry::Undefined => None,
        }
    }
}
