//! The `Env` configuration record.
//!
//! Responsibilities:
//! - Define `Env`, a named set of settings for one deployment target.
//! - Define `ZeroValue`, the "is this field set" test used by merging,
//!   serialization and default-suppression.
//! - Field-level validation of set values.
//!
//! Does NOT handle:
//! - Merging or defaulting (see `loader::merge`).
//! - Reading process environment variables (see `loader::env`).
//!
//! Invariants:
//! - A field is unset exactly when it equals its type's zero value. An explicit
//!   zero is indistinguishable from "not configured", so an override can never
//!   clear a field. Existing config files rely on this.
//! - Unset fields are omitted when serialized.
//! - The password never appears in `Debug` output.

use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::constants::MAX_TIMEOUT_SECS;
use crate::error::EnvError;

mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret
            .as_ref()
            .map(|s| s.expose_secret())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.into())))
    }
}

mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs.unwrap_or_default()))
    }
}

mod string_or_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    /// Accepts `theme_id: 123` as well as `theme_id: "123"`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(s)) => s,
            Some(Raw::Number(n)) => n.to_string(),
            None => String::new(),
        })
    }
}

/// A present-but-empty key (`timeout:` or `null`) decodes as unset.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whether a value is its type's zero value, i.e. "unset".
pub trait ZeroValue {
    fn is_zero(&self) -> bool;
}

impl ZeroValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ZeroValue for Duration {
    fn is_zero(&self) -> bool {
        *self == Duration::ZERO
    }
}

impl ZeroValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl<T> ZeroValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ZeroValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

/// A named environment: where a theme lives locally and how to reach it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Env {
    /// Environment name. Taken from the map key, never persisted.
    #[serde(skip)]
    pub name: String,
    /// Password or access token for the remote store.
    #[serde(with = "secret_string", skip_serializing_if = "ZeroValue::is_zero")]
    pub password: Option<SecretString>,
    /// Remote theme identifier: `live` or a numeric id.
    #[serde(
        deserialize_with = "string_or_number::deserialize",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub theme_id: String,
    /// Host name of the remote store.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub domain: String,
    /// Local working directory.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub directory: String,
    /// Files containing ignore patterns.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub ignore_files: Vec<String>,
    /// Inline ignore patterns.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub ignores: Vec<String>,
    /// HTTP proxy URL.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub proxy: String,
    /// Request timeout, persisted in whole seconds.
    #[serde(with = "duration_seconds", skip_serializing_if = "ZeroValue::is_zero")]
    pub timeout: Duration,
    /// Refuse operations that modify the remote theme.
    #[serde(
        deserialize_with = "null_as_default",
        skip_serializing_if = "ZeroValue::is_zero"
    )]
    pub readonly: bool,
}

impl PartialEq for Env {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.password.as_ref().map(|p| p.expose_secret())
                == other.password.as_ref().map(|p| p.expose_secret())
            && self.theme_id == other.theme_id
            && self.domain == other.domain
            && self.directory == other.directory
            && self.ignore_files == other.ignore_files
            && self.ignores == other.ignores
            && self.proxy == other.proxy
            && self.timeout == other.timeout
            && self.readonly == other.readonly
    }
}

impl Env {
    /// The working directory as a path.
    pub fn directory_path(&self) -> &Path {
        Path::new(&self.directory)
    }

    /// Checks every set field and returns one message per violation.
    ///
    /// Unset fields are not checked; defaulting happens during merge.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.directory.is_zero() {
            if self.directory.trim().is_empty() {
                errors.push("directory cannot be blank".to_string());
            } else {
                let dir = self.directory_path();
                if dir.exists() && !dir.is_dir() {
                    errors.push(format!("directory '{}' is not a directory", self.directory));
                }
            }
        }

        if self.timeout.as_secs() > MAX_TIMEOUT_SECS {
            errors.push(format!(
                "timeout must be at most {} seconds (got {})",
                MAX_TIMEOUT_SECS,
                self.timeout.as_secs()
            ));
        }

        if !self.theme_id.is_zero()
            && self.theme_id != "live"
            && !self.theme_id.bytes().all(|b| b.is_ascii_digit())
        {
            errors.push(format!(
                "theme_id '{}' must be 'live' or a number",
                self.theme_id
            ));
        }

        if !self.domain.is_zero() && Host::parse(&self.domain).is_err() {
            errors.push(format!("domain '{}' is not a valid host name", self.domain));
        }

        if !self.proxy.is_zero() {
            match Url::parse(&self.proxy) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(format!(
                    "proxy '{}' must use http or https (got {})",
                    self.proxy,
                    url.scheme()
                )),
                Err(e) => errors.push(format!("proxy '{}' is not a valid URL: {}", self.proxy, e)),
            }
        }

        errors
    }

    /// Validates this environment on its own.
    ///
    /// Messages are prefixed with the environment name when one is set.
    pub fn validate(&self) -> Result<(), EnvError> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            return Ok(());
        }
        let errors = if self.name.is_empty() {
            errors
        } else {
            errors
                .into_iter()
                .map(|msg| format!("{}: {}", self.name, msg))
                .collect()
        };
        Err(EnvError::ValidationFailed(errors))
    }
}
