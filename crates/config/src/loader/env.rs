//! Process environment binding.
//!
//! Responsibilities:
//! - Read `ENVKIT_*` variables into an `Env`-shaped snapshot (`os_env`).
//! - Provide `env_var_or_none` for reading variables with empty/whitespace filtering.
//! - Opt-in `.env` loading gated by `DOTENV_DISABLED`.
//!
//! Does NOT handle:
//! - Merging the snapshot into stored environments (see merge.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Malformed values are logged and left unset; capture never fails.

use std::time::Duration;

use secrecy::SecretString;

use crate::constants::{
    ENV_DIRECTORY, ENV_DOMAIN, ENV_DOTENV_DISABLED, ENV_IGNORE_FILES, ENV_IGNORES, ENV_PASSWORD,
    ENV_PROXY, ENV_READONLY, ENV_THEME_ID, ENV_TIMEOUT,
};
use crate::error::EnvError;
use crate::types::Env;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn list_var(key: &str) -> Vec<String> {
    env_var_or_none(key)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Capture the `ENVKIT_*` variables of the current process as an `Env`.
///
/// Absent variables leave their field unset. A variable that cannot be
/// parsed is reported with `tracing::warn!` and also left unset.
pub fn os_env() -> Env {
    let mut env = Env::default();

    if let Some(password) = env_var_or_none(ENV_PASSWORD) {
        env.password = Some(SecretString::new(password.into()));
    }
    if let Some(theme_id) = env_var_or_none(ENV_THEME_ID) {
        env.theme_id = theme_id;
    }
    if let Some(domain) = env_var_or_none(ENV_DOMAIN) {
        env.domain = domain;
    }
    if let Some(directory) = env_var_or_none(ENV_DIRECTORY) {
        env.directory = directory;
    }
    env.ignore_files = list_var(ENV_IGNORE_FILES);
    env.ignores = list_var(ENV_IGNORES);
    if let Some(proxy) = env_var_or_none(ENV_PROXY) {
        env.proxy = proxy;
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        match timeout.parse::<u64>() {
            Ok(secs) => env.timeout = Duration::from_secs(secs),
            Err(e) => tracing::warn!(
                var = ENV_TIMEOUT,
                error = %e,
                "Ignoring timeout that is not a whole number of seconds"
            ),
        }
    }
    if let Some(readonly) = env_var_or_none(ENV_READONLY) {
        match parse_bool(&readonly) {
            Some(value) => env.readonly = value,
            None => tracing::warn!(
                var = ENV_READONLY,
                "Ignoring readonly flag that is not true or false"
            ),
        }
    }

    env
}

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from a `.env` file if present.
///
/// Call this before constructing a store so the variables are part of the
/// `os_env` snapshot. Does nothing when `DOTENV_DISABLED` is `true` or `1`.
/// A missing `.env` file is not an error.
///
/// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
pub fn load_dotenv() -> Result<(), EnvError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(EnvError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(EnvError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(EnvError::DotenvUnknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_ENVKIT_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty string env var should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_ENVKIT_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    #[serial]
    fn test_os_env_binds_every_field() {
        temp_env::with_vars(
            [
                (ENV_PASSWORD, Some("hunter2")),
                (ENV_THEME_ID, Some("live")),
                (ENV_DOMAIN, Some("shop.example.com")),
                (ENV_DIRECTORY, Some("themes/prod")),
                (ENV_IGNORE_FILES, Some(".themeignore")),
                (ENV_IGNORES, Some("*.png, *.jpg ,,")),
                (ENV_PROXY, Some("http://localhost:3128")),
                (ENV_TIMEOUT, Some("90")),
                (ENV_READONLY, Some("true")),
            ],
            || {
                let env = os_env();
                assert_eq!(env.password.as_ref().unwrap().expose_secret(), "hunter2");
                assert_eq!(env.theme_id, "live");
                assert_eq!(env.domain, "shop.example.com");
                assert_eq!(env.directory, "themes/prod");
                assert_eq!(env.ignore_files, vec![".themeignore".to_string()]);
                assert_eq!(env.ignores, vec!["*.png".to_string(), "*.jpg".to_string()]);
                assert_eq!(env.proxy, "http://localhost:3128");
                assert_eq!(env.timeout, Duration::from_secs(90));
                assert!(env.readonly);
                assert!(env.name.is_empty());
            },
        );
    }

    #[test]
    #[serial]
    fn test_os_env_absent_variables_stay_unset() {
        temp_env::with_vars_unset(
            [
                ENV_PASSWORD,
                ENV_THEME_ID,
                ENV_DOMAIN,
                ENV_DIRECTORY,
                ENV_IGNORE_FILES,
                ENV_IGNORES,
                ENV_PROXY,
                ENV_TIMEOUT,
                ENV_READONLY,
            ],
            || {
                assert_eq!(os_env(), Env::default());
            },
        );
    }

    #[test]
    #[serial]
    fn test_os_env_malformed_values_degrade_to_unset() {
        temp_env::with_vars(
            [
                (ENV_TIMEOUT, Some("thirty")),
                (ENV_READONLY, Some("maybe")),
                (ENV_DOMAIN, Some("shop.example.com")),
            ],
            || {
                let env = os_env();
                assert_eq!(env.timeout, Duration::ZERO);
                assert!(!env.readonly);
                assert_eq!(env.domain, "shop.example.com");
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_dotenv_respects_disabled_flag() {
        temp_env::with_var(ENV_DOTENV_DISABLED, Some("1"), || {
            assert!(load_dotenv().is_ok());
        });
    }
}
