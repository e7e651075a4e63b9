//! Layered merging of environments.
//!
//! Responsibilities:
//! - Fold a chain of override `Env`s onto a base `Env`, field by field.
//! - Fill fields left unset by every layer from the defaults.
//!
//! Invariants:
//! - Overrides apply in order; a later set field replaces the accumulated value.
//! - An unset (zero) field in an override never clears an accumulated value.
//! - Inputs are never mutated; the result is a fresh `Env` carrying `name`.

use crate::error::EnvError;
use crate::types::{Env, ZeroValue};

use super::defaults::default_env;

fn overlay<T: ZeroValue + Clone>(acc: &mut T, layer: &T) {
    if !layer.is_zero() {
        *acc = layer.clone();
    }
}

fn apply_layer(acc: &mut Env, layer: &Env) {
    overlay(&mut acc.password, &layer.password);
    overlay(&mut acc.theme_id, &layer.theme_id);
    overlay(&mut acc.domain, &layer.domain);
    overlay(&mut acc.directory, &layer.directory);
    overlay(&mut acc.ignore_files, &layer.ignore_files);
    overlay(&mut acc.ignores, &layer.ignores);
    overlay(&mut acc.proxy, &layer.proxy);
    overlay(&mut acc.timeout, &layer.timeout);
    overlay(&mut acc.readonly, &layer.readonly);
}

/// Merge `overrides` onto `base` and fill the gaps from the built-in defaults.
pub fn merge_env(name: &str, base: &Env, overrides: &[&Env]) -> Result<Env, EnvError> {
    merge_env_with_defaults(name, default_env(), base, overrides)
}

/// Merge `overrides` onto `base` and fill the gaps from `defaults`.
///
/// # Errors
///
/// Returns `EnvError::InvalidName` if `name` is empty.
pub fn merge_env_with_defaults(
    name: &str,
    defaults: &Env,
    base: &Env,
    overrides: &[&Env],
) -> Result<Env, EnvError> {
    if name.is_empty() {
        return Err(EnvError::InvalidName);
    }

    let mut merged = base.clone();
    for layer in overrides {
        apply_layer(&mut merged, layer);
    }

    // Defaults fill only unset fields: lay the merged layers over them.
    let mut result = defaults.clone();
    apply_layer(&mut result, &merged);
    result.name = name.to_string();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::{ExposeSecret, SecretString};
    use std::time::Duration;

    fn timeout(secs: u64) -> Env {
        Env {
            timeout: Duration::from_secs(secs),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let result = merge_env("", &Env::default(), &[]);
        assert!(matches!(result, Err(EnvError::InvalidName)));
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let merged = merge_env("development", &Env::default(), &[]).unwrap();
        assert_eq!(merged.name, "development");
        assert_eq!(merged.directory, ".");
        assert_eq!(merged.timeout, Duration::from_secs(30));
        assert!(merged.theme_id.is_empty());
    }

    #[test]
    fn test_last_override_wins() {
        let merged = merge_env("dev", &timeout(10), &[&timeout(20), &timeout(40)]).unwrap();
        assert_eq!(merged.timeout, Duration::from_secs(40));
    }

    #[test]
    fn test_zero_override_does_not_reset_field() {
        let merged = merge_env("dev", &timeout(30), &[&timeout(0)]).unwrap();
        assert_eq!(merged.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_override_fields_are_independent() {
        let base = Env {
            theme_id: "111".to_string(),
            domain: "base.example.com".to_string(),
            ..Default::default()
        };
        let layer = Env {
            domain: "layer.example.com".to_string(),
            password: Some(SecretString::new("pw".to_string().into())),
            readonly: true,
            ..Default::default()
        };
        let merged = merge_env("dev", &base, &[&layer]).unwrap();
        assert_eq!(merged.theme_id, "111");
        assert_eq!(merged.domain, "layer.example.com");
        assert_eq!(merged.password.as_ref().unwrap().expose_secret(), "pw");
        assert!(merged.readonly);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let base = timeout(10);
        let layer = Env {
            directory: "themes".to_string(),
            ..Default::default()
        };
        let _ = merge_env("dev", &base, &[&layer]).unwrap();
        assert_eq!(base, timeout(10));
        assert!(base.directory.is_empty());
        assert!(layer.name.is_empty());
    }

    #[test]
    fn test_custom_defaults_are_used() {
        let defaults = Env {
            directory: "/srv/themes".to_string(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let merged = merge_env_with_defaults("dev", &defaults, &timeout(9), &[]).unwrap();
        assert_eq!(merged.directory, "/srv/themes");
        assert_eq!(merged.timeout, Duration::from_secs(9));
    }
}
