//! Integration tests for the public configuration API.
//!
//! These tests drive a `ConfigStore` end to end through files on disk and
//! scoped process environment variables.

use std::time::Duration;

use envkit_config::constants::{ENV_PASSWORD, ENV_THEME_ID, ENV_TIMEOUT};
use envkit_config::{ConfigStore, Env, EnvError, default_env, env_var_or_none};
use secrecy::ExposeSecret;
use serial_test::serial;
use tempfile::TempDir;

const CONFIG: &str = "development:\n  theme_id: 100\n  timeout: 15\nstaging:\n";

fn write_config(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, CONFIG).unwrap();
    path
}

/// Process variables override file values; caller overrides beat both.
#[test]
#[serial]
fn test_precedence_file_env_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.yml");

    temp_env::with_vars(
        [
            (ENV_TIMEOUT, Some("45")),
            (ENV_PASSWORD, Some("from-env")),
            (ENV_THEME_ID, None),
        ],
        || {
            let store = ConfigStore::load(&path).expect("config should load");

            let env = store.get("development", &[]).unwrap();
            assert_eq!(env.theme_id, "100");
            assert_eq!(env.timeout, Duration::from_secs(45));
            assert_eq!(env.password.as_ref().unwrap().expose_secret(), "from-env");
            assert_eq!(env.directory, default_env().directory);

            let cli = Env {
                timeout: Duration::from_secs(5),
                ..Default::default()
            };
            let env = store.get("development", &[&cli]).unwrap();
            assert_eq!(env.timeout, Duration::from_secs(5));
        },
    );
}

#[test]
#[serial]
fn test_unknown_and_undefined_environments() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.yml");
    let store = ConfigStore::load(&path).unwrap();

    assert!(matches!(
        store.get("production", &[]),
        Err(EnvError::EnvDoesNotExist(_))
    ));
    assert!(matches!(
        store.get("staging", &[]),
        Err(EnvError::EnvNotDefined(_))
    ));
}

#[test]
#[serial]
fn test_set_save_load_cycle() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.yml");

    temp_env::with_vars_unset([ENV_TIMEOUT, ENV_PASSWORD, ENV_THEME_ID], || {
        let mut store = ConfigStore::load(&path).unwrap();
        store
            .set(
                "production",
                Env {
                    theme_id: "live".to_string(),
                    ..Default::default()
                },
                &[],
            )
            .unwrap();
        store.save().unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.names().collect::<Vec<_>>(), vec!["development", "production"]);
        assert_eq!(reloaded.get("production", &[]).unwrap().theme_id, "live");
        assert_eq!(
            reloaded.get("development", &[]).unwrap().timeout,
            Duration::from_secs(15)
        );
    });
}

#[test]
fn test_blank_name_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = ConfigStore::new(dir.path().join("config.yml"));

    assert!(matches!(
        store.set("", Env::default(), &[]),
        Err(EnvError::InvalidName)
    ));
    assert!(store.is_empty());
}

#[test]
#[serial]
fn test_env_var_or_none_trims_and_ignores_blank() {
    temp_env::with_var(ENV_TIMEOUT, Some("  42 "), || {
        assert_eq!(env_var_or_none(ENV_TIMEOUT), Some("42".to_string()));
    });
    temp_env::with_var(ENV_TIMEOUT, Some("   "), || {
        assert_eq!(env_var_or_none(ENV_TIMEOUT), None);
    });
}
