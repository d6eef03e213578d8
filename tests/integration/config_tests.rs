use dupseek::config::{Config, ConfigError};
use dupseek::output::OutputFormat;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::tempdir;

/// Serializes tests that read or write `DUPSEEK_*` variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_config_load_defaults() {
    // Defaults only, so the environment of other tests cannot leak in.
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[scan]
path = "/srv/media"
max_depth = 3
format = "json"

[ticker]
shutdown_timeout_ms = 250
"#,
    )
    .unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert_eq!(config.scan.path, PathBuf::from("/srv/media"));
    assert_eq!(config.scan.max_depth, 3);
    assert_eq!(config.scan.format, OutputFormat::Json);
    assert_eq!(config.ticker.shutdown_timeout_ms, 250);
    // Unset keys keep their defaults.
    assert_eq!(config.ticker.interval_ms, 1000);
}

#[test]
fn test_config_env_overrides_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[ticker]\nmax_cleanup_ms = 5\n").unwrap();

    let _guard = env_lock();
    std::env::set_var("DUPSEEK_TICKER__MAX_CLEANUP_MS", "77");
    let config = Config::load_from(Some(&config_path));
    std::env::remove_var("DUPSEEK_TICKER__MAX_CLEANUP_MS");

    assert_eq!(config.unwrap().ticker.max_cleanup_ms, 77);
}

#[test]
fn test_config_explicit_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[scan]\nmax_depth = -1\n").unwrap();

    let _guard = env_lock();
    let config = Config::load_from(Some(&config_path)).unwrap();
    assert_eq!(config.scan.max_depth, -1);
}

#[test]
fn test_config_invalid_value_is_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[scan]\nformat = \"xml\"\n").unwrap();

    let _guard = env_lock();
    let err = Config::load_from(Some(&config_path)).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_config_missing_file_is_error() {
    let temp_dir = tempdir().unwrap();
    let err = Config::load_from(Some(&temp_dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_config_invalid_env_layer_is_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[scan]\npath = \"/srv/media\"\n").unwrap();

    let _guard = env_lock();
    std::env::set_var("DUPSEEK_SCAN__MAX_DEPTH", "two");
    let from_file = Config::load_from(Some(&config_path));
    let from_default = Config::load_from(None);
    std::env::remove_var("DUPSEEK_SCAN__MAX_DEPTH");

    // The valid path in the file must not be swapped for the default root.
    assert!(matches!(from_file, Err(ConfigError::Invalid(_))));
    assert!(matches!(from_default, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_valid_env_layer_applies() {
    let _guard = env_lock();
    std::env::set_var("DUPSEEK_SCAN__PATH", "/srv/media");
    let config = Config::load_from(None);
    std::env::remove_var("DUPSEEK_SCAN__PATH");

    assert_eq!(config.unwrap().scan.path, PathBuf::from("/srv/media"));
}
