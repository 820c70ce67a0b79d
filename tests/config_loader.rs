use std::fs;

use tempfile::TempDir;
use uxcases::config::{Config, ConfigError, PrimarySignal, VideoEvent};
use uxcases::fetch::Resource;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.splash.min_duration_ms, 1000);
    assert_eq!(config.splash.max_duration_ms, 5000);
    assert_eq!(config.splash.tick_interval_ms, 100);
    assert_eq!(config.splash.primary_signal, PrimarySignal::Video);
    assert_eq!(config.splash.video_trigger, VideoEvent::Ended);
    assert_eq!(config.splash.image_timeout_ms, 3000);

    assert_eq!(config.fetch.article_delay_min_ms, 800);
    assert_eq!(config.fetch.article_delay_max_ms, 1200);
    assert_eq!(config.fetch.metric_delay_ms, 1000);
    assert!(config.fetch.seed.is_none());
    assert!(config.fetch.failures.is_empty());

    assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
    assert_eq!(config.server.cache_max_age_secs, 60);
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("uxcases/config.toml"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_dir, path) = write_config(
        r#"
[splash]
min_duration_ms = 500
primary_signal = "data"
video_trigger = "can_play"

[fetch]
failures = ["revenue", "articles"]
article_seed = "demo"
"#,
    );

    let config = Config::load_from(&path).expect("config should load");
    assert_eq!(config.splash.min_duration_ms, 500);
    assert_eq!(config.splash.max_duration_ms, 5000);
    assert_eq!(config.splash.primary_signal, PrimarySignal::Data);
    assert_eq!(config.splash.video_trigger, VideoEvent::CanPlay);
    assert!(config.fetch.fails(Resource::Revenue));
    assert!(config.fetch.fails(Resource::Articles));
    assert!(!config.fetch.fails(Resource::Stats));
    assert_eq!(config.fetch.article_seed.as_deref(), Some("demo"));
    assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
}

#[test]
fn test_empty_file_is_default() {
    let (_dir, path) = write_config("");
    let config = Config::load_from(&path).expect("empty config should load");
    assert_eq!(config.splash.max_duration_ms, 5000);
}

#[test]
fn test_missing_explicit_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_unknown_resource_is_parse_error() {
    let (_dir, path) = write_config("[fetch]\nfailures = [\"weather\"]\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_values_fail_validation() {
    let (_dir, path) = write_config("[splash]\nmin_duration_ms = 9000\nmax_duration_ms = 5000\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));

    let (_dir, path) = write_config("[server]\nbind_addr = \"not-an-address\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("not-an-address"));

    let (_dir, path) = write_config("[fetch]\narticle_delay_min_ms = 2000\narticle_delay_max_ms = 100\n");
    assert!(Config::load_from(&path).is_err());
}
