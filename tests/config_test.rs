//! Tests for config module

use serial_test::serial;
use std::io::Write;
use ustaz::config::{Config, DEFAULT_API_URL};

const ENV_KEYS: &[&str] = &[
    "USTAZ_API_URL",
    "USTAZ_API_TIMEOUT",
    "USTAZ_MAP_TOKEN",
    "MAPBOX_TOKEN",
    "USTAZ_STORAGE_DIR",
    "USTAZ_LAT",
    "USTAZ_LNG",
    "USTAZ_LOG_LEVEL",
    "USTAZ_LOG_FORMAT",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

#[test]
fn test_config_file_exists() {
    let config_path = std::path::Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_config_toml_parses() {
    let config = Config::from_file(std::path::Path::new("config.toml"))
        .expect("config.toml should parse");

    assert!(config.validate().is_ok());
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert_eq!(config.map.cluster_max_zoom, 14);
    assert_eq!(config.map.cluster_radius, 50);
    assert!(config.geolocation.fixed_position().is_none());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[api]\nbase_url = \"https://api.example.com/api\"").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.api.base_url, "https://api.example.com/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_invalid_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[api\nbase_url = ").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
#[serial(env)]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert!(config.map.access_token.is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial(env)]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("USTAZ_API_URL", "https://api.example.com/api");
    std::env::set_var("USTAZ_API_TIMEOUT", "12");
    std::env::set_var("MAPBOX_TOKEN", "pk.test");
    std::env::set_var("USTAZ_LAT", "31.2001");
    std::env::set_var("USTAZ_LNG", "29.9187");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.api.base_url, "https://api.example.com/api");
    assert_eq!(config.api.timeout_secs, 12);
    assert_eq!(config.map.access_token.as_deref(), Some("pk.test"));
    assert_eq!(config.geolocation.fixed_position(), Some((31.2001, 29.9187)));
}

#[test]
#[serial(env)]
fn test_blank_map_token_ignored() {
    clear_env();
    std::env::set_var("USTAZ_MAP_TOKEN", "  ");

    let config = Config::from_env().unwrap();
    clear_env();

    assert!(config.map.access_token.is_none());
}

#[test]
fn test_validation_rejects_half_fixed_position() {
    let mut config = Config::default();
    config.geolocation.fixed_lat = Some(30.0);
    assert!(config.validate().is_err());

    config.geolocation.fixed_lng = Some(31.0);
    assert!(config.validate().is_ok());
}
