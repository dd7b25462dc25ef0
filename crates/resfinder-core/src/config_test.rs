use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "RESFINDER_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults must be valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, std::path::PathBuf::from("./data"));
    assert!(cfg.catalog_path.is_none());
    assert!(cfg.places_api_key.is_none());
    assert!(!cfg.live_search_enabled());
    assert_eq!(cfg.places_base_url, DEFAULT_PLACES_BASE_URL);
    assert_eq!(cfg.places_timeout_secs, 10);
    assert_eq!(cfg.search_radius_meters, 3500);
    assert_eq!(cfg.debounce_ms, 400);
    assert_eq!(cfg.debounce_interval(), std::time::Duration::from_millis(400));
    assert_eq!(
        cfg.default_location,
        Coordinate::new(39.0473, -95.6752).unwrap()
    );
}

#[test]
fn store_path_is_inside_data_dir() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_DATA_DIR", "/var/lib/resfinder");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.store_path(),
        std::path::PathBuf::from("/var/lib/resfinder/resfinder.json")
    );
}

#[test]
fn api_key_enables_live_search() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_PLACES_API_KEY", "abc123");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.live_search_enabled());
    assert_eq!(cfg.places_api_key.as_deref(), Some("abc123"));
}

#[test]
fn blank_api_key_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_PLACES_API_KEY", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.places_api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_PLACES_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn debounce_override() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_DEBOUNCE_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.debounce_ms, 250);
}

#[test]
fn debounce_invalid() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_DEBOUNCE_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESFINDER_DEBOUNCE_MS"),
        "expected InvalidEnvVar(RESFINDER_DEBOUNCE_MS), got: {result:?}"
    );
}

#[test]
fn search_radius_invalid() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_SEARCH_RADIUS_METERS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RESFINDER_SEARCH_RADIUS_METERS"),
        "expected InvalidEnvVar(RESFINDER_SEARCH_RADIUS_METERS), got: {result:?}"
    );
}

#[test]
fn default_location_override() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_DEFAULT_LAT", "40.7128");
    map.insert("RESFINDER_DEFAULT_LNG", "-74.0060");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_location, Coordinate::new(40.7128, -74.006).unwrap());
}

#[test]
fn default_location_out_of_range_fails() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_DEFAULT_LAT", "123.0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var.starts_with("RESFINDER_DEFAULT_LAT")),
        "got: {result:?}"
    );
}

#[test]
fn catalog_path_override() {
    let mut map = HashMap::new();
    map.insert("RESFINDER_CATALOG_PATH", "./config/catalog.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.catalog_path,
        Some(std::path::PathBuf::from("./config/catalog.yaml"))
    );
}
