use crate::app_config::{AppConfig, Environment};
use crate::geo::Coordinate;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// offline-only configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("RESFINDER_ENV", "development"))?;
    let log_level = or_default("RESFINDER_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("RESFINDER_DATA_DIR", "./data"));
    let catalog_path = lookup("RESFINDER_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let places_api_key = lookup("RESFINDER_PLACES_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let places_base_url = or_default("RESFINDER_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let places_timeout_secs = parse_u64("RESFINDER_PLACES_TIMEOUT_SECS", "10")?;
    let search_radius_meters = parse_u32("RESFINDER_SEARCH_RADIUS_METERS", "3500")?;
    let debounce_ms = parse_u64("RESFINDER_DEBOUNCE_MS", "400")?;

    let default_lat = parse_f64("RESFINDER_DEFAULT_LAT", "39.0473")?;
    let default_lng = parse_f64("RESFINDER_DEFAULT_LNG", "-95.6752")?;
    let default_location = Coordinate::new(default_lat, default_lng)
        .map_err(|e| invalid("RESFINDER_DEFAULT_LAT/RESFINDER_DEFAULT_LNG", e.to_string()))?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        catalog_path,
        places_api_key,
        places_base_url,
        places_timeout_secs,
        search_radius_meters,
        debounce_ms,
        default_location,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RESFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
