use std::path::PathBuf;
use std::time::Duration;

use crate::geo::Coordinate;

/// File name of the key-value blob inside `data_dir`.
pub const STORE_FILE_NAME: &str = "resfinder.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub places_timeout_secs: u64,
    pub search_radius_meters: u32,
    pub debounce_ms: u64,
    pub default_location: Coordinate,
}

impl AppConfig {
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    #[must_use]
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Live search is only possible with an API key.
    #[must_use]
    pub fn live_search_enabled(&self) -> bool {
        self.places_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("catalog_path", &self.catalog_path)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("places_timeout_secs", &self.places_timeout_secs)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("debounce_ms", &self.debounce_ms)
            .field("default_location", &self.default_location)
            .finish()
    }
}
