pub mod app_config;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod geo;
pub mod location;
pub mod resource;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, ResourceCatalog, SUGGESTED_SEARCHES};
pub use config::{load_app_config, load_app_config_from_env};
pub use contact::{seed_contacts, validate_contact, Contact, Hotline, ValidationError, HOTLINES};
pub use geo::Coordinate;
pub use location::{LocationError, LocationState};
pub use resource::{
    Category, LiveSearchResult, PlaceDetails, Record, ResourceRecord, SyntheticPlace,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
