use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::resource::{Category, ResourceRecord};
use crate::ConfigError;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Suggested searches shown under the search box.
pub const SUGGESTED_SEARCHES: &[&str] = &["Grocery Store", "Pharmacy", "Community Center", "Food Bank"];

#[derive(Debug, Deserialize)]
struct CatalogFile {
    resources: Vec<ResourceRecord>,
}

/// The offline resource list. Fixed once loaded; iteration order is file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCatalog {
    resources: Vec<ResourceRecord>,
}

impl ResourceCatalog {
    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CatalogFileParse`] on malformed YAML (including
    /// out-of-range coordinates) and [`ConfigError::Validation`] on empty or
    /// duplicate ids and blank names.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        validate_resources(&file.resources)?;
        Ok(Self {
            resources: file.resources,
        })
    }

    #[must_use]
    pub fn from_records(resources: Vec<ResourceRecord>) -> Self {
        Self { resources }
    }

    #[must_use]
    pub fn all(&self) -> &[ResourceRecord] {
        &self.resources
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ResourceRecord> {
        self.resources
            .iter()
            .filter(move |r| r.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Load a catalog from `path`, or the built-in one when `path` is `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: Option<&Path>) -> Result<ResourceCatalog, ConfigError> {
    let Some(path) = path else {
        return ResourceCatalog::builtin();
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    ResourceCatalog::from_yaml_str(&content)
}

fn validate_resources(resources: &[ResourceRecord]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for resource in resources {
        if resource.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "resource '{}' has an empty id",
                resource.name
            )));
        }

        if resource.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "resource '{}' has an empty name",
                resource.id
            )));
        }

        if !seen_ids.insert(resource.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate resource id: '{}'",
                resource.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
