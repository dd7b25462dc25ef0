//! Query filtering over the built-in catalog and live provider results.

use std::sync::Arc;

use resfinder_core::{LiveSearchResult, Record, ResourceCatalog, ResourceRecord};

/// Produces the ordered record list for a settled query.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    catalog: Arc<ResourceCatalog>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(catalog: Arc<ResourceCatalog>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Records to show for `query`.
    ///
    /// Online with live results: the live results verbatim, in provider
    /// order. An empty query online yields nothing, whether or not live
    /// results exist; the online branch wins over the full-catalog rule.
    /// Otherwise the catalog is filtered by a case-insensitive substring
    /// match on name, address, or category label, keeping catalog order. A
    /// query equal to a category's provider keyword selects that category.
    /// An empty query offline returns the whole catalog.
    #[must_use]
    pub fn filter(
        &self,
        query: &str,
        online: bool,
        live: Option<&[LiveSearchResult]>,
    ) -> Vec<Record> {
        if online {
            if query.is_empty() {
                return Vec::new();
            }
            if let Some(results) = live {
                return results.iter().cloned().map(Record::Live).collect();
            }
        }

        let needle = query.to_lowercase();
        self.catalog
            .all()
            .iter()
            .filter(|r| needle.is_empty() || matches_catalog(r, &needle))
            .cloned()
            .map(Record::Catalog)
            .collect()
    }
}

fn matches_catalog(record: &ResourceRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record
            .address
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(needle))
        || record.category.label().to_lowercase().contains(needle)
        || record.category.keyword() == needle
}
