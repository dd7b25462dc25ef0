//! Where search results come from: the live provider or the bundled catalog.

use std::future::Future;

use resfinder_core::{Coordinate, LiveSearchResult, PlaceDetails};
use resfinder_places::PlacesClient;
use thiserror::Error;

/// A live lookup failed. The cause is logged where it happens; callers only
/// need to know to fall back to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("live place search unavailable")]
pub struct NetworkError;

/// Live places provider, as seen by the finder.
pub trait PlaceSearchSource {
    fn nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> impl Future<Output = Result<Vec<LiveSearchResult>, NetworkError>>;

    fn details(&self, place_id: &str) -> impl Future<Output = Result<PlaceDetails, NetworkError>>;
}

impl PlaceSearchSource for PlacesClient {
    async fn nearby(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<LiveSearchResult>, NetworkError> {
        self.nearby_search(origin, radius_meters, keyword)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, keyword, "live search failed");
                NetworkError
            })
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, NetworkError> {
        self.place_details(place_id).await.map_err(|e| {
            tracing::warn!(error = %e, place_id, "place details failed");
            NetworkError
        })
    }
}

/// Which data source feeds the map right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapDataSource {
    /// Query the live provider; the catalog is only a fallback.
    Live,
    /// Filter the bundled catalog.
    Offline,
}

impl MapDataSource {
    /// Live only when the device is online and a provider is configured.
    #[must_use]
    pub fn select(online: bool, live_configured: bool) -> Self {
        if online && live_configured {
            Self::Live
        } else {
            Self::Offline
        }
    }

    #[must_use]
    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_requires_connectivity_and_provider() {
        assert_eq!(MapDataSource::select(true, true), MapDataSource::Live);
        assert_eq!(MapDataSource::select(false, true), MapDataSource::Offline);
        assert_eq!(MapDataSource::select(true, false), MapDataSource::Offline);
        assert_eq!(MapDataSource::select(false, false), MapDataSource::Offline);
    }
}
