//! Application state and its event reducer.
//!
//! [`AppState::apply`] is the only place state changes. It never performs
//! I/O: anything that needs the network, the device, or the disk is
//! returned as an [`Effect`] for the driver to run, and the outcome comes
//! back as another [`Event`].

use std::sync::Arc;

use resfinder_core::{
    Coordinate, LiveSearchResult, LocationError, LocationState, PlaceDetails, Record,
    ResourceCatalog, SyntheticPlace,
};

use crate::links::{directions_url, tel_uri};
use crate::reconcile::{reconcile, HydrationTicket, MarkerReconciler, RenderModel};
use crate::search::SearchIndex;
use crate::source::{MapDataSource, NetworkError};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The debouncer settled on a query.
    QuerySettled(String),
    ConnectivityChanged(bool),
    LocationUpdated(LocationState),
    RetryLocation,
    DismissBanner,
    LiveSearchCompleted {
        seq: u64,
        outcome: Result<Vec<LiveSearchResult>, NetworkError>,
    },
    Select(Record),
    /// Open the pin for the user's own position.
    SelectSelf,
    Deselect,
    DetailsFetched {
        ticket: HydrationTicket,
        outcome: Result<PlaceDetails, NetworkError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AcquireLocation,
    /// Query the live provider. The response must carry `seq` back.
    LiveSearch {
        seq: u64,
        query: String,
        origin: Coordinate,
    },
    FetchDetails(HydrationTicket),
    PersistLocation(Coordinate),
}

/// Everything the detail sheet for the open marker shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailCard {
    pub id: String,
    pub title: String,
    pub category: Option<&'static str>,
    pub hours: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub tel_uri: Option<String>,
    pub directions_url: Option<String>,
    pub distance_meters: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    index: SearchIndex,
    reconciler: MarkerReconciler,
    query: String,
    online: bool,
    live_configured: bool,
    location: LocationState,
    last_known: Option<Coordinate>,
    default_location: Coordinate,
    banner: Option<LocationError>,
    live_results: Option<Vec<LiveSearchResult>>,
    records: Vec<Record>,
    search_seq: u64,
}

impl AppState {
    /// Offline state with an empty query, showing the whole catalog.
    #[must_use]
    pub fn new(catalog: Arc<ResourceCatalog>, default_location: Coordinate) -> Self {
        let mut state = Self {
            index: SearchIndex::new(catalog),
            reconciler: MarkerReconciler::new(),
            query: String::new(),
            online: false,
            live_configured: false,
            location: LocationState::Unresolved,
            last_known: None,
            default_location,
            banner: None,
            live_results: None,
            records: Vec::new(),
            search_seq: 0,
        };
        state.refresh_records();
        state
    }

    /// Mark a live places provider as available.
    #[must_use]
    pub fn with_live_search(mut self, configured: bool) -> Self {
        self.live_configured = configured;
        self.refresh_records();
        self
    }

    #[must_use]
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self.refresh_records();
        self
    }

    #[must_use]
    pub fn with_last_known(mut self, last_known: Option<Coordinate>) -> Self {
        self.last_known = last_known;
        self
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::QuerySettled(query) => {
                tracing::debug!(query = %query, source = ?self.source(), "query settled");
                self.query = query;
                self.live_results = None;
                self.refresh_records();
                self.start_live_search().into_iter().collect()
            }
            Event::ConnectivityChanged(online) => {
                if online == self.online {
                    return Vec::new();
                }
                self.online = online;
                self.live_results = None;
                tracing::info!(online, source = ?self.source(), "connectivity changed");
                self.refresh_records();
                self.start_live_search().into_iter().collect()
            }
            Event::LocationUpdated(state) => self.location_updated(state),
            Event::RetryLocation => vec![Effect::AcquireLocation],
            Event::DismissBanner => {
                self.banner = None;
                Vec::new()
            }
            Event::LiveSearchCompleted { seq, outcome } => {
                self.live_search_completed(seq, outcome);
                Vec::new()
            }
            Event::Select(record) => {
                let ticket = self.reconciler.select(record);
                ticket
                    .filter(|_| self.source().is_live())
                    .map(Effect::FetchDetails)
                    .into_iter()
                    .collect()
            }
            Event::SelectSelf => {
                if let Some(here) = self.location.coordinate() {
                    self.reconciler
                        .select(Record::Synthesized(SyntheticPlace::your_location(here)));
                }
                Vec::new()
            }
            Event::Deselect => {
                self.reconciler.deselect();
                Vec::new()
            }
            Event::DetailsFetched { ticket, outcome } => {
                self.details_fetched(&ticket, outcome);
                Vec::new()
            }
        }
    }

    fn location_updated(&mut self, state: LocationState) -> Vec<Effect> {
        self.location = state;
        match state {
            LocationState::Resolved(here) => {
                self.banner = None;
                self.last_known = Some(here);
                let mut effects = vec![Effect::PersistLocation(here)];
                // Earlier live searches ran around a fallback origin.
                effects.extend(self.start_live_search());
                effects
            }
            LocationState::Failed(reason) => {
                self.banner = Some(reason);
                Vec::new()
            }
            LocationState::Unresolved => Vec::new(),
        }
    }

    fn live_search_completed(
        &mut self,
        seq: u64,
        outcome: Result<Vec<LiveSearchResult>, NetworkError>,
    ) {
        if seq != self.search_seq || !self.source().is_live() {
            tracing::debug!(seq, current = self.search_seq, "discarding stale live search response");
            return;
        }
        match outcome {
            Ok(results) => {
                tracing::debug!(query = %self.query, count = results.len(), "live results received");
                self.live_results = Some(results);
            }
            Err(NetworkError) => {
                tracing::warn!(query = %self.query, "live search failed; showing catalog matches");
                self.live_results = None;
            }
        }
        self.refresh_records();
    }

    fn details_fetched(
        &mut self,
        ticket: &HydrationTicket,
        outcome: Result<PlaceDetails, NetworkError>,
    ) {
        let details = match outcome {
            Ok(details) => details,
            Err(NetworkError) => {
                tracing::debug!(place_id = ticket.place_id(), "detail fetch failed; keeping partial record");
                return;
            }
        };

        if !self.reconciler.apply_details(ticket, &details) {
            return;
        }

        // Keep the hydrated fields if the marker is reopened later.
        if let Some(live) = self
            .live_results
            .as_mut()
            .and_then(|results| results.iter_mut().find(|r| r.id == ticket.place_id()))
        {
            live.merge_details(&details);
            self.refresh_records();
        }
    }

    /// Bump the search generation so in-flight responses go stale, and ask
    /// for a live search when one applies.
    fn start_live_search(&mut self) -> Option<Effect> {
        self.search_seq += 1;
        if !self.source().is_live() || self.query.is_empty() {
            return None;
        }
        Some(Effect::LiveSearch {
            seq: self.search_seq,
            query: self.query.clone(),
            origin: self.effective_location(),
        })
    }

    fn refresh_records(&mut self) {
        self.records = self.index.filter(
            &self.query,
            self.source().is_live(),
            self.live_results.as_deref(),
        );
        self.reconciler.retain_if_present(&self.records);
    }

    #[must_use]
    pub fn source(&self) -> MapDataSource {
        MapDataSource::select(self.online, self.live_configured)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online
    }

    #[must_use]
    pub fn location(&self) -> LocationState {
        self.location
    }

    /// Resolved position, else last known, else the configured default.
    #[must_use]
    pub fn effective_location(&self) -> Coordinate {
        self.location
            .coordinate()
            .or(self.last_known)
            .unwrap_or(self.default_location)
    }

    /// Reason the last location attempt failed, until dismissed or a later
    /// attempt succeeds.
    #[must_use]
    pub fn banner(&self) -> Option<LocationError> {
        self.banner
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn live_results(&self) -> Option<&[LiveSearchResult]> {
        self.live_results.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Record> {
        self.reconciler.selected()
    }

    #[must_use]
    pub fn render(&self) -> RenderModel {
        reconcile(&self.location, &self.records)
    }

    #[must_use]
    pub fn detail_card(&self) -> Option<DetailCard> {
        let record = self.selected()?;
        let address = record.address().map(str::to_string);
        let phone = record.phone().map(str::to_string);
        Some(DetailCard {
            id: record.id().to_string(),
            title: record.name().to_string(),
            category: record.category().map(|c| c.label()),
            hours: record.hours().map(str::to_string),
            tel_uri: phone.as_deref().and_then(tel_uri),
            directions_url: address
                .as_deref()
                .map(|a| directions_url(self.effective_location(), a)),
            distance_meters: self
                .location
                .coordinate()
                .zip(record.location())
                .map(|(here, there)| here.distance_meters(&there)),
            address,
            phone,
        })
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
