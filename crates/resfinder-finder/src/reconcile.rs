//! Projection of search results onto map annotations, plus the open marker.

use resfinder_core::{Category, Coordinate, LocationState, PlaceDetails, Record};

/// One map pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    pub title: String,
    pub category: Option<Category>,
    pub position: Coordinate,
    /// Straight-line distance from the user, when their position is known.
    pub distance_meters: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    /// Present only when the device position resolved.
    pub self_marker: Option<Coordinate>,
    pub annotations: Vec<Annotation>,
}

/// Build the render model for `records` around `location`.
///
/// Order follows `records`. Records with no usable coordinate cannot be
/// pinned and are skipped.
#[must_use]
pub fn reconcile(location: &LocationState, records: &[Record]) -> RenderModel {
    let self_marker = location.coordinate();

    let annotations = records
        .iter()
        .filter_map(|record| {
            let Some(position) = record.location() else {
                tracing::warn!(id = record.id(), name = record.name(), "record has no coordinate; not pinned");
                return None;
            };
            Some(Annotation {
                id: record.id().to_string(),
                title: record.name().to_string(),
                category: record.category(),
                position,
                distance_meters: self_marker.map(|here| here.distance_meters(&position)),
            })
        })
        .collect();

    RenderModel {
        self_marker,
        annotations,
    }
}

/// Permission to merge detail data into the selection it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationTicket {
    place_id: String,
}

impl HydrationTicket {
    #[must_use]
    pub fn place_id(&self) -> &str {
        &self.place_id
    }
}

/// Tracks the single open marker.
#[derive(Debug, Clone, Default)]
pub struct MarkerReconciler {
    selected: Option<Record>,
}

impl MarkerReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    /// Open `record`. Returns a ticket when it is a live result still
    /// missing its phone or address.
    pub fn select(&mut self, record: Record) -> Option<HydrationTicket> {
        let ticket = record.needs_hydration().then(|| HydrationTicket {
            place_id: record.id().to_string(),
        });
        tracing::debug!(id = record.id(), hydrate = ticket.is_some(), "marker selected");
        self.selected = Some(record);
        ticket
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Merge `details` into the selection if it is still the record the
    /// ticket was issued for. Returns whether anything was merged.
    pub fn apply_details(&mut self, ticket: &HydrationTicket, details: &PlaceDetails) -> bool {
        match &mut self.selected {
            Some(Record::Live(live)) if live.id == ticket.place_id => {
                live.merge_details(details);
                true
            }
            _ => {
                tracing::debug!(place_id = %ticket.place_id, "discarding details for a closed marker");
                false
            }
        }
    }

    /// Drop the selection if its id is not among `records`. A selection
    /// whose id survives a newer search stays open. Synthesized pins never
    /// come from a result list and are kept.
    pub fn retain_if_present(&mut self, records: &[Record]) {
        let stale = self.selected.as_ref().is_some_and(|s| {
            !matches!(s, Record::Synthesized(_)) && !records.iter().any(|r| r.id() == s.id())
        });
        if stale {
            self.selected = None;
        }
    }
}
