//! Places API response types.
//!
//! Every response is a JSON object with a top-level `status` string
//! (`"OK"`, `"ZERO_RESULTS"`, or an error code) and an optional
//! `error_message`.

use serde::Deserialize;

use resfinder_core::PlaceDetails;

/// Statuses that count as a successful response.
pub const SUCCESS_STATUSES: &[&str] = &["OK", "ZERO_RESULTS"];

// ---------------------------------------------------------------------------
// nearbysearch
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// One place from a nearby search.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Short street address; nearby search returns this instead of
    /// `formatted_address`.
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// details
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl From<DetailsResult> for PlaceDetails {
    fn from(r: DetailsResult) -> Self {
        Self {
            name: r.name,
            formatted_address: r.formatted_address,
            formatted_phone_number: r.formatted_phone_number,
            website: r.website,
        }
    }
}
