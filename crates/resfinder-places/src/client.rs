//! HTTP client for the places web service.
//!
//! Wraps `reqwest` with API key management and envelope-status checking.
//! `OK` and `ZERO_RESULTS` are successes; any other status becomes
//! [`PlacesError::ApiStatus`].

use std::time::Duration;

use reqwest::{Client, Url};
use resfinder_core::{Coordinate, LiveSearchResult, PlaceDetails};

use crate::error::PlacesError;
use crate::normalize::place_to_live_result;
use crate::types::{DetailsResponse, NearbySearchResponse, SUCCESS_STATUSES};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,website";

/// Client for the places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("resfinder/0.1 (resource-finder)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches for places matching `keyword` within `radius_meters` of `origin`.
    ///
    /// Results come back in provider order. `ZERO_RESULTS` yields an empty vec.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is an error code.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        keyword: &str,
    ) -> Result<Vec<LiveSearchResult>, PlacesError> {
        let location = format!("{},{}", origin.latitude(), origin.longitude());
        let radius = radius_meters.to_string();
        let url = self.build_url(
            "nearbysearch/json",
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
            ],
        )?;

        let body = self.request_json(&url).await?;
        let response: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(keyword={keyword})"),
                source: e,
            })?;
        Self::check_status(&response.status, response.error_message)?;

        tracing::debug!(
            keyword,
            radius_meters,
            count = response.results.len(),
            "nearby search completed"
        );

        Ok(response
            .results
            .into_iter()
            .map(place_to_live_result)
            .collect())
    }

    /// Fetches phone, address, and website for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is an error code.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;

        let body = self.request_json(&url).await?;
        let response: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;
        Self::check_status(&response.status, response.error_message)?;

        Ok(response.result.unwrap_or_default().into())
    }

    /// Builds the endpoint URL with percent-encoded query parameters; the API
    /// key is always appended last.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    fn check_status(status: &str, message: Option<String>) -> Result<(), PlacesError> {
        if SUCCESS_STATUSES.contains(&status) {
            return Ok(());
        }
        Err(PlacesError::ApiStatus {
            status: status.to_string(),
            message,
        })
    }
}
