//! Client for the live places provider used by the map search.
//!
//! Speaks the Google Places web-service dialect: a nearby search around a
//! coordinate, and a per-place detail lookup used to hydrate phone numbers
//! and addresses on demand.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use normalize::{infer_category, place_to_live_result};
