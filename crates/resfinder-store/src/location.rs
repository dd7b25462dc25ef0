use resfinder_core::Coordinate;

use crate::error::StoreError;
use crate::kv::{read_value, write_value, KeyValueStore};

pub const LAST_KNOWN_LOCATION_KEY: &str = "lastKnownLocation";

/// The last coordinate the device resolved, if one was stored and still
/// decodes to a valid coordinate.
pub fn load_last_known_location<S: KeyValueStore + ?Sized>(store: &S) -> Option<Coordinate> {
    read_value(store, LAST_KNOWN_LOCATION_KEY)
}

/// Persist `coordinate` as the last known location.
///
/// # Errors
///
/// Returns `StoreError` if persisting fails.
pub fn save_last_known_location<S: KeyValueStore + ?Sized>(
    store: &mut S,
    coordinate: Coordinate,
) -> Result<(), StoreError> {
    write_value(store, LAST_KNOWN_LOCATION_KEY, &coordinate)
}
