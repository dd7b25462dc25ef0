//! Device-local persistence: a flat JSON key-value blob plus the typed
//! views over it (contacts and the last known location).

pub mod contacts;
pub mod error;
pub mod kv;
pub mod location;

pub use contacts::{ContactError, ContactStore, CONTACTS_KEY};
pub use error::StoreError;
pub use kv::{read_value, write_value, JsonFileStore, KeyValueStore, MemoryStore};
pub use location::{load_last_known_location, save_last_known_location, LAST_KNOWN_LOCATION_KEY};
