//! Append-only list of user-entered emergency contacts.

use resfinder_core::{seed_contacts, validate_contact, Contact, ValidationError};
use thiserror::Error;

use crate::error::StoreError;
use crate::kv::{read_value, write_value, KeyValueStore};

pub const CONTACTS_KEY: &str = "contacts";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Contacts in insertion order, persisted under [`CONTACTS_KEY`].
///
/// Ids come from the wall clock in epoch milliseconds, bumped past the
/// current maximum so they stay strictly increasing even when two contacts
/// are added within the same millisecond or the clock steps backwards.
pub struct ContactStore<S> {
    store: S,
    contacts: Vec<Contact>,
}

impl<S: KeyValueStore> ContactStore<S> {
    /// Load contacts from `store`, falling back to the seed contacts when the
    /// key is absent or undecodable.
    pub fn open(store: S) -> Self {
        let contacts = read_value::<Vec<Contact>, _>(&store, CONTACTS_KEY).unwrap_or_else(|| {
            tracing::debug!("no stored contacts; using seed list");
            seed_contacts()
        });
        Self { store, contacts }
    }

    /// Validate, append, and persist a new contact.
    ///
    /// Names and phone numbers are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Validation`] for empty or digit-less input and
    /// [`ContactError::Store`] if persisting fails. Either way the list is
    /// left unchanged.
    pub fn add(&mut self, name: &str, phone: &str) -> Result<Contact, ContactError> {
        let now_millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        self.add_at(name, phone, now_millis)
    }

    fn add_at(&mut self, name: &str, phone: &str, now_millis: u64) -> Result<Contact, ContactError> {
        validate_contact(name, phone)?;

        let contact = Contact {
            id: self.next_id(now_millis),
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
        };

        self.contacts.push(contact.clone());
        if let Err(e) = write_value(&mut self.store, CONTACTS_KEY, &self.contacts) {
            self.contacts.pop();
            tracing::warn!(error = %e, "failed to persist contacts; add rolled back");
            return Err(e.into());
        }

        tracing::info!(id = contact.id, "contact added");
        Ok(contact)
    }

    #[must_use]
    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    fn next_id(&self, now_millis: u64) -> u64 {
        let floor = self
            .contacts
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        now_millis.max(floor)
    }
}
