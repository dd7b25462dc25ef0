use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user-entered emergency contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("phone number must contain at least one digit")]
    NoDigits,
}

/// Check the fields of a new contact.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyField`] when `name` or `phone` is empty or
/// whitespace-only, and [`ValidationError::NoDigits`] when `phone` has no
/// ASCII digit.
pub fn validate_contact(name: &str, phone: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "name" });
    }
    if phone.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "phone" });
    }
    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NoDigits);
    }
    Ok(())
}

/// Contacts present on first launch, before anything has been persisted.
#[must_use]
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: 1,
            name: "Dr. Amelia Carter".to_string(),
            phone: "555-123-4567".to_string(),
        },
        Contact {
            id: 2,
            name: "Liam Harper".to_string(),
            phone: "555-987-6543".to_string(),
        },
    ]
}

/// A national hotline listed on the contacts screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotline {
    pub name: &'static str,
    pub number: &'static str,
}

pub const HOTLINES: &[Hotline] = &[
    Hotline {
        name: "Emergency Services",
        number: "911",
    },
    Hotline {
        name: "Suicide & Crisis Lifeline",
        number: "988",
    },
    Hotline {
        name: "National Domestic Violence Hotline",
        number: "800-799-7233",
    },
    Hotline {
        name: "RAINN (Rape, Abuse & Incest National Network)",
        number: "800-656-4673",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            validate_contact("", "555-1234"),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn rejects_whitespace_phone() {
        assert_eq!(
            validate_contact("Jane", "   "),
            Err(ValidationError::EmptyField { field: "phone" })
        );
    }

    #[test]
    fn rejects_phone_without_digits() {
        assert_eq!(
            validate_contact("Jane", "call me"),
            Err(ValidationError::NoDigits)
        );
    }

    #[test]
    fn accepts_formatted_phone() {
        assert!(validate_contact("Jane", "(555) 123-4567").is_ok());
    }

    #[test]
    fn seed_ids_are_increasing() {
        let seeds = seed_contacts();
        assert_eq!(seeds.len(), 2);
        assert!(seeds[0].id < seeds[1].id);
    }

    #[test]
    fn hotlines_start_with_emergency_services() {
        assert_eq!(HOTLINES[0].number, "911");
        assert_eq!(HOTLINES.len(), 4);
    }
}
