//! Resource records from the static catalog, the live places provider, and
//! app-synthesized pins, unified as [`Record`].

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Police,
    Hospital,
    FoodBank,
    Shelter,
    LegalAid,
    Transit,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Police,
        Category::Hospital,
        Category::FoodBank,
        Category::Shelter,
        Category::LegalAid,
        Category::Transit,
    ];

    /// Label shown on the home screen tiles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Police => "Police Station",
            Category::Hospital => "Clinic/Hospital",
            Category::FoodBank => "Food Bank",
            Category::Shelter => "Housing/Shelter",
            Category::LegalAid => "Legal Aid",
            Category::Transit => "Transportation",
        }
    }

    /// Keyword sent to the live places provider for this category.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Category::Police => "police",
            Category::Hospital => "hospital",
            Category::FoodBank => "food bank",
            Category::Shelter => "homeless shelter",
            Category::LegalAid => "legal aid",
            Category::Transit => "transit station",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A resource from the built-in catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub location: Coordinate,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
}

/// A place returned by the live places provider.
///
/// `location` is `None` when the provider's geometry was missing or out of
/// range. `address` and `phone` are often absent until a detail fetch fills
/// them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSearchResult {
    pub id: String,
    pub name: String,
    pub category: Option<Category>,
    pub location: Option<Coordinate>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl LiveSearchResult {
    #[must_use]
    pub fn needs_hydration(&self) -> bool {
        self.phone.is_none() || self.address.is_none()
    }

    /// Fill in fields from a detail response. Present detail values win.
    pub fn merge_details(&mut self, details: &PlaceDetails) {
        if let Some(name) = details.name.as_ref().filter(|n| !n.trim().is_empty()) {
            self.name.clone_from(name);
        }
        if details.formatted_address.is_some() {
            self.address.clone_from(&details.formatted_address);
        }
        if details.formatted_phone_number.is_some() {
            self.phone.clone_from(&details.formatted_phone_number);
        }
        if details.website.is_some() {
            self.website.clone_from(&details.website);
        }
    }
}

/// Optional fields returned by a place detail lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
}

/// A pin the app makes up itself (the user's own position, a dropped pin).
/// It carries no contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPlace {
    pub id: String,
    pub label: String,
    pub location: Coordinate,
}

impl SyntheticPlace {
    #[must_use]
    pub fn your_location(location: Coordinate) -> Self {
        Self {
            id: "self".to_string(),
            label: "Your location".to_string(),
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Record {
    Catalog(ResourceRecord),
    Live(LiveSearchResult),
    Synthesized(SyntheticPlace),
}

impl Record {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Record::Catalog(r) => &r.id,
            Record::Live(r) => &r.id,
            Record::Synthesized(p) => &p.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Record::Catalog(r) => &r.name,
            Record::Live(r) => &r.name,
            Record::Synthesized(p) => &p.label,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        match self {
            Record::Catalog(r) => Some(r.category),
            Record::Live(r) => r.category,
            Record::Synthesized(_) => None,
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<Coordinate> {
        match self {
            Record::Catalog(r) => Some(r.location),
            Record::Live(r) => r.location,
            Record::Synthesized(p) => Some(p.location),
        }
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Record::Catalog(r) => r.address.as_deref(),
            Record::Live(r) => r.address.as_deref(),
            Record::Synthesized(_) => None,
        }
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        match self {
            Record::Catalog(r) => r.phone.as_deref(),
            Record::Live(r) => r.phone.as_deref(),
            Record::Synthesized(_) => None,
        }
    }

    #[must_use]
    pub fn hours(&self) -> Option<&str> {
        match self {
            Record::Catalog(r) => r.hours.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn needs_hydration(&self) -> bool {
        matches!(self, Record::Live(r) if r.needs_hydration())
    }
}
