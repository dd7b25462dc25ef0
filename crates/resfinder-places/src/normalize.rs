use resfinder_core::{Category, Coordinate, LiveSearchResult};

use crate::types::PlaceResult;

/// Map provider place types onto a resource category, first match wins.
#[must_use]
pub fn infer_category(types: &[String]) -> Option<Category> {
    types.iter().find_map(|t| match t.as_str() {
        "police" => Some(Category::Police),
        "hospital" | "doctor" | "health" | "pharmacy" => Some(Category::Hospital),
        "food_bank" | "meal_takeaway" | "grocery_or_supermarket" => Some(Category::FoodBank),
        "lodging" | "homeless_shelter" => Some(Category::Shelter),
        "lawyer" | "courthouse" => Some(Category::LegalAid),
        "transit_station" | "bus_station" | "train_station" | "subway_station" => {
            Some(Category::Transit)
        }
        _ => None,
    })
}

/// Convert a nearby-search place into a [`LiveSearchResult`].
///
/// Geometry outside the valid coordinate range becomes `location: None`;
/// the reconciler drops such results from the map. `phone` is always `None`
/// here because nearby search never returns it.
#[must_use]
pub fn place_to_live_result(place: PlaceResult) -> LiveSearchResult {
    let location = place.geometry.as_ref().and_then(|g| {
        let coord = Coordinate::new(g.location.lat, g.location.lng);
        if let Err(e) = &coord {
            tracing::debug!(place_id = %place.place_id, error = %e, "place geometry rejected");
        }
        coord.ok()
    });

    LiveSearchResult {
        category: infer_category(&place.types),
        location,
        address: place.vicinity.or(place.formatted_address),
        phone: None,
        website: None,
        id: place.place_id,
        name: place.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Geometry, LatLng};

    fn place(lat: f64, lng: f64) -> PlaceResult {
        PlaceResult {
            place_id: "abc".to_string(),
            name: "Ward 3 Police".to_string(),
            geometry: Some(Geometry {
                location: LatLng { lat, lng },
            }),
            vicinity: Some("12 Beat St".to_string()),
            formatted_address: None,
            types: vec!["point_of_interest".to_string(), "police".to_string()],
        }
    }

    #[test]
    fn converts_valid_place() {
        let r = place_to_live_result(place(39.0, -95.0));
        assert_eq!(r.id, "abc");
        assert_eq!(r.category, Some(Category::Police));
        assert_eq!(r.location, Coordinate::new(39.0, -95.0).ok());
        assert_eq!(r.address.as_deref(), Some("12 Beat St"));
        assert!(r.phone.is_none());
    }

    #[test]
    fn out_of_range_geometry_becomes_none() {
        let r = place_to_live_result(place(120.0, -95.0));
        assert!(r.location.is_none());
    }

    #[test]
    fn missing_geometry_becomes_none() {
        let mut p = place(0.0, 0.0);
        p.geometry = None;
        assert!(place_to_live_result(p).location.is_none());
    }

    #[test]
    fn formatted_address_used_when_no_vicinity() {
        let mut p = place(0.0, 0.0);
        p.vicinity = None;
        p.formatted_address = Some("1 Long Form Rd, Town".to_string());
        assert_eq!(
            place_to_live_result(p).address.as_deref(),
            Some("1 Long Form Rd, Town")
        );
    }

    #[test]
    fn infer_category_unknown_types() {
        assert_eq!(infer_category(&["car_wash".to_string()]), None);
        assert_eq!(infer_category(&[]), None);
    }

    #[test]
    fn infer_category_transit() {
        assert_eq!(
            infer_category(&["bus_station".to_string()]),
            Some(Category::Transit)
        );
    }
}
