//! WGS84 coordinate value type.
//!
//! A [`Coordinate`] is always finite and inside the valid latitude/longitude
//! ranges; the only ways to build one are [`Coordinate::new`] (rejects bad
//! input) and [`Coordinate::clamped`] (forces finite input into range).

use serde::{Deserialize, Serialize};

use crate::CoreError;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either component is NaN,
    /// infinite, or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Force a finite pair into range. Returns `None` for NaN or infinite input.
    ///
    /// In-range values are returned unchanged.
    #[must_use]
    pub fn clamped(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance in meters (haversine).
    #[must_use]
    pub fn distance_meters(&self, other: &Coordinate) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_range_bounds() {
        for (lat, lng) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            let c = Coordinate::new(lat, lng).expect("bounds are valid");
            assert!((c.latitude() - lat).abs() < f64::EPSILON);
            assert!((c.longitude() - lng).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        let err = Coordinate::new(90.5, 0.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoordinate { .. }));
    }

    #[test]
    fn new_rejects_out_of_range_longitude() {
        assert!(Coordinate::new(0.0, -180.01).is_err());
    }

    #[test]
    fn new_rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn clamped_pins_to_bounds() {
        let c = Coordinate::clamped(123.0, -200.0).expect("finite input");
        assert!((c.latitude() - 90.0).abs() < f64::EPSILON);
        assert!((c.longitude() + 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clamped_leaves_valid_values_alone() {
        let c = Coordinate::clamped(39.0473, -95.6752).unwrap();
        assert_eq!(c, Coordinate::new(39.0473, -95.6752).unwrap());
    }

    #[test]
    fn clamped_rejects_non_finite() {
        assert!(Coordinate::clamped(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn display_uses_four_decimals() {
        let c = Coordinate::new(39.047_312, -95.675_249).unwrap();
        assert_eq!(c.to_string(), "39.0473, -95.6752");
    }

    #[test]
    fn distance_between_identical_points_is_zero() {
        let c = Coordinate::new(10.0, 20.0).unwrap();
        assert!(c.distance_meters(&c).abs() < 1e-6);
    }

    #[test]
    fn distance_one_degree_latitude_is_about_111km() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(1.0, 0.0).unwrap();
        let d = a.distance_meters(&b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn deserialize_rejects_invalid_coordinate() {
        let result: Result<Coordinate, _> =
            serde_json::from_str(r#"{"latitude": 95.0, "longitude": 0.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serde_round_trip_uses_named_fields() {
        let c = Coordinate::new(1.5, -2.5).unwrap();
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 1.5, "longitude": -2.5}));
        let back: Coordinate = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }
}
