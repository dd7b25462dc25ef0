use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::Coordinate;

/// Why a geolocation attempt did not produce a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    #[error("Location not supported")]
    Unsupported,
    #[error("Location access denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error")]
    Unknown,
}

impl LocationError {
    /// Map a platform geolocation error code onto a reason.
    ///
    /// Codes follow the W3C `GeolocationPositionError` numbering:
    /// 1 = permission denied, 2 = position unavailable, 3 = timeout.
    #[must_use]
    pub fn from_platform_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::Unavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationState {
    #[default]
    Unresolved,
    Resolved(Coordinate),
    Failed(LocationError),
}

impl LocationState {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Resolved(c) => Some(*c),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<LocationError> {
        match self {
            Self::Failed(e) => Some(*e),
            _ => None,
        }
    }
}
