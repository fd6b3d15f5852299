//! Core type definitions for the geofenced navigation simulator

use core::fmt;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances (kilometres)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Result type for navigation operations
pub type Result<T> = core::result::Result<T, NavError>;

/// Geodetic point (latitude, longitude) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new point
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Offset this point by a delta in degrees
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(self.lat + d_lat, self.lon + d_lon)
    }

    /// Linear interpolation toward `other`; `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(&self, other: &GeoPoint, t: f64) -> Self {
        Self::new(
            self.lat + (other.lat - self.lat) * t,
            self.lon + (other.lon - self.lon) * t,
        )
    }

    /// Great-circle (haversine) distance in kilometres
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let s_lat = libm::sin(d_lat / 2.0);
        let s_lon = libm::sin(d_lon / 2.0);
        let a = s_lat * s_lat + libm::cos(lat1) * libm::cos(lat2) * s_lon * s_lon;
        2.0 * EARTH_RADIUS_KM * libm::asin(libm::sqrt(a.min(1.0)))
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Identifier of a no-fly zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl ZoneId {
    /// Create a new ZoneId
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone-{}", self.0)
    }
}

/// Error types for the navigation simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// Polygon has fewer than 3 vertices or a non-finite vertex
    InvalidPolygon,
    /// Polygon has more vertices than a zone can hold
    TooManyVertices,
    /// Zone name exceeds the name capacity
    NameTooLong,
    /// A zone with this id is already registered
    DuplicateZone(ZoneId),
    /// Zone registry is at capacity
    RegistryFull,
    /// Configuration value out of range
    ConfigError,
    /// Path does not fit the waypoint buffer
    PathCapacityExceeded,
    /// No collision-free candidate found for a segment
    NoFeasiblePath {
        /// Segment index that could not be placed
        segment: u16,
        /// Attempts spent on that segment
        attempts: u16,
    },
    /// Navigation requested without a path
    EmptyPath,
    /// Navigation already running
    AlreadyNavigating,
    /// Random source failed to produce entropy
    RandomSourceError,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::InvalidPolygon => write!(f, "Polygon needs at least 3 finite vertices"),
            NavError::TooManyVertices => write!(f, "Polygon vertex limit exceeded"),
            NavError::NameTooLong => write!(f, "Zone name too long"),
            NavError::DuplicateZone(id) => write!(f, "{} already registered", id),
            NavError::RegistryFull => write!(f, "Zone registry full"),
            NavError::ConfigError => write!(f, "Configuration error"),
            NavError::PathCapacityExceeded => write!(f, "Path capacity exceeded"),
            NavError::NoFeasiblePath { segment, attempts } => write!(
                f,
                "No collision-free path found: segment {} failed after {} attempts",
                segment, attempts
            ),
            NavError::EmptyPath => write!(f, "No path to navigate"),
            NavError::AlreadyNavigating => write!(f, "Navigation already in progress"),
            NavError::RandomSourceError => write!(f, "Random source failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NavError {}
