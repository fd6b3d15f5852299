//! No-fly zones and the point-in-polygon test
//!
//! Zones are closed polygons over (latitude, longitude). Containment uses
//! the even-odd ray casting rule with latitude as the x axis and longitude
//! as the y axis.
//!
//! # Example
//! ```
//! use geofence_navigator::geofence::{Zone, ZoneRegistry};
//! use geofence_navigator::{GeoPoint, ZoneId};
//!
//! let zone = Zone::rectangle(
//!     ZoneId::new(1),
//!     "Airport Restricted Zone",
//!     GeoPoint::new(13.0900, 80.2650),
//!     GeoPoint::new(13.0950, 80.2750),
//! )
//! .unwrap();
//!
//! let mut zones = ZoneRegistry::new();
//! zones.insert(zone).unwrap();
//! assert!(zones.is_restricted(&GeoPoint::new(13.0925, 80.2700)));
//! ```

use crate::types::*;
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum vertices in a single zone ring
pub const MAX_ZONE_VERTICES: usize = 16;

/// Maximum zones in a registry
pub const MAX_ZONES: usize = 16;

/// Maximum zone name length in bytes
pub const MAX_ZONE_NAME: usize = 48;

/// Even-odd ray casting over an implicitly closed ring.
///
/// Rings with fewer than 3 vertices have no interior and always return
/// `false`. Points exactly on an edge get a fixed answer determined by the
/// half-open `(yi > y) != (yj > y)` straddle rule.
pub fn contains(point: &GeoPoint, ring: &[GeoPoint]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let x = point.lat;
    let y = point.lon;
    let mut inside = false;

    let mut j = n - 1;
    for i in 0..n {
        let xi = ring[i].lat;
        let yi = ring[i].lon;
        let xj = ring[j].lat;
        let yj = ring[j].lon;

        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Axis-aligned extent of a ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner
    pub min: GeoPoint,
    /// North-east corner
    pub max: GeoPoint,
}

impl BoundingBox {
    /// Compute the extent of a non-empty ring
    pub fn of(ring: &[GeoPoint]) -> Option<Self> {
        let first = ring.first()?;
        let mut min = *first;
        let mut max = *first;
        for v in &ring[1..] {
            min.lat = min.lat.min(v.lat);
            min.lon = min.lon.min(v.lon);
            max.lat = max.lat.max(v.lat);
            max.lon = max.lon.max(v.lon);
        }
        Some(Self { min, max })
    }

    /// Inclusive containment
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat >= self.min.lat && p.lat <= self.max.lat && p.lon >= self.min.lon && p.lon <= self.max.lon
    }

    /// Centre point
    pub fn center(&self) -> GeoPoint {
        self.min.lerp(&self.max, 0.5)
    }
}

/// Named polygonal no-fly zone
///
/// Serialized as a [`ZoneRecord`]; decoding goes back through
/// [`Zone::new`], so a decoded zone is always valid and its bounds match
/// its ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ZoneRecord", try_from = "ZoneRecord")]
pub struct Zone {
    id: ZoneId,
    name: String<MAX_ZONE_NAME>,
    vertices: Vec<GeoPoint, MAX_ZONE_VERTICES>,
    bounds: BoundingBox,
}

impl Zone {
    /// Create a zone from an ordered ring of vertices.
    ///
    /// The ring is closed by implication; do not repeat the first vertex.
    /// Self-intersecting rings are accepted and follow the even-odd rule.
    pub fn new(id: ZoneId, name: &str, vertices: &[GeoPoint]) -> Result<Self> {
        if vertices.len() < 3 || vertices.iter().any(|v| !v.is_finite()) {
            return Err(NavError::InvalidPolygon);
        }

        let ring = Vec::from_slice(vertices).map_err(|_| NavError::TooManyVertices)?;

        let mut label = String::new();
        label.push_str(name).map_err(|_| NavError::NameTooLong)?;

        let bounds = BoundingBox::of(vertices).ok_or(NavError::InvalidPolygon)?;

        Ok(Self {
            id,
            name: label,
            vertices: ring,
            bounds,
        })
    }

    /// Axis-aligned rectangle between two opposite corners
    pub fn rectangle(id: ZoneId, name: &str, a: GeoPoint, b: GeoPoint) -> Result<Self> {
        let (lat0, lat1) = (a.lat.min(b.lat), a.lat.max(b.lat));
        let (lon0, lon1) = (a.lon.min(b.lon), a.lon.max(b.lon));
        Self::new(
            id,
            name,
            &[
                GeoPoint::new(lat0, lon0),
                GeoPoint::new(lat1, lon0),
                GeoPoint::new(lat1, lon1),
                GeoPoint::new(lat0, lon1),
            ],
        )
    }

    /// Zone identifier
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Vertex ring
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Extent of the ring
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Check if a point lies inside the zone
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        contains(point, &self.vertices)
    }
}

/// Wire form of a [`Zone`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone identifier
    pub id: ZoneId,
    /// Display name
    pub name: String<MAX_ZONE_NAME>,
    /// Vertex ring
    pub vertices: Vec<GeoPoint, MAX_ZONE_VERTICES>,
}

impl From<Zone> for ZoneRecord {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            vertices: zone.vertices,
        }
    }
}

impl TryFrom<ZoneRecord> for Zone {
    type Error = NavError;

    fn try_from(record: ZoneRecord) -> Result<Self> {
        Zone::new(record.id, &record.name, &record.vertices)
    }
}

/// Set of no-fly zones, unique by id
///
/// Serialized as a plain zone list and rebuilt through
/// [`ZoneRegistry::from_zones`] on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Zone, MAX_ZONES>", try_from = "Vec<Zone, MAX_ZONES>")]
pub struct ZoneRegistry {
    zones: Vec<Zone, MAX_ZONES>,
}

impl ZoneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Build a registry from a list of zones
    pub fn from_zones<I>(zones: I) -> Result<Self>
    where
        I: IntoIterator<Item = Zone>,
    {
        let mut registry = Self::new();
        for zone in zones {
            registry.insert(zone)?;
        }
        Ok(registry)
    }

    /// Register a zone
    pub fn insert(&mut self, zone: Zone) -> Result<()> {
        if self.get(zone.id()).is_some() {
            return Err(NavError::DuplicateZone(zone.id()));
        }
        self.zones.push(zone).map_err(|_| NavError::RegistryFull)
    }

    /// Remove a zone by id
    pub fn remove(&mut self, id: ZoneId) -> Option<Zone> {
        let index = self.zones.iter().position(|z| z.id() == id)?;
        Some(self.zones.remove(index))
    }

    /// Look up a zone by id
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id() == id)
    }

    /// First zone containing the point, if any
    pub fn zone_at(&self, point: &GeoPoint) -> Option<&Zone> {
        self.zones.iter().find(|z| z.contains(point))
    }

    /// Whether any zone contains the point
    pub fn is_restricted(&self, point: &GeoPoint) -> bool {
        self.zone_at(point).is_some()
    }

    /// Iterate over registered zones
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Number of zones
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Registry has no zones
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl From<ZoneRegistry> for Vec<Zone, MAX_ZONES> {
    fn from(registry: ZoneRegistry) -> Self {
        registry.zones
    }
}

impl TryFrom<Vec<Zone, MAX_ZONES>> for ZoneRegistry {
    type Error = NavError;

    fn try_from(zones: Vec<Zone, MAX_ZONES>) -> Result<Self> {
        Self::from_zones(zones)
    }
}
