//! Geofenced random-walk path generation
//!
//! A path starts at a given point and grows by bounded random steps.
//! Each candidate waypoint is tested against every registered zone:
//!
//! 1. Primary candidate: last waypoint plus a uniform offset within
//!    `±max_step` on both axes.
//! 2. If it lands in a zone, the rejected candidate is nudged once by a
//!    smaller offset (`±deflect_step`) on both axes.
//! 3. If that also lands in a zone, the segment is retried with a fresh
//!    primary candidate.
//!
//! Retries are bounded per segment. When the bound is hit the whole
//! generation fails with [`NavError::NoFeasiblePath`].

use crate::config::PathConfig;
use crate::geofence::ZoneRegistry;
use crate::rng::RandomSource;
use crate::types::*;
use heapless::Vec;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// Maximum waypoints in one path (start included)
pub const MAX_PATH_POINTS: usize = 128;

/// Ordered sequence of waypoints, never empty once generated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<GeoPoint, MAX_PATH_POINTS>,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Build a path from explicit waypoints
    pub fn from_waypoints(points: &[GeoPoint]) -> Result<Self> {
        let waypoints = Vec::from_slice(points).map_err(|_| NavError::PathCapacityExceeded)?;
        Ok(Self { waypoints })
    }

    /// Append a waypoint
    pub fn push(&mut self, point: GeoPoint) -> Result<()> {
        self.waypoints
            .push(point)
            .map_err(|_| NavError::PathCapacityExceeded)
    }

    /// Waypoint at index
    pub fn get(&self, index: usize) -> Option<&GeoPoint> {
        self.waypoints.get(index)
    }

    /// First waypoint
    pub fn first(&self) -> Option<&GeoPoint> {
        self.waypoints.first()
    }

    /// Last waypoint
    pub fn last(&self) -> Option<&GeoPoint> {
        self.waypoints.last()
    }

    /// All waypoints in order
    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// No waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Sum of great-circle segment lengths (kilometres)
    pub fn total_distance_km(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance_km(&w[1]))
            .sum()
    }
}

/// Random-walk path generator with zone avoidance
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator {
    config: PathConfig,
}

impl PathGenerator {
    /// Create a generator after validating its configuration
    pub fn new(config: PathConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator parameters
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Generate `segment_count + 1` waypoints starting at `start`.
    ///
    /// The start point is kept as given even if it lies inside a zone;
    /// every appended waypoint is outside all zones.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        start: GeoPoint,
        zones: &ZoneRegistry,
        rng: &mut R,
    ) -> Result<Path> {
        let cfg = &self.config;
        debug!(
            "generating path from ({}) with {} segments, max step {}",
            start, cfg.segment_count, cfg.max_step
        );

        let mut path = Path::new();
        path.push(start)?;

        for segment in 0..cfg.segment_count {
            let origin = *path.last().ok_or(NavError::EmptyPath)?;
            let next = self.place_segment(segment, origin, zones, rng)?;
            path.push(next)?;
        }

        debug!(
            "generated {} waypoints, {:.3} km",
            path.len(),
            path.total_distance_km()
        );
        Ok(path)
    }

    fn place_segment<R: RandomSource + ?Sized>(
        &self,
        segment: u16,
        origin: GeoPoint,
        zones: &ZoneRegistry,
        rng: &mut R,
    ) -> Result<GeoPoint> {
        let cfg = &self.config;

        for attempt in 0..cfg.max_attempts_per_segment {
            let candidate = origin.offset(rng.next_offset(cfg.max_step)?, rng.next_offset(cfg.max_step)?);
            let Some(zone) = zones.zone_at(&candidate) else {
                return Ok(candidate);
            };
            trace!(
                "segment {} attempt {}: candidate ({}) inside {}",
                segment,
                attempt,
                candidate,
                zone.name()
            );

            let deflected = candidate.offset(
                rng.next_offset(cfg.deflect_step)?,
                rng.next_offset(cfg.deflect_step)?,
            );
            if !zones.is_restricted(&deflected) {
                trace!("segment {}: deflected to ({})", segment, deflected);
                return Ok(deflected);
            }
        }

        warn!(
            "no feasible waypoint for segment {} from ({}) after {} attempts",
            segment, origin, cfg.max_attempts_per_segment
        );
        Err(NavError::NoFeasiblePath {
            segment,
            attempts: cfg.max_attempts_per_segment,
        })
    }
}

/// Generate a path with default deflection and retry bounds.
///
/// The deflection bound is a quarter of `max_step`.
pub fn generate<R: RandomSource + ?Sized>(
    start: GeoPoint,
    zones: &ZoneRegistry,
    segment_count: u16,
    max_step: f64,
    rng: &mut R,
) -> Result<Path> {
    let config = PathConfig {
        segment_count,
        max_step,
        deflect_step: max_step / 4.0,
        ..PathConfig::default()
    };
    PathGenerator::new(config)?.generate(start, zones, rng)
}
