//! Tests for geofenced path generation
//!
//! Tests cover:
//! - Path length and start point
//! - Zone avoidance with the demo zones
//! - Deflection and bounded retry
//! - Configuration validation

use geofence_navigator::config::PathConfig;
use geofence_navigator::geofence::{Zone, ZoneRegistry};
use geofence_navigator::path_planner::{generate, Path, PathGenerator, MAX_PATH_POINTS};
use geofence_navigator::rng::{RandomSource, SeededRng};
use geofence_navigator::{default_zone_registry, GeoPoint, NavError, Result, ZoneId};

const START: GeoPoint = GeoPoint::new(13.0837, 80.2707);

fn airport_only() -> ZoneRegistry {
    ZoneRegistry::from_zones([Zone::rectangle(
        ZoneId::new(1),
        "Airport Restricted Zone",
        GeoPoint::new(13.0900, 80.2650),
        GeoPoint::new(13.0950, 80.2750),
    )
    .unwrap()])
    .unwrap()
}

/// Replays a fixed list of unit values, then repeats the last one
struct ScriptedRng {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedRng {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            pos: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_u64(&mut self) -> Result<u64> {
        unreachable!("scripted source only yields f64")
    }

    fn next_f64(&mut self) -> Result<f64> {
        let v = self.values[self.pos.min(self.values.len() - 1)];
        self.pos += 1;
        Ok(v)
    }
}

mod generation_tests {
    use super::*;

    #[test]
    fn test_demo_scenario_avoids_airport() {
        let zones = airport_only();
        let airport = zones.get(ZoneId::new(1)).unwrap();
        assert!(airport.contains(&GeoPoint::new(13.0925, 80.2700)));

        for seed in 1..50 {
            let mut rng = SeededRng::new(seed);
            let path = generate(START, &zones, 10, 0.02, &mut rng).unwrap();
            assert_eq!(path.len(), 11);
            assert_eq!(path.first(), Some(&START));
            for wp in &path.waypoints()[1..] {
                assert!(!airport.contains(wp), "seed {} produced {}", seed, wp);
            }
        }
    }

    #[test]
    fn test_default_zones_avoided() {
        let zones = default_zone_registry().unwrap();
        let generator = PathGenerator::new(PathConfig::default()).unwrap();
        for seed in 100..130 {
            let mut rng = SeededRng::new(seed);
            let path = generator.generate(START, &zones, &mut rng).unwrap();
            assert!(path.waypoints()[1..].iter().all(|p| !zones.is_restricted(p)));
        }
    }

    #[test]
    fn test_same_seed_same_path() {
        let zones = default_zone_registry().unwrap();
        let a = generate(START, &zones, 10, 0.02, &mut SeededRng::new(8)).unwrap();
        let b = generate(START, &zones, 10, 0.02, &mut SeededRng::new(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_start_inside_zone_is_kept() {
        let zones = airport_only();
        let inside = GeoPoint::new(13.0925, 80.2700);
        let mut rng = SeededRng::new(4);
        let path = generate(inside, &zones, 5, 0.02, &mut rng).unwrap();
        assert_eq!(path.first(), Some(&inside));
        assert!(path.waypoints()[1..].iter().all(|p| !zones.is_restricted(p)));
    }
}

mod rerouting_tests {
    use super::*;

    fn config() -> PathConfig {
        PathConfig {
            segment_count: 1,
            max_step: 1.0,
            deflect_step: 0.1,
            max_attempts_per_segment: 3,
        }
    }

    #[test]
    fn test_deflection_nudges_blocked_candidate() {
        // Thin band at lat 0.008..0.012; primary (+0.01, 0.0) lands in it and
        // is pushed a further +0.005 past the far edge
        let zones = ZoneRegistry::from_zones([Zone::rectangle(
            ZoneId::new(1),
            "Band",
            GeoPoint::new(0.008, -1.0),
            GeoPoint::new(0.012, 1.0),
        )
        .unwrap()])
        .unwrap();
        let config = PathConfig {
            segment_count: 1,
            max_step: 0.02,
            deflect_step: 0.005,
            max_attempts_per_segment: 3,
        };
        let mut rng = ScriptedRng::new(&[0.75, 0.5, 1.0, 0.5]);
        let path = PathGenerator::new(config)
            .unwrap()
            .generate(GeoPoint::new(0.0, 0.0), &zones, &mut rng)
            .unwrap();
        let wp = path.get(1).unwrap();
        assert!((wp.lat - 0.015).abs() < 1e-12, "got {}", wp);
        assert!(wp.lon.abs() < 1e-12);
    }

    #[test]
    fn test_deflection_stays_near_blocked_candidate() {
        // Primary (+0.8, 0.0) is blocked; the nudge (+0.1, 0.0) clears the
        // band without falling back toward the origin
        let zones = ZoneRegistry::from_zones([Zone::rectangle(
            ZoneId::new(1),
            "Block",
            GeoPoint::new(0.7, -2.0),
            GeoPoint::new(0.85, 2.0),
        )
        .unwrap()])
        .unwrap();
        let mut rng = ScriptedRng::new(&[0.9, 0.5, 1.0, 0.5]);
        let generator = PathGenerator::new(config()).unwrap();
        let path = generator
            .generate(GeoPoint::new(0.0, 0.0), &zones, &mut rng)
            .unwrap();
        let wp = path.get(1).unwrap();
        assert!((wp.lat - 0.9).abs() < 1e-12, "got {}", wp);
        assert!(wp.lon.abs() < 1e-12);
        assert!(!zones.is_restricted(wp));
    }

    #[test]
    fn test_retry_after_blocked_deflection() {
        // Attempt 1: primary and deflection both blocked by a zone around
        // the origin's neighbourhood; attempt 2: primary clear
        let zones = ZoneRegistry::from_zones([Zone::rectangle(
            ZoneId::new(1),
            "Ring",
            GeoPoint::new(0.05, -0.5),
            GeoPoint::new(0.95, 0.5),
        )
        .unwrap()])
        .unwrap();
        let mut rng = ScriptedRng::new(&[
            0.75, 0.5, // primary (+0.5, 0.0) blocked
            1.0, 0.5, // deflection to (+0.6, 0.0) blocked
            0.25, 0.5, // primary (-0.5, 0.0) clear
        ]);
        let generator = PathGenerator::new(config()).unwrap();
        let path = generator
            .generate(GeoPoint::new(0.0, 0.0), &zones, &mut rng)
            .unwrap();
        let wp = path.get(1).unwrap();
        assert!((wp.lat + 0.5).abs() < 1e-12);
        assert!(wp.lon.abs() < 1e-12);
    }

    #[test]
    fn test_exhaustion_reports_segment() {
        // Every draw lands at (+0.5 * step) which is always blocked
        let zones = ZoneRegistry::from_zones([Zone::rectangle(
            ZoneId::new(1),
            "Wall",
            GeoPoint::new(0.01, -1.0),
            GeoPoint::new(1.0, 1.0),
        )
        .unwrap()])
        .unwrap();
        let mut rng = ScriptedRng::new(&[0.75]);
        let generator = PathGenerator::new(config()).unwrap();
        let err = generator
            .generate(GeoPoint::new(0.0, 0.0), &zones, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            NavError::NoFeasiblePath {
                segment: 0,
                attempts: 3
            }
        );
    }
}

mod config_validation_tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_step() {
        let mut cfg = PathConfig::default();
        cfg.max_step = 0.0;
        assert_eq!(PathGenerator::new(cfg).unwrap_err(), NavError::ConfigError);
        cfg.max_step = f64::NAN;
        assert_eq!(PathGenerator::new(cfg).unwrap_err(), NavError::ConfigError);
    }

    #[test]
    fn test_rejects_deflection_larger_than_step() {
        let cfg = PathConfig {
            deflect_step: 0.05,
            ..PathConfig::default()
        };
        assert!(PathGenerator::new(cfg).is_err());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let cfg = PathConfig {
            max_attempts_per_segment: 0,
            ..PathConfig::default()
        };
        assert!(PathGenerator::new(cfg).is_err());
    }

    #[test]
    fn test_max_capacity_segments_allowed() {
        let cfg = PathConfig {
            segment_count: (MAX_PATH_POINTS - 1) as u16,
            ..PathConfig::default()
        };
        let generator = PathGenerator::new(cfg).unwrap();
        let path = generator
            .generate(START, &ZoneRegistry::new(), &mut SeededRng::new(2))
            .unwrap();
        assert_eq!(path.len(), MAX_PATH_POINTS);
    }
}

mod path_tests {
    use super::*;

    #[test]
    fn test_push_past_capacity() {
        let mut path = Path::new();
        for i in 0..MAX_PATH_POINTS {
            path.push(GeoPoint::new(i as f64, 0.0)).unwrap();
        }
        assert_eq!(
            path.push(GeoPoint::new(0.0, 0.0)),
            Err(NavError::PathCapacityExceeded)
        );
    }

    #[test]
    fn test_single_point_has_zero_length() {
        let path = Path::from_waypoints(&[START]).unwrap();
        assert_eq!(path.total_distance_km(), 0.0);
        assert_eq!(path.first(), path.last());
    }
}
