//! Tests for the playback state machine
//!
//! Tests cover:
//! - State transitions (Idle, Navigating, Completed)
//! - Constant-speed and fixed-fraction interpolation
//! - Telemetry refresh per tick

use geofence_navigator::config::{InterpolationMode, PlaybackConfig, TelemetryConfig};
use geofence_navigator::player::{PathPlayer, PlaybackCursor, PlaybackState, TickOutcome};
use geofence_navigator::rng::SeededRng;
use geofence_navigator::telemetry::{TelemetrySimulator, TelemetrySnapshot};
use geofence_navigator::{GeoPoint, NavError, Path};

fn path(points: &[(f64, f64)]) -> Path {
    let pts: Vec<GeoPoint> = points.iter().map(|&(a, b)| GeoPoint::new(a, b)).collect();
    Path::from_waypoints(&pts).unwrap()
}

fn player(factor: f64, mode: InterpolationMode) -> PathPlayer {
    PathPlayer::new(PlaybackConfig {
        tick_interval_ms: 500,
        interpolation_factor: factor,
        mode,
    })
    .unwrap()
}

fn run_to_completion(
    p: &mut PathPlayer,
    tel: &mut TelemetrySimulator,
    rng: &mut SeededRng,
    limit: usize,
) -> usize {
    for n in 1..=limit {
        if let TickOutcome::Completed { .. } = p.tick(tel, rng).unwrap() {
            return n;
        }
    }
    panic!("playback did not complete within {} ticks", limit);
}

mod state_tests {
    use super::*;

    #[test]
    fn test_new_player_idle() {
        let p = player(0.1, InterpolationMode::ConstantSpeed);
        assert_eq!(p.state(), PlaybackState::Idle);
        assert!(p.path().is_empty());
        assert_eq!(p.position(), None);
    }

    #[test]
    fn test_load_resets_running_playback() {
        let mut p = player(0.1, InterpolationMode::ConstantSpeed);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(1);
        p.load(path(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        p.start().unwrap();
        for _ in 0..13 {
            p.tick(&mut tel, &mut rng).unwrap();
        }
        assert_eq!(p.cursor().index, 1);

        p.load(path(&[(5.0, 5.0), (6.0, 6.0)]));
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(p.cursor(), PlaybackCursor::default());
        assert_eq!(p.position(), Some(GeoPoint::new(5.0, 5.0)));
    }

    #[test]
    fn test_idle_tick_is_inactive() {
        let mut p = player(0.1, InterpolationMode::ConstantSpeed);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(1);
        p.load(path(&[(0.0, 0.0), (1.0, 0.0)]));
        assert_eq!(p.tick(&mut tel, &mut rng).unwrap(), TickOutcome::Inactive);
        assert_eq!(tel.current(), TelemetrySnapshot::at_rest(100));
    }

    #[test]
    fn test_invalid_factor_rejected() {
        for factor in [0.0, -0.5, 1.5, f64::NAN] {
            let result = PathPlayer::new(PlaybackConfig {
                tick_interval_ms: 500,
                interpolation_factor: factor,
                mode: InterpolationMode::ConstantSpeed,
            });
            assert_eq!(result.unwrap_err(), NavError::ConfigError);
        }
    }
}

mod interpolation_tests {
    use super::*;

    #[test]
    fn test_two_waypoints_ticks_scale_with_factor() {
        for (factor, expected) in [(0.1, 10), (0.25, 4), (0.5, 2), (1.0, 1), (0.3, 4)] {
            let mut p = player(factor, InterpolationMode::ConstantSpeed);
            let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
            let mut rng = SeededRng::new(2);
            p.load(path(&[(13.0837, 80.2707), (13.1, 80.29)]));
            p.start().unwrap();
            assert_eq!(run_to_completion(&mut p, &mut tel, &mut rng, 100), expected);
        }
    }

    #[test]
    fn test_completed_holds_position() {
        let mut p = player(0.1, InterpolationMode::ConstantSpeed);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(3);
        p.load(path(&[(0.0, 0.0), (1.0, 1.0)]));
        p.start().unwrap();
        run_to_completion(&mut p, &mut tel, &mut rng, 20);

        let at_end = p.position();
        let battery = tel.current().battery_percent;
        for _ in 0..5 {
            assert_eq!(p.tick(&mut tel, &mut rng).unwrap(), TickOutcome::Inactive);
            assert_eq!(p.position(), at_end);
        }
        assert_eq!(p.state(), PlaybackState::Completed);
        assert_eq!(tel.current().battery_percent, battery);
    }

    #[test]
    fn test_constant_speed_equal_steps() {
        let mut p = player(0.25, InterpolationMode::ConstantSpeed);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(4);
        p.load(path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 2.0)]));
        p.start().unwrap();

        let mut positions = Vec::new();
        loop {
            match p.tick(&mut tel, &mut rng).unwrap() {
                TickOutcome::Moved { position, .. } => positions.push(position),
                TickOutcome::Completed { position, .. } => {
                    positions.push(position);
                    break;
                }
                TickOutcome::Inactive => unreachable!(),
            }
        }
        assert_eq!(positions.len(), 8);
        assert_eq!(positions[3], GeoPoint::new(1.0, 0.0));
        assert_eq!(positions[5], GeoPoint::new(1.0, 1.0));
        assert_eq!(positions[7], GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_fixed_fraction_one_tick_per_segment() {
        let mut p = player(0.1, InterpolationMode::FixedFraction);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(5);
        p.load(path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
        p.start().unwrap();

        match p.tick(&mut tel, &mut rng).unwrap() {
            TickOutcome::Moved { position, .. } => {
                assert!((position.lat - 0.1).abs() < 1e-12);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(p.cursor().index, 1);
        assert_eq!(run_to_completion(&mut p, &mut tel, &mut rng, 10), 2);
    }
}

mod telemetry_tests {
    use super::*;

    #[test]
    fn test_each_tick_drains_battery() {
        let mut p = player(0.1, InterpolationMode::ConstantSpeed);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(6);
        p.load(path(&[(0.0, 0.0), (1.0, 0.0)]));
        p.start().unwrap();
        run_to_completion(&mut p, &mut tel, &mut rng, 20);
        assert_eq!(tel.current().battery_percent, 90);
        assert!((10..=30).contains(&tel.current().speed_kmh));
    }

    #[test]
    fn test_battery_floors_at_zero_on_long_path() {
        let points: Vec<(f64, f64)> = (0..40).map(|i| (i as f64 * 0.01, 0.0)).collect();
        let mut p = player(0.1, InterpolationMode::ConstantSpeed);
        let mut tel = TelemetrySimulator::new(TelemetryConfig::default());
        let mut rng = SeededRng::new(7);
        p.load(path(&points));
        p.start().unwrap();
        let ticks = run_to_completion(&mut p, &mut tel, &mut rng, 1000);
        assert_eq!(ticks, 390);
        assert_eq!(tel.current().battery_percent, 0);
    }
}
