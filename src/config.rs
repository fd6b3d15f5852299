//! Configuration for path generation, playback and synthetic telemetry

use crate::geofence::{Zone, ZoneRegistry};
use crate::path_planner::MAX_PATH_POINTS;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Default start point (Chennai)
pub const DEFAULT_START: GeoPoint = GeoPoint::new(13.0837, 80.2707);

/// Default playback tick interval (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 500;

/// Default interpolation factor per tick
pub const DEFAULT_INTERPOLATION_FACTOR: f64 = 0.1;

/// How the player moves between waypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Each segment is covered in `ceil(1 / factor)` equal steps and every
    /// waypoint is reached exactly
    ConstantSpeed,
    /// Jump `factor` of the way into the next segment and advance the
    /// cursor by one waypoint per tick
    FixedFraction,
}

/// Path generator parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Number of waypoints appended after the start point
    pub segment_count: u16,
    /// Primary candidate offset bound per axis (degrees)
    pub max_step: f64,
    /// Deflected candidate offset bound per axis (degrees)
    pub deflect_step: f64,
    /// Attempts per segment before generation fails
    pub max_attempts_per_segment: u16,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            segment_count: 10,
            max_step: 0.02,
            deflect_step: 0.005,
            max_attempts_per_segment: 64,
        }
    }
}

impl PathConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.segment_count as usize + 1 > MAX_PATH_POINTS {
            return Err(NavError::ConfigError);
        }
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return Err(NavError::ConfigError);
        }
        if !(self.deflect_step.is_finite() && self.deflect_step > 0.0) {
            return Err(NavError::ConfigError);
        }
        if self.deflect_step > self.max_step {
            return Err(NavError::ConfigError);
        }
        if self.max_attempts_per_segment == 0 {
            return Err(NavError::ConfigError);
        }
        Ok(())
    }
}

/// Path player parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Interval between ticks (milliseconds)
    pub tick_interval_ms: u32,
    /// Fraction of a segment covered per tick
    pub interpolation_factor: f64,
    /// Interpolation scheme
    pub mode: InterpolationMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            interpolation_factor: DEFAULT_INTERPOLATION_FACTOR,
            mode: InterpolationMode::ConstantSpeed,
        }
    }
}

impl PlaybackConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(NavError::ConfigError);
        }
        let f = self.interpolation_factor;
        if !(f.is_finite() && f > 0.0 && f <= 1.0) {
            return Err(NavError::ConfigError);
        }
        Ok(())
    }

    /// Ticks needed to cover one segment at constant speed
    pub fn steps_per_segment(&self) -> u32 {
        let steps = libm::ceil(1.0 / self.interpolation_factor - 1e-9);
        (steps as u32).max(1)
    }
}

/// Synthetic telemetry parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Battery at the start of a playback (0-100%)
    pub initial_battery: u8,
    /// Battery drained per tick (%)
    pub battery_drain_per_tick: u8,
    /// Speed draw range, inclusive (km/h)
    pub speed_range_kmh: (u16, u16),
    /// Altitude draw range, inclusive (m)
    pub altitude_range_m: (u16, u16),
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            initial_battery: 100,
            battery_drain_per_tick: 1,
            speed_range_kmh: (10, 30),
            altitude_range_m: (0, 100),
        }
    }
}

impl TelemetryConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.initial_battery > 100 {
            return Err(NavError::ConfigError);
        }
        if self.speed_range_kmh.0 > self.speed_range_kmh.1 {
            return Err(NavError::ConfigError);
        }
        if self.altitude_range_m.0 > self.altitude_range_m.1 {
            return Err(NavError::ConfigError);
        }
        Ok(())
    }
}

/// Full navigation session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Initial simulated position
    pub start: GeoPoint,
    /// Path generator parameters
    pub path: PathConfig,
    /// Player parameters
    pub playback: PlaybackConfig,
    /// Telemetry parameters
    pub telemetry: TelemetryConfig,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            path: PathConfig::default(),
            playback: PlaybackConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl NavigationConfig {
    /// Configuration for testing (short paths, coarse steps)
    pub fn test_config() -> Self {
        Self {
            start: DEFAULT_START,
            path: PathConfig {
                segment_count: 3,
                max_step: 0.02,
                deflect_step: 0.005,
                max_attempts_per_segment: 32,
            },
            playback: PlaybackConfig {
                tick_interval_ms: 100,
                interpolation_factor: 0.25,
                mode: InterpolationMode::ConstantSpeed,
            },
            telemetry: TelemetryConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() {
            return Err(NavError::ConfigError);
        }
        self.path.validate()?;
        self.playback.validate()?;
        self.telemetry.validate()
    }
}

/// The two demo no-fly zones around central Chennai
pub fn default_zone_registry() -> Result<ZoneRegistry> {
    ZoneRegistry::from_zones([
        Zone::rectangle(
            ZoneId::new(1),
            "Airport Restricted Zone",
            GeoPoint::new(13.0900, 80.2650),
            GeoPoint::new(13.0950, 80.2750),
        )?,
        Zone::rectangle(
            ZoneId::new(2),
            "Government Complex",
            GeoPoint::new(13.0750, 80.2800),
            GeoPoint::new(13.0800, 80.2850),
        )?,
    ])
}
