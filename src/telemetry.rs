//! Synthetic telemetry for path playback
//!
//! Values are drawn independently each tick and are not coupled to the
//! path geometry. Battery only ever drains within one playback.

use crate::config::TelemetryConfig;
use crate::rng::RandomSource;
use crate::types::*;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Battery level below which the snapshot reports low battery (%)
pub const LOW_BATTERY_THRESHOLD: u8 = 50;

/// Telemetry values shown during playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Battery percentage (0-100)
    pub battery_percent: u8,
    /// Ground speed (km/h)
    pub speed_kmh: u16,
    /// Altitude (m)
    pub altitude_m: u16,
}

impl TelemetrySnapshot {
    /// Resting snapshot with the given battery level
    pub fn at_rest(battery_percent: u8) -> Self {
        Self {
            battery_percent,
            speed_kmh: 0,
            altitude_m: 0,
        }
    }

    /// Battery above the low threshold
    pub fn battery_healthy(&self) -> bool {
        self.battery_percent > LOW_BATTERY_THRESHOLD
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::at_rest(100)
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "battery {}%, speed {} km/h, altitude {} m",
            self.battery_percent, self.speed_kmh, self.altitude_m
        )
    }
}

/// Produces a fresh snapshot per playback tick
#[derive(Debug, Clone)]
pub struct TelemetrySimulator {
    config: TelemetryConfig,
    current: TelemetrySnapshot,
}

impl TelemetrySimulator {
    /// Create a simulator at rest with a full battery
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            config,
            current: TelemetrySnapshot::at_rest(config.initial_battery),
        }
    }

    /// Latest snapshot
    pub fn current(&self) -> TelemetrySnapshot {
        self.current
    }

    /// Back to rest with the initial battery level
    pub fn reset(&mut self) {
        self.current = TelemetrySnapshot::at_rest(self.config.initial_battery);
    }

    /// Drain the battery and redraw speed and altitude
    pub fn advance<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<TelemetrySnapshot> {
        let speed_kmh = draw_rounded(rng, self.config.speed_range_kmh)?;
        let altitude_m = draw_rounded(rng, self.config.altitude_range_m)?;
        self.current = TelemetrySnapshot {
            battery_percent: self
                .current
                .battery_percent
                .saturating_sub(self.config.battery_drain_per_tick),
            speed_kmh,
            altitude_m,
        };
        Ok(self.current)
    }
}

/// Uniform draw over `[lo, hi]`, rounded to the nearest integer
fn draw_rounded<R: RandomSource + ?Sized>(rng: &mut R, (lo, hi): (u16, u16)) -> Result<u16> {
    let v = rng.next_f64_range(lo as f64, hi as f64)?;
    Ok((libm::round(v) as u16).clamp(lo, hi))
}
