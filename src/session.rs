//! Navigation session: zones, path, player and tick schedule together
//!
//! A session belongs to one consumer (for example a map view). All state
//! changes go through `&mut self`, so ticks and user actions are strictly
//! serialized.
//!
//! # Example
//! ```
//! use geofence_navigator::config::{default_zone_registry, NavigationConfig};
//! use geofence_navigator::rng::SeededRng;
//! use geofence_navigator::session::NavigationSession;
//! use geofence_navigator::player::PlaybackState;
//!
//! let zones = default_zone_registry().unwrap();
//! let mut session =
//!     NavigationSession::new(NavigationConfig::default(), zones, SeededRng::new(7)).unwrap();
//!
//! session.generate_path().unwrap();
//! session.start_navigation(0).unwrap();
//! session.poll(60_000).unwrap();
//! assert_eq!(session.state(), PlaybackState::Completed);
//! ```

use crate::config::NavigationConfig;
use crate::geofence::{Zone, ZoneRegistry};
use crate::path_planner::{Path, PathGenerator};
use crate::player::{PathPlayer, PlaybackCursor, PlaybackState, TickOutcome};
use crate::rng::RandomSource;
use crate::telemetry::{TelemetrySimulator, TelemetrySnapshot};
use crate::time_abstraction::TickSchedule;
use crate::types::*;
use log::{debug, info};
use serde::Serialize;

/// Snapshot handed to the rendering consumer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MapFrame<'a> {
    /// Current simulated position
    pub position: GeoPoint,
    /// Current path (empty before the first generation)
    pub path: &'a Path,
    /// Registered no-fly zones
    pub zones: &'a ZoneRegistry,
    /// Latest telemetry
    pub telemetry: TelemetrySnapshot,
    /// Playback state
    pub state: PlaybackState,
}

/// Summary of one [`NavigationSession::poll`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    /// Ticks that fell due
    pub ticks_due: u32,
    /// Ticks that moved the drone
    pub ticks_applied: u32,
    /// Playback reached the final waypoint during this poll
    pub completed: bool,
}

/// One simulated drone over a fixed zone set
pub struct NavigationSession<R: RandomSource> {
    config: NavigationConfig,
    zones: ZoneRegistry,
    generator: PathGenerator,
    player: PathPlayer,
    telemetry: TelemetrySimulator,
    rng: R,
    position: GeoPoint,
    schedule: Option<TickSchedule>,
}

impl<R: RandomSource> NavigationSession<R> {
    /// Create a session; the zone set is fixed for its lifetime
    pub fn new(config: NavigationConfig, zones: ZoneRegistry, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            generator: PathGenerator::new(config.path)?,
            player: PathPlayer::new(config.playback)?,
            telemetry: TelemetrySimulator::new(config.telemetry),
            position: config.start,
            config,
            zones,
            rng,
            schedule: None,
        })
    }

    /// Replace the path with a new one starting at the current position.
    ///
    /// Cancels any running playback and resets cursor and telemetry. On
    /// failure the previous path and playback state are kept.
    pub fn generate_path(&mut self) -> Result<&Path> {
        let path = self
            .generator
            .generate(self.position, &self.zones, &mut self.rng)?;

        self.cancel_schedule();
        self.player.load(path);
        self.telemetry.reset();
        info!(
            "new path: {} waypoints from ({})",
            self.player.path().len(),
            self.position
        );
        Ok(self.player.path())
    }

    /// Start playback; ticks fall due every `tick_interval_ms` after `now_ms`
    pub fn start_navigation(&mut self, now_ms: u64) -> Result<()> {
        self.player.start()?;
        if let Some(first) = self.player.position() {
            self.position = first;
        }
        if self.player.is_navigating() {
            self.schedule = Some(TickSchedule::new(
                now_ms,
                self.config.playback.tick_interval_ms,
            ));
        }
        Ok(())
    }

    /// Stop playback; cursor and position go back to the first waypoint
    pub fn stop_navigation(&mut self) {
        self.cancel_schedule();
        self.player.stop();
        if let Some(first) = self.player.position() {
            self.position = first;
        }
    }

    /// Run every tick that fell due up to `now_ms`
    pub fn poll(&mut self, now_ms: u64) -> Result<PollReport> {
        let mut report = PollReport::default();
        let Some(schedule) = self.schedule.as_mut() else {
            return Ok(report);
        };

        report.ticks_due = schedule.due_ticks(now_ms);
        for _ in 0..report.ticks_due {
            match self.tick()? {
                TickOutcome::Inactive => break,
                TickOutcome::Moved { .. } => report.ticks_applied += 1,
                TickOutcome::Completed { .. } => {
                    report.ticks_applied += 1;
                    report.completed = true;
                    break;
                }
            }
        }

        if !self.player.is_navigating() {
            self.cancel_schedule();
        }
        Ok(report)
    }

    /// Apply a single tick immediately, ignoring the schedule
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let outcome = self.player.tick(&mut self.telemetry, &mut self.rng)?;
        match outcome {
            TickOutcome::Moved { position, .. } | TickOutcome::Completed { position, .. } => {
                self.position = position;
            }
            TickOutcome::Inactive => {}
        }
        Ok(outcome)
    }

    fn cancel_schedule(&mut self) {
        if let Some(mut schedule) = self.schedule.take() {
            schedule.cancel();
            debug!("playback schedule released");
        }
    }

    /// Rendering snapshot
    pub fn frame(&self) -> MapFrame<'_> {
        MapFrame {
            position: self.position,
            path: self.player.path(),
            zones: &self.zones,
            telemetry: self.telemetry.current(),
            state: self.player.state(),
        }
    }

    /// Current simulated position
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Current path
    pub fn path(&self) -> &Path {
        self.player.path()
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        self.player.state()
    }

    /// Navigating flag
    pub fn is_navigating(&self) -> bool {
        self.player.is_navigating()
    }

    /// Playback cursor
    pub fn cursor(&self) -> PlaybackCursor {
        self.player.cursor()
    }

    /// Latest telemetry
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.telemetry.current()
    }

    /// Registered zones
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Active tick schedule, if playback is running
    pub fn schedule(&self) -> Option<&TickSchedule> {
        self.schedule.as_ref()
    }

    /// Session configuration
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }
}
