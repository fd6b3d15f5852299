//! Path playback state machine
//!
//! The player walks a simulated position along a [`Path`] one tick at a
//! time. It does not own a timer; the caller (usually
//! [`NavigationSession`](crate::session::NavigationSession)) decides when a
//! tick is due.
//!
//! ```text
//!   load ──► Idle ──start──► Navigating ──last waypoint──► Completed
//!              ▲                 │                            │
//!              └──── stop ───────┘◄──────── start ────────────┘
//! ```

use crate::config::{InterpolationMode, PlaybackConfig};
use crate::path_planner::Path;
use crate::rng::RandomSource;
use crate::telemetry::{TelemetrySimulator, TelemetrySnapshot};
use crate::types::*;
use log::info;
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No playback running
    Idle,
    /// Moving along the path
    Navigating,
    /// Reached the final waypoint
    Completed,
}

/// Position within the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackCursor {
    /// Index of the waypoint the current segment starts from
    pub index: usize,
    /// Steps taken into the current segment
    pub step: u32,
}

impl PlaybackCursor {
    /// Back to the first waypoint
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Player was not navigating; nothing changed
    Inactive,
    /// Moved to a new position
    Moved {
        /// New simulated position
        position: GeoPoint,
        /// Refreshed telemetry
        telemetry: TelemetrySnapshot,
    },
    /// Moved and reached the last waypoint
    Completed {
        /// Final simulated position
        position: GeoPoint,
        /// Refreshed telemetry
        telemetry: TelemetrySnapshot,
    },
}

/// Moves a simulated position along a path
#[derive(Debug, Clone)]
pub struct PathPlayer {
    config: PlaybackConfig,
    path: Path,
    cursor: PlaybackCursor,
    state: PlaybackState,
    position: Option<GeoPoint>,
}

impl PathPlayer {
    /// Create an idle player with no path
    pub fn new(config: PlaybackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            path: Path::new(),
            cursor: PlaybackCursor::default(),
            state: PlaybackState::Idle,
            position: None,
        })
    }

    /// Replace the path; resets the cursor and returns to `Idle`
    pub fn load(&mut self, path: Path) {
        self.position = path.first().copied();
        self.path = path;
        self.cursor.reset();
        self.state = PlaybackState::Idle;
    }

    /// Begin navigating from the first waypoint
    pub fn start(&mut self) -> Result<()> {
        if self.state == PlaybackState::Navigating {
            return Err(NavError::AlreadyNavigating);
        }
        let first = *self.path.first().ok_or(NavError::EmptyPath)?;

        self.cursor.reset();
        self.position = Some(first);

        if self.path.len() == 1 {
            self.state = PlaybackState::Completed;
            info!("single-waypoint path, playback complete");
        } else {
            self.state = PlaybackState::Navigating;
            info!("navigation started over {} waypoints", self.path.len());
        }
        Ok(())
    }

    /// Stop navigating and rewind cursor and position to the first waypoint
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Navigating {
            info!("navigation stopped at waypoint {}", self.cursor.index);
        }
        self.cursor.reset();
        self.position = self.path.first().copied();
        self.state = PlaybackState::Idle;
    }

    /// Advance playback by one tick
    pub fn tick<R: RandomSource + ?Sized>(
        &mut self,
        telemetry: &mut TelemetrySimulator,
        rng: &mut R,
    ) -> Result<TickOutcome> {
        if self.state != PlaybackState::Navigating {
            return Ok(TickOutcome::Inactive);
        }

        let last = self.path.len().saturating_sub(1);
        if self.cursor.index >= last {
            self.finish();
            return Ok(TickOutcome::Inactive);
        }

        let from = self.path.waypoints()[self.cursor.index];
        let to = self.path.waypoints()[self.cursor.index + 1];
        let factor = self.config.interpolation_factor;

        let position = match self.config.mode {
            InterpolationMode::ConstantSpeed => {
                let steps = self.config.steps_per_segment();
                self.cursor.step += 1;
                if self.cursor.step >= steps {
                    self.cursor.index += 1;
                    self.cursor.step = 0;
                    to
                } else {
                    from.lerp(&to, self.cursor.step as f64 / steps as f64)
                }
            }
            InterpolationMode::FixedFraction => {
                self.cursor.index += 1;
                from.lerp(&to, factor)
            }
        };

        self.position = Some(position);
        let snapshot = telemetry.advance(rng)?;

        if self.cursor.index >= last {
            self.finish();
            Ok(TickOutcome::Completed {
                position,
                telemetry: snapshot,
            })
        } else {
            Ok(TickOutcome::Moved {
                position,
                telemetry: snapshot,
            })
        }
    }

    fn finish(&mut self) {
        self.state = PlaybackState::Completed;
        if let Some(position) = self.position {
            info!("navigation completed at ({})", position);
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Navigating flag
    pub fn is_navigating(&self) -> bool {
        self.state == PlaybackState::Navigating
    }

    /// Cursor into the loaded path
    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// Loaded path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last simulated position, if a path was ever loaded
    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    /// Playback parameters
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }
}
