//! # Geofenced Drone Navigation Simulator
//!
//! Generates synthetic drone paths that avoid polygonal no-fly zones and
//! plays them back tick by tick with synthetic telemetry.
//!
//! ## Features
//! - Even-odd ray casting point-in-polygon test
//! - Fixed-capacity zone registry, unique by id
//! - Random-walk path generator with bounded retry and explicit failure
//! - Playback state machine (Idle, Navigating, Completed) with
//!   constant-speed or fixed-fraction interpolation
//! - Explicit, cancellable tick schedule instead of ambient timers
//!
//! ## Memory
//! - No heap allocation; all collections are `heapless`
//! - `no_std` when built without the `std` feature

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(missing_docs)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]

/// Path generator, session and telemetry parameters
pub mod config;
/// No-fly zones and the point-in-polygon test
pub mod geofence;
/// Random-walk path generation around no-fly zones
pub mod path_planner;
/// Playback state machine
pub mod player;
/// Random number sources (OS entropy and seeded)
pub mod rng;
/// Navigation session tying zones, path and playback together
pub mod session;
/// Synthetic battery, speed and altitude
pub mod telemetry;
/// Clocks and the cancellable tick schedule
pub mod time_abstraction;
/// Core types (GeoPoint, ZoneId, NavError)
pub mod types;

pub use config::{default_zone_registry, InterpolationMode, NavigationConfig};
pub use geofence::{contains, Zone, ZoneRegistry};
pub use path_planner::{generate, Path, PathGenerator};
pub use player::{PathPlayer, PlaybackCursor, PlaybackState, TickOutcome};
pub use session::NavigationSession;
pub use telemetry::TelemetrySnapshot;
pub use types::*;
