//! Chase Arena - a top-down chase simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (placement, pursuit, escalation, director)
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration and placement errors

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Side length of a square building (arena units)
    pub const OBSTACLE_SIZE: f32 = 100.0;
    /// Side length of an agent footprint
    pub const AGENT_SIZE: f32 = 40.0;
    /// Minimum gap between buildings (room for two agents side by side)
    pub const MIN_OBSTACLE_SPACING: f32 = 2.0 * AGENT_SIZE;
    /// Thickness of the four arena border walls
    pub const BORDER_THICKNESS: f32 = 10.0;
    /// Arena area per building when the count is derived from the arena size
    pub const AREA_PER_BUILDING: f32 = 80_000.0;
    /// Arena area per pursuer present at session start
    pub const AREA_PER_INITIAL_PURSUER: f32 = 100_000.0;

    /// Retry ceiling for every rejection-sampling loop
    pub const PLACEMENT_ATTEMPTS: u32 = 100;

    /// Agent speeds (units per second)
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PURSUER_SPEED: f32 = 85.0;

    /// Escalation timings (milliseconds)
    pub const PEACE_DURATION_MS: u64 = 3_000;
    pub const SPAWN_INTERVAL_MS: u64 = 2_500;
    pub const RAMP_INTERVAL_MS: u64 = 30_000;

    /// How far ahead pursuers extrapolate the player (milliseconds)
    pub const PREDICTION_HORIZON_MS: u64 = 500;
    /// How often each pursuer refreshes its aim point (milliseconds)
    pub const RETARGET_CADENCE_MS: u64 = 500;

    /// Radial band around the player where new pursuers appear
    pub const SPAWN_MIN_DISTANCE: f32 = 200.0;
    pub const SPAWN_MAX_DISTANCE: f32 = 400.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
