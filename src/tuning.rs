//! Game balance and policy values
//!
//! Every fixed policy value the simulation uses lives here so a host can
//! load an alternative balance from JSON. Missing fields fall back to the
//! defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::Arena;

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    /// Side length of a building
    pub obstacle_size: f32,
    /// Minimum gap between buildings
    pub min_obstacle_spacing: f32,
    /// Fixed building count; derived from arena area when unset
    pub obstacle_count: Option<u32>,
    /// Arena area per building for the derived count
    pub area_per_building: f32,
    /// Arena area per pursuer present at session start (0 disables)
    pub area_per_initial_pursuer: f32,
    /// Thickness of the arena border walls
    pub border_thickness: f32,
    /// Retry ceiling for obstacle and spawn placement
    pub placement_attempts: u32,

    // === Agents ===
    /// Side length of agent footprints (also the spawn probe size)
    pub agent_size: f32,
    pub player_speed: f32,
    pub pursuer_speed: f32,

    // === Escalation (milliseconds) ===
    pub peace_duration_ms: u64,
    pub spawn_interval_ms: u64,
    pub ramp_interval_ms: u64,

    // === Pursuit ===
    pub prediction_horizon_ms: u64,
    pub retarget_cadence_ms: u64,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            obstacle_size: OBSTACLE_SIZE,
            min_obstacle_spacing: MIN_OBSTACLE_SPACING,
            obstacle_count: None,
            area_per_building: AREA_PER_BUILDING,
            area_per_initial_pursuer: AREA_PER_INITIAL_PURSUER,
            border_thickness: BORDER_THICKNESS,
            placement_attempts: PLACEMENT_ATTEMPTS,

            agent_size: AGENT_SIZE,
            player_speed: PLAYER_SPEED,
            pursuer_speed: PURSUER_SPEED,

            peace_duration_ms: PEACE_DURATION_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            ramp_interval_ms: RAMP_INTERVAL_MS,

            prediction_horizon_ms: PREDICTION_HORIZON_MS,
            retarget_cadence_ms: RETARGET_CADENCE_MS,
            spawn_min_distance: SPAWN_MIN_DISTANCE,
            spawn_max_distance: SPAWN_MAX_DISTANCE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("obstacle_size", self.obstacle_size),
            ("agent_size", self.agent_size),
            ("border_thickness", self.border_thickness),
            ("area_per_building", self.area_per_building),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("min_obstacle_spacing", self.min_obstacle_spacing),
            ("area_per_initial_pursuer", self.area_per_initial_pursuer),
            ("player_speed", self.player_speed),
            ("pursuer_speed", self.pursuer_speed),
            ("spawn_min_distance", self.spawn_min_distance),
            ("spawn_max_distance", self.spawn_max_distance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.spawn_min_distance > self.spawn_max_distance {
            return Err(SimError::invalid(format!(
                "spawn distance range is inverted: {} > {}",
                self.spawn_min_distance, self.spawn_max_distance
            )));
        }

        if self.placement_attempts == 0 {
            return Err(SimError::invalid("placement_attempts must be at least 1"));
        }

        let intervals = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("ramp_interval_ms", self.ramp_interval_ms),
            ("retarget_cadence_ms", self.retarget_cadence_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(SimError::invalid(format!("{name} must be non-zero")));
            }
        }

        Ok(())
    }

    /// Check the tuning against the host-supplied arena
    pub fn validate_for(&self, arena: &Arena) -> Result<(), SimError> {
        self.validate()?;

        if !(arena.width.is_finite() && arena.width > 0.0)
            || !(arena.height.is_finite() && arena.height > 0.0)
        {
            return Err(SimError::invalid(format!(
                "arena must have positive dimensions, got {}x{}",
                arena.width, arena.height
            )));
        }

        let smallest = arena.width.min(arena.height);
        if self.obstacle_size > smallest {
            return Err(SimError::invalid(format!(
                "obstacle_size {} does not fit in a {}x{} arena",
                self.obstacle_size, arena.width, arena.height
            )));
        }
        if self.agent_size > smallest {
            return Err(SimError::invalid(format!(
                "agent_size {} does not fit in a {}x{} arena",
                self.agent_size, arena.width, arena.height
            )));
        }

        // Counts the arena cannot physically hold
        let buildings = self.building_target(arena);
        let building_room = arena.area() / (self.obstacle_size * self.obstacle_size);
        if buildings as f32 > building_room {
            return Err(SimError::invalid(format!(
                "{buildings} buildings of size {} cannot fit in a {}x{} arena",
                self.obstacle_size, arena.width, arena.height
            )));
        }
        let pursuers = self.initial_pursuers(arena);
        let agent_room = arena.area() / (self.agent_size * self.agent_size);
        if pursuers as f32 > agent_room {
            return Err(SimError::invalid(format!(
                "{pursuers} initial pursuers of size {} cannot fit in a {}x{} arena",
                self.agent_size, arena.width, arena.height
            )));
        }

        Ok(())
    }

    /// Number of buildings to attempt for this arena
    pub fn building_target(&self, arena: &Arena) -> u32 {
        self.obstacle_count
            .unwrap_or_else(|| (arena.area() / self.area_per_building).floor() as u32)
    }

    /// Number of pursuers present when a session starts
    pub fn initial_pursuers(&self, arena: &Arena) -> u32 {
        if self.area_per_initial_pursuer <= 0.0 {
            return 0;
        }
        (arena.area() / self.area_per_initial_pursuer).floor() as u32
    }
}
