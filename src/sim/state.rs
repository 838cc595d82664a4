//! Session entities and the per-frame view handed to presentation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::escalation::EscalationPhase;
use super::rect::Rect;

/// What an obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Wall along an arena edge
    Border,
    /// Interior building
    Building,
}

/// A static obstacle; fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    Player,
    Pursuer,
}

/// Animation hint derived from velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    Idle,
    Moving,
}

/// A moving body in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    pub role: AgentRole,
    /// Center of the footprint
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    /// Last non-zero movement direction, for sprite facing
    pub heading: Vec2,
    /// Side length of the square footprint
    pub size: f32,
}

impl Agent {
    pub fn new(id: u32, role: AgentRole, position: Vec2, speed: f32, size: f32) -> Self {
        Self {
            id,
            role,
            position,
            velocity: Vec2::ZERO,
            speed,
            heading: Vec2::X,
            size,
        }
    }

    pub fn footprint(&self) -> Rect {
        Rect::square(self.position, self.size)
    }

    pub fn motion(&self) -> Motion {
        if self.velocity == Vec2::ZERO {
            Motion::Idle
        } else {
            Motion::Moving
        }
    }

    /// Set velocity, remembering the direction when moving
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        if let Some(dir) = velocity.try_normalize() {
            self.heading = dir;
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

/// Placement problems the session absorbed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Buildings dropped because no free spot was found
    pub skipped_obstacles: u32,
    /// Pursuer spawns abandoned because no free spot was found
    pub abandoned_spawns: u32,
    /// The player spawned at the arena center fallback
    pub player_spawn_fallback: bool,
}

/// Render-facing snapshot of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: u32,
    pub role: AgentRole,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: Vec2,
    pub motion: Motion,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            role: agent.role,
            position: agent.position,
            velocity: agent.velocity,
            heading: agent.heading,
            motion: agent.motion(),
        }
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub obstacles: Vec<Obstacle>,
    /// Player first, then pursuers in spawn order
    pub agents: Vec<AgentView>,
    pub elapsed_ms: u64,
    pub pursuer_count: usize,
    pub pursuers_per_tick: u32,
    pub phase: EscalationPhase,
    /// Player was caught; the session is frozen until reset
    pub over: bool,
    pub diagnostics: Diagnostics,
}

impl FrameView {
    /// Elapsed time as `m:ss`
    pub fn elapsed_label(&self) -> String {
        let secs = self.elapsed_ms / 1000;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}
