//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic for a
//! given seed and input sequence:
//! - Seeded RNG only, owned by the director
//! - Stable iteration order (by agent ID)
//! - Every retry loop bounded by the placement attempt ceiling
//! - No rendering or platform dependencies

pub mod collision;
pub mod director;
pub mod escalation;
pub mod placement;
pub mod pursuit;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ArcadePhysics, Physics, Surroundings};
pub use director::SimulationDirector;
pub use escalation::{EscalationPhase, EscalationState, EscalationStep};
pub use placement::{
    Placement, border_obstacles, central_sampler, find_valid_point, place_obstacles, ring_sampler,
};
pub use pursuit::{PursuerAi, PursuitParams, retarget, steer};
pub use rect::{Arena, Rect};
pub use state::{
    Agent, AgentRole, AgentView, Diagnostics, FrameView, Motion, Obstacle, ObstacleKind,
};
pub use tick::{PlayerIntent, TickInput};
