//! Pursuit AI: lead the target, then run straight at the lead point
//!
//! Aim points refresh on a per-pursuer cadence while steering happens every
//! frame, which gives smooth motion toward a periodically updated guess of
//! where the player is heading.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Arena;

/// Predict where the target will be `horizon_ms` from now.
///
/// Linear extrapolation clamped into the arena. A target at rest yields its
/// exact current position.
pub fn retarget(target_pos: Vec2, target_vel: Vec2, horizon_ms: u64, arena: &Arena) -> Vec2 {
    if target_vel == Vec2::ZERO {
        return target_pos;
    }
    let horizon = horizon_ms as f32 / 1000.0;
    arena.clamp(target_pos + target_vel * horizon)
}

/// Velocity of magnitude `speed` pointing from `from` toward `aim`.
///
/// Zero once the pursuer sits exactly on its aim point.
#[inline]
pub fn steer(from: Vec2, aim: Vec2, speed: f32) -> Vec2 {
    (aim - from).normalize_or_zero() * speed
}

/// Per-pursuer aiming memory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuerAi {
    /// Point the pursuer is currently steering toward
    pub current_target: Vec2,
    /// When the aim point was last refreshed (ms); `None` until first aim
    pub last_retarget_at: Option<u64>,
}

impl PursuerAi {
    pub fn new(initial_target: Vec2) -> Self {
        Self {
            current_target: initial_target,
            last_retarget_at: None,
        }
    }

    /// Whether the cadence has elapsed since the last refresh
    pub fn is_due(&self, now_ms: u64, cadence_ms: u64) -> bool {
        match self.last_retarget_at {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= cadence_ms,
        }
    }

    /// Refresh the aim point if due, then return the steering velocity
    pub fn update(
        &mut self,
        now_ms: u64,
        from: Vec2,
        target_pos: Vec2,
        target_vel: Vec2,
        params: &PursuitParams,
        arena: &Arena,
    ) -> Vec2 {
        if self.is_due(now_ms, params.cadence_ms) {
            self.current_target = retarget(target_pos, target_vel, params.horizon_ms, arena);
            self.last_retarget_at = Some(now_ms);
        }
        steer(from, self.current_target, params.speed)
    }
}

/// Shared pursuit policy
#[derive(Debug, Clone, Copy)]
pub struct PursuitParams {
    pub speed: f32,
    pub horizon_ms: u64,
    pub cadence_ms: u64,
}
