//! Per-frame input from the host

use glam::Vec2;

/// Directional keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerIntent {
    /// Velocity for this intent at `speed`.
    ///
    /// Left wins over right and up over down. Diagonals are normalized so
    /// the combined speed equals the single-axis speed.
    pub fn velocity(&self, speed: f32) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        // Screen coordinates: y grows downward
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y).normalize_or_zero() * speed
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Host monotonic clock (ms)
    pub now_ms: u64,
    /// Time since the previous frame (ms)
    pub delta_ms: u64,
    pub intent: PlayerIntent,
}
