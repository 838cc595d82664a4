//! Difficulty escalation over session time
//!
//! A one-way Peace -> Active machine plus two independent timers: spawn
//! ticks, re-based to the frame that fired them, and ramps, which advance
//! in fixed steps so a stalled frame can cross several at once.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Escalation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationPhase {
    /// Grace period after session start, nobody spawns
    Peace,
    /// Pursuers spawn on every spawn tick
    Active,
}

/// What one call to [`EscalationState::tick`] decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscalationStep {
    /// Pursuers to spawn this frame
    pub spawn: u32,
    /// This call moved the clock from Peace to Active
    pub entered_active: bool,
    /// Ramp boundaries crossed this call
    pub ramps: u32,
}

/// Escalation timers (all timestamps in ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationState {
    pub session_start: u64,
    pub peace_ends_at: u64,
    pub last_spawn_tick_at: u64,
    pub pursuers_per_tick: u32,
    pub next_ramp_at: u64,
    pub phase: EscalationPhase,
    spawn_interval_ms: u64,
    ramp_interval_ms: u64,
}

impl EscalationState {
    pub fn new(session_start: u64, tuning: &Tuning) -> Self {
        Self::with_timings(
            session_start,
            tuning.peace_duration_ms,
            tuning.spawn_interval_ms,
            tuning.ramp_interval_ms,
        )
    }

    pub fn with_timings(
        session_start: u64,
        peace_duration_ms: u64,
        spawn_interval_ms: u64,
        ramp_interval_ms: u64,
    ) -> Self {
        Self {
            session_start,
            peace_ends_at: session_start.saturating_add(peace_duration_ms),
            last_spawn_tick_at: session_start,
            pursuers_per_tick: 1,
            next_ramp_at: session_start.saturating_add(ramp_interval_ms),
            phase: EscalationPhase::Peace,
            // Zero intervals are rejected by Tuning::validate; keep the ramp loop finite anyway
            spawn_interval_ms: spawn_interval_ms.max(1),
            ramp_interval_ms: ramp_interval_ms.max(1),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == EscalationPhase::Active
    }

    /// Advance the clock to `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> EscalationStep {
        let mut step = EscalationStep::default();

        if self.phase == EscalationPhase::Peace && now_ms >= self.peace_ends_at {
            self.phase = EscalationPhase::Active;
            step.entered_active = true;
        }

        // Ticks are counted during Peace too; only the batch is withheld
        if now_ms.saturating_sub(self.last_spawn_tick_at) >= self.spawn_interval_ms {
            self.last_spawn_tick_at = now_ms;
            if self.is_active() {
                step.spawn = self.pursuers_per_tick;
            }
        }

        while now_ms >= self.next_ramp_at {
            self.pursuers_per_tick += 1;
            self.next_ramp_at = self.next_ramp_at.saturating_add(self.ramp_interval_ms);
            step.ramps += 1;
            if self.next_ramp_at == u64::MAX {
                break;
            }
        }

        step
    }
}
