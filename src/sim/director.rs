//! Session orchestration
//!
//! [`SimulationDirector`] owns the obstacle layout, the agents, the per-
//! pursuer AI memory and the escalation clock. The host calls
//! [`SimulationDirector::tick`] once per frame and reads back a
//! [`FrameView`].

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{ArcadePhysics, Physics, Surroundings};
use super::escalation::EscalationState;
use super::placement::{
    Placement, border_obstacles, central_sampler, find_valid_point, place_obstacles, ring_sampler,
};
use super::pursuit::{PursuerAi, PursuitParams};
use super::rect::{Arena, Rect};
use super::state::{Agent, AgentRole, AgentView, Diagnostics, FrameView, Obstacle, ObstacleKind};
use super::tick::TickInput;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Everything rebuilt on reset
#[derive(Debug, Clone)]
struct Session {
    obstacles: Vec<Obstacle>,
    /// Obstacle rects in the same order, for placement and physics
    footprints: Vec<Rect>,
    player: Agent,
    /// Sorted by id (spawn order)
    pursuers: Vec<Agent>,
    ai: BTreeMap<u32, PursuerAi>,
    escalation: EscalationState,
    diagnostics: Diagnostics,
    now_ms: u64,
    over: bool,
    next_id: u32,
}

impl Session {
    fn build(tuning: &Tuning, arena: &Arena, rng: &mut Pcg32, now_ms: u64) -> Self {
        let mut diagnostics = Diagnostics::default();

        let target = tuning.building_target(arena);
        let buildings = place_obstacles(
            rng,
            arena,
            target,
            tuning.obstacle_size,
            tuning.min_obstacle_spacing,
            tuning.placement_attempts,
        );
        diagnostics.skipped_obstacles = target.saturating_sub(buildings.len() as u32);

        let obstacles: Vec<Obstacle> = buildings
            .into_iter()
            .map(|rect| Obstacle {
                rect,
                kind: ObstacleKind::Building,
            })
            .chain(
                border_obstacles(arena, tuning.border_thickness)
                    .into_iter()
                    .map(|rect| Obstacle {
                        rect,
                        kind: ObstacleKind::Border,
                    }),
            )
            .collect();
        let footprints: Vec<Rect> = obstacles.iter().map(|o| o.rect).collect();

        let spawn = find_valid_point(
            central_sampler(rng, *arena),
            tuning.agent_size,
            &footprints,
            tuning.placement_attempts,
        );
        let player_pos = match spawn {
            Placement::Found(p) => p,
            Placement::NotFound => {
                log::warn!(
                    "{}; using arena center",
                    SimError::PlacementExhausted {
                        what: "player",
                        attempts: tuning.placement_attempts,
                    }
                );
                diagnostics.player_spawn_fallback = true;
                arena.center()
            }
        };

        let mut session = Self {
            obstacles,
            footprints,
            player: Agent::new(
                1,
                AgentRole::Player,
                player_pos,
                tuning.player_speed,
                tuning.agent_size,
            ),
            pursuers: Vec::new(),
            ai: BTreeMap::new(),
            escalation: EscalationState::new(now_ms, tuning),
            diagnostics,
            now_ms,
            over: false,
            next_id: 2,
        };

        for _ in 0..tuning.initial_pursuers(arena) {
            session.spawn_pursuer(tuning, arena, rng);
        }

        log::info!(
            "Session built: {} buildings ({} skipped), player at ({:.0}, {:.0}), {} pursuers",
            session.obstacles.len() - 4,
            session.diagnostics.skipped_obstacles,
            player_pos.x,
            player_pos.y,
            session.pursuers.len()
        );

        session
    }

    /// Spawn one pursuer on a ring around the player, clear of obstacles and
    /// other pursuers. Returns false when no free spot was found and the
    /// spawn was abandoned.
    fn spawn_pursuer(&mut self, tuning: &Tuning, arena: &Arena, rng: &mut Pcg32) -> bool {
        let occupied: Vec<Rect> = self
            .footprints
            .iter()
            .copied()
            .chain(self.pursuers.iter().map(Agent::footprint))
            .collect();
        let sampler = ring_sampler(
            rng,
            *arena,
            self.player.position,
            tuning.spawn_min_distance,
            tuning.spawn_max_distance,
        );
        match find_valid_point(
            sampler,
            tuning.agent_size,
            &occupied,
            tuning.placement_attempts,
        ) {
            Placement::Found(pos) => {
                let id = self.next_id;
                self.next_id += 1;
                self.pursuers.push(Agent::new(
                    id,
                    AgentRole::Pursuer,
                    pos,
                    tuning.pursuer_speed,
                    tuning.agent_size,
                ));
                self.ai.insert(id, PursuerAi::new(self.player.position));
                true
            }
            Placement::NotFound => {
                log::warn!(
                    "{}; spawn abandoned",
                    SimError::PlacementExhausted {
                        what: "pursuer",
                        attempts: tuning.placement_attempts,
                    }
                );
                self.diagnostics.abandoned_spawns += 1;
                false
            }
        }
    }

    fn freeze(&mut self) {
        self.player.stop();
        for pursuer in &mut self.pursuers {
            pursuer.stop();
        }
        self.over = true;
    }
}

/// Composition root driven by the host once per frame
#[derive(Debug)]
pub struct SimulationDirector<P: Physics = ArcadePhysics> {
    tuning: Tuning,
    arena: Arena,
    seed: u64,
    rng: Pcg32,
    physics: P,
    session: Session,
}

impl SimulationDirector<ArcadePhysics> {
    /// Build a session using the bundled arcade physics
    pub fn new(tuning: Tuning, arena: Arena, seed: u64, now_ms: u64) -> Result<Self, SimError> {
        Self::with_physics(tuning, arena, seed, now_ms, ArcadePhysics)
    }
}

impl<P: Physics> SimulationDirector<P> {
    /// Build a session with a host-provided physics collaborator.
    ///
    /// Fails fast on configuration that cannot produce a playable arena.
    pub fn with_physics(
        tuning: Tuning,
        arena: Arena,
        seed: u64,
        now_ms: u64,
        physics: P,
    ) -> Result<Self, SimError> {
        tuning.validate_for(&arena)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        log::info!(
            "Starting session in {}x{} arena with seed {}",
            arena.width,
            arena.height,
            seed
        );
        let session = Session::build(&tuning, &arena, &mut rng, now_ms);
        Ok(Self {
            tuning,
            arena,
            seed,
            rng,
            physics,
            session,
        })
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput) {
        let Self {
            tuning,
            arena,
            rng,
            physics,
            session: s,
            ..
        } = self;

        if s.over {
            return;
        }
        s.now_ms = input.now_ms;

        // Player intent
        s.player.set_velocity(input.intent.velocity(s.player.speed));

        // Pursuers hold position until the peace period ends
        let params = PursuitParams {
            speed: tuning.pursuer_speed,
            horizon_ms: tuning.prediction_horizon_ms,
            cadence_ms: tuning.retarget_cadence_ms,
        };
        let (player_pos, player_vel) = (s.player.position, s.player.velocity);
        let active = s.escalation.is_active();
        for pursuer in &mut s.pursuers {
            if !active {
                pursuer.stop();
                continue;
            }
            let ai = s
                .ai
                .entry(pursuer.id)
                .or_insert_with(|| PursuerAi::new(player_pos));
            let velocity = ai.update(
                input.now_ms,
                pursuer.position,
                player_pos,
                player_vel,
                &params,
                arena,
            );
            pursuer.set_velocity(velocity);
        }

        // Escalation
        let step = s.escalation.tick(input.now_ms);
        if step.entered_active {
            log::info!("Peace over, pursuit begins");
        }
        if step.ramps > 0 {
            log::debug!(
                "Difficulty ramp: {} pursuers per spawn tick",
                s.escalation.pursuers_per_tick
            );
        }
        if step.spawn > 0 {
            let mut spawned = 0;
            for _ in 0..step.spawn {
                if s.spawn_pursuer(tuning, arena, rng) {
                    spawned += 1;
                }
            }
            log::debug!(
                "Spawn tick: {}/{} pursuers placed, {} total",
                spawned,
                step.spawn,
                s.pursuers.len()
            );
        }

        // Motion. Pursuers are solid to each other; the player passes
        // through them so contact can register as a capture.
        let dt = input.delta_ms as f32 / 1000.0;
        let next = physics.integrate(
            s.player.position,
            s.player.size,
            s.player.velocity,
            dt,
            &Surroundings {
                arena,
                obstacles: &s.footprints,
                bodies: &[],
            },
        );
        s.player.position = arena.clamp(next);

        let mut bodies: Vec<Rect> = s.pursuers.iter().map(Agent::footprint).collect();
        let mut others = Vec::with_capacity(bodies.len());
        for (i, pursuer) in s.pursuers.iter_mut().enumerate() {
            others.clear();
            others.extend(
                bodies
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, r)| *r),
            );
            let next = physics.integrate(
                pursuer.position,
                pursuer.size,
                pursuer.velocity,
                dt,
                &Surroundings {
                    arena,
                    obstacles: &s.footprints,
                    bodies: &others,
                },
            );
            pursuer.position = arena.clamp(next);
            bodies[i] = pursuer.footprint();
        }

        // Capture
        let player_rect = s.player.footprint();
        if s
            .pursuers
            .iter()
            .any(|p| physics.intersects(&player_rect, &p.footprint()))
        {
            s.freeze();
            log::info!(
                "Player caught after {} ms by {} pursuers",
                input.now_ms.saturating_sub(s.escalation.session_start),
                s.pursuers.len()
            );
        }
    }

    /// Discard the session and rebuild it with a fresh layout
    pub fn reset(&mut self, now_ms: u64) {
        log::info!("Resetting session");
        self.session = Session::build(&self.tuning, &self.arena, &mut self.rng, now_ms);
    }

    /// Reset into a new arena size (e.g. after the host window resized)
    pub fn resize_and_reset(&mut self, arena: Arena, now_ms: u64) -> Result<(), SimError> {
        self.tuning.validate_for(&arena)?;
        self.arena = arena;
        self.reset(now_ms);
        Ok(())
    }

    pub fn view(&self) -> FrameView {
        let s = &self.session;
        FrameView {
            obstacles: s.obstacles.clone(),
            agents: std::iter::once(&s.player)
                .chain(s.pursuers.iter())
                .map(AgentView::from)
                .collect(),
            elapsed_ms: self.elapsed_ms(),
            pursuer_count: s.pursuers.len(),
            pursuers_per_tick: s.escalation.pursuers_per_tick,
            phase: s.escalation.phase,
            over: s.over,
            diagnostics: s.diagnostics,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.session
            .now_ms
            .saturating_sub(self.session.escalation.session_start)
    }

    pub fn is_over(&self) -> bool {
        self.session.over
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.session.obstacles
    }

    pub fn player(&self) -> &Agent {
        &self.session.player
    }

    pub fn pursuers(&self) -> &[Agent] {
        &self.session.pursuers
    }

    pub fn pursuer_ai(&self, id: u32) -> Option<&PursuerAi> {
        self.session.ai.get(&id)
    }

    pub fn escalation(&self) -> &EscalationState {
        &self.session.escalation
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.session.diagnostics
    }
}
