//! Physics collaborator: overlap tests and motion integration
//!
//! The simulation core only decides velocities and aim points. Turning a
//! velocity into a new position against walls, buildings and other agents
//! is delegated to a [`Physics`] implementation supplied by the host.
//! [`ArcadePhysics`] is the minimal one used headless and in tests.

use glam::Vec2;

use super::rect::{Arena, Rect};

/// Everything a moving body can collide with during one step
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub arena: &'a Arena,
    /// Static walls and buildings
    pub obstacles: &'a [Rect],
    /// Footprints of the other solid agents (never the mover itself)
    pub bodies: &'a [Rect],
}

/// Host-provided collision and motion resolution
pub trait Physics {
    /// Whether two bodies touch (used for player capture)
    fn intersects(&self, a: &Rect, b: &Rect) -> bool {
        a.overlaps(b)
    }

    /// Move a body of square side `size` from `position` by `velocity * dt`,
    /// resolving against the arena bounds, the obstacles and the other
    /// bodies in `around`. Returns the new center.
    fn integrate(
        &mut self,
        position: Vec2,
        size: f32,
        velocity: Vec2,
        dt: f32,
        around: &Surroundings<'_>,
    ) -> Vec2;
}

/// Axis-separated movement that stops at the first blocking surface.
///
/// Each axis moves independently, so a body pressed into a wall diagonally
/// keeps sliding along it. A step is blocked when it would overlap any
/// surface more than the body already does, so a body that starts inside a
/// building can still work its way out. A blocked axis keeps its previous
/// coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcadePhysics;

impl ArcadePhysics {
    fn blocked(current: &Rect, next: &Rect, around: &Surroundings<'_>) -> bool {
        around
            .obstacles
            .iter()
            .chain(around.bodies)
            .any(|surface| next.overlap_area(surface) > current.overlap_area(surface))
    }
}

impl Physics for ArcadePhysics {
    fn integrate(
        &mut self,
        position: Vec2,
        size: f32,
        velocity: Vec2,
        dt: f32,
        around: &Surroundings<'_>,
    ) -> Vec2 {
        let half = size / 2.0;
        let delta = velocity * dt;
        let mut pos = position;

        if delta.x != 0.0 {
            let next = around
                .arena
                .clamp_inset(Vec2::new(pos.x + delta.x, pos.y), half);
            if !Self::blocked(&Rect::square(pos, size), &Rect::square(next, size), around) {
                pos = next;
            }
        }
        if delta.y != 0.0 {
            let next = around
                .arena
                .clamp_inset(Vec2::new(pos.x, pos.y + delta.y), half);
            if !Self::blocked(&Rect::square(pos, size), &Rect::square(next, size), around) {
                pos = next;
            }
        }

        pos
    }
}
