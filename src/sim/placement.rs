//! Procedural placement of buildings and spawn points
//!
//! Everything here is rejection sampling with a hard attempt ceiling, so a
//! crowded arena degrades into fewer buildings or a skipped spawn instead of
//! stalling the frame.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::rect::{Arena, Rect};
use crate::error::SimError;
use crate::polar_to_cartesian;

/// Outcome of a bounded point search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Found(Vec2),
    NotFound,
}

impl Placement {
    pub fn found(self) -> Option<Vec2> {
        match self {
            Placement::Found(p) => Some(p),
            Placement::NotFound => None,
        }
    }
}

/// Place up to `target_count` square buildings of side `size`.
///
/// Each building gets `max_attempts` uniformly drawn centers. A candidate is
/// accepted when its footprint, grown by `min_spacing / 2` on every side,
/// misses every accepted footprint grown the same way, which keeps at least
/// `min_spacing` of open ground between any two buildings. Buildings that
/// cannot be placed are skipped with a warning.
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    arena: &Arena,
    target_count: u32,
    size: f32,
    min_spacing: f32,
    max_attempts: u32,
) -> Vec<Rect> {
    let half = size / 2.0;
    let margin = min_spacing / 2.0;
    let (min_x, max_x) = (half, arena.width - half);
    let (min_y, max_y) = (half, arena.height - half);

    let mut placed: Vec<Rect> = Vec::new();
    let mut inflated: Vec<Rect> = Vec::new();

    for _ in 0..target_count {
        let mut accepted = None;
        for _ in 0..max_attempts {
            let center = Vec2::new(
                rng.random_range(min_x..=max_x),
                rng.random_range(min_y..=max_y),
            );
            let footprint = Rect::square(center, size);
            let candidate = footprint.inflate(margin);
            if !inflated.iter().any(|existing| existing.intersects(&candidate)) {
                accepted = Some((footprint, candidate));
                break;
            }
        }

        match accepted {
            Some((footprint, candidate)) => {
                placed.push(footprint);
                inflated.push(candidate);
            }
            None => log::warn!(
                "{}",
                SimError::PlacementExhausted {
                    what: "building",
                    attempts: max_attempts,
                }
            ),
        }
    }

    placed
}

/// The four walls along the arena edges
pub fn border_obstacles(arena: &Arena, thickness: f32) -> [Rect; 4] {
    let (w, h) = (arena.width, arena.height);
    [
        // Top
        Rect::new(0.0, 0.0, w, thickness),
        // Bottom
        Rect::new(0.0, h - thickness, w, thickness),
        // Left
        Rect::new(0.0, 0.0, thickness, h),
        // Right
        Rect::new(w - thickness, 0.0, thickness, h),
    ]
}

/// Search for a point whose `probe_size` square clears every obstacle.
///
/// `sample` proposes candidates; the search gives up after `max_attempts`
/// proposals. Falling back to some default position is the caller's call.
pub fn find_valid_point<'a, F, I>(
    mut sample: F,
    probe_size: f32,
    obstacles: I,
    max_attempts: u32,
) -> Placement
where
    F: FnMut() -> Vec2,
    I: IntoIterator<Item = &'a Rect>,
    I::IntoIter: Clone,
{
    let obstacles = obstacles.into_iter();
    for _ in 0..max_attempts {
        let candidate = sample();
        let probe = Rect::square(candidate, probe_size);
        if !obstacles.clone().any(|o| o.intersects(&probe)) {
            return Placement::Found(candidate);
        }
    }
    Placement::NotFound
}

/// Uniform samples from the central half of the arena on each axis
pub fn central_sampler<R: Rng + ?Sized>(rng: &mut R, arena: Arena) -> impl FnMut() -> Vec2 {
    move || {
        Vec2::new(
            rng.random_range(arena.width / 4.0..=arena.width * 3.0 / 4.0),
            rng.random_range(arena.height / 4.0..=arena.height * 3.0 / 4.0),
        )
    }
}

/// Samples along one random bearing from `target`, between `min_distance`
/// and `max_distance` away, clamped into the arena.
///
/// The bearing is fixed for the lifetime of the sampler; only the distance
/// is redrawn. Clamping after the offset pulls candidates onto the walls
/// when the target is near an edge.
pub fn ring_sampler<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Arena,
    target: Vec2,
    min_distance: f32,
    max_distance: f32,
) -> impl FnMut() -> Vec2 {
    let theta = rng.random_range(0.0..TAU);
    move || {
        let distance = rng.random_range(min_distance..=max_distance);
        arena.clamp(target + polar_to_cartesian(distance, theta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_spacing(rects: &[Rect], spacing: f32) {
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(
                    !a.inflate(spacing / 2.0).intersects(&b.inflate(spacing / 2.0)),
                    "{a:?} and {b:?} are closer than {spacing}"
                );
            }
        }
    }

    #[test]
    fn test_place_obstacles_scenario() {
        let mut rng = Pcg32::seed_from_u64(7);
        let arena = Arena::new(800.0, 600.0);
        let rects = place_obstacles(&mut rng, &arena, 6, 100.0, 80.0, 100);

        assert!(rects.len() <= 6);
        assert!(!rects.is_empty());
        assert_spacing(&rects, 80.0);
        for r in &rects {
            assert_eq!(r.width, 100.0);
            assert!(r.x >= 0.0 && r.right() <= 800.0);
            assert!(r.y >= 0.0 && r.bottom() <= 600.0);
        }
    }

    #[test]
    fn test_place_obstacles_skips_when_crowded() {
        // Only one 100x100 building fits in a 150x150 arena with spacing
        let mut rng = Pcg32::seed_from_u64(1);
        let arena = Arena::new(150.0, 150.0);
        let rects = place_obstacles(&mut rng, &arena, 5, 100.0, 80.0, 100);
        assert_eq!(rects.len(), 1);
    }

    #[test]
    fn test_place_obstacles_zero_target() {
        let mut rng = Pcg32::seed_from_u64(1);
        let rects = place_obstacles(&mut rng, &Arena::new(800.0, 600.0), 0, 100.0, 80.0, 100);
        assert!(rects.is_empty());
    }

    #[test]
    fn test_border_obstacles() {
        let arena = Arena::new(800.0, 600.0);
        let borders = border_obstacles(&arena, 10.0);
        assert_eq!(borders[0], Rect::new(0.0, 0.0, 800.0, 10.0));
        assert_eq!(borders[1], Rect::new(0.0, 590.0, 800.0, 10.0));
        assert_eq!(borders[2], Rect::new(0.0, 0.0, 10.0, 600.0));
        assert_eq!(borders[3], Rect::new(790.0, 0.0, 10.0, 600.0));
    }

    #[test]
    fn test_find_valid_point_first_clear_candidate() {
        let obstacles = [Rect::new(0.0, 0.0, 100.0, 100.0)];
        let mut candidates = vec![Vec2::new(50.0, 50.0), Vec2::new(300.0, 300.0)].into_iter();
        let result = find_valid_point(
            || candidates.next().unwrap_or(Vec2::ZERO),
            40.0,
            &obstacles,
            100,
        );
        assert_eq!(result, Placement::Found(Vec2::new(300.0, 300.0)));
    }

    #[test]
    fn test_find_valid_point_bounded() {
        let obstacles = [Rect::new(0.0, 0.0, 100.0, 100.0)];
        let mut calls = 0;
        let result = find_valid_point(
            || {
                calls += 1;
                Vec2::new(50.0, 50.0)
            },
            40.0,
            &obstacles,
            100,
        );
        assert_eq!(result, Placement::NotFound);
        assert_eq!(calls, 100);
        assert_eq!(result.found(), None);
    }

    #[test]
    fn test_find_valid_point_no_obstacles() {
        let none: [Rect; 0] = [];
        let result = find_valid_point(|| Vec2::new(1.0, 2.0), 40.0, &none, 1);
        assert_eq!(result.found(), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_central_sampler_region() {
        let mut rng = Pcg32::seed_from_u64(3);
        let arena = Arena::new(800.0, 600.0);
        let mut sample = central_sampler(&mut rng, arena);
        for _ in 0..500 {
            let p = sample();
            assert!((200.0..=600.0).contains(&p.x));
            assert!((150.0..=450.0).contains(&p.y));
        }
    }

    #[test]
    fn test_ring_sampler_keeps_bearing() {
        let mut rng = Pcg32::seed_from_u64(11);
        let arena = Arena::new(4000.0, 4000.0);
        let target = Vec2::new(2000.0, 2000.0);
        let mut sample = ring_sampler(&mut rng, arena, target, 200.0, 400.0);

        let first = (sample() - target).normalize();
        for _ in 0..50 {
            let offset = sample() - target;
            let d = offset.length();
            assert!((199.9..=400.1).contains(&d), "distance {d}");
            assert!(offset.normalize().dot(first) > 0.9999);
        }
    }

    #[test]
    fn test_ring_sampler_clamps_near_edge() {
        let mut rng = Pcg32::seed_from_u64(5);
        let arena = Arena::new(300.0, 300.0);
        let mut sample = ring_sampler(&mut rng, arena, Vec2::new(10.0, 10.0), 200.0, 400.0);
        for _ in 0..100 {
            assert!(arena.contains(sample()));
        }
    }

    proptest! {
        #[test]
        fn prop_obstacles_keep_spacing(
            seed in any::<u64>(),
            width in 200.0f32..2000.0,
            height in 200.0f32..2000.0,
            count in 0u32..20,
            spacing in 0.0f32..120.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let arena = Arena::new(width, height);
            let rects = place_obstacles(&mut rng, &arena, count, 100.0, spacing, 100);
            prop_assert!(rects.len() <= count as usize);
            for (i, a) in rects.iter().enumerate() {
                prop_assert!(a.x >= 0.0 && a.right() <= width + 1e-3);
                prop_assert!(a.y >= 0.0 && a.bottom() <= height + 1e-3);
                for b in &rects[i + 1..] {
                    prop_assert!(!a.inflate(spacing / 2.0).intersects(&b.inflate(spacing / 2.0)));
                }
            }
        }

        #[test]
        fn prop_spawn_points_in_bounds(
            seed in any::<u64>(),
            tx in 0.0f32..800.0,
            ty in 0.0f32..600.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let arena = Arena::new(800.0, 600.0);
            let borders = border_obstacles(&arena, 10.0);
            let sampler = ring_sampler(&mut rng, arena, Vec2::new(tx, ty), 200.0, 400.0);
            if let Placement::Found(p) = find_valid_point(sampler, 40.0, &borders, 100) {
                prop_assert!(arena.contains(p));
                let probe = Rect::square(p, 40.0);
                prop_assert!(borders.iter().all(|b| !b.intersects(&probe)));
            }
        }
    }
}
