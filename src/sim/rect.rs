//! Axis-aligned rectangle geometry for obstacles and placement probes
//!
//! Rects are corner-based: `(x, y)` is the minimum corner and the rect
//! extends `width` to the right and `height` down. Arena coordinates run
//! from `(0, 0)` to `(arena.width, arena.height)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An immutable axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size centered on `center`
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Square of side `size` centered on `center`
    #[inline]
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::from_center(center, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rect by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Inclusive intersection: rects sharing only an edge still intersect.
    ///
    /// Used for placement, where touching counts as a conflict.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        !(self.right() < other.x
            || self.bottom() < other.y
            || self.x > other.right()
            || self.y > other.bottom())
    }

    /// Strict overlap: the interiors share some area.
    ///
    /// Used for motion and contact, so bodies resting flush against each
    /// other can still slide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Area shared by the two interiors (0 when they only touch)
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let w = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let h = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        w * h
    }
}

/// Fixed simulation bounds for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Clamp a point into `[0, width] x [0, height]`
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Clamp a point so a body with the given half extent stays inside
    pub fn clamp_inset(&self, p: Vec2, half_extent: f32) -> Vec2 {
        let max_x = (self.width - half_extent).max(half_extent);
        let max_y = (self.height - half_extent).max(half_extent);
        Vec2::new(
            p.x.clamp(half_extent.min(max_x), max_x),
            p.y.clamp(half_extent.min(max_y), max_y),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(50.0, 60.0), 20.0, 10.0);
        assert_eq!(r, Rect::new(40.0, 55.0, 20.0, 10.0));
        assert_eq!(r.center(), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 10.0, 100.0, 100.0).inflate(40.0);
        assert_eq!(r, Rect::new(-30.0, -30.0, 180.0, 180.0));
        assert_eq!(r.center(), Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_intersects_inclusive_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let apart = Rect::new(10.5, 0.0, 10.0, 10.0);

        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
        assert!(a.intersects(&Rect::new(2.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_overlaps_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.overlap_area(&Rect::new(6.0, 5.0, 10.0, 10.0)), 20.0);
        assert_eq!(a.overlap_area(&Rect::new(10.0, 0.0, 10.0, 10.0)), 0.0);
        assert_eq!(a.overlap_area(&Rect::new(30.0, 30.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_degenerate_rect_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(5.0, 5.0, 0.0, 4.0)));
    }

    #[test]
    fn test_arena_clamp() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.clamp(Vec2::new(-5.0, 700.0)), Vec2::new(0.0, 600.0));
        assert_eq!(arena.clamp(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
        assert_eq!(
            arena.clamp_inset(Vec2::new(0.0, 600.0), 20.0),
            Vec2::new(20.0, 580.0)
        );
        assert!(arena.contains(Vec2::new(800.0, 0.0)));
        assert!(!arena.contains(Vec2::new(800.1, 0.0)));
    }
}
