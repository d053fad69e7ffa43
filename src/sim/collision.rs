//! Axis-aligned rectangle overlap
//!
//! Every collision in the game (craft vs obstacle, projectile vs obstacle) is
//! the same inclusive AABB test.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle, `pos` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// True if the rectangles intersect. Touching edges count as overlap: the test
/// is the negation of "entirely left, right, above or below".
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}
