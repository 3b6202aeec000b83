//! Axis-aligned rectangle geometry for every game entity
//!
//! Screen space: origin at the top-left corner, y grows downward.
//! A rectangle is defined by:
//! - pos: top-left corner
//! - size: width and height

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rectangle around a center point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Midpoint of the bottom edge
    #[inline]
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.bottom())
    }

    /// Copy of this rectangle moved by `delta`
    pub fn offset(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
