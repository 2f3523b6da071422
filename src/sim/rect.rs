//! Integer draw rectangles
//!
//! Entities keep a floating "true" position that accumulates motion every
//! tick. The rectangle used for drawing, edge tests and collisions is derived
//! from it by truncating to whole pixels. Motion is never stored in the rect,
//! so sub-pixel speeds still add up over several ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Derive the draw rect from a floating top-left position
    pub fn from_pos(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
            w: size.x as i32,
            h: size.y as i32,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap: rects that only share an edge don't collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
