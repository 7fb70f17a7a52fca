//! Shared entity geometry
//!
//! Every entity kind embeds one [`Body`]: a top-left position and a size.
//! Overlap and clamping are written once here against that record.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height, both > 0
    pub size: Vec2,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "degenerate body {width}x{height}");
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict rectangle intersection; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Keep the box horizontally inside `[0, width]`
    pub fn clamp_x(&mut self, width: f32) {
        let max_x = (width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Whether the box, shifted by `dx`, would leave `[0, width]`
    #[inline]
    pub fn would_leave_x(&self, dx: f32, width: f32) -> bool {
        let new_x = self.pos.x + dx;
        new_x < 0.0 || new_x + self.size.x > width
    }
}

/// Access to the shared geometry of any entity kind
pub trait HasBody {
    fn body(&self) -> &Body;

    fn overlaps<T: HasBody + ?Sized>(&self, other: &T) -> bool {
        self.body().overlaps(other.body())
    }
}

impl HasBody for Body {
    fn body(&self) -> &Body {
        self
    }
}
