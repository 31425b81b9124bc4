use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// `min(max(value, lo), hi)`.
///
/// Unlike `f32::clamp` this never panics: when `lo > hi` the upper bound wins.
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

/// Geometry of a vertical edge between two cards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePath {
    pub start: Vec2,
    pub cp1: Vec2,
    pub cp2: Vec2,
    pub end: Vec2,
}

impl EdgePath {
    /// Cubic curve from the bottom-center of `from` to the top-center of `to`.
    ///
    /// Both control points sit on the horizontal line halfway between the endpoints.
    pub fn between(from: Vec2, to: Vec2, node_size: Vec2) -> Self {
        let start = Vec2::new(from.x + node_size.x / 2.0, from.y + node_size.y);
        let end = Vec2::new(to.x + node_size.x / 2.0, to.y);
        let mid_y = (start.y + end.y) / 2.0;
        Self {
            start,
            cp1: Vec2::new(start.x, mid_y),
            cp2: Vec2::new(end.x, mid_y),
            end,
        }
    }

    /// Midpoint of the endpoints; where the "insert step" handle goes.
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Anchor for the edge label, slightly above the midpoint.
    pub fn label_anchor(&self) -> Vec2 {
        Vec2::new((self.start.x + self.end.x) / 2.0, self.cp1.y - 6.0)
    }
}
