//! # Viewport System
//!
//! This module handles the pannable, zoomable canvas mathematics.
//! It converts between Canvas Space (node coordinates) and Screen Space (container pixels).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::clamp;

/// Current camera state: where we are looking (`pan`) and how close (`scale`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Translation of the content layer in container pixels.
    pub pan: Vec2,
    /// Scale factor. 1.0 = 100%.
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Combines the viewport with the size of the container it is projected into.
/// Single source of truth for coordinate conversions.
#[derive(Clone, Debug)]
pub struct View {
    pub viewport: Viewport,
    /// Size of the visible container in pixels.
    pub container_size: Vec2,
}

impl View {
    pub fn new(viewport: Viewport, container_size: Vec2) -> Self {
        Self {
            viewport,
            container_size,
        }
    }

    /// Formula: `Screen = (World * Scale) + Pan`
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        (world_pos * self.viewport.scale) + self.viewport.pan
    }

    /// Formula: `World = (Screen - Pan) / Scale`
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        (screen_pos - self.viewport.pan) / self.viewport.scale
    }

    /// Sets the scale while keeping the world point under `anchor` fixed on screen.
    ///
    /// Returns `false` when the clamped scale equals the current one.
    pub fn zoom_at(&mut self, anchor: Vec2, requested_scale: f32, min: f32, max: f32) -> bool {
        let old_scale = self.viewport.scale;
        let new_scale = clamp(requested_scale, min, max);

        if (new_scale - old_scale).abs() <= f32::EPSILON {
            return false;
        }

        let world_anchor = self.screen_to_world(anchor);
        self.viewport.scale = new_scale;
        // Screen = World * Scale + Pan  =>  Pan = Screen - (World * Scale)
        self.viewport.pan = anchor - (world_anchor * new_scale);
        true
    }

    /// Shifts the content layer by `delta` container pixels. Scale is untouched.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_are_inverse() {
        let view = View::new(
            Viewport {
                pan: Vec2::new(30.0, -12.0),
                scale: 1.4,
            },
            Vec2::new(800.0, 600.0),
        );
        let world = Vec2::new(420.0, 80.0);
        let back = view.screen_to_world(view.world_to_screen(world));
        assert!(back.abs_diff_eq(world, 1e-4));
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let mut view = View::new(Viewport::default(), Vec2::new(800.0, 600.0));
        assert!(view.zoom_at(Vec2::ZERO, 5.0, 0.5, 1.8));
        assert_eq!(view.viewport.scale, 1.8);
        assert!(!view.zoom_at(Vec2::ZERO, 9.0, 0.5, 1.8));
    }
}
