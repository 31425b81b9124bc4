//! # Rendering System
//!
//! The Canvas never draws directly. It outputs a display list of `DrawCommand`s
//! which the host interprets with whatever toolkit it uses.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A single drawing primitive.
///
/// Coordinates are in **Screen Space** (Pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled rounded rectangle with an optional stroke.
    Rect {
        /// Top-left position in screen pixels.
        pos: Vec2,
        size: Vec2,
        color: Vec4,
        corner_radius: f32,
        stroke_width: f32,
        stroke_color: Option<Vec4>,
    },
    /// A straight line segment.
    Line {
        start: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    /// Text to be rendered. Font and wrapping are up to the host.
    Text {
        /// Top-left position in screen pixels.
        pos: Vec2,
        text: String,
        color: Vec4,
        /// Font size in pixels (approximate).
        size: f32,
    },
    /// A cubic Bezier curve used for edges.
    Bezier {
        start: Vec2,
        cp1: Vec2,
        cp2: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    /// A filled circle. Marks the terminal end of an edge.
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec4,
    },
    /// The clickable "insert step" affordance drawn on an edge.
    InsertHandle {
        center: Vec2,
        radius: f32,
        /// Index of the edge in the graph's edge list.
        edge_index: usize,
        color: Vec4,
    },
}

/// A list of draw commands representing the current frame.
pub type RenderList = Vec<DrawCommand>;
