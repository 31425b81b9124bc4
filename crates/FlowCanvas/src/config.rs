//! # Configuration
//!
//! Tunables for the Canvas: geometry, interaction limits, layout grid and colors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration parameters for the Canvas.
///
/// Every field has a default, so partial YAML/JSON documents deserialize cleanly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Size of a rendered step card in canvas units.
    pub node_size: Vec2,
    /// Minimum distance kept between a dragged node and the container edge.
    pub node_margin: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Scale multiplier applied per wheel-up event while a zoom modifier is held.
    pub zoom_in_factor: f32,
    /// Scale multiplier applied per wheel-down event while a zoom modifier is held.
    pub zoom_out_factor: f32,
    /// Grid used by "normalize layout".
    pub layout: LayoutGrid,
    /// Default placement of newly inserted steps.
    pub insertion: InsertionGrid,
    pub sticky_note: NoteBounds,
    pub info_note: NoteBounds,
    /// Radius of the edge terminal marker.
    pub edge_marker_radius: f32,
    #[serde(default)]
    pub style: CanvasStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_size: Vec2::new(280.0, 150.0),
            node_margin: 12.0,
            min_scale: 0.5,
            max_scale: 1.8,
            zoom_in_factor: 1.05,
            zoom_out_factor: 0.95,
            layout: LayoutGrid::default(),
            insertion: InsertionGrid::default(),
            sticky_note: NoteBounds {
                min: 8.0,
                right: 340.0,
                bottom: 200.0,
            },
            info_note: NoteBounds {
                min: 8.0,
                right: 320.0,
                bottom: 220.0,
            },
            edge_marker_radius: 5.0,
            style: CanvasStyle::default(),
        }
    }
}

/// Row-major grid for auto-layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutGrid {
    pub origin: Vec2,
    /// Horizontal space between columns.
    pub gutter: f32,
    /// Vertical space between rows.
    pub row_gap: f32,
}

impl Default for LayoutGrid {
    fn default() -> Self {
        Self {
            origin: Vec2::new(60.0, 160.0),
            gutter: 80.0,
            row_gap: 170.0,
        }
    }
}

/// Two alternating columns, one row per insertion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertionGrid {
    pub origin: Vec2,
    pub column_gap: f32,
    pub row_step: f32,
}

impl Default for InsertionGrid {
    fn default() -> Self {
        Self {
            origin: Vec2::new(220.0, 180.0),
            column_gap: 100.0,
            row_step: 230.0,
        }
    }
}

/// Drag bounds for an annotation: `[min, container - right]` horizontally,
/// `[min, container - bottom]` vertically.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteBounds {
    pub min: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Visual styling configuration for the Canvas.
///
/// Colors are RGBA `glam::Vec4` in `0.0..=1.0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasStyle {
    pub background_color: glam::Vec4,
    pub grid_color: glam::Vec4,
    #[serde(default)]
    pub node_default: NodeStyle,
    #[serde(default)]
    pub edge_default: EdgeStyle,
    pub selection_color: glam::Vec4,
    pub sticky_note_color: glam::Vec4,
    pub info_note_color: glam::Vec4,
    pub insert_handle_color: glam::Vec4,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background_color: glam::Vec4::new(0.97, 0.97, 0.98, 1.0),
            grid_color: glam::Vec4::new(0.9, 0.9, 0.92, 1.0),
            node_default: NodeStyle::default(),
            edge_default: EdgeStyle::default(),
            selection_color: glam::Vec4::new(0.23, 0.51, 0.96, 1.0),
            sticky_note_color: glam::Vec4::new(1.0, 0.95, 0.6, 1.0),
            info_note_color: glam::Vec4::new(0.93, 0.95, 1.0, 1.0),
            insert_handle_color: glam::Vec4::new(0.4, 0.4, 0.45, 1.0),
        }
    }
}

/// Visual style for a step card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub color: glam::Vec4,
    pub border_color: glam::Vec4,
    pub text_color: glam::Vec4,
    pub muted_text_color: glam::Vec4,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            color: glam::Vec4::new(1.0, 1.0, 1.0, 1.0),
            border_color: glam::Vec4::new(0.85, 0.85, 0.88, 1.0),
            text_color: glam::Vec4::new(0.1, 0.1, 0.12, 1.0),
            muted_text_color: glam::Vec4::new(0.45, 0.45, 0.5, 1.0),
        }
    }
}

/// Visual style for an edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: glam::Vec4,
    /// Width of the curve in screen pixels.
    pub width: f32,
    pub label_color: glam::Vec4,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: glam::Vec4::new(0.6, 0.6, 0.65, 1.0),
            width: 2.0,
            label_color: glam::Vec4::new(0.35, 0.35, 0.4, 1.0),
        }
    }
}
