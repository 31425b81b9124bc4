//! # Layout
//!
//! Grid placement for step cards: the row-major "normalize layout" pass and the
//! two-column default position of newly inserted steps.

use glam::Vec2;

use crate::config::CanvasConfig;
use crate::model::FlowNode;

/// Number of columns that fit in `container_width`. Never less than one.
pub fn column_count(container_width: f32, config: &CanvasConfig) -> usize {
    let cell = config.node_size.x + config.layout.gutter;
    let cols = (container_width / cell).floor();
    if cols.is_finite() && cols >= 1.0 {
        cols as usize
    } else {
        1
    }
}

/// Position of the `index`-th card in a row-major grid.
pub fn grid_position(index: usize, columns: usize, config: &CanvasConfig) -> Vec2 {
    let columns = columns.max(1);
    let col = (index % columns) as f32;
    let row = (index / columns) as f32;
    let grid = &config.layout;
    Vec2::new(
        grid.origin.x + col * (config.node_size.x + grid.gutter),
        grid.origin.y + row * (config.node_size.y + grid.row_gap),
    )
}

/// Re-places every node from its index. Manual positions are discarded.
pub fn normalize_layout(nodes: &mut [FlowNode], container_width: f32, config: &CanvasConfig) {
    let columns = column_count(container_width, config);
    for (index, node) in nodes.iter_mut().enumerate() {
        node.position = grid_position(index, columns, config);
    }
    tracing::debug!(columns, count = nodes.len(), "layout normalized");
}

/// Default position for a step appended to a flow that already holds `existing` nodes.
pub fn insertion_position(existing: usize, config: &CanvasConfig) -> Vec2 {
    let grid = &config.insertion;
    let col = (existing % 2) as f32;
    Vec2::new(
        grid.origin.x + col * (config.node_size.x + grid.column_gap),
        grid.origin.y + existing as f32 * grid.row_step,
    )
}
