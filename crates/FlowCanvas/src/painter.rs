use glam::Vec2;

use crate::config::{CanvasConfig, CanvasStyle};
use crate::interaction::{INSERT_HANDLE_RADIUS, remove_button_rect};
use crate::math::EdgePath;
use crate::model::FlowGraph;
use crate::notes::{Annotation, NoteKind};
use crate::render::{DrawCommand, RenderList};
use crate::view::View;

/// High-level renderer for a threat flow.
///
/// The `Painter` converts the graph (cards, edges, annotations) into concrete
/// drawing commands (`RenderList`) that the host application can render.
/// Paint order is: grid, edges, cards, annotations.
pub struct Painter;

impl Painter {
    /// Generates the draw commands for one frame.
    ///
    /// # Arguments
    /// * `view` - Current viewport transform and container size.
    /// * `config` - Canvas geometry and colors.
    /// * `graph` - The nodes and edges to render.
    /// * `notes` - Annotations drawn above the graph.
    /// * `selected` - Id of the selected card, highlighted when present.
    pub fn draw_graph(
        view: &View,
        config: &CanvasConfig,
        graph: &FlowGraph,
        notes: &[Annotation],
        selected: Option<&str>,
    ) -> RenderList {
        let mut draw_list = Vec::new();
        let style = &config.style;
        let scale = view.viewport.scale;

        Self::draw_grid(view, style, &mut draw_list);

        for (edge_index, edge) in graph.edges.iter().enumerate() {
            let (Some(from), Some(to)) = (graph.node(&edge.from), graph.node(&edge.to)) else {
                tracing::debug!(from = %edge.from, to = %edge.to, "skipping edge with missing endpoint");
                continue;
            };

            let path = EdgePath::between(from.position, to.position, config.node_size);
            let end = view.world_to_screen(path.end);

            draw_list.push(DrawCommand::Bezier {
                start: view.world_to_screen(path.start),
                cp1: view.world_to_screen(path.cp1),
                cp2: view.world_to_screen(path.cp2),
                end,
                color: style.edge_default.color,
                width: style.edge_default.width,
            });
            draw_list.push(DrawCommand::Circle {
                center: end,
                radius: config.edge_marker_radius * scale,
                color: style.edge_default.color,
            });

            if let Some(label) = &edge.label {
                draw_list.push(DrawCommand::Text {
                    pos: view.world_to_screen(path.label_anchor()),
                    text: label.clone(),
                    color: style.edge_default.label_color,
                    size: 11.0 * scale,
                });
            }

            draw_list.push(DrawCommand::InsertHandle {
                center: view.world_to_screen(path.midpoint()),
                radius: INSERT_HANDLE_RADIUS * scale,
                edge_index,
                color: style.insert_handle_color,
            });
        }

        for node in &graph.nodes {
            let screen_pos = view.world_to_screen(node.position);
            let node_style = &style.node_default;
            let is_selected = selected == Some(node.id.as_str());

            let (stroke_width, stroke_color) = if is_selected {
                (2.0, style.selection_color)
            } else {
                (1.0, node_style.border_color)
            };

            draw_list.push(DrawCommand::Rect {
                pos: screen_pos,
                size: config.node_size * scale,
                color: node_style.color,
                corner_radius: 12.0 * scale,
                stroke_width,
                stroke_color: Some(stroke_color),
            });

            let text_at = |offset: Vec2| view.world_to_screen(node.position + offset);

            draw_list.push(DrawCommand::Text {
                pos: text_at(Vec2::new(16.0, 14.0)),
                text: node.kind.label().to_string(),
                color: node_style.muted_text_color,
                size: 10.0 * scale,
            });
            draw_list.push(DrawCommand::Text {
                pos: text_at(Vec2::new(16.0, 32.0)),
                text: node.title.clone(),
                color: node_style.text_color,
                size: 14.0 * scale,
            });
            draw_list.push(DrawCommand::Text {
                pos: text_at(Vec2::new(16.0, 56.0)),
                text: node.summary.clone(),
                color: node_style.muted_text_color,
                size: 12.0 * scale,
            });
            draw_list.push(DrawCommand::Text {
                pos: text_at(Vec2::new(16.0, 118.0)),
                text: format!("{} · {}", node.status, node.signals.join(", ")),
                color: node_style.muted_text_color,
                size: 10.0 * scale,
            });

            let remove = remove_button_rect(node.position, config);
            draw_list.push(DrawCommand::Text {
                pos: view.world_to_screen(remove.min),
                text: "×".to_string(),
                color: node_style.muted_text_color,
                size: remove.size().y * scale,
            });
        }

        for note in notes {
            let color = match note.kind {
                NoteKind::Sticky => style.sticky_note_color,
                NoteKind::Info => style.info_note_color,
            };
            draw_list.push(DrawCommand::Rect {
                pos: view.world_to_screen(note.position),
                size: note.size * scale,
                color,
                corner_radius: 12.0 * scale,
                stroke_width: 1.0,
                stroke_color: Some(style.node_default.border_color),
            });
            draw_list.push(DrawCommand::Text {
                pos: view.world_to_screen(note.position + Vec2::new(16.0, 12.0)),
                text: note.title.clone(),
                color: style.node_default.muted_text_color,
                size: 11.0 * scale,
            });
            draw_list.push(DrawCommand::Text {
                pos: view.world_to_screen(note.position + Vec2::new(16.0, 32.0)),
                text: note.body.clone(),
                color: style.node_default.text_color,
                size: 13.0 * scale,
            });
        }

        draw_list
    }

    /// Renders the background grid covering the visible part of the canvas.
    fn draw_grid(view: &View, style: &CanvasStyle, draw_list: &mut RenderList) {
        let grid_size = 24.0; // Canvas units

        let top_left = view.screen_to_world(Vec2::ZERO);
        let bottom_right = view.screen_to_world(view.container_size);

        let min = top_left.min(bottom_right);
        let max = top_left.max(bottom_right);

        let mut x = (min.x / grid_size).floor() * grid_size;
        while x <= max.x {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(Vec2::new(x, min.y)),
                end: view.world_to_screen(Vec2::new(x, max.y)),
                color: style.grid_color,
                width: 1.0,
            });
            x += grid_size;
        }

        let mut y = (min.y / grid_size).floor() * grid_size;
        while y <= max.y {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(Vec2::new(min.x, y)),
                end: view.world_to_screen(Vec2::new(max.x, y)),
                color: style.grid_color,
                width: 1.0,
            });
            y += grid_size;
        }
    }
}
