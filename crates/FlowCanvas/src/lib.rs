//! # FlowCanvas
//!
//! `flow_canvas` is the headless canvas under the threat-flow editor.
//! It owns the viewport and pointer state machine and produces draw lists,
//! delegating actual rendering to the host application.
//!
//! ## Core Architecture
//! - **Model (`src/model.rs`)**: Steps, edges and per-kind configuration payloads.
//! - **View (`src/view.rs`)**: Coordinate transformation (Canvas <-> Screen).
//! - **Interaction (`src/interaction.rs`)**: Pan, zoom, card and note dragging.
//! - **Render (`src/render.rs`)**: Outputs a list of `DrawCommand`s for the host to render.
//!
//! The canvas never mutates the graph. Card moves, removals and insert requests
//! come out as [`LogicEvent`]s for the owner of the graph to apply.

pub mod config;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod math;
pub mod model;
pub mod notes;
pub mod painter;
pub mod render;
pub mod view;

use glam::Vec2;
use input::CanvasEvent;
use model::FlowGraph;
use notes::Annotation;
use render::RenderList;
use view::{View, Viewport};

pub use config::CanvasConfig;
pub use interaction::{HitTarget, InteractionState, LogicEvent};

/// The main entry point for the library.
///
/// Holds the transient state of the editor surface (viewport, drag state)
/// and its configuration. One instance lives as long as the editor.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub config: CanvasConfig,
    pub view: View,
    pub interaction: InteractionState,
}

impl Canvas {
    pub fn new(config: CanvasConfig, container_size: Vec2) -> Self {
        Self {
            config,
            view: View::new(Viewport::default(), container_size),
            interaction: InteractionState::Idle,
        }
    }

    /// Updates the container size (e.g. on window resize).
    pub fn update_container_size(&mut self, size: Vec2) {
        self.view.container_size = size;
    }

    pub fn viewport(&self) -> Viewport {
        self.view.viewport
    }

    /// Replaces the viewport. The scale is clamped to the configured bounds and
    /// a non-finite scale or pan keeps the current value.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let current = self.view.viewport;
        let scale = if viewport.scale.is_finite() {
            math::clamp(viewport.scale, self.config.min_scale, self.config.max_scale)
        } else {
            current.scale
        };
        let pan = if viewport.pan.is_finite() { viewport.pan } else { current.pan };
        self.view.viewport = Viewport { pan, scale };
    }

    /// Processes one input event.
    pub fn handle_event(
        &mut self,
        event: &CanvasEvent,
        graph: &FlowGraph,
        notes: &[Annotation],
    ) -> Vec<LogicEvent> {
        interaction::handle_event(
            &mut self.interaction,
            &mut self.view,
            &self.config,
            graph,
            notes,
            event,
        )
    }

    /// What sits under `screen_pos`.
    pub fn hit_test(&self, graph: &FlowGraph, notes: &[Annotation], screen_pos: Vec2) -> HitTarget {
        interaction::hit_test(&self.view, &self.config, graph, notes, screen_pos)
    }

    /// Builds the display list for the current state.
    pub fn draw(&self, graph: &FlowGraph, notes: &[Annotation], selected: Option<&str>) -> RenderList {
        painter::Painter::draw_graph(&self.view, &self.config, graph, notes, selected)
    }
}
