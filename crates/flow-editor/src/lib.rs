//! # Flow Editor
//!
//! The controller of a threat-flow editing session. It owns the graph, the
//! annotations, the selection and the canvas, and is the only place graph
//! state changes:
//! - canvas input comes back as [`LogicEvent`]s and is applied here;
//! - configuration forms report edits over a channel drained by [`FlowEditor::sync_updates`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod palette;
pub mod patch;
pub mod seed;

use flow_canvas::input::CanvasEvent;
use flow_canvas::layout;
use flow_canvas::model::{DataField, FlowGraph, FlowNode, OutputSchema, PaletteIcon, StepKind, StepStatus};
use flow_canvas::notes::Annotation;
use flow_canvas::render::RenderList;
use flow_canvas::{Canvas, LogicEvent};
use flow_inspector::{ConfigSurface, SurfaceMessage, SurfaceReceiver, surface_channel};
use threatflow_core::{RunTrace, UpstreamField, resolve_upstream_fields, simulate_run};

pub use catalog::{CatalogSort, FlowCatalog, FlowMeta, FlowStatus, FlowTemplate};
pub use config::EditorConfig;
pub use error::{EditorError, PatchError, Result};
pub use palette::{PaletteGroup, PaletteItem, filter_palette, palette};

/// Optional overrides for a step added through [`FlowEditor::add_step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOverrides {
    pub icon: Option<PaletteIcon>,
    pub title: Option<String>,
    pub summary: Option<String>,
}

impl From<&PaletteItem> for StepOverrides {
    fn from(item: &PaletteItem) -> Self {
        Self {
            icon: Some(item.icon),
            title: Some(item.label.to_string()),
            summary: None,
        }
    }
}

/// The configuration form currently connected to the editor.
#[derive(Debug)]
struct EditSession {
    node_id: String,
    updates: SurfaceReceiver,
}

pub struct FlowEditor {
    config: EditorConfig,
    catalog: FlowCatalog,
    flow_id: Option<String>,
    meta: FlowMeta,
    graph: FlowGraph,
    notes: Vec<Annotation>,
    selected: Option<String>,
    canvas: Canvas,
    session: Option<EditSession>,
}

impl FlowEditor {
    /// An editor with an empty graph and the configured default metadata.
    pub fn new(config: EditorConfig) -> Self {
        let canvas = Canvas::new(config.canvas.clone(), config.container_size);
        Self {
            meta: config.defaults.clone(),
            config,
            catalog: FlowCatalog::default(),
            flow_id: None,
            graph: FlowGraph::default(),
            notes: Vec::new(),
            selected: None,
            canvas,
            session: None,
        }
    }

    /// An editor showing the demo graph for `flow_id`.
    pub fn mount(config: EditorConfig, catalog: FlowCatalog, flow_id: &str) -> Self {
        let mut editor = Self::new(config);
        editor.catalog = catalog;
        editor.load_flow(flow_id);
        editor
    }

    /// Resets the graph, notes and selection to the seed for `flow_id`.
    /// An open configuration form is disconnected.
    #[tracing::instrument(skip(self))]
    pub fn load_flow(&mut self, flow_id: &str) {
        let template = self.catalog.find(flow_id);
        if template.is_none() {
            tracing::debug!("Flow not in catalog, using defaults");
        }
        self.meta = FlowMeta::resolve(template, &self.config.defaults);

        let nodes = seed::seed_nodes(&self.meta);
        let edges = seed::seed_edges(&nodes);
        self.graph = FlowGraph::new(nodes, edges);
        self.notes = seed::seed_notes();
        self.selected = self.graph.nodes.first().map(|n| n.id.clone());
        self.flow_id = Some(flow_id.to_string());
        self.session = None;

        tracing::info!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            name = %self.meta.name,
            "Flow seeded"
        );
    }

    pub fn flow_id(&self) -> Option<&str> {
        self.flow_id.as_deref()
    }

    pub fn meta(&self) -> &FlowMeta {
        &self.meta
    }

    pub fn catalog(&self) -> &FlowCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn notes(&self) -> &[Annotation] {
        &self.notes
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_node(&self) -> Option<&FlowNode> {
        self.graph.node(self.selected.as_deref()?)
    }

    /// Id of the node whose configuration form is connected, if any.
    pub fn editing(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.node_id.as_str())
    }

    /// Selects `id`. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.graph.contains(id) {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Keeps the selection pointing at an existing node.
    fn repair_selection(&mut self) {
        let valid = self.selected.as_deref().is_some_and(|id| self.graph.contains(id));
        if !valid {
            self.selected = self.graph.nodes.first().map(|n| n.id.clone());
        }
    }

    /// Appends a step below the current tail and links the tail to it.
    /// On an empty graph the new step links to itself.
    pub fn add_step(&mut self, kind: StepKind, overrides: StepOverrides) -> String {
        let existing = self.graph.nodes.len();
        let position = layout::insertion_position(existing, &self.canvas.config);
        let title = overrides
            .title
            .unwrap_or_else(|| seed::default_title(kind, existing + 1));

        let mut node = FlowNode::new(kind, title, position);
        node.icon = overrides.icon;
        node.summary = overrides
            .summary
            .unwrap_or_else(|| seed::default_summary(kind).to_string());
        node.owner = self.meta.owner.clone();
        node.signals = vec![self.meta.primary_signal().to_string()];
        node.status = StepStatus::Draft;

        let id = node.id.clone();
        let from = self
            .graph
            .edges
            .last()
            .map(|e| e.to.clone())
            .unwrap_or_else(|| id.clone());
        self.graph.nodes.push(node);
        self.graph.edges.push(flow_canvas::model::Edge::new(from.clone(), id.clone()));
        self.selected = Some(id.clone());

        tracing::info!(node_id = %id, ?kind, from = %from, "Step added");
        id
    }

    pub fn add_palette_item(&mut self, item: &PaletteItem) -> String {
        self.add_step(item.kind, StepOverrides::from(item))
    }

    /// Removes the node and every edge touching it. Neighbours are not re-linked.
    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        let removed = self.graph.remove_node(id)?;
        if self.editing() == Some(id) {
            self.session = None;
        }
        self.repair_selection();
        tracing::info!(node_id = %id, remaining = self.graph.nodes.len(), "Step removed");
        Some(removed)
    }

    /// Re-places every node on the grid. Manual positions are lost.
    pub fn normalize_layout(&mut self) {
        let width = self.canvas.view.container_size.x;
        layout::normalize_layout(&mut self.graph.nodes, width, &self.canvas.config);
        tracing::info!(width, count = self.graph.nodes.len(), "Layout normalized");
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas.update_container_size(glam::Vec2::new(width, height));
    }

    /// Feeds one input event to the canvas and applies what it reports.
    pub fn handle_canvas_event(&mut self, event: &CanvasEvent) -> Vec<LogicEvent> {
        let events = self.canvas.handle_event(event, &self.graph, &self.notes);
        for event in &events {
            self.apply_logic_event(event);
        }
        events
    }

    fn apply_logic_event(&mut self, event: &LogicEvent) {
        match event {
            LogicEvent::NodeSelected { id } => {
                self.select(id);
            }
            LogicEvent::NodeMoved { id, position } => {
                if let Some(node) = self.graph.node_mut(id) {
                    node.position = *position;
                }
            }
            LogicEvent::NoteMoved { id, position } => {
                if let Some(note) = self.notes.iter_mut().find(|n| &n.id == id) {
                    note.position = *position;
                }
            }
            LogicEvent::RemoveRequested { id } => {
                self.remove_node(id);
            }
            LogicEvent::InsertRequested { edge_index, from, to } => {
                tracing::debug!(edge_index, from = %from, to = %to, "Insert on edge requested");
            }
            LogicEvent::ViewportChanged(_) | LogicEvent::RepaintNeeded => {}
        }
    }

    pub fn draw(&self) -> RenderList {
        self.canvas.draw(&self.graph, &self.notes, self.selected.as_deref())
    }

    pub fn upstream_fields(&self, node_id: &str) -> Vec<UpstreamField> {
        resolve_upstream_fields(node_id, &self.graph.nodes, &self.graph.edges)
    }

    /// Opens the configuration form for `node_id`, replacing any form already open.
    pub fn open_surface(&mut self, node_id: &str) -> Result<ConfigSurface> {
        let node = self
            .graph
            .node(node_id)
            .ok_or_else(|| EditorError::UnknownNode(node_id.to_string()))?;
        let upstream = self.upstream_fields(node_id);
        let (tx, rx) = surface_channel();
        let surface = ConfigSurface::new(node, upstream, tx);

        self.session = Some(EditSession {
            node_id: node_id.to_string(),
            updates: rx,
        });
        tracing::debug!(node_id, "Configuration form opened");
        Ok(surface)
    }

    /// Disconnects the open configuration form. Queued updates are dropped.
    pub fn close_surface(&mut self) {
        self.session = None;
    }

    /// Applies every queued form update without blocking. Returns how many changed the node.
    #[tracing::instrument(skip(self))]
    pub fn sync_updates(&mut self) -> usize {
        let Some(session) = &self.session else {
            return 0;
        };

        let mut applied = 0;
        loop {
            match session.updates.try_recv() {
                Ok(message) => {
                    if apply_message(&mut self.graph, &session.node_id, message) {
                        applied += 1;
                    }
                }
                Err(async_channel::TryRecvError::Empty) => break,
                Err(async_channel::TryRecvError::Closed) => {
                    tracing::debug!(node_id = %session.node_id, "Configuration form closed");
                    self.session = None;
                    break;
                }
            }
        }
        applied
    }

    /// Waits for the next form update and applies it. A closed form ends the session.
    pub async fn next_update(&mut self) -> anyhow::Result<bool> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No configuration form is open"))?;
        let received = session.updates.recv().await;
        let SurfaceMessage::NodeUpdate { field, value } = match received {
            Ok(message) => message,
            Err(err) => {
                tracing::debug!(node_id = %session.node_id, "Configuration form closed");
                self.session = None;
                return Err(err.into());
            }
        };
        let node = self
            .graph
            .node_mut(&session.node_id)
            .ok_or_else(|| EditorError::UnknownNode(session.node_id.clone()))?;
        Ok(patch::apply_node_update(node, &field, &value)?)
    }

    /// Sets the fields a node exposes downstream.
    pub fn set_output_schema(&mut self, node_id: &str, fields: Vec<DataField>) -> Result<()> {
        let node = self
            .graph
            .node_mut(node_id)
            .ok_or_else(|| EditorError::UnknownNode(node_id.to_string()))?;
        node.output_schema = Some(OutputSchema { fields });
        Ok(())
    }

    /// Orders the steps as a pretend run would visit them. Nothing executes.
    pub fn simulate_run(&self) -> RunTrace {
        simulate_run(&self.graph)
    }

    pub fn palette(&self) -> Vec<PaletteGroup> {
        palette::palette()
    }

    pub fn filter_palette(&self, search: &str) -> Vec<PaletteGroup> {
        palette::filter_palette(search)
    }
}

fn apply_message(graph: &mut FlowGraph, node_id: &str, message: SurfaceMessage) -> bool {
    let SurfaceMessage::NodeUpdate { field, value } = message;
    let Some(node) = graph.node_mut(node_id) else {
        tracing::debug!(node_id, field = %field, "Update for a node that no longer exists");
        return false;
    };
    match patch::apply_node_update(node, &field, &value) {
        Ok(applied) => applied,
        Err(err) => {
            tracing::warn!(node_id, field = %field, "Update rejected: {}", err);
            false
        }
    }
}
