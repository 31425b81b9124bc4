//! # Interaction State Machine
//!
//! Turns raw pointer and wheel events into viewport changes and graph intents.
//! The Canvas owns the viewport and mutates it directly. Graph changes (node
//! positions, removal, insertion) are only *reported* as [`LogicEvent`]s; the
//! controller that owns the graph applies them.

use glam::Vec2;

use crate::config::CanvasConfig;
use crate::input::{CanvasEvent, ModifiersState, PointerButton};
use crate::math::{EdgePath, Rect, clamp};
use crate::model::FlowGraph;
use crate::notes::Annotation;
use crate::view::{View, Viewport};

/// Size of the remove button in the top-right corner of a card.
pub const REMOVE_BUTTON_SIZE: f32 = 24.0;
/// Hit radius of the insert handle, in canvas units.
pub const INSERT_HANDLE_RADIUS: f32 = 10.0;

/// Events emitted by the Canvas logic to the host application.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// A card was pressed and is now the selection.
    NodeSelected { id: String },
    /// A dragged card has a new canvas-space position.
    NodeMoved { id: String, position: Vec2 },
    /// A dragged annotation has a new canvas-space position.
    NoteMoved { id: String, position: Vec2 },
    /// The remove button of a card was pressed.
    RemoveRequested { id: String },
    /// The insert handle on an edge was pressed.
    InsertRequested {
        edge_index: usize,
        from: String,
        to: String,
    },
    /// Pan or zoom changed.
    ViewportChanged(Viewport),
    /// Visual state changed; the host should re-draw.
    RepaintNeeded,
}

/// What sits under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Background,
    Node(String),
    RemoveButton(String),
    InsertHandle { edge_index: usize },
    Note(String),
}

impl HitTarget {
    /// Everything except the bare background opts in to its own pointer handling.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, HitTarget::Background)
    }
}

/// The current state of user interaction. At most one drag is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A card is following the pointer.
    DraggingNode {
        id: String,
        /// Pointer minus card origin at drag start (Canvas Space).
        offset: Vec2,
    },
    /// An annotation is following the pointer.
    DraggingNote { id: String, offset: Vec2 },
    /// The content layer is following the pointer.
    Panning {
        /// Pointer position at drag start (Screen Space).
        start: Vec2,
        /// Viewport pan at drag start.
        origin: Vec2,
    },
}

/// Finds the front-most target under `screen_pos`.
///
/// Annotations sit above cards, cards above edges. Within cards the last
/// inserted one wins.
pub fn hit_test(
    view: &View,
    config: &CanvasConfig,
    graph: &FlowGraph,
    notes: &[Annotation],
    screen_pos: Vec2,
) -> HitTarget {
    let world = view.screen_to_world(screen_pos);

    if let Some(note) = notes
        .iter()
        .rev()
        .find(|note| Rect::new(note.position, note.size).contains(world))
    {
        return HitTarget::Note(note.id.clone());
    }

    for node in graph.nodes.iter().rev() {
        if !Rect::new(node.position, config.node_size).contains(world) {
            continue;
        }
        if remove_button_rect(node.position, config).contains(world) {
            return HitTarget::RemoveButton(node.id.clone());
        }
        return HitTarget::Node(node.id.clone());
    }

    for (edge_index, edge) in graph.edges.iter().enumerate() {
        if let (Some(from), Some(to)) = (graph.node(&edge.from), graph.node(&edge.to)) {
            let path = EdgePath::between(from.position, to.position, config.node_size);
            if path.midpoint().distance(world) <= INSERT_HANDLE_RADIUS {
                return HitTarget::InsertHandle { edge_index };
            }
        }
    }

    HitTarget::Background
}

/// Remove button bounds for a card at `node_pos` (Canvas Space).
pub fn remove_button_rect(node_pos: Vec2, config: &CanvasConfig) -> Rect {
    let inset = 8.0;
    Rect::new(
        node_pos + Vec2::new(config.node_size.x - REMOVE_BUTTON_SIZE - inset, inset),
        Vec2::splat(REMOVE_BUTTON_SIZE),
    )
}

/// Feeds one event through the state machine.
///
/// Returns the events the host (or controller) should act on. The viewport inside
/// `view` is updated in place for pans and zooms.
pub fn handle_event(
    state: &mut InteractionState,
    view: &mut View,
    config: &CanvasConfig,
    graph: &FlowGraph,
    notes: &[Annotation],
    event: &CanvasEvent,
) -> Vec<LogicEvent> {
    let mut events = Vec::new();

    let next_state = match *event {
        CanvasEvent::PointerDown {
            pos,
            button,
            modifiers,
        } => handle_pointer_down(state, view, config, graph, notes, pos, button, modifiers, &mut events),
        CanvasEvent::PointerMove { pos } => {
            handle_pointer_move(state, view, config, graph, notes, pos, &mut events);
            None
        }
        CanvasEvent::PointerUp { .. } => match state {
            InteractionState::Idle => None,
            _ => Some(InteractionState::Idle),
        },
        CanvasEvent::Wheel {
            pos,
            delta,
            modifiers,
        } => {
            handle_wheel(view, config, pos, delta, modifiers, &mut events);
            None
        }
    };

    if let Some(new_state) = next_state {
        tracing::debug!(from = ?state, to = ?new_state, "interaction state changed");
        *state = new_state;
    }

    events
}

#[allow(clippy::too_many_arguments)]
fn handle_pointer_down(
    state: &InteractionState,
    view: &View,
    config: &CanvasConfig,
    graph: &FlowGraph,
    notes: &[Annotation],
    pos: Vec2,
    button: PointerButton,
    modifiers: ModifiersState,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionState> {
    if !matches!(state, InteractionState::Idle) {
        return None;
    }

    let target = hit_test(view, config, graph, notes, pos);
    let is_primary = button == PointerButton::Primary;
    let should_pan = button == PointerButton::Middle
        || modifiers.shift
        || (is_primary && !target.is_interactive());

    if should_pan {
        return Some(InteractionState::Panning {
            start: pos,
            origin: view.viewport.pan,
        });
    }

    if !is_primary {
        return None;
    }

    let world = view.screen_to_world(pos);
    match target {
        HitTarget::Node(id) => {
            let node = graph.node(&id)?;
            events.push(LogicEvent::NodeSelected { id: id.clone() });
            events.push(LogicEvent::RepaintNeeded);
            Some(InteractionState::DraggingNode {
                offset: world - node.position,
                id,
            })
        }
        HitTarget::Note(id) => {
            let note = notes.iter().find(|n| n.id == id)?;
            Some(InteractionState::DraggingNote {
                offset: world - note.position,
                id,
            })
        }
        HitTarget::RemoveButton(id) => {
            events.push(LogicEvent::RemoveRequested { id });
            None
        }
        HitTarget::InsertHandle { edge_index } => {
            if let Some(edge) = graph.edges.get(edge_index) {
                events.push(LogicEvent::InsertRequested {
                    edge_index,
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            None
        }
        HitTarget::Background => None,
    }
}

fn handle_pointer_move(
    state: &InteractionState,
    view: &mut View,
    config: &CanvasConfig,
    graph: &FlowGraph,
    notes: &[Annotation],
    pos: Vec2,
    events: &mut Vec<LogicEvent>,
) {
    match state {
        InteractionState::Idle => {}
        InteractionState::Panning { start, origin } => {
            view.viewport.pan = *origin + (pos - *start);
            events.push(LogicEvent::ViewportChanged(view.viewport));
            events.push(LogicEvent::RepaintNeeded);
        }
        InteractionState::DraggingNode { id, offset } => {
            if !graph.contains(id) {
                return;
            }
            let target = view.screen_to_world(pos) - *offset;
            let limit = view.container_size - config.node_size - Vec2::splat(config.node_margin);
            let position = Vec2::new(
                clamp(target.x, config.node_margin, limit.x),
                clamp(target.y, config.node_margin, limit.y),
            );
            events.push(LogicEvent::NodeMoved {
                id: id.clone(),
                position,
            });
            events.push(LogicEvent::RepaintNeeded);
        }
        InteractionState::DraggingNote { id, offset } => {
            let Some(note) = notes.iter().find(|n| &n.id == id) else {
                return;
            };
            let bounds = note.kind.bounds(config);
            let target = view.screen_to_world(pos) - *offset;
            let position = Vec2::new(
                clamp(target.x, bounds.min, view.container_size.x - bounds.right),
                clamp(target.y, bounds.min, view.container_size.y - bounds.bottom),
            );
            events.push(LogicEvent::NoteMoved {
                id: id.clone(),
                position,
            });
            events.push(LogicEvent::RepaintNeeded);
        }
    }
}

fn handle_wheel(
    view: &mut View,
    config: &CanvasConfig,
    pos: Vec2,
    delta: Vec2,
    modifiers: ModifiersState,
    events: &mut Vec<LogicEvent>,
) {
    if modifiers.zoom_modifier() {
        let factor = if delta.y < 0.0 {
            config.zoom_in_factor
        } else {
            config.zoom_out_factor
        };
        let requested = view.viewport.scale * factor;
        if !view.zoom_at(pos, requested, config.min_scale, config.max_scale) {
            return;
        }
    } else {
        view.pan_by(-delta);
    }

    events.push(LogicEvent::ViewportChanged(view.viewport));
    events.push(LogicEvent::RepaintNeeded);
}
