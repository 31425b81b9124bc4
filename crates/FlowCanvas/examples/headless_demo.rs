use flow_canvas::input::{CanvasEvent, ModifiersState};
use flow_canvas::model::{Edge, FlowGraph, FlowNode, StepKind};
use flow_canvas::notes::Annotation;
use flow_canvas::render::DrawCommand;
use flow_canvas::{Canvas, CanvasConfig, LogicEvent};
use glam::Vec2;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== FlowCanvas Headless Demo ===");

    // 1. Initialize Canvas (simulating a 1280x720 panel)
    let mut canvas = Canvas::new(CanvasConfig::default(), Vec2::new(1280.0, 720.0));

    // 2. A three-step flow and one note
    let mut graph = FlowGraph::new(
        vec![
            FlowNode::with_id("trigger", StepKind::Sensor, "Email Trigger", Vec2::new(420.0, 80.0)),
            FlowNode::with_id("if-real", StepKind::Decision, "If real email", Vec2::new(420.0, 320.0)),
            FlowNode::with_id("notify", StepKind::Notify, "Email Content", Vec2::new(560.0, 780.0)),
        ],
        vec![
            Edge::new("trigger", "if-real"),
            Edge::labeled("if-real", "notify", "TRUE"),
        ],
    );
    let mut notes = vec![Annotation::info(
        "note-trigger",
        "Trigger mapping",
        "Map inbound fields before enrichment.",
        Vec2::new(900.0, 40.0),
    )];

    // 3. Scripted pointer session: drag the trigger, pan, zoom, drag the note
    let script = [
        CanvasEvent::primary_down(Vec2::new(500.0, 150.0)),
        CanvasEvent::PointerMove {
            pos: Vec2::new(560.0, 170.0),
        },
        CanvasEvent::PointerUp {
            pos: Vec2::new(560.0, 170.0),
        },
        CanvasEvent::primary_down(Vec2::new(40.0, 40.0)),
        CanvasEvent::PointerMove {
            pos: Vec2::new(20.0, 10.0),
        },
        CanvasEvent::PointerUp {
            pos: Vec2::new(20.0, 10.0),
        },
        CanvasEvent::Wheel {
            pos: Vec2::new(640.0, 360.0),
            delta: Vec2::new(0.0, -100.0),
            modifiers: ModifiersState {
                ctrl: true,
                ..Default::default()
            },
        },
    ];

    let mut selected: Option<String> = None;
    for (frame, event) in script.iter().enumerate() {
        println!("\n--- Frame {} ---", frame);
        let events = canvas.handle_event(event, &graph, &notes);

        // The owner of the graph applies intents.
        for logic in &events {
            match logic {
                LogicEvent::NodeSelected { id } => selected = Some(id.clone()),
                LogicEvent::NodeMoved { id, position } => {
                    if let Some(node) = graph.node_mut(id) {
                        node.position = *position;
                    }
                }
                LogicEvent::NoteMoved { id, position } => {
                    if let Some(note) = notes.iter_mut().find(|n| &n.id == id) {
                        note.position = *position;
                    }
                }
                _ => {}
            }
        }

        println!("  Logic Events: {:?}", events);
        println!("  Viewport: {:?}", canvas.viewport());
    }

    let draw_list = canvas.draw(&graph, &notes, selected.as_deref());
    let curves = draw_list
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Bezier { .. }))
        .count();
    println!("\nFinal frame: {} commands, {} edges", draw_list.len(), curves);
    if let Some(node) = graph.node("trigger") {
        println!("Trigger now at {}", node.position);
    }

    println!("\nDemo Complete.");
}
