use flow_canvas::input::CanvasEvent;
use flow_canvas::model::{ConditionOperator, DataField, JsonType, NodeConfig, StepKind};
use flow_canvas::LogicEvent;
use flow_editor::{
    EditorConfig, EditorError, FlowCatalog, FlowEditor, FlowStatus, FlowTemplate, StepOverrides,
};
use flow_inspector::SurfaceError;
use glam::Vec2;

fn catalog() -> FlowCatalog {
    FlowCatalog::new(vec![FlowTemplate {
        id: "tf-phish".into(),
        name: "Phishing triage".into(),
        owner: "Mail Ops".into(),
        status: FlowStatus::Live,
        signals: vec!["Email".into(), "Proxy".into(), "EDR".into()],
        installs: "1.2k installs".into(),
        updated: "Updated 2d ago".into(),
        severity: "Critical".into(),
        coverage: Some(72.0),
    }])
}

fn mounted() -> FlowEditor {
    FlowEditor::mount(EditorConfig::default(), catalog(), "tf-phish")
}

#[test]
fn test_add_two_steps_then_remove_the_first() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut editor = FlowEditor::new(EditorConfig::default());
    assert!(editor.graph().nodes.is_empty());
    assert_eq!(editor.selected(), None);

    let sensor = editor.add_step(StepKind::Sensor, StepOverrides::default());
    let action = editor.add_step(StepKind::Action, StepOverrides::default());

    let linking: Vec<_> = editor
        .graph()
        .edges
        .iter()
        .filter(|e| e.from != e.to)
        .collect();
    assert_eq!(linking.len(), 1);
    assert_eq!(linking[0].from, sensor);
    assert_eq!(linking[0].to, action);
    assert_eq!(editor.selected(), Some(action.as_str()));

    editor.remove_node(&sensor);
    assert!(editor.graph().edges.is_empty());
    assert_eq!(editor.selected(), Some(action.as_str()));

    editor.remove_node(&action);
    assert_eq!(editor.selected(), None);
}

#[test]
fn test_first_step_on_empty_graph_links_to_itself() {
    let mut editor = FlowEditor::new(EditorConfig::default());
    let id = editor.add_step(StepKind::Notify, StepOverrides::default());
    let edge = &editor.graph().edges[0];
    assert_eq!((edge.from.as_str(), edge.to.as_str()), (id.as_str(), id.as_str()));

    let node = editor.graph().node(&id).unwrap();
    assert_eq!(node.title, "Notify & log #1");
    assert_eq!(node.owner, "Detection Engineer");
    assert_eq!(node.signals, vec!["EDR"]);
    assert_eq!(node.position, Vec2::new(220.0, 180.0));
}

#[test]
fn test_mount_seeds_from_catalog() {
    let editor = mounted();
    assert_eq!(editor.flow_id(), Some("tf-phish"));
    assert_eq!(editor.meta().owner, "Mail Ops");
    assert_eq!(editor.meta().severity, "Critical");
    assert_eq!(editor.graph().nodes.len(), 7);
    assert_eq!(editor.graph().edges.len(), 7);
    assert_eq!(editor.notes().len(), 5);
    assert_eq!(editor.selected(), Some("trigger"));

    let trigger = editor.selected_node().unwrap();
    assert_eq!(trigger.signals, vec!["Email", "Proxy"]);
    assert!(editor.graph().nodes.iter().all(|n| n.owner == "Mail Ops"));
}

#[test]
fn test_unknown_flow_uses_defaults() {
    let editor = FlowEditor::mount(EditorConfig::default(), catalog(), "new");
    assert_eq!(editor.meta().name, "New threat flow");
    assert_eq!(editor.meta().status, FlowStatus::Draft);
    assert_eq!(editor.graph().nodes[0].owner, "Detection Engineer");
}

#[test]
fn test_removing_selected_node_cascades() {
    let mut editor = mounted();
    assert!(editor.select("if-real"));
    assert!(!editor.select("ghost"));

    let removed = editor.remove_node("if-real").unwrap();
    assert_eq!(removed.title, "If real email");
    assert_eq!(editor.graph().edges.len(), 4);
    assert!(editor.graph().edges.iter().all(|e| !e.touches("if-real")));
    assert_eq!(editor.selected(), Some("trigger"));
    assert!(editor.remove_node("if-real").is_none());
}

#[test]
fn test_new_step_follows_last_edge() {
    let mut editor = mounted();
    let id = editor.add_step(StepKind::Sensor, StepOverrides::default());

    let node = editor.graph().node(&id).unwrap();
    assert_eq!(node.title, "Collect signals #8");
    assert_eq!(node.position, Vec2::new(600.0, 1790.0));
    let edge = editor.graph().edges.last().unwrap();
    assert_eq!(edge.from, "test-options");
    assert_eq!(edge.to, id);
}

#[test]
fn test_palette_item_sets_icon_and_title() {
    let mut editor = mounted();
    let groups = editor.filter_palette("slack");
    let item = groups[0].items[0];
    let id = editor.add_palette_item(&item);

    let node = editor.graph().node(&id).unwrap();
    assert_eq!(node.title, "Slack Notification");
    assert_eq!(node.icon, Some(item.icon));
    assert_eq!(node.kind, StepKind::Notify);
    assert_eq!(editor.palette().len(), 8);
}

#[test]
fn test_canvas_drag_moves_the_node() {
    let mut editor = mounted();
    editor.select("email");

    let events = editor.handle_canvas_event(&CanvasEvent::primary_down(Vec2::new(500.0, 120.0)));
    assert!(events.contains(&LogicEvent::NodeSelected { id: "trigger".into() }));
    assert_eq!(editor.selected(), Some("trigger"));

    editor.handle_canvas_event(&CanvasEvent::PointerMove {
        pos: Vec2::new(530.0, 160.0),
    });
    editor.handle_canvas_event(&CanvasEvent::PointerUp {
        pos: Vec2::new(530.0, 160.0),
    });

    assert_eq!(editor.graph().node("trigger").unwrap().position, Vec2::new(450.0, 120.0));
}

#[test]
fn test_remove_button_removes_through_canvas() {
    let mut editor = mounted();
    let events = editor.handle_canvas_event(&CanvasEvent::primary_down(Vec2::new(680.0, 100.0)));
    assert!(events.contains(&LogicEvent::RemoveRequested { id: "trigger".into() }));
    assert!(!editor.graph().contains("trigger"));
    assert_eq!(editor.selected(), Some("if-real"));
}

#[test]
fn test_note_drag_moves_the_note() {
    let mut editor = mounted();
    editor.handle_canvas_event(&CanvasEvent::primary_down(Vec2::new(950.0, 60.0)));
    editor.handle_canvas_event(&CanvasEvent::PointerMove {
        pos: Vec2::new(900.0, 80.0),
    });

    let note = editor.notes().iter().find(|n| n.id == "note-trigger").unwrap();
    assert_eq!(note.position, Vec2::new(850.0, 60.0));
}

#[test]
fn test_normalize_layout_uses_container_width() {
    let mut editor = mounted();
    editor.normalize_layout();
    let nodes = &editor.graph().nodes;
    assert_eq!(nodes[0].position, Vec2::new(60.0, 160.0));
    assert_eq!(nodes[4].position, Vec2::new(420.0, 480.0));

    editor.resize(300.0, 700.0);
    editor.normalize_layout();
    assert_eq!(editor.graph().nodes[2].position, Vec2::new(60.0, 800.0));
}

#[test]
fn test_pretend_run_visits_breadth_first() {
    let editor = mounted();
    let trace = editor.simulate_run();
    let ids = trace.node_ids();
    assert_eq!(ids.len(), 7);
    assert_eq!(&ids[..2], &["trigger", "if-real"]);
    assert!(ids[2..4].contains(&"set-true") && ids[2..4].contains(&"set-false"));
    assert_eq!(ids[6], "test-options");
    assert!(trace.steps.iter().all(|s| s.reached));
}

#[test]
fn test_test_data_flows_downstream() {
    let mut editor = mounted();
    let mut surface = editor.open_surface("trigger").unwrap();
    surface
        .edit_test_data(r#"{"sender": "eve@evil.test", "subject": "Invoice"}"#)
        .unwrap();
    surface.parse_test_data().unwrap();
    surface.toggle_output_field(1, false).unwrap();

    assert_eq!(editor.sync_updates(), 3);

    let trigger = editor.graph().node("trigger").unwrap();
    let Some(NodeConfig::Trigger(config)) = &trigger.config else {
        panic!("trigger config expected");
    };
    assert!(config.test_data.as_ref().unwrap().raw_json.contains("eve@evil.test"));

    let paths: Vec<String> = editor
        .upstream_fields("if-real")
        .into_iter()
        .map(|f| f.full_path)
        .collect();
    assert_eq!(paths, vec!["email_trigger.sender"]);
}

#[test]
fn test_condition_builder_patches_decision() {
    let mut editor = mounted();
    editor
        .set_output_schema("trigger", vec![DataField::new("score", JsonType::Number).with_sample("87")])
        .unwrap();

    let mut surface = editor.open_surface("if-real").unwrap();
    assert_eq!(surface.upstream_fields().len(), 1);
    surface.pick_condition_field(0, 0, "email_trigger.score").unwrap();
    surface
        .set_condition_operator(0, 0, ConditionOperator::GreaterThan)
        .unwrap();
    surface.set_condition_value(0, 0, "50").unwrap();
    surface.set_value("title", "Is it bad?").unwrap();

    assert_eq!(editor.sync_updates(), 4);
    let node = editor.graph().node("if-real").unwrap();
    assert_eq!(node.title, "Is it bad?");
    let Some(NodeConfig::Decision(config)) = &node.config else {
        panic!("decision config expected");
    };
    let condition = &config.condition_groups[0].conditions[0];
    assert_eq!(condition.field_path, "email_trigger.score");
    assert_eq!(condition.operator, ConditionOperator::GreaterThan);
    assert_eq!(condition.value, "50");
}

#[test]
fn test_reseeding_disconnects_the_form() {
    let mut editor = mounted();
    let mut surface = editor.open_surface("email").unwrap();
    assert_eq!(editor.editing(), Some("email"));

    editor.load_flow("tf-phish");
    assert_eq!(editor.editing(), None);
    assert!(matches!(surface.edit_template("late"), Err(SurfaceError::ChannelClosed)));
    assert_eq!(editor.sync_updates(), 0);
}

#[test]
fn test_removing_edited_node_disconnects_the_form() {
    let mut editor = mounted();
    let mut surface = editor.open_surface("arr").unwrap();
    editor.remove_node("arr");
    assert_eq!(editor.editing(), None);
    assert!(surface.set_value("title", "x").is_err());
}

#[test]
fn test_unknown_nodes_are_reported() {
    let mut editor = mounted();
    assert!(matches!(editor.open_surface("ghost"), Err(EditorError::UnknownNode(_))));
    assert!(matches!(
        editor.set_output_schema("ghost", vec![]),
        Err(EditorError::UnknownNode(_))
    ));
}

#[test]
fn test_dropped_form_ends_the_session() {
    let mut editor = mounted();
    let mut surface = editor.open_surface("email").unwrap();
    surface.set_value("channel", "slack").unwrap();
    drop(surface);

    assert_eq!(editor.sync_updates(), 1);
    assert_eq!(editor.editing(), None);
}

#[tokio::test]
async fn test_next_update_awaits_the_form() {
    let mut editor = mounted();
    let mut surface = editor.open_surface("email").unwrap();

    let typing = tokio::spawn(async move {
        surface.edit_template("Phish from {{email_trigger.sender}}").unwrap();
        surface
    });

    assert!(editor.next_update().await.unwrap());
    let _surface = typing.await.unwrap();

    let node = editor.graph().node("email").unwrap();
    let Some(NodeConfig::Notify(config)) = &node.config else {
        panic!("notify config expected");
    };
    assert_eq!(
        config.template.as_ref().map(|t| t.template.as_str()),
        Some("Phish from {{email_trigger.sender}}")
    );
}

#[tokio::test]
async fn test_next_update_without_form_fails() {
    let mut editor = mounted();
    assert!(editor.next_update().await.is_err());
}

#[tokio::test]
async fn test_next_update_ends_session_when_form_closes() {
    let mut editor = mounted();
    let mut surface = editor.open_surface("email").unwrap();
    surface.set_value("title", "Phish alert").unwrap();
    drop(surface);

    assert!(editor.next_update().await.unwrap());
    assert_eq!(editor.graph().node("email").unwrap().title, "Phish alert");
    assert_eq!(editor.editing(), Some("email"));

    assert!(editor.next_update().await.is_err());
    assert_eq!(editor.editing(), None);
    assert_eq!(editor.sync_updates(), 0);
}
