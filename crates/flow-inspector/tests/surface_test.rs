use flow_canvas::model::{
    Condition, ConditionGroup, ConditionLogic, ConditionOperator, DataField, DecisionConfig, EnrichConfig,
    FieldMapping, FlowNode, JsonType, NodeConfig, PaletteIcon, StepKind, TestDataConfig, TriggerConfig,
};
use flow_inspector::{
    ConfigSurface, ConfigType, SurfaceError, SurfaceMessage, SurfaceReceiver, UpdateKey, Widget, surface_channel,
};
use glam::Vec2;
use threatflow_core::UpstreamField;

fn node(kind: StepKind, icon: PaletteIcon) -> FlowNode {
    let mut node = FlowNode::with_id("n1", kind, "Step", Vec2::ZERO);
    node.icon = Some(icon);
    node
}

fn upstream(full_path: &str, sample: &str) -> UpstreamField {
    let (source, path) = full_path.split_once('.').unwrap();
    UpstreamField {
        field: DataField::new(path, JsonType::String).with_sample(sample),
        source_node_id: source.to_string(),
        source_node_title: source.to_string(),
        full_path: full_path.to_string(),
    }
}

fn drain(rx: &SurfaceReceiver) -> Vec<(String, String)> {
    let mut out = Vec::new();
    while let Ok(SurfaceMessage::NodeUpdate { field, value }) = rx.try_recv() {
        out.push((field, value));
    }
    out
}

#[test]
fn test_generic_form_renders_node_values() {
    let (tx, _rx) = surface_channel();
    let mut plain = FlowNode::with_id("x", StepKind::Action, "Wait it out", Vec2::ZERO);
    plain.icon = Some(PaletteIcon::Wait);
    plain.owner = "SOC".into();

    let form = ConfigSurface::new(&plain, vec![], tx).render();
    assert_eq!(form.config_type, ConfigType::Generic);
    assert_eq!(
        form.field("owner").map(|f| &f.widget),
        Some(&Widget::Text {
            value: "SOC".into(),
            placeholder: Some("Owner name")
        })
    );
}

#[test]
fn test_node_without_icon_uses_kind() {
    let (tx, _rx) = surface_channel();
    let bare = FlowNode::with_id("x", StepKind::Decision, "Gate", Vec2::ZERO);
    let surface = ConfigSurface::new(&bare, vec![], tx);
    assert_eq!(surface.schema().config_type, ConfigType::Decision);
}

#[test]
fn test_plain_fields_emit_updates() {
    let (tx, rx) = surface_channel();
    let mut surface = ConfigSurface::new(&node(StepKind::Sensor, PaletteIcon::Trigger), vec![], tx);

    surface.set_value("title", "Inbox").unwrap();
    surface.set_value("connectionType", "siem").unwrap();
    assert!(matches!(
        surface.set_value("connectionType", "carrier_pigeon"),
        Err(SurfaceError::UnknownOption { .. })
    ));
    assert!(matches!(surface.set_value("owner", "me"), Err(SurfaceError::UnknownField(_))));
    assert!(matches!(
        surface.set_value("testData", "{}"),
        Err(SurfaceError::NotAPlainField { .. })
    ));

    assert_eq!(
        drain(&rx),
        vec![
            ("title".to_string(), "Inbox".to_string()),
            ("connectionType".to_string(), "siem".to_string()),
        ]
    );
    assert_eq!(surface.value("connectionType"), Some("siem"));
}

#[test]
fn test_parse_sends_raw_then_fields() {
    let (tx, rx) = surface_channel();
    let mut surface = ConfigSurface::new(&node(StepKind::Sensor, PaletteIcon::Trigger), vec![], tx);

    surface.open_test_data_input().unwrap();
    surface.edit_test_data(r#"{"sender": "eve@evil.test", "score": 9}"#).unwrap();
    assert!(drain(&rx).is_empty());

    assert_eq!(surface.parse_test_data().unwrap(), 2);
    let sent = drain(&rx);
    assert_eq!(sent[0].0, "testDataRaw");
    assert_eq!(sent[1].0, "testDataParsed");
    let fields: Vec<DataField> = serde_json::from_str(&sent[1].1).unwrap();
    assert_eq!(fields[0].path, "sender");
    assert_eq!(fields[1].field_type, JsonType::Number);
}

#[test]
fn test_bad_json_keeps_previous_fields() {
    let (tx, rx) = surface_channel();
    let mut trigger = node(StepKind::Sensor, PaletteIcon::Trigger);
    trigger.config = Some(NodeConfig::Trigger(TriggerConfig {
        connection_type: None,
        test_data: Some(TestDataConfig {
            raw_json: r#"{"a":1}"#.into(),
            parsed_fields: vec![DataField::new("a", JsonType::Number)],
        }),
    }));
    let mut surface = ConfigSurface::new(&trigger, vec![], tx);

    surface.edit_test_data("{broken").unwrap();
    let err = surface.parse_test_data().unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON: "));

    // The raw text still goes out before the parse is attempted.
    let sent = drain(&rx);
    assert_eq!(sent, vec![("testDataRaw".to_string(), "{broken".to_string())]);

    match &surface.render().field("testData").unwrap().widget {
        Widget::JsonEditor { fields, error, .. } => {
            assert_eq!(fields.len(), 1);
            assert!(error.as_deref().unwrap().starts_with("Invalid JSON: "));
        }
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn test_toggles_resend_full_list() {
    let (tx, rx) = surface_channel();
    let mut surface = ConfigSurface::new(&node(StepKind::Sensor, PaletteIcon::TestTrigger), vec![], tx);
    surface.edit_test_data(r#"{"a": 1, "b": 2}"#).unwrap();
    surface.parse_test_data().unwrap();
    drain(&rx);

    surface.toggle_output_field(0, false).unwrap();
    surface.select_all_output_fields(false).unwrap();
    surface.select_all_output_fields(true).unwrap();
    assert!(matches!(surface.toggle_output_field(9, true), Err(SurfaceError::NoSuchField(9))));

    let sent = drain(&rx);
    assert_eq!(sent.len(), 3);
    let first: Vec<DataField> = serde_json::from_str(&sent[0].1).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].selected, Some(false));
    assert_eq!(first[1].selected, Some(true));
    let last: Vec<DataField> = serde_json::from_str(&sent[2].1).unwrap();
    assert!(last.iter().all(|f| f.selected == Some(true)));
}

#[test]
fn test_template_insert_updates_preview() {
    let (tx, rx) = surface_channel();
    let fields = vec![upstream("email_trigger.sender", "eve@evil.test")];
    let mut surface = ConfigSurface::new(&node(StepKind::Notify, PaletteIcon::NotifySlack), fields, tx);

    assert_eq!(surface.template_preview(), None);
    surface.edit_template("Phish from ").unwrap();
    surface.insert_template_field("email_trigger.sender").unwrap();

    assert_eq!(surface.template_preview().as_deref(), Some("Phish from eve@evil.test"));
    let sent = drain(&rx);
    assert_eq!(sent.last().unwrap(), &("template".to_string(), "Phish from {{email_trigger.sender}}".to_string()));

    match &surface.render().field("template").unwrap().widget {
        Widget::TemplateEditor {
            field_groups,
            empty_message,
            ..
        } => {
            assert_eq!(field_groups.len(), 1);
            assert_eq!(*empty_message, None);
        }
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn test_template_without_upstream_says_so() {
    let (tx, _rx) = surface_channel();
    let surface = ConfigSurface::new(&node(StepKind::Action, PaletteIcon::ActionTicket), vec![], tx);
    match &surface.render().field("template").unwrap().widget {
        Widget::TemplateEditor { empty_message, .. } => {
            assert_eq!(*empty_message, Some("No upstream fields available"))
        }
        other => panic!("unexpected widget {other:?}"),
    }
}

#[test]
fn test_condition_edits_send_whole_structure() {
    let (tx, rx) = surface_channel();
    let mut decision = node(StepKind::Decision, PaletteIcon::If);
    decision.config = Some(NodeConfig::Decision(DecisionConfig::default()));
    let fields = vec![upstream("trigger.score", "9")];
    let mut surface = ConfigSurface::new(&decision, fields, tx);

    surface.pick_condition_field(0, 0, "trigger.score").unwrap();
    surface.set_condition_operator(0, 0, ConditionOperator::GreaterThan).unwrap();
    surface.set_condition_value(0, 0, "5").unwrap();
    surface.add_condition_group().unwrap();
    assert!(!surface.remove_condition_group(0).unwrap());
    assert!(!surface.remove_condition(0, 0).unwrap());
    assert!(matches!(
        surface.remove_condition(4, 0),
        Err(SurfaceError::NoSuchCondition { group: 4, index: 0 })
    ));

    let sent = drain(&rx);
    assert_eq!(sent.len(), 4);
    assert!(sent.iter().all(|(k, _)| k == "conditionGroups"));

    let groups: Vec<ConditionGroup> = serde_json::from_str(&sent[3].1).unwrap();
    assert_eq!(
        groups,
        vec![
            ConditionGroup {
                logic: ConditionLogic::And,
                conditions: vec![Condition {
                    field_path: "trigger.score".into(),
                    operator: ConditionOperator::GreaterThan,
                    value: "5".into(),
                }],
            },
            ConditionGroup {
                logic: ConditionLogic::And,
                conditions: vec![Condition::default()],
            },
        ]
    );
}

#[test]
fn test_field_picker_offers_upstream_paths() {
    let (tx, rx) = surface_channel();
    let mut enrich = node(StepKind::Enrich, PaletteIcon::GetUser);
    enrich.config = Some(NodeConfig::Enrich(EnrichConfig {
        source_mappings: vec![FieldMapping {
            source_field: "trigger.user".into(),
            target_field: String::new(),
        }],
        lookup_type: Some("user_lookup".into()),
    }));
    let fields = vec![upstream("trigger.user", "alice"), upstream("trigger.host", "ws-01")];
    let mut surface = ConfigSurface::new(&enrich, fields, tx);

    assert_eq!(surface.value("lookupType"), Some("user_lookup"));
    assert_eq!(surface.field_picker().unwrap().value(), "trigger.user");
    assert!(surface.set_value("sourceField", "nowhere.x").is_err());
    surface.set_value("sourceField", "trigger.host").unwrap();

    assert_eq!(drain(&rx), vec![("sourceField".to_string(), "trigger.host".to_string())]);
    match &surface.render().field("sourceField").unwrap().widget {
        Widget::FieldPicker {
            value,
            empty_label,
            options,
        } => {
            assert_eq!(value, "trigger.host");
            assert_eq!(*empty_label, "Select field...");
            assert_eq!(options.len(), 2);
        }
        other => panic!("unexpected widget {other:?}"),
    }
}

#[tokio::test]
async fn test_updates_arrive_in_order() {
    let (tx, rx) = surface_channel();
    let mut surface = ConfigSurface::new(&node(StepKind::Notify, PaletteIcon::Notify), vec![], tx);

    surface.set_value("channel", "slack").unwrap();
    surface.edit_template("hello").unwrap();
    drop(surface);

    let first = rx.recv().await.unwrap();
    assert_eq!(first, SurfaceMessage::node_update(UpdateKey::Channel, "slack"));
    let second = rx.recv().await.unwrap();
    assert_eq!(second, SurfaceMessage::node_update(UpdateKey::Template, "hello"));
    // Dropping the surface closes the queue once it is drained.
    assert!(rx.recv().await.is_err());
}

#[test]
fn test_closed_channel_surfaces_error() {
    let (tx, rx) = surface_channel();
    let mut surface = ConfigSurface::new(&node(StepKind::Notify, PaletteIcon::Notify), vec![], tx);
    drop(rx);
    assert!(matches!(surface.edit_template("x"), Err(SurfaceError::ChannelClosed)));
}
