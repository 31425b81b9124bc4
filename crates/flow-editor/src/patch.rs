//! Applies one `nodeUpdate` to a node.
//!
//! Plain keys set node attributes. Typed keys edit the matching config variant
//! in place and keep its other fields. When the node carries a different
//! variant (or none), the key's variant is created from defaults first.

use flow_canvas::model::{
    ActionConfig, ConditionGroup, DataField, DecisionConfig, EnrichConfig, FieldMapping, FlowNode, MessageTemplate,
    NodeConfig, NotifyConfig, OutputSchema, TriggerConfig,
};
use flow_inspector::UpdateKey;
use serde::de::DeserializeOwned;

use crate::error::PatchError;

fn trigger(config: &mut NodeConfig) -> Option<&mut TriggerConfig> {
    match config {
        NodeConfig::Trigger(c) => Some(c),
        _ => None,
    }
}

fn decision(config: &mut NodeConfig) -> Option<&mut DecisionConfig> {
    match config {
        NodeConfig::Decision(c) => Some(c),
        _ => None,
    }
}

fn action(config: &mut NodeConfig) -> Option<&mut ActionConfig> {
    match config {
        NodeConfig::Action(c) => Some(c),
        _ => None,
    }
}

fn enrich(config: &mut NodeConfig) -> Option<&mut EnrichConfig> {
    match config {
        NodeConfig::Enrich(c) => Some(c),
        _ => None,
    }
}

/// Edits the variant selected by `project`, creating it with `wrap` when absent.
fn patch_variant<C: Default>(
    config: &mut Option<NodeConfig>,
    project: fn(&mut NodeConfig) -> Option<&mut C>,
    wrap: fn(C) -> NodeConfig,
    edit: impl FnOnce(&mut C),
) {
    if let Some(existing) = config.as_mut().and_then(project) {
        edit(existing);
        return;
    }
    let mut fresh = C::default();
    edit(&mut fresh);
    *config = Some(wrap(fresh));
}

/// Notify and action configs both carry a message template; anything else becomes notify.
fn patch_template(config: &mut Option<NodeConfig>, edit: impl FnOnce(&mut MessageTemplate)) {
    let slot = match config.as_mut() {
        Some(NodeConfig::Notify(c)) => Some(&mut c.template),
        Some(NodeConfig::Action(c)) => Some(&mut c.template),
        _ => None,
    };
    if let Some(slot) = slot {
        edit(slot.get_or_insert_with(MessageTemplate::default));
        return;
    }
    let mut template = MessageTemplate::default();
    edit(&mut template);
    *config = Some(NodeConfig::Notify(NotifyConfig {
        template: Some(template),
    }));
}

fn parse_value<T: DeserializeOwned>(key: UpdateKey, value: &str) -> Result<T, PatchError> {
    serde_json::from_str(value).map_err(|source| PatchError::MalformedValue {
        field: key.as_str(),
        source,
    })
}

/// Returns `Ok(false)` for keys the editor does not know; the node is untouched.
pub fn apply_node_update(node: &mut FlowNode, field: &str, value: &str) -> Result<bool, PatchError> {
    let Some(key) = UpdateKey::parse(field) else {
        tracing::debug!(node_id = %node.id, field, "Ignoring unknown update key");
        return Ok(false);
    };

    let config = &mut node.config;
    match key {
        UpdateKey::Title => node.title = value.to_string(),
        UpdateKey::Summary => node.summary = value.to_string(),
        UpdateKey::Owner => node.owner = value.to_string(),
        UpdateKey::ConnectionType => patch_variant(config, trigger, NodeConfig::Trigger, |c| {
            c.connection_type = Some(value.to_string())
        }),
        UpdateKey::TestDataRaw => patch_variant(config, trigger, NodeConfig::Trigger, |c| {
            c.test_data.get_or_insert_with(Default::default).raw_json = value.to_string()
        }),
        UpdateKey::TestDataParsed => {
            let fields: Vec<DataField> = parse_value(key, value)?;
            patch_variant(config, trigger, NodeConfig::Trigger, |c| {
                c.test_data.get_or_insert_with(Default::default).parsed_fields = fields.clone()
            });
            node.output_schema = Some(OutputSchema { fields });
        }
        UpdateKey::Template => patch_template(config, |t| t.template = value.to_string()),
        UpdateKey::Channel => patch_template(config, |t| t.channel = Some(value.to_string())),
        UpdateKey::ActionType => patch_variant(config, action, NodeConfig::Action, |c| {
            c.action_type = Some(value.to_string())
        }),
        UpdateKey::LookupType => patch_variant(config, enrich, NodeConfig::Enrich, |c| {
            c.lookup_type = Some(value.to_string())
        }),
        UpdateKey::SourceField => patch_variant(config, enrich, NodeConfig::Enrich, |c| {
            c.source_mappings = vec![FieldMapping {
                source_field: value.to_string(),
                target_field: String::new(),
            }]
        }),
        UpdateKey::Conditions => {
            let group: ConditionGroup = parse_value(key, value)?;
            patch_variant(config, decision, NodeConfig::Decision, |c| c.condition_groups = vec![group]);
        }
        UpdateKey::ConditionGroups => {
            let groups: Vec<ConditionGroup> = parse_value(key, value)?;
            patch_variant(config, decision, NodeConfig::Decision, |c| c.condition_groups = groups);
        }
    }

    tracing::debug!(node_id = %node.id, field, "Node updated");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_canvas::model::{JsonType, StepKind, TestDataConfig};
    use glam::Vec2;

    fn node() -> FlowNode {
        FlowNode::with_id("n", StepKind::Action, "Step", Vec2::ZERO)
    }

    #[test]
    fn test_raw_text_keeps_parsed_fields() {
        let mut n = node();
        n.config = Some(NodeConfig::Trigger(TriggerConfig {
            connection_type: Some("siem".into()),
            test_data: Some(TestDataConfig {
                raw_json: "{}".into(),
                parsed_fields: vec![DataField::new("a", JsonType::Number)],
            }),
        }));

        assert!(apply_node_update(&mut n, "testDataRaw", r#"{"a":2}"#).unwrap());
        let Some(NodeConfig::Trigger(c)) = &n.config else {
            panic!("trigger config expected")
        };
        assert_eq!(c.connection_type.as_deref(), Some("siem"));
        let data = c.test_data.as_ref().unwrap();
        assert_eq!(data.raw_json, r#"{"a":2}"#);
        assert_eq!(data.parsed_fields.len(), 1);
    }

    #[test]
    fn test_action_template_stays_action() {
        let mut n = node();
        n.config = Some(NodeConfig::Action(ActionConfig {
            template: None,
            action_type: Some("create_ticket".into()),
        }));
        apply_node_update(&mut n, "template", "Ticket for {{x}}").unwrap();
        apply_node_update(&mut n, "channel", "email").unwrap();

        let Some(NodeConfig::Action(c)) = &n.config else {
            panic!("action config expected")
        };
        assert_eq!(c.action_type.as_deref(), Some("create_ticket"));
        assert_eq!(
            c.template,
            Some(MessageTemplate {
                template: "Ticket for {{x}}".into(),
                channel: Some("email".into()),
            })
        );
    }

    #[test]
    fn test_malformed_groups_leave_node_alone() {
        let mut n = node();
        let err = apply_node_update(&mut n, "conditionGroups", "[{").unwrap_err();
        assert!(err.to_string().starts_with("Malformed value for 'conditionGroups'"));
        assert_eq!(n.config, None);
    }
}
