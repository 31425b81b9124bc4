//! # Core Data Models
//!
//! This module defines the threat-flow graph: steps (`FlowNode`), directed arcs (`Edge`)
//! and the per-kind configuration payload each step carries.
//!
//! Nodes and edges live in plain ordered vectors inside [`FlowGraph`]. Insertion order is
//! meaningful: it drives auto-layout, the "previous tail" used when appending steps, and
//! the discovery order of upstream fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use uuid::Uuid;

/// Coarse category of a step. Drives default titles, summaries and the fallback icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Sensor,
    Enrich,
    Decision,
    Action,
    Notify,
}

impl StepKind {
    /// Human label shown under the node title.
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Sensor => "Signal intake",
            StepKind::Enrich => "Enrichment",
            StepKind::Decision => "Decision",
            StepKind::Action => "Response",
            StepKind::Notify => "Notify",
        }
    }

    /// Palette type assumed for a node that carries none.
    pub fn fallback_icon(self) -> PaletteIcon {
        match self {
            StepKind::Sensor => PaletteIcon::Trigger,
            StepKind::Enrich => PaletteIcon::Enrich,
            StepKind::Decision => PaletteIcon::Decision,
            StepKind::Action => PaletteIcon::Action,
            StepKind::Notify => PaletteIcon::Notify,
        }
    }
}

/// Cosmetic lifecycle badge. No transitions are enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepStatus {
    Ready,
    #[default]
    Draft,
    Paused,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Ready => "Ready",
            StepStatus::Draft => "Draft",
            StepStatus::Paused => "Paused",
        };
        f.write_str(s)
    }
}

/// Fine-grained palette type. Selects the configuration schema applied to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteIcon {
    If,
    Switch,
    AiAgent,
    AiTask,
    Loop,
    Break,
    Collect,
    Exit,
    Wait,
    Workflow,
    Dedup,
    Interact,
    Loading,
    Transform,
    Webhook,
    Notify,
    Enrich,
    Decision,
    Action,
    Trigger,
    TestTrigger,
    GetDetection,
    GetUser,
    LogicIf,
    LogicWait,
    TransformExtract,
    ActionTicket,
    ActionWebhook,
    ActionWatchlist,
    NotifySlack,
    MetaComment,
}

impl PaletteIcon {
    pub const ALL: [PaletteIcon; 31] = [
        PaletteIcon::If,
        PaletteIcon::Switch,
        PaletteIcon::AiAgent,
        PaletteIcon::AiTask,
        PaletteIcon::Loop,
        PaletteIcon::Break,
        PaletteIcon::Collect,
        PaletteIcon::Exit,
        PaletteIcon::Wait,
        PaletteIcon::Workflow,
        PaletteIcon::Dedup,
        PaletteIcon::Interact,
        PaletteIcon::Loading,
        PaletteIcon::Transform,
        PaletteIcon::Webhook,
        PaletteIcon::Notify,
        PaletteIcon::Enrich,
        PaletteIcon::Decision,
        PaletteIcon::Action,
        PaletteIcon::Trigger,
        PaletteIcon::TestTrigger,
        PaletteIcon::GetDetection,
        PaletteIcon::GetUser,
        PaletteIcon::LogicIf,
        PaletteIcon::LogicWait,
        PaletteIcon::TransformExtract,
        PaletteIcon::ActionTicket,
        PaletteIcon::ActionWebhook,
        PaletteIcon::ActionWatchlist,
        PaletteIcon::NotifySlack,
        PaletteIcon::MetaComment,
    ];

    /// The wire name (`"test-trigger"`, `"notify-slack"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteIcon::If => "if",
            PaletteIcon::Switch => "switch",
            PaletteIcon::AiAgent => "ai-agent",
            PaletteIcon::AiTask => "ai-task",
            PaletteIcon::Loop => "loop",
            PaletteIcon::Break => "break",
            PaletteIcon::Collect => "collect",
            PaletteIcon::Exit => "exit",
            PaletteIcon::Wait => "wait",
            PaletteIcon::Workflow => "workflow",
            PaletteIcon::Dedup => "dedup",
            PaletteIcon::Interact => "interact",
            PaletteIcon::Loading => "loading",
            PaletteIcon::Transform => "transform",
            PaletteIcon::Webhook => "webhook",
            PaletteIcon::Notify => "notify",
            PaletteIcon::Enrich => "enrich",
            PaletteIcon::Decision => "decision",
            PaletteIcon::Action => "action",
            PaletteIcon::Trigger => "trigger",
            PaletteIcon::TestTrigger => "test-trigger",
            PaletteIcon::GetDetection => "get-detection",
            PaletteIcon::GetUser => "get-user",
            PaletteIcon::LogicIf => "logic-if",
            PaletteIcon::LogicWait => "logic-wait",
            PaletteIcon::TransformExtract => "transform-extract",
            PaletteIcon::ActionTicket => "action-ticket",
            PaletteIcon::ActionWebhook => "action-webhook",
            PaletteIcon::ActionWatchlist => "action-watchlist",
            PaletteIcon::NotifySlack => "notify-slack",
            PaletteIcon::MetaComment => "meta-comment",
        }
    }
}

impl fmt::Display for PaletteIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known palette type.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown palette type '{0}'")]
pub struct UnknownPaletteIcon(pub String);

impl FromStr for PaletteIcon {
    type Err = UnknownPaletteIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteIcon::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| UnknownPaletteIcon(s.to_string()))
    }
}

/// JSON type tag of an inferred field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

/// A typed field a node makes available downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    pub path: String,
    #[serde(rename = "type")]
    pub field_type: JsonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl DataField {
    pub fn new(path: impl Into<String>, field_type: JsonType) -> Self {
        Self {
            path: path.into(),
            field_type,
            sample: None,
            selected: None,
        }
    }

    pub fn with_sample(mut self, sample: impl Into<String>) -> Self {
        self.sample = Some(sample.into());
        self
    }

    /// Only an explicit `selected: false` hides a field; absence means visible.
    pub fn is_selected(&self) -> bool {
        self.selected != Some(false)
    }
}

/// Fields a node produces for downstream steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub fields: Vec<DataField>,
}

/// Sample payload pasted into a trigger, plus the fields inferred from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDataConfig {
    pub raw_json: String,
    pub parsed_fields: Vec<DataField>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

impl ConditionOperator {
    pub const ALL: [ConditionOperator; 10] = [
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::Contains,
        ConditionOperator::NotContains,
        ConditionOperator::StartsWith,
        ConditionOperator::EndsWith,
        ConditionOperator::GreaterThan,
        ConditionOperator::LessThan,
        ConditionOperator::IsEmpty,
        ConditionOperator::IsNotEmpty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::NotContains => "not_contains",
            ConditionOperator::StartsWith => "starts_with",
            ConditionOperator::EndsWith => "ends_with",
            ConditionOperator::GreaterThan => "greater_than",
            ConditionOperator::LessThan => "less_than",
            ConditionOperator::IsEmpty => "is_empty",
            ConditionOperator::IsNotEmpty => "is_not_empty",
        }
    }

    /// Label shown in the operator dropdown.
    pub fn label(self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "does not equal",
            ConditionOperator::Contains => "contains",
            ConditionOperator::NotContains => "does not contain",
            ConditionOperator::StartsWith => "starts with",
            ConditionOperator::EndsWith => "ends with",
            ConditionOperator::GreaterThan => "is greater than",
            ConditionOperator::LessThan => "is less than",
            ConditionOperator::IsEmpty => "is empty",
            ConditionOperator::IsNotEmpty => "is not empty",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_path: String,
    pub operator: ConditionOperator,
    pub value: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionLogic {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// Conditions inside a group are AND'd; the groups of a decision are OR'd.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub logic: ConditionLogic,
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub source_field: String,
    pub target_field: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<TestDataConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionConfig {
    #[serde(default)]
    pub condition_groups: Vec<ConditionGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<MessageTemplate>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<MessageTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichConfig {
    #[serde(default)]
    pub source_mappings: Vec<FieldMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_type: Option<String>,
}

/// Per-kind configuration payload, tagged by `"type"` on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeConfig {
    Trigger(TriggerConfig),
    Decision(DecisionConfig),
    Notify(NotifyConfig),
    Action(ActionConfig),
    Enrich(EnrichConfig),
}

/// A step in the playbook.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Opaque identifier, stable for the node's lifetime.
    pub id: String,
    pub kind: StepKind,
    /// Palette type. Falls back to `kind` for icon and schema selection when absent.
    #[serde(default, rename = "iconName", skip_serializing_if = "Option::is_none")]
    pub icon: Option<PaletteIcon>,
    pub title: String,
    pub summary: String,
    pub owner: String,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub status: StepStatus,
    /// Canvas-space position of the top-left corner.
    pub position: Vec2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchema>,
}

impl FlowNode {
    /// Creates a node with a fresh random id and empty metadata.
    pub fn new(kind: StepKind, title: impl Into<String>, position: Vec2) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), kind, title, position)
    }

    pub fn with_id(
        id: impl Into<String>,
        kind: StepKind,
        title: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            icon: None,
            title: title.into(),
            summary: String::new(),
            owner: String::new(),
            signals: Vec::new(),
            status: StepStatus::Draft,
            position,
            config: None,
            output_schema: None,
        }
    }

    /// The palette type, or the kind's fallback when none is set.
    pub fn effective_icon(&self) -> PaletteIcon {
        self.icon.unwrap_or_else(|| self.kind.fallback_icon())
    }

    /// Fields this node exposes downstream (unfiltered).
    pub fn output_fields(&self) -> &[DataField] {
        self.output_schema
            .as_ref()
            .map(|schema| schema.fields.as_slice())
            .unwrap_or(&[])
    }
}

/// Directed arc between two nodes. Cycles and parallel edges are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn labeled(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

/// The node and edge collections of one flow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<Edge>,
}

impl FlowGraph {
    pub fn new(nodes: Vec<FlowNode>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Removes a node and every edge it participates in. Predecessors are not re-linked.
    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| !e.touches(id));
        Some(node)
    }
}
