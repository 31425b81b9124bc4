//! # Flow Inspector
//!
//! Headless logic for the per-node configuration form.
//! - **Schemas (`src/schema.rs`)**: which sections and fields a palette type is edited with.
//! - **Editors (`src/editors`)**: state for the four structured widgets.
//! - **Protocol (`src/protocol.rs`)**: the `nodeUpdate` messages sent to the editor.
//!
//! A [`ConfigSurface`] never touches the graph. It keeps its own copy of the
//! values it shows and reports every edit as a `(field, value)` update.

pub mod editors;
pub mod error;
pub mod protocol;
pub mod schema;

use std::collections::HashMap;

use flow_canvas::model::{ConditionGroup, ConditionOperator, DataField, FlowNode, NodeConfig};
use serde::Serialize;
use threatflow_core::{FieldGroup, UpstreamField};

use editors::{ConditionBuilder, FieldPicker, JsonEditor, TemplateEditor};
pub use error::{Result, SurfaceError};
pub use protocol::{SurfaceMessage, SurfaceReceiver, SurfaceSender, UpdateKey, surface_channel};
pub use schema::{
    CONDITION_OPERATORS, ConfigField, ConfigSection, ConfigType, FieldType, NodeConfigSchema, SelectOption,
    get_config_schema,
};

/// Empty choice shown first in plain selects.
pub const SELECT_PLACEHOLDER: &str = "Select...";
/// Shown in the template dropdown when nothing upstream exposes fields.
pub const NO_UPSTREAM_FIELDS: &str = "No upstream fields available";

/// Current value of a plain field as stored on the node.
pub fn initial_value(node: &FlowNode, key: &str) -> String {
    let config = node.config.as_ref();
    let value = match (key, config) {
        ("title", _) => Some(node.title.clone()),
        ("summary", _) => Some(node.summary.clone()),
        ("owner", _) => Some(node.owner.clone()),
        ("connectionType", Some(NodeConfig::Trigger(c))) => c.connection_type.clone(),
        ("testData", Some(NodeConfig::Trigger(c))) => c.test_data.as_ref().map(|t| t.raw_json.clone()),
        ("actionType", Some(NodeConfig::Action(c))) => c.action_type.clone(),
        ("lookupType", Some(NodeConfig::Enrich(c))) => c.lookup_type.clone(),
        ("sourceField", Some(NodeConfig::Enrich(c))) => c.source_mappings.first().map(|m| m.source_field.clone()),
        ("channel", Some(NodeConfig::Notify(c))) => c.template.as_ref().and_then(|t| t.channel.clone()),
        ("channel", Some(NodeConfig::Action(c))) => c.template.as_ref().and_then(|t| t.channel.clone()),
        ("template", Some(NodeConfig::Notify(c))) => c.template.as_ref().map(|t| t.template.clone()),
        ("template", Some(NodeConfig::Action(c))) => c.template.as_ref().map(|t| t.template.clone()),
        _ => None,
    };
    value.unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedForm {
    pub node_id: String,
    pub config_type: ConfigType,
    pub sections: Vec<RenderedSection>,
}

impl RenderedForm {
    pub fn field(&self, key: &str) -> Option<&RenderedField> {
        self.sections.iter().flat_map(|s| s.fields.iter()).find(|f| f.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub title: &'static str,
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedField {
    pub key: &'static str,
    pub label: &'static str,
    pub help_text: Option<&'static str>,
    pub widget: Widget,
}

/// One variant per [`FieldType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Text {
        value: String,
        placeholder: Option<&'static str>,
    },
    Textarea {
        value: String,
        placeholder: Option<&'static str>,
    },
    Select {
        value: String,
        empty_label: &'static str,
        options: &'static [SelectOption],
    },
    JsonEditor {
        raw: String,
        placeholder: Option<&'static str>,
        input_open: bool,
        error: Option<String>,
        fields: Vec<DataField>,
    },
    TemplateEditor {
        text: String,
        placeholder: Option<&'static str>,
        preview: Option<String>,
        field_groups: Vec<FieldGroup>,
        empty_message: Option<&'static str>,
    },
    ConditionBuilder {
        groups: Vec<ConditionGroup>,
        field_options: Vec<String>,
        operators: &'static [SelectOption],
    },
    FieldPicker {
        value: String,
        empty_label: &'static str,
        options: Vec<String>,
    },
}

impl Widget {
    pub fn field_type(&self) -> FieldType {
        match self {
            Widget::Text { .. } => FieldType::Text,
            Widget::Textarea { .. } => FieldType::Textarea,
            Widget::Select { .. } => FieldType::Select,
            Widget::JsonEditor { .. } => FieldType::JsonEditor,
            Widget::TemplateEditor { .. } => FieldType::TemplateEditor,
            Widget::ConditionBuilder { .. } => FieldType::ConditionBuilder,
            Widget::FieldPicker { .. } => FieldType::FieldPicker,
        }
    }
}

/// The configuration form for one node.
#[derive(Debug)]
pub struct ConfigSurface {
    node_id: String,
    schema: &'static NodeConfigSchema,
    upstream: Vec<UpstreamField>,
    /// Text, textarea and select values by key.
    values: HashMap<&'static str, String>,
    json: Option<JsonEditor>,
    template: Option<TemplateEditor>,
    conditions: Option<ConditionBuilder>,
    picker: Option<FieldPicker>,
    sender: SurfaceSender,
}

impl ConfigSurface {
    pub fn new(node: &FlowNode, upstream: Vec<UpstreamField>, sender: SurfaceSender) -> Self {
        let schema = get_config_schema(Some(node.effective_icon()));
        let mut surface = Self {
            node_id: node.id.clone(),
            schema,
            upstream,
            values: HashMap::new(),
            json: None,
            template: None,
            conditions: None,
            picker: None,
            sender,
        };

        for field in schema.fields() {
            match field.field_type {
                FieldType::Text | FieldType::Textarea | FieldType::Select => {
                    surface.values.insert(field.key, initial_value(node, field.key));
                }
                FieldType::JsonEditor => {
                    let test_data = match &node.config {
                        Some(NodeConfig::Trigger(c)) => c.test_data.as_ref(),
                        _ => None,
                    };
                    surface.json = Some(JsonEditor::new(test_data));
                }
                FieldType::TemplateEditor => {
                    surface.template = Some(TemplateEditor::new(initial_value(node, field.key)));
                }
                FieldType::ConditionBuilder => {
                    let groups = match &node.config {
                        Some(NodeConfig::Decision(c)) => c.condition_groups.as_slice(),
                        _ => &[],
                    };
                    surface.conditions = Some(ConditionBuilder::new(groups));
                }
                FieldType::FieldPicker => {
                    surface.picker = Some(FieldPicker::new(&surface.upstream, initial_value(node, field.key)));
                }
            }
        }

        tracing::debug!(node_id = %surface.node_id, config_type = ?schema.config_type, "Surface opened");
        surface
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn schema(&self) -> &'static NodeConfigSchema {
        self.schema
    }

    pub fn upstream_fields(&self) -> &[UpstreamField] {
        &self.upstream
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn json_editor(&self) -> Option<&JsonEditor> {
        self.json.as_ref()
    }

    pub fn template_editor(&self) -> Option<&TemplateEditor> {
        self.template.as_ref()
    }

    pub fn condition_builder(&self) -> Option<&ConditionBuilder> {
        self.conditions.as_ref()
    }

    pub fn field_picker(&self) -> Option<&FieldPicker> {
        self.picker.as_ref()
    }

    fn emit(&self, key: UpdateKey, value: impl Into<String>) -> Result<()> {
        self.sender.send_update(key, value)
    }

    /// Edits a text, textarea, select or field-picker field.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let field = self
            .schema
            .field(key)
            .ok_or_else(|| SurfaceError::UnknownField(key.to_string()))?;
        let update_key = UpdateKey::parse(field.key).ok_or_else(|| SurfaceError::NotAPlainField {
            key: key.to_string(),
        })?;

        match field.field_type {
            FieldType::Text | FieldType::Textarea => {}
            FieldType::Select => {
                if !value.is_empty() && !field.options.iter().any(|o| o.value == value) {
                    return Err(SurfaceError::UnknownOption {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            }
            FieldType::FieldPicker => {
                let picker = self.picker.as_mut().ok_or(SurfaceError::MissingEditor("field picker"))?;
                if !picker.pick(value) {
                    return Err(SurfaceError::UnknownOption {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                return self.emit(update_key, value);
            }
            FieldType::JsonEditor | FieldType::TemplateEditor | FieldType::ConditionBuilder => {
                return Err(SurfaceError::NotAPlainField { key: key.to_string() });
            }
        }

        self.values.insert(field.key, value.to_string());
        self.emit(update_key, value)
    }

    fn json_mut(&mut self) -> Result<&mut JsonEditor> {
        self.json.as_mut().ok_or(SurfaceError::MissingEditor("test data editor"))
    }

    pub fn open_test_data_input(&mut self) -> Result<()> {
        self.json_mut()?.open_input();
        Ok(())
    }

    pub fn cancel_test_data_input(&mut self) -> Result<()> {
        self.json_mut()?.cancel();
        Ok(())
    }

    /// Updates the raw buffer only; nothing is sent until the fields are parsed.
    pub fn edit_test_data(&mut self, text: &str) -> Result<()> {
        self.json_mut()?.set_raw(text);
        Ok(())
    }

    /// Sends the raw text, then the parsed field list when the text is valid JSON.
    pub fn parse_test_data(&mut self) -> Result<usize> {
        let raw = self.json_mut()?.raw().to_string();
        self.emit(UpdateKey::TestDataRaw, raw)?;

        let editor = self.json_mut()?;
        let count = editor.parse()?.len();
        let fields = editor.fields_json()?;
        self.emit(UpdateKey::TestDataParsed, fields)?;
        Ok(count)
    }

    pub fn toggle_output_field(&mut self, index: usize, selected: bool) -> Result<()> {
        if !self.json_mut()?.set_selected(index, selected) {
            return Err(SurfaceError::NoSuchField(index));
        }
        self.send_output_fields()
    }

    pub fn select_all_output_fields(&mut self, selected: bool) -> Result<()> {
        self.json_mut()?.set_all_selected(selected);
        self.send_output_fields()
    }

    fn send_output_fields(&mut self) -> Result<()> {
        let fields = self.json_mut()?.fields_json()?;
        self.emit(UpdateKey::TestDataParsed, fields)
    }

    fn template_mut(&mut self) -> Result<&mut TemplateEditor> {
        self.template.as_mut().ok_or(SurfaceError::MissingEditor("template editor"))
    }

    pub fn edit_template(&mut self, text: &str) -> Result<()> {
        self.template_mut()?.set_text(text);
        self.emit(UpdateKey::Template, text)
    }

    pub fn set_template_cursor(&mut self, pos: usize) -> Result<()> {
        self.template_mut()?.set_cursor(pos);
        Ok(())
    }

    pub fn insert_template_field(&mut self, full_path: &str) -> Result<()> {
        let editor = self.template_mut()?;
        editor.insert_field(full_path);
        let text = editor.text().to_string();
        self.emit(UpdateKey::Template, text)
    }

    pub fn template_preview(&self) -> Option<String> {
        self.template.as_ref()?.preview(&self.upstream)
    }

    fn conditions_mut(&mut self) -> Result<&mut ConditionBuilder> {
        self.conditions.as_mut().ok_or(SurfaceError::MissingEditor("condition builder"))
    }

    fn send_condition_groups(&mut self) -> Result<()> {
        let json = self.conditions_mut()?.to_json()?;
        self.emit(UpdateKey::ConditionGroups, json)
    }

    pub fn add_condition_group(&mut self) -> Result<()> {
        self.conditions_mut()?.add_group();
        self.send_condition_groups()
    }

    /// `Ok(false)` when the group cannot be removed.
    pub fn remove_condition_group(&mut self, group: usize) -> Result<bool> {
        if !self.conditions_mut()?.remove_group(group) {
            return Ok(false);
        }
        self.send_condition_groups()?;
        Ok(true)
    }

    pub fn add_condition(&mut self, group: usize) -> Result<()> {
        if !self.conditions_mut()?.add_condition(group) {
            return Err(SurfaceError::NoSuchCondition { group, index: 0 });
        }
        self.send_condition_groups()
    }

    /// `Ok(false)` for the last condition of a group.
    pub fn remove_condition(&mut self, group: usize, index: usize) -> Result<bool> {
        let builder = self.conditions_mut()?;
        if builder.condition(group, index).is_none() {
            return Err(SurfaceError::NoSuchCondition { group, index });
        }
        if !builder.remove_condition(group, index) {
            return Ok(false);
        }
        self.send_condition_groups()?;
        Ok(true)
    }

    pub fn pick_condition_field(&mut self, group: usize, index: usize, full_path: &str) -> Result<()> {
        if !self.conditions_mut()?.set_field(group, index, full_path) {
            return Err(SurfaceError::NoSuchCondition { group, index });
        }
        self.send_condition_groups()
    }

    pub fn set_condition_operator(&mut self, group: usize, index: usize, operator: ConditionOperator) -> Result<()> {
        if !self.conditions_mut()?.set_operator(group, index, operator) {
            return Err(SurfaceError::NoSuchCondition { group, index });
        }
        self.send_condition_groups()
    }

    pub fn set_condition_value(&mut self, group: usize, index: usize, value: &str) -> Result<()> {
        if !self.conditions_mut()?.set_value(group, index, value) {
            return Err(SurfaceError::NoSuchCondition { group, index });
        }
        self.send_condition_groups()
    }

    /// Snapshot of the whole form as it should be drawn.
    pub fn render(&self) -> RenderedForm {
        let sections = self
            .schema
            .sections
            .iter()
            .map(|section| RenderedSection {
                title: section.title,
                fields: section
                    .fields
                    .iter()
                    .map(|field| RenderedField {
                        key: field.key,
                        label: field.label,
                        help_text: field.help_text,
                        widget: self.render_widget(field),
                    })
                    .collect(),
            })
            .collect();

        RenderedForm {
            node_id: self.node_id.clone(),
            config_type: self.schema.config_type,
            sections,
        }
    }

    fn render_widget(&self, field: &'static ConfigField) -> Widget {
        let value = || self.values.get(field.key).cloned().unwrap_or_default();
        match field.field_type {
            FieldType::Text => Widget::Text {
                value: value(),
                placeholder: field.placeholder,
            },
            FieldType::Textarea => Widget::Textarea {
                value: value(),
                placeholder: field.placeholder,
            },
            FieldType::Select => Widget::Select {
                value: value(),
                empty_label: SELECT_PLACEHOLDER,
                options: field.options,
            },
            FieldType::JsonEditor => {
                let editor = self.json.clone().unwrap_or_default();
                Widget::JsonEditor {
                    raw: editor.raw().to_string(),
                    placeholder: field.placeholder,
                    input_open: editor.is_input_open(),
                    error: editor.error().map(str::to_string),
                    fields: editor.fields().to_vec(),
                }
            }
            FieldType::TemplateEditor => {
                let field_groups = TemplateEditor::field_groups(&self.upstream);
                let empty_message = field_groups.is_empty().then_some(NO_UPSTREAM_FIELDS);
                Widget::TemplateEditor {
                    text: self.template.as_ref().map(|t| t.text().to_string()).unwrap_or_default(),
                    placeholder: field.placeholder,
                    preview: self.template_preview(),
                    field_groups,
                    empty_message,
                }
            }
            FieldType::ConditionBuilder => Widget::ConditionBuilder {
                groups: self
                    .conditions
                    .as_ref()
                    .map(|b| b.groups().to_vec())
                    .unwrap_or_default(),
                field_options: self.upstream.iter().map(|f| f.full_path.clone()).collect(),
                operators: &CONDITION_OPERATORS,
            },
            FieldType::FieldPicker => {
                let picker = self.picker.clone().unwrap_or_default();
                Widget::FieldPicker {
                    value: picker.value().to_string(),
                    empty_label: editors::field_picker::EMPTY_CHOICE,
                    options: picker.options().to_vec(),
                }
            }
        }
    }
}
