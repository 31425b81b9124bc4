//! # Field Inference
//!
//! Turns a sample JSON payload into the flat list of typed fields a trigger
//! exposes downstream.
//!
//! Arrays are represented by their first element only. Objects produce one
//! field per key, followed (pre-order) by the fields of any nested value.

use flow_canvas::model::{DataField, JsonType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};

/// Longest sample kept verbatim, in characters.
pub const SAMPLE_MAX_CHARS: usize = 50;

pub fn json_type(value: &Value) -> JsonType {
    match value {
        Value::Null => JsonType::Null,
        Value::Bool(_) => JsonType::Boolean,
        Value::Number(_) => JsonType::Number,
        Value::String(_) => JsonType::String,
        Value::Array(_) => JsonType::Array,
        Value::Object(_) => JsonType::Object,
    }
}

/// Display form of a value: strings truncated, containers summarized.
pub fn sample_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => {
            if s.chars().count() > SAMPLE_MAX_CHARS {
                let head: String = s.chars().take(SAMPLE_MAX_CHARS).collect();
                format!("{head}...")
            } else {
                s.clone()
            }
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(_) => "{...}".to_string(),
    }
}

// Whole floats print without a fractional part (`1.0` -> `1`).
fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Extracts the fields of `value`, prefixing every path with `prefix`.
///
/// Scalars and `null` at the root produce nothing.
pub fn extract_fields(value: &Value, prefix: &str) -> Vec<DataField> {
    let mut fields = Vec::new();
    collect_fields(value, prefix, &mut fields);
    fields
}

fn collect_fields(value: &Value, prefix: &str, out: &mut Vec<DataField>) {
    match value {
        Value::Array(items) => {
            let Some(first) = items.first() else {
                return;
            };
            let path = if prefix.is_empty() {
                "[0]".to_string()
            } else {
                format!("{prefix}[0]")
            };
            match first {
                Value::Object(_) | Value::Array(_) => collect_fields(first, &path, out),
                scalar => out.push(inferred(path, scalar)),
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                out.push(inferred(path.clone(), child));
                if matches!(child, Value::Object(_) | Value::Array(_)) {
                    collect_fields(child, &path, out);
                }
            }
        }
        _ => {}
    }
}

fn inferred(path: String, value: &Value) -> DataField {
    DataField {
        path,
        field_type: json_type(value),
        sample: Some(sample_string(value)),
        selected: Some(true),
    }
}

/// Parses `text` and infers its fields.
pub fn parse_and_extract_fields(text: &str) -> Result<Vec<DataField>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CoreError::InvalidJson(e.to_string()))?;
    Ok(extract_fields(&value, ""))
}

/// Nested view of dotted field paths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldTreeNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub field_type: JsonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    pub children: Vec<FieldTreeNode>,
}

/// Groups flat dotted paths into a tree. Intermediate segments are typed `object`
/// until a field with that exact path is seen.
pub fn build_field_tree(fields: &[DataField]) -> Vec<FieldTreeNode> {
    let mut roots: Vec<FieldTreeNode> = Vec::new();

    for field in fields {
        let parts: Vec<&str> = field.path.split('.').collect();
        let mut level = &mut roots;

        for (i, part) in parts.iter().enumerate() {
            let is_last = i == parts.len() - 1;
            let index = match level.iter().position(|n| n.name == *part) {
                Some(index) => index,
                None => {
                    level.push(FieldTreeNode {
                        name: part.to_string(),
                        path: parts[..=i].join("."),
                        field_type: JsonType::Object,
                        sample: None,
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };

            let node = &mut level[index];
            if is_last {
                node.field_type = field.field_type;
                node.sample = field.sample.clone();
            }
            level = &mut node.children;
        }
    }

    roots
}
