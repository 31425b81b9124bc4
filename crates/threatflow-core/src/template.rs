//! # Template Engine
//!
//! `{{field.path}}` placeholders: extraction, preview rendering, insertion and validation.
//! Rendering never fails; unknown placeholders render as `[path]`.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use flow_canvas::model::DataField;
use serde::{Deserialize, Serialize};

use crate::lineage::UpstreamField;

static PLACEHOLDER: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is valid")
});

/// Anything a placeholder can resolve against.
pub trait TemplateField {
    /// The path a placeholder must spell to match this field.
    fn template_path(&self) -> &str;
    fn sample(&self) -> Option<&str>;
}

impl TemplateField for DataField {
    fn template_path(&self) -> &str {
        &self.path
    }

    fn sample(&self) -> Option<&str> {
        self.sample.as_deref()
    }
}

/// Upstream fields are addressed by their source-qualified path.
impl TemplateField for UpstreamField {
    fn template_path(&self) -> &str {
        &self.full_path
    }

    fn sample(&self) -> Option<&str> {
        self.field.sample.as_deref()
    }
}

/// Placeholder paths in first-seen order, trimmed and deduplicated.
pub fn extract_template_placeholders(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Replaces each placeholder with the matching field's sample.
///
/// A field without a sample, or a placeholder with no field, renders as `[path]`.
/// When several fields share a path the last one wins.
pub fn render_template_preview<F: TemplateField>(template: &str, fields: &[F]) -> String {
    let samples: HashMap<&str, String> = fields
        .iter()
        .map(|f| {
            let path = f.template_path();
            let shown = f
                .sample()
                .map(str::to_string)
                .unwrap_or_else(|| format!("[{path}]"));
            (path, shown)
        })
        .collect();

    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let path = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            samples
                .get(path)
                .cloned()
                .unwrap_or_else(|| format!("[{path}]"))
        })
        .into_owned()
}

/// Result of splicing a placeholder into text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insertion {
    pub text: String,
    pub new_cursor_pos: usize,
}

/// Inserts `{{field_path}}` at `cursor_pos`.
///
/// Positions count characters. A cursor past the end appends.
pub fn insert_field_at_cursor(text: &str, cursor_pos: usize, field_path: &str) -> Insertion {
    let placeholder = format!("{{{{{field_path}}}}}");
    let cursor = cursor_pos.min(text.chars().count());
    let split = text
        .char_indices()
        .nth(cursor)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len());

    let mut spliced = String::with_capacity(text.len() + placeholder.len());
    spliced.push_str(&text[..split]);
    spliced.push_str(&placeholder);
    spliced.push_str(&text[split..]);

    Insertion {
        text: spliced,
        new_cursor_pos: cursor + placeholder.chars().count(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValidation {
    pub valid: bool,
    pub missing_fields: Vec<String>,
}

/// Reports placeholders that match no field.
pub fn validate_template_placeholders<F: TemplateField>(template: &str, fields: &[F]) -> TemplateValidation {
    let available: HashSet<&str> = fields.iter().map(|f| f.template_path()).collect();
    let missing_fields: Vec<String> = extract_template_placeholders(template)
        .into_iter()
        .filter(|p| !available.contains(p.as_str()))
        .collect();

    TemplateValidation {
        valid: missing_fields.is_empty(),
        missing_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_canvas::model::JsonType;

    #[test]
    fn placeholders_are_trimmed_and_deduplicated() {
        let found = extract_template_placeholders("{{ a.b }} and {{c}} then {{a.b}}");
        assert_eq!(found, vec!["a.b", "c"]);
    }

    #[test]
    fn field_without_sample_renders_its_path() {
        let fields = vec![DataField::new("user.id", JsonType::Number)];
        assert_eq!(render_template_preview("id={{user.id}}", &fields), "id=[user.id]");
    }

    #[test]
    fn cursor_past_end_appends() {
        let out = insert_field_at_cursor("ab", 10, "x");
        assert_eq!(out.text, "ab{{x}}");
        assert_eq!(out.new_cursor_pos, 7);
    }

    #[test]
    fn cursor_counts_characters() {
        let out = insert_field_at_cursor("héllo", 2, "x");
        assert_eq!(out.text, "hé{{x}}llo");
        assert_eq!(out.new_cursor_pos, 7);
    }
}
