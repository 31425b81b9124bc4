use threatflow_core::{FieldGroup, UpstreamField, group_fields_by_node, insert_field_at_cursor, render_template_preview};

/// Message/configuration template with a cursor and a live preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateEditor {
    text: String,
    cursor: usize,
}

impl TemplateEditor {
    /// Cursor starts at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.text.chars().count());
    }

    /// Replaces the text; the cursor moves to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    /// Writes `{{full_path}}` at the cursor and moves the cursor past it.
    pub fn insert_field(&mut self, full_path: &str) {
        let inserted = insert_field_at_cursor(&self.text, self.cursor, full_path);
        self.text = inserted.text;
        self.cursor = inserted.new_cursor_pos;
    }

    /// `None` while the template is empty.
    pub fn preview(&self, upstream: &[UpstreamField]) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        Some(render_template_preview(&self.text, upstream))
    }

    /// Dropdown contents: upstream fields grouped by the node producing them.
    pub fn field_groups(upstream: &[UpstreamField]) -> Vec<FieldGroup> {
        group_fields_by_node(upstream)
    }
}
