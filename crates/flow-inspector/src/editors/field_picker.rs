use threatflow_core::UpstreamField;

/// Empty choice shown first in every upstream-field dropdown.
pub const EMPTY_CHOICE: &str = "Select field...";

/// Single-select over upstream full paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPicker {
    options: Vec<String>,
    value: String,
}

impl FieldPicker {
    pub fn new(upstream: &[UpstreamField], value: impl Into<String>) -> Self {
        Self {
            options: upstream.iter().map(|f| f.full_path.clone()).collect(),
            value: value.into(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Accepts an offered path or `""` to clear.
    pub fn pick(&mut self, full_path: &str) -> bool {
        if !full_path.is_empty() && !self.options.iter().any(|o| o == full_path) {
            return false;
        }
        self.value = full_path.to_string();
        true
    }
}
