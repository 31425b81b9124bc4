use flow_canvas::model::{DataField, TestDataConfig};
use threatflow_core::{CoreError, parse_and_extract_fields};

/// Sample-JSON editor: the raw buffer and the fields last parsed from it are
/// kept apart, so a failed parse never touches the field list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonEditor {
    raw: String,
    fields: Vec<DataField>,
    error: Option<String>,
    input_open: bool,
}

impl JsonEditor {
    pub fn new(test_data: Option<&TestDataConfig>) -> Self {
        let (raw, fields) = test_data
            .map(|t| (t.raw_json.clone(), t.parsed_fields.clone()))
            .unwrap_or_default();
        Self {
            raw,
            fields,
            error: None,
            input_open: false,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn fields(&self) -> &[DataField] {
        &self.fields
    }

    /// Inline message from the last failed parse.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_input_open(&self) -> bool {
        self.input_open
    }

    pub fn open_input(&mut self) {
        self.input_open = true;
    }

    pub fn cancel(&mut self) {
        self.input_open = false;
        self.error = None;
    }

    pub fn set_raw(&mut self, text: impl Into<String>) {
        self.raw = text.into();
    }

    pub fn parse(&mut self) -> Result<&[DataField], CoreError> {
        match parse_and_extract_fields(&self.raw) {
            Ok(fields) => {
                self.fields = fields;
                self.error = None;
                self.input_open = false;
                Ok(&self.fields)
            }
            Err(err) => {
                tracing::warn!("Test data rejected: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Returns false when `index` is out of range.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                field.selected = Some(selected);
                true
            }
            None => false,
        }
    }

    pub fn set_all_selected(&mut self, selected: bool) {
        for field in &mut self.fields {
            field.selected = Some(selected);
        }
    }

    pub fn fields_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.fields)
    }
}
