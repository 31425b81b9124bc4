pub mod condition_builder;
pub mod field_picker;
pub mod json_editor;
pub mod template_editor;

pub use condition_builder::ConditionBuilder;
pub use field_picker::FieldPicker;
pub use json_editor::JsonEditor;
pub use template_editor::TemplateEditor;
