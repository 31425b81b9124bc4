use threatflow_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Field '{0}' is not part of this form")]
    UnknownField(String),

    #[error("Field '{key}' is edited with its own editor, not as a plain value")]
    NotAPlainField { key: String },

    #[error("'{value}' is not an option of '{key}'")]
    UnknownOption { key: String, value: String },

    #[error("This form has no {0}")]
    MissingEditor(&'static str),

    #[error("No parsed field at index {0}")]
    NoSuchField(usize),

    #[error("No condition {index} in group {group}")]
    NoSuchCondition { group: usize, index: usize },

    #[error("Failed to encode update: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Surface channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, SurfaceError>;
