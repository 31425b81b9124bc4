use flow_inspector::SurfaceError;
use thiserror::Error;

/// A `nodeUpdate` whose value could not be applied.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Malformed value for '{field}': {source}")]
    MalformedValue {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Invalid editor configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
