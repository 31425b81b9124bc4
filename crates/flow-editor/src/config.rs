use flow_canvas::CanvasConfig;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::FlowMeta;
use crate::error::Result;

/// Editor settings. Every key is optional in YAML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial size of the canvas container, in screen pixels.
    pub container_size: Vec2,
    /// Metadata used when the mounted flow is not in the catalog.
    pub defaults: FlowMeta,
    pub canvas: CanvasConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            container_size: Vec2::new(1200.0, 700.0),
            defaults: FlowMeta::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl EditorConfig {
    #[tracing::instrument(skip(yaml))]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EditorConfig = serde_yaml::from_str(yaml)?;
        tracing::debug!(width = config.container_size.x, height = config.container_size.y, "Editor config loaded");
        Ok(config)
    }
}
