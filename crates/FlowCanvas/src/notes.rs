//! # Annotations
//!
//! Free-text notes pinned to the canvas. They share the drag pattern of step cards
//! but are not part of the node/edge model.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{CanvasConfig, NoteBounds};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Sticky,
    Info,
}

impl NoteKind {
    pub fn bounds(self, config: &CanvasConfig) -> NoteBounds {
        match self {
            NoteKind::Sticky => config.sticky_note,
            NoteKind::Info => config.info_note,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub kind: NoteKind,
    pub title: String,
    pub body: String,
    pub position: Vec2,
    pub size: Vec2,
}

impl Annotation {
    pub fn info(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NoteKind::Info,
            title: title.into(),
            body: body.into(),
            position,
            size: Vec2::new(260.0, 140.0),
        }
    }

    pub fn sticky(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NoteKind::Sticky,
            title: title.into(),
            body: body.into(),
            position,
            size: Vec2::new(280.0, 120.0),
        }
    }
}
