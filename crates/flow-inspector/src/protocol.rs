//! Messages from the configuration surface to the editor that owns the graph.
//!
//! Every edit becomes one `nodeUpdate` carrying a field key and a string value.
//! Structured payloads (`testDataParsed`, `conditionGroups`, `conditions`) are
//! JSON text inside `value`.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceMessage {
    NodeUpdate { field: String, value: String },
}

impl SurfaceMessage {
    pub fn node_update(key: UpdateKey, value: impl Into<String>) -> Self {
        SurfaceMessage::NodeUpdate {
            field: key.as_str().to_string(),
            value: value.into(),
        }
    }
}

/// Field keys the editor knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKey {
    Title,
    Summary,
    Owner,
    ConnectionType,
    Channel,
    ActionType,
    LookupType,
    Template,
    TestDataRaw,
    TestDataParsed,
    Conditions,
    ConditionGroups,
    SourceField,
}

impl UpdateKey {
    pub const ALL: [UpdateKey; 13] = [
        UpdateKey::Title,
        UpdateKey::Summary,
        UpdateKey::Owner,
        UpdateKey::ConnectionType,
        UpdateKey::Channel,
        UpdateKey::ActionType,
        UpdateKey::LookupType,
        UpdateKey::Template,
        UpdateKey::TestDataRaw,
        UpdateKey::TestDataParsed,
        UpdateKey::Conditions,
        UpdateKey::ConditionGroups,
        UpdateKey::SourceField,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateKey::Title => "title",
            UpdateKey::Summary => "summary",
            UpdateKey::Owner => "owner",
            UpdateKey::ConnectionType => "connectionType",
            UpdateKey::Channel => "channel",
            UpdateKey::ActionType => "actionType",
            UpdateKey::LookupType => "lookupType",
            UpdateKey::Template => "template",
            UpdateKey::TestDataRaw => "testDataRaw",
            UpdateKey::TestDataParsed => "testDataParsed",
            UpdateKey::Conditions => "conditions",
            UpdateKey::ConditionGroups => "conditionGroups",
            UpdateKey::SourceField => "sourceField",
        }
    }

    /// `None` for keys the editor ignores.
    pub fn parse(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == field)
    }
}

pub type SurfaceReceiver = async_channel::Receiver<SurfaceMessage>;

/// Sending half owned by a surface. Cloning shares the same FIFO queue.
#[derive(Debug, Clone)]
pub struct SurfaceSender {
    tx: async_channel::Sender<SurfaceMessage>,
}

impl SurfaceSender {
    pub fn send_update(&self, key: UpdateKey, value: impl Into<String>) -> Result<(), SurfaceError> {
        let message = SurfaceMessage::node_update(key, value);
        self.tx.try_send(message).map_err(|err| {
            tracing::warn!(field = key.as_str(), "Surface update dropped: {}", err);
            SurfaceError::ChannelClosed
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Unbounded FIFO pair connecting one surface to its editor.
pub fn surface_channel() -> (SurfaceSender, SurfaceReceiver) {
    let (tx, rx) = async_channel::unbounded();
    (SurfaceSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let msg = SurfaceMessage::node_update(UpdateKey::ConditionGroups, "[]");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"nodeUpdate","field":"conditionGroups","value":"[]"}"#);
        let back: SurfaceMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_parse_known_and_unknown_keys() {
        for key in UpdateKey::ALL {
            assert_eq!(UpdateKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(UpdateKey::parse("testData"), None);
        assert_eq!(UpdateKey::parse("Title"), None);
    }

    #[test]
    fn test_closed_channel_reports_error() {
        let (tx, rx) = surface_channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(matches!(
            tx.send_update(UpdateKey::Title, "x"),
            Err(SurfaceError::ChannelClosed)
        ));
    }
}
