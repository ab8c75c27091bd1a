//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level server → client envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Echoed `request_id` for responses; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds an envelope stamped now.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error envelope.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands a client can send, e.g.
/// `{"command":"subscribe","field_ids":["*"]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Follow events for specific fields. Use `["*"]` for everything.
    Subscribe {
        /// Field slugs, or `"*"`.
        field_ids: Vec<String>,
        /// Optional correlation id echoed in the response.
        #[serde(default)]
        request_id: Option<String>,
    },
    /// Stop following specific fields.
    Unsubscribe {
        /// Field slugs, or `"*"` to drop the wildcard.
        field_ids: Vec<String>,
        /// Optional correlation id echoed in the response.
        #[serde(default)]
        request_id: Option<String>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_command() {
        let Ok(WsCommand::Subscribe {
            field_ids,
            request_id,
        }) = serde_json::from_str::<WsCommand>(r#"{"command":"subscribe","field_ids":["*"]}"#)
        else {
            panic!("expected subscribe");
        };
        assert_eq!(field_ids, vec!["*".to_string()]);
        assert!(request_id.is_none());
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(serde_json::from_str::<WsCommand>(r#"{"command":"reset","field_ids":[]}"#).is_err());
    }

    #[test]
    fn envelope_uses_type_key() {
        let msg = WsMessage::error("abc", 400, "malformed command");
        let Ok(json) = serde_json::to_value(&msg) else {
            panic!("serializable");
        };
        assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("error"));
    }
}
