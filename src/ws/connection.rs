//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single live-feed connection,
//! applying subscription commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::VenueEvent;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads subscription commands from the client.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<VenueEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs);
                        if let Some(json) = reply
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(venue_event) => {
                        if !subs.matches(venue_event.field_id()) {
                            continue;
                        }
                        let Some(json) = event_envelope(&venue_event) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn event_envelope(event: &VenueEvent) -> Option<String> {
    let payload = serde_json::to_value(event).ok()?;
    let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
    serde_json::to_string(&msg).ok()
}

/// Applies one client command, returning the JSON reply.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let reply = match serde_json::from_str::<WsCommand>(text) {
        Ok(WsCommand::Subscribe {
            field_ids,
            request_id,
        }) => {
            let added = subs.subscribe(&field_ids);
            WsMessage::new(
                request_id.unwrap_or_default(),
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": added,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        Ok(WsCommand::Unsubscribe {
            field_ids,
            request_id,
        }) => {
            let removed = subs.unsubscribe(&field_ids);
            WsMessage::new(
                request_id.unwrap_or_default(),
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": removed,
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        Err(err) => {
            tracing::debug!(error = %err, "rejected ws command");
            WsMessage::error(String::new(), 400, "malformed or unknown command")
        }
    };
    serde_json::to_string(&reply).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn reply(text: &str, subs: &mut SubscriptionManager) -> serde_json::Value {
        let Some(json) = handle_text_message(text, subs) else {
            panic!("expected reply");
        };
        let Ok(value) = serde_json::from_str(&json) else {
            panic!("reply is json");
        };
        value
    }

    #[test]
    fn subscribe_then_unsubscribe() {
        let mut subs = SubscriptionManager::new();
        let value = reply(
            r#"{"command":"subscribe","field_ids":["lapangan-a","*"],"request_id":"r1"}"#,
            &mut subs,
        );
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some("r1"));
        assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("response"));
        assert!(subs.is_subscribed_all());

        let value = reply(
            r#"{"command":"unsubscribe","field_ids":["lapangan-a"]}"#,
            &mut subs,
        );
        let remaining = value
            .get("payload")
            .and_then(|p| p.get("remaining_count"))
            .and_then(serde_json::Value::as_u64);
        assert_eq!(remaining, Some(0));
    }

    #[test]
    fn garbage_yields_error_envelope() {
        let mut subs = SubscriptionManager::new();
        let value = reply("not json", &mut subs);
        assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("error"));
    }

    #[test]
    fn event_envelope_wraps_payload() {
        let event = VenueEvent::FieldToggled {
            field_id: crate::domain::FieldId::new("lapangan-a"),
            is_active: false,
            timestamp: chrono::Utc::now(),
        };
        let Some(json) = event_envelope(&event) else {
            panic!("envelope");
        };
        assert!(json.contains(r#""type":"event""#));
        assert!(json.contains(r#""event_type":"field_toggled""#));
    }
}
