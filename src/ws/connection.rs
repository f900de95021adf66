//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::api::dto::PoolStateResponse;
use crate::domain::DexEvent;
use crate::service::DexService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<DexEvent>,
    dex_service: Arc<DexService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &dex_service).await;
                        if let Some(json) = encode(&reply)
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
                    Ok(dex_event) => {
                        if !subs.matches(dex_event.event_type_str()) {
                            continue;
                        }
                        let payload = match serde_json::to_value(&dex_event) {
                            Ok(payload) => payload,
                            Err(err) => {
                                tracing::error!(error = %err, "failed to encode event");
                                continue;
                            }
                        };
                        let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
                        if let Some(json) = encode(&msg)
                            && ws_tx.send(Message::text(json)).await.is_err() {
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

/// Handles a text message from the client and builds the reply.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    dex_service: &DexService,
) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error("", 400, "malformed JSON");
    };

    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }

    let command = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(command) => command,
        Err(err) => return WsMessage::error(msg.id, 400, format!("invalid command: {err}")),
    };

    let payload = match command {
        WsCommand::Subscribe { events } => {
            let unknown = subs.subscribe(&events);
            serde_json::json!({
                "subscribed": subs.subscribed(),
                "wildcard": subs.is_subscribed_all(),
                "unknown": unknown,
            })
        }
        WsCommand::Unsubscribe { events } => {
            subs.unsubscribe(&events);
            serde_json::json!({
                "subscribed": subs.subscribed(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        WsCommand::GetPool => {
            let state = PoolStateResponse::from(dex_service.pool_state().await);
            match serde_json::to_value(&state) {
                Ok(value) => value,
                Err(err) => return WsMessage::error(msg.id, 500, err.to_string()),
            }
        }
    };

    WsMessage::new(msg.id, WsMessageType::Response, payload)
}

fn encode(msg: &WsMessage) -> Option<String> {
    match serde_json::to_string(msg) {
        Ok(json) => Some(json),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode ws message");
            None
        }
    }
}
