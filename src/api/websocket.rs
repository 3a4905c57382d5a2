// WebSocket transport for the gate
//
// The credential is read once from the handshake and every inbound message on
// the connection is judged against it. Denied messages get an error frame; the
// connection stays open.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::api::responses::RpcErrorEnvelope;
use crate::api::AppState;
use crate::auth::audit_logger::AuthEvent;
use crate::auth::auth_middleware::extract_ip_address;
use crate::core::models::{JsonRpcError, Transport};
use crate::gate::credential::ConnectionCredential;
use crate::gate::methods::MethodSet;
use crate::gate::route;
use crate::gate::validator::AuthDecision;

/// Per-connection context fixed at handshake time
pub struct Connection {
    pub id: Uuid,
    pub credential: ConnectionCredential,
    pub ip_address: Option<String>,
}

/// GET upgrade on `/`, `/rpc`, `/v<digits>/rpc`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    if !route::is_rpc_path(uri.path()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let connection = Connection {
        id: Uuid::new_v4(),
        credential: ConnectionCredential::capture(&headers, &uri),
        ip_address: extract_ip_address(&headers),
    };
    let max_message_size = app_state.config.body_size_limit_bytes;

    ws.max_message_size(max_message_size)
        .on_upgrade(move |socket| serve_connection(socket, app_state, connection))
}

async fn serve_connection(mut socket: WebSocket, app_state: AppState, connection: Connection) {
    app_state.metrics.ws_connection_opened();
    info!(
        connection_id = %connection.id,
        credential = connection.credential.is_present(),
        "WebSocket connection opened"
    );

    while let Some(message) = socket.recv().await {
        let payload = match message {
            Ok(Message::Text(text)) => Bytes::from(text),
            Ok(Message::Binary(data)) => Bytes::from(data),
            Ok(Message::Close(_)) => break,
            // ping/pong are answered by axum
            Ok(_) => continue,
            Err(e) => {
                debug!(connection_id = %connection.id, error = %e, "WebSocket receive failed");
                break;
            }
        };

        if let Some(reply) = handle_message(&app_state, &connection, payload).await {
            if let Err(e) = socket.send(reply).await {
                debug!(connection_id = %connection.id, error = %e, "WebSocket send failed");
                break;
            }
        }
    }

    app_state.metrics.ws_connection_closed();
    info!(connection_id = %connection.id, "WebSocket connection closed");
}

/// Gate one inbound message and produce the frame to send back, if any
pub async fn handle_message(app_state: &AppState, connection: &Connection, payload: Bytes) -> Option<Message> {
    let methods = MethodSet::from_slice(&payload);
    let provided = connection.credential.as_deref();
    let requires_auth = app_state.gate.requires_auth(&methods);
    let decision = app_state.gate.evaluate(&methods, provided);

    app_state.audit_logger.log_auth_event(
        Transport::WebSocket,
        AuthEvent::from_decision(requires_auth, &decision),
        &methods,
        provided,
        connection.ip_address.as_deref(),
    );

    match decision {
        AuthDecision::Denied(error) => error_frame(error),
        AuthDecision::Allowed => match app_state.dispatcher.dispatch(payload).await {
            Ok(Some(reply)) => Some(reply_frame(reply)),
            Ok(None) => None,
            Err(e) => {
                error!(connection_id = %connection.id, error = %e, "RPC dispatch failed");
                error_frame(e.rpc_error())
            }
        },
    }
}

fn error_frame(error: JsonRpcError) -> Option<Message> {
    match RpcErrorEnvelope::new(error).to_json() {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            error!(error = %e, "Failed to serialize error envelope");
            None
        }
    }
}

fn reply_frame(reply: Bytes) -> Message {
    match String::from_utf8(reply.to_vec()) {
        Ok(text) => Message::Text(text),
        Err(e) => Message::Binary(e.into_bytes()),
    }
}
