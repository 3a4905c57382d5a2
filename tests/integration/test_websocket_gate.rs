// WebSocket gate against a live listener

use bundler_gate::api::create_router;
use bundler_gate::api::AppState;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::{test_state, RecordingDispatcher, API_KEY, CANNED_REPLY, UNAUTHORIZED_BODY};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const PROTECTED_CALL: &str = r#"{"jsonrpc":"2.0","id":1,"method":"eth_sendUserOperation","params":[{},"0x0"]}"#;
const OPEN_CALL: &str = r#"{"jsonrpc":"2.0","id":2,"method":"eth_chainId"}"#;

async fn spawn_gate(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn start() -> (SocketAddr, Arc<RecordingDispatcher>) {
    let (state, dispatcher) = test_state();
    (spawn_gate(state).await, dispatcher)
}

async fn exchange(client: &mut Client, payload: &str) -> String {
    client.send(Message::Text(payload.to_string())).await.unwrap();
    let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
        .await
        .expect("no reply within timeout")
        .expect("stream ended")
        .unwrap();
    match frame {
        Message::Text(text) => text,
        other => panic!("unexpected frame: {:?}", other),
    }
}

#[tokio::test]
async fn test_query_credential_covers_every_message() {
    let (addr, dispatcher) = start().await;
    let (mut client, _) = connect_async(format!("ws://{}/rpc?apiKey={}", addr, API_KEY))
        .await
        .unwrap();

    for _ in 0..3 {
        assert_eq!(exchange(&mut client, PROTECTED_CALL).await, CANNED_REPLY);
    }
    assert_eq!(dispatcher.call_count(), 3);
}

#[tokio::test]
async fn test_header_credential_accepted() {
    let (addr, dispatcher) = start().await;
    let mut request = format!("ws://{}/v1/rpc", addr).into_client_request().unwrap();
    request
        .headers_mut()
        .insert("x-api-key", HeaderValue::from_static(API_KEY));
    let (mut client, _) = connect_async(request).await.unwrap();

    assert_eq!(exchange(&mut client, PROTECTED_CALL).await, CANNED_REPLY);
    assert_eq!(dispatcher.call_count(), 1);
}

#[tokio::test]
async fn test_denied_message_keeps_connection_open() {
    let (addr, dispatcher) = start().await;
    let (mut client, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();

    assert_eq!(exchange(&mut client, PROTECTED_CALL).await, UNAUTHORIZED_BODY);
    assert_eq!(dispatcher.call_count(), 0);

    assert_eq!(exchange(&mut client, OPEN_CALL).await, CANNED_REPLY);
    assert_eq!(exchange(&mut client, PROTECTED_CALL).await, UNAUTHORIZED_BODY);
    assert_eq!(dispatcher.call_count(), 1);
}

#[tokio::test]
async fn test_wrong_query_credential_denied() {
    let (addr, dispatcher) = start().await;
    let (mut client, _) = connect_async(format!("ws://{}/rpc?apiKey=wrong", addr))
        .await
        .unwrap();

    assert_eq!(exchange(&mut client, PROTECTED_CALL).await, UNAUTHORIZED_BODY);
    assert_eq!(dispatcher.call_count(), 0);
}

#[tokio::test]
async fn test_mixed_batch_denied_over_websocket() {
    let (addr, dispatcher) = start().await;
    let (mut client, _) = connect_async(format!("ws://{}/rpc", addr)).await.unwrap();

    let batch = format!("[{},{}]", OPEN_CALL, PROTECTED_CALL);
    assert_eq!(exchange(&mut client, &batch).await, UNAUTHORIZED_BODY);
    assert_eq!(dispatcher.call_count(), 0);
}

#[tokio::test]
async fn test_allowed_payload_forwarded_unchanged() {
    let (addr, dispatcher) = start().await;
    let (mut client, _) = connect_async(format!("ws://{}/rpc?apiKey={}", addr, API_KEY))
        .await
        .unwrap();

    let payload = r#"{ "jsonrpc": "2.0", "id": 7, "method": "eth_sendUserOperation", "params": [] }"#;
    exchange(&mut client, payload).await;

    let received = dispatcher.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], payload.as_bytes());
}

#[tokio::test]
async fn test_upgrade_on_non_rpc_path_rejected() {
    let (addr, _dispatcher) = start().await;
    assert!(connect_async(format!("ws://{}/admin/rpc", addr)).await.is_err());
}
