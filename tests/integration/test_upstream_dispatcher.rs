// Upstream dispatcher against a mock bundler

use bundler_gate::api::RpcDispatcher;
use bundler_gate::core::errors::GateError;
use bundler_gate::proxy::UpstreamDispatcher;
use bytes::Bytes;
use mockito::Matcher;

use crate::common::CANNED_REPLY;

const PAYLOAD: &str = r#"{"jsonrpc":"2.0","id":1,"method":"eth_chainId"}"#;

#[tokio::test]
async fn test_relays_payload_and_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(PAYLOAD.to_string()))
        .with_status(200)
        .with_body(CANNED_REPLY)
        .create_async()
        .await;

    let dispatcher = UpstreamDispatcher::new(&server.url(), 5).unwrap();
    let reply = dispatcher.dispatch(Bytes::from_static(PAYLOAD.as_bytes())).await.unwrap();

    assert_eq!(reply, Some(Bytes::from_static(CANNED_REPLY.as_bytes())));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_body_is_relayed() {
    let mut server = mockito::Server::new_async().await;
    let error_body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#;
    server
        .mock("POST", "/")
        .with_status(400)
        .with_body(error_body)
        .create_async()
        .await;

    let dispatcher = UpstreamDispatcher::new(&server.url(), 5).unwrap();
    let reply = dispatcher.dispatch(Bytes::from_static(PAYLOAD.as_bytes())).await.unwrap();

    assert_eq!(reply, Some(Bytes::from_static(error_body.as_bytes())));
}

#[tokio::test]
async fn test_empty_success_is_no_reply() {
    let mut server = mockito::Server::new_async().await;
    server.mock("POST", "/").with_status(200).create_async().await;

    let dispatcher = UpstreamDispatcher::new(&server.url(), 5).unwrap();
    let reply = dispatcher.dispatch(Bytes::from_static(PAYLOAD.as_bytes())).await.unwrap();

    assert_eq!(reply, None);
}

#[tokio::test]
async fn test_empty_failure_is_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    server.mock("POST", "/").with_status(503).create_async().await;

    let dispatcher = UpstreamDispatcher::new(&server.url(), 5).unwrap();
    let result = dispatcher.dispatch(Bytes::from_static(PAYLOAD.as_bytes())).await;

    assert!(matches!(result, Err(GateError::UpstreamError(_))));
}

#[tokio::test]
async fn test_unreachable_upstream_is_upstream_error() {
    // port 9 (discard) is not expected to be listening locally
    let dispatcher = UpstreamDispatcher::new("http://127.0.0.1:9", 2).unwrap();
    let result = dispatcher.dispatch(Bytes::from_static(PAYLOAD.as_bytes())).await;

    assert!(matches!(result, Err(GateError::UpstreamError(_))));
}
