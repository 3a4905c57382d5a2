// Route classification and body normalization

use bundler_gate::core::models::RequestBody;
use bundler_gate::gate::methods::MethodSet;
use bundler_gate::gate::route::{classify_target, is_rpc_path, RouteClass};

#[test]
fn test_versioned_routes() {
    assert!(is_rpc_path("/v10/rpc"));
    assert!(is_rpc_path("/v2/rpc"));
    assert_eq!(classify_target("/v1/rpc?x=y"), RouteClass::Rpc);
    assert_eq!(classify_target("/v3/rpc?apiKey=abc&foo=bar"), RouteClass::Rpc);
}

#[test]
fn test_operational_routes_never_gated() {
    for target in ["/health", "/metrics", "/health?x=/rpc", "/metrics?format=text", "/status"] {
        assert_eq!(classify_target(target), RouteClass::Exempt, "{}", target);
    }
}

#[test]
fn test_matching_raw_target_would_be_wrong() {
    // the raw target is not an RPC path until the query is removed
    assert!(!is_rpc_path("/v1/rpc?x=y"));
    assert_eq!(classify_target("/v1/rpc?x=y"), RouteClass::Rpc);
}

#[test]
fn test_body_shapes_normalize_to_methods() {
    let single = br#"{"jsonrpc":"2.0","id":1,"method":"eth_chainId","params":[]}"#;
    let batch = br#"[{"jsonrpc":"2.0","id":1,"method":"eth_chainId"},{"jsonrpc":"2.0","id":2,"method":"eth_sendUserOperation"}]"#;

    assert!(matches!(RequestBody::from_slice(single), RequestBody::Single(_)));
    assert!(matches!(RequestBody::from_slice(batch), RequestBody::Batch(ref calls) if calls.len() == 2));

    let names: Vec<String> = MethodSet::from_slice(batch).iter().map(str::to_string).collect();
    assert_eq!(names, vec!["eth_chainId", "eth_sendUserOperation"]);
}

#[test]
fn test_malformed_bodies_are_lenient() {
    let bodies: [&[u8]; 6] = [b"", b"null", b"42", b"\"eth_chainId\"", b"{\"method\":", b"{\"id\":1}"];
    for body in bodies {
        assert_eq!(RequestBody::from_slice(body), RequestBody::Malformed);
        assert!(MethodSet::from_slice(body).is_empty());
    }
}
