// Route matcher - which paths carry JSON-RPC traffic

/// Classification of an inbound request target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// JSON-RPC endpoint, subject to the gate
    Rpc,
    /// Anything else (health, metrics, unknown routes); never gated
    Exempt,
}

/// Returns true for `/`, `/rpc` and `/v<digits>/rpc`.
///
/// `path` must already have its query string removed.
pub fn is_rpc_path(path: &str) -> bool {
    match path {
        "/" | "/rpc" => true,
        _ => path
            .strip_prefix("/v")
            .and_then(|rest| rest.strip_suffix("/rpc"))
            .is_some_and(|version| {
                !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit())
            }),
    }
}

/// Remove `?query` and `#fragment` from a raw request target
pub fn strip_query(target: &str) -> &str {
    match target.find(['?', '#']) {
        Some(idx) => &target[..idx],
        None => target,
    }
}

/// Classify a raw request target (path plus optional query)
pub fn classify_target(target: &str) -> RouteClass {
    if is_rpc_path(strip_query(target)) {
        RouteClass::Rpc
    } else {
        RouteClass::Exempt
    }
}
