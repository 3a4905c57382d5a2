// Gate constants - single source of truth for codes, names and defaults

/// JSON-RPC 2.0 protocol values
pub mod jsonrpc {
    pub const VERSION: &str = "2.0";
    /// Missing or mismatched API key for a protected method (custom code)
    pub const ERROR_UNAUTHORIZED: i32 = -32001;
    /// Internal error (standard JSON-RPC)
    pub const ERROR_INTERNAL: i32 = -32603;
    /// Message returned for every authorization failure
    pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid or missing API key";
}

/// Credential transmission
pub mod credentials {
    /// Header carrying the shared secret (HTTP requests and WebSocket handshakes)
    pub const API_KEY_HEADER: &str = "x-api-key";
    /// WebSocket handshake query parameter, consulted only when the header is absent
    pub const API_KEY_QUERY_PARAM: &str = "apiKey";
}

/// Non-RPC routes
pub mod routes {
    pub const HEALTH: &str = "/health";
    pub const METRICS: &str = "/metrics";
}

/// Configuration environment variables
pub mod config {
    pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const ENV_PORT: &str = "PORT";
    pub const ENV_API_KEY: &str = "API_KEY";
    pub const ENV_PROTECTED_METHODS: &str = "PROTECTED_METHODS";
    pub const ENV_UPSTREAM_URL: &str = "UPSTREAM_URL";
    pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
    pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    pub const ENV_BODY_SIZE_LIMIT_BYTES: &str = "BODY_SIZE_LIMIT_BYTES";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:4337";
    pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_BODY_SIZE_LIMIT_BYTES: usize = 2 * 1024 * 1024;
}
