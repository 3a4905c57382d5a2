// JSON-RPC data model as seen by the gate

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One JSON-RPC invocation. Only `method` is read by the gate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcCall {
    pub method: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Shape of an inbound request body.
///
/// Batch entries that are not call-shaped are dropped; the remaining calls keep
/// their relative order.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Single(JsonRpcCall),
    Batch(Vec<JsonRpcCall>),
    /// Absent, unparseable, or neither a call object nor an array
    Malformed,
}

impl RequestBody {
    /// Classify an already-parsed JSON value
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => RequestBody::Batch(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value::<JsonRpcCall>(item).ok())
                    .collect(),
            ),
            value @ Value::Object(_) => serde_json::from_value::<JsonRpcCall>(value)
                .map(RequestBody::Single)
                .unwrap_or(RequestBody::Malformed),
            _ => RequestBody::Malformed,
        }
    }

    /// Parse raw bytes; empty or invalid JSON is `Malformed`
    pub fn from_slice(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return RequestBody::Malformed;
        }
        serde_json::from_slice::<Value>(bytes)
            .map(Self::from_value)
            .unwrap_or(RequestBody::Malformed)
    }

    /// Calls in body order
    pub fn calls(&self) -> &[JsonRpcCall] {
        match self {
            RequestBody::Single(call) => std::slice::from_ref(call),
            RequestBody::Batch(calls) => calls,
            RequestBody::Malformed => &[],
        }
    }
}

/// Transport a request or message arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    WebSocket,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Http => "http",
            Transport::WebSocket => "websocket",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
