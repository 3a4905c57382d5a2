// Credential extractor - where the caller's key comes from

use crate::core::constants::credentials::{API_KEY_HEADER, API_KEY_QUERY_PARAM};
use axum::http::{HeaderMap, Uri};
use std::fmt;

/// Key from the `x-api-key` header (header names are case-insensitive)
pub fn from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Percent-decoded `apiKey` parameter of a raw query string
pub fn from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == API_KEY_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// WebSocket handshake: header first, query parameter only when the header is absent
pub fn from_handshake(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    from_headers(headers).or_else(|| from_query(uri.query()))
}

/// Key captured once when a WebSocket connection is established.
///
/// Every later message on the connection is judged against this value; nothing
/// carried inside a message can change it.
pub struct ConnectionCredential(Option<String>);

impl ConnectionCredential {
    pub fn capture(headers: &HeaderMap, uri: &Uri) -> Self {
        Self(from_handshake(headers, uri))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for ConnectionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.0.is_some() { "<REDACTED>" } else { "<NONE>" };
        f.debug_tuple("ConnectionCredential").field(&shown).finish()
    }
}
