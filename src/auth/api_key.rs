// Shared-secret handling: redaction, fingerprinting and comparison

use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// SHA-256 fingerprint of a key (64-character hex string), safe to log
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiKeyHash(String);

impl ApiKeyHash {
    pub fn from_api_key(api_key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(api_key.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The configured shared secret.
///
/// Wrapped in `secrecy::Secret` so it never shows up in logs or `Debug` output.
pub struct ApiKey(Secret<String>);

impl ApiKey {
    pub fn new(api_key: &str) -> Self {
        Self(Secret::new(api_key.to_string()))
    }

    pub fn hash(&self) -> ApiKeyHash {
        ApiKeyHash::from_api_key(self.expose_secret())
    }

    /// Expose the secret API key (use with caution)
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Exact byte equality, evaluated in constant time for equal-length inputs
    pub fn matches(&self, candidate: &str) -> bool {
        self.expose_secret()
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &"<REDACTED>")
            .finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<REDACTED>")
    }
}
