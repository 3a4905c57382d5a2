// Method extractor - request body to ordered method names

use crate::core::models::RequestBody;
use serde_json::Value;

/// Ordered method names of a single call or a batch.
///
/// Empty when the body is absent or not call-shaped; reporting malformed
/// input is left to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet(Vec<String>);

impl MethodSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_body(body: &RequestBody) -> Self {
        body.calls().iter().map(|call| call.method.clone()).collect()
    }

    pub fn from_value(value: Value) -> Self {
        Self::from_body(&RequestBody::from_value(value))
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::from_body(&RequestBody::from_slice(bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for MethodSet {
    fn from(methods: Vec<String>) -> Self {
        Self(methods)
    }
}

impl<S: Into<String>> FromIterator<S> for MethodSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
