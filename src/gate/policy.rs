// Protection policy - does a request touch a protected method

use crate::gate::methods::MethodSet;
use std::collections::HashSet;

/// Set of method names that require the shared secret.
#[derive(Debug, Clone, Default)]
pub struct ProtectionPolicy {
    protected: HashSet<String>,
}

impl ProtectionPolicy {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protected: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// True iff any method of the request is protected.
    ///
    /// A batch is judged as a whole, so one protected call gates every call in it.
    pub fn requires_auth(&self, methods: &MethodSet) -> bool {
        methods.iter().any(|method| self.protected.contains(method))
    }

    pub fn is_protected(&self, method: &str) -> bool {
        self.protected.contains(method)
    }

    pub fn len(&self) -> usize {
        self.protected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protected.is_empty()
    }
}
