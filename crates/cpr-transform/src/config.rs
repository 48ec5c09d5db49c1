//! Transform configuration

use serde::{Deserialize, Serialize};

/// What to do with a reference whose name has no definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Fail with `UndefinedReference`
    #[default]
    Error,
    /// Leave the reference unresolved and carry on
    Keep,
}

/// Settings shared by every transformer in a pass
///
/// Deserializes from a `[transform]` style table; missing keys take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Maximum design-tree nesting, counted through resolved references
    pub max_depth: usize,

    /// Handling of undefined references
    pub unresolved: UnresolvedPolicy,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            unresolved: UnresolvedPolicy::Error,
        }
    }
}

impl TransformConfig {
    /// Create with defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set max depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder: set undefined-reference policy
    #[inline]
    #[must_use]
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }
}
