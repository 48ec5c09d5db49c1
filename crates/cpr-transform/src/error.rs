//! Transform error types

use crate::symbol::SymbolKind;
use cpr_model::ModelError;

/// Errors raised while rewriting a request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// A reference led back to a definition still being rewritten
    #[error("cyclic {kind} reference '{name}': {}", .chain.join(" -> "))]
    CyclicReference {
        /// Kind of the looping definition
        kind: SymbolKind,
        /// Name that was reached again
        name: String,
        /// Names from the first occurrence back to `name`
        chain: Vec<String>,
    },

    /// No definition with this name
    #[error("undefined {kind} reference '{name}'")]
    UndefinedReference {
        /// Kind of the missing definition
        kind: SymbolKind,
        /// Name that was looked up
        name: String,
    },

    /// Design tree nested deeper than the configured limit
    #[error("design nesting exceeds limit of {limit}")]
    DepthExceeded {
        /// Configured `max_depth`
        limit: usize,
    },

    /// Model invariant broken by a rewrite
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Raised by a user transformer
    #[error("{0}")]
    Custom(String),
}

impl TransformError {
    /// Error with a free-form message
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
