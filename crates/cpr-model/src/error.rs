//! Error types for the data model

use crate::unit::Unit;

/// Errors raised while building or editing model values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Value unit differs from the unit an attribute was declared with
    #[error("unit mismatch for attribute '{attribute}': expected {expected}, got {actual}")]
    UnitMismatch {
        /// Attribute name
        attribute: String,
        /// Declared unit
        expected: Unit,
        /// Unit carried by the offered value
        actual: Unit,
    },

    /// Attribute already carries a value
    #[error("attribute '{0}' is already bound")]
    AlreadyBound(String),

    /// Version string is not `major.minor.patch`
    #[error("invalid version '{0}': expected major.minor.patch")]
    InvalidVersion(String),
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
