//! Error types for the codec
//!
//! Shape mismatches are not errors (see [`crate::Decoded`]); these cover
//! malformed JSON text, encoder failures and callers that explicitly turn
//! an unrecognized decode into a failure.

/// Codec errors
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Input is not valid JSON
    #[error("JSON syntax error: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Value could not be encoded
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Decoded input did not match the expected type
    #[error("unrecognized object: expected {expected}, found {}", .found.as_deref().unwrap_or("untagged object"))]
    Unrecognized {
        /// Expected type name or tag
        expected: String,
        /// `object_type` tag of the input, if any
        found: Option<String>,
    },
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
