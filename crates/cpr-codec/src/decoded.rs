//! Tagged decode result

use crate::error::CodecError;
use serde_json::Value as Json;

/// Outcome of a permissive decode
///
/// `Unrecognized` carries the input exactly as it was given so a caller
/// higher up can try another decoder or report it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// Input matched the requested type
    Ok(T),
    /// Input did not match; returned unchanged
    Unrecognized(Json),
}

impl<T> Decoded<T> {
    /// True when the input matched
    #[inline]
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Decoded value, discarding unrecognized input
    #[inline]
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Untouched input, if unrecognized
    #[inline]
    #[must_use]
    pub fn raw(&self) -> Option<&Json> {
        match self {
            Self::Ok(_) => None,
            Self::Unrecognized(raw) => Some(raw),
        }
    }

    /// Map the decoded value
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Decoded<U> {
        match self {
            Self::Ok(value) => Decoded::Ok(f(value)),
            Self::Unrecognized(raw) => Decoded::Unrecognized(raw),
        }
    }

    /// Turn an unrecognized decode into an error
    ///
    /// # Errors
    /// Returns [`CodecError::Unrecognized`] naming `expected` and the
    /// input's `object_type` tag, if it has one
    pub fn into_result(self, expected: &str) -> Result<T, CodecError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Unrecognized(raw) => Err(CodecError::Unrecognized {
                expected: expected.to_string(),
                found: raw
                    .get("object_type")
                    .and_then(Json::as_str)
                    .map(str::to_string),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_accessors() {
        let decoded: Decoded<u32> = Decoded::Ok(7);

        assert!(decoded.is_recognized());
        assert!(decoded.raw().is_none());
        assert_eq!(decoded.ok(), Some(7));
    }

    #[test]
    fn unrecognized_keeps_input() {
        let decoded: Decoded<u32> = Decoded::Unrecognized(json!({"foo": "bar"}));

        assert!(!decoded.is_recognized());
        assert_eq!(decoded.raw(), Some(&json!({"foo": "bar"})));
    }

    #[test]
    fn map_preserves_unrecognized() {
        let decoded: Decoded<u32> = Decoded::Unrecognized(json!([1, 2]));
        assert_eq!(decoded.map(|n| n + 1), Decoded::Unrecognized(json!([1, 2])));
        assert_eq!(Decoded::Ok(1).map(|n: u32| n + 1), Decoded::Ok(2));
    }

    #[test]
    fn into_result_reports_found_tag() {
        let decoded: Decoded<u32> = Decoded::Unrecognized(json!({"object_type": "sample"}));
        let err = decoded.into_result("named_entity").unwrap_err();

        assert!(matches!(
            err,
            CodecError::Unrecognized { ref found, .. } if found.as_deref() == Some("sample")
        ));
    }
}
