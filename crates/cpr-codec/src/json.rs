//! JSON encode/decode entry points

use crate::decoded::Decoded;
use crate::error::{CodecError, CodecResult};
use crate::object::WireObject;
use serde_json::Value as Json;

/// Encode to a JSON value
///
/// # Errors
/// Returns [`CodecError::Encode`] if serialization fails, for example on a
/// NaN or infinite [`cpr_model::Value`] anywhere in `object`
pub fn encode<T: WireObject>(object: &T) -> CodecResult<Json> {
    serde_json::to_value(object).map_err(CodecError::Encode)
}

/// Encode to JSON text
///
/// # Errors
/// Returns [`CodecError::Encode`] if serialization fails, as for [`encode`]
pub fn encode_to_string<T: WireObject>(object: &T, pretty: bool) -> CodecResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(object)
    } else {
        serde_json::to_string(object)
    };
    text.map_err(CodecError::Encode)
}

/// Decode a JSON value permissively
///
/// Returns [`Decoded::Unrecognized`] with `raw` unchanged when the
/// `object_type` tag differs from `T`'s, or when required fields are
/// missing or malformed. Never fails.
#[must_use]
pub fn decode<T: WireObject>(raw: Json) -> Decoded<T> {
    if let Some(expected) = T::OBJECT_TYPE {
        let found = raw.get("object_type").and_then(Json::as_str);
        if found != Some(expected) {
            tracing::trace!(expected, ?found, "object_type mismatch, passing through");
            return Decoded::Unrecognized(raw);
        }
    }

    match serde_json::from_value::<T>(raw.clone()) {
        Ok(object) => Decoded::Ok(object),
        Err(e) => {
            tracing::debug!(type_name = T::TYPE_NAME, error = %e, "shape mismatch, passing through");
            Decoded::Unrecognized(raw)
        }
    }
}

/// Parse JSON text, then decode permissively
///
/// # Errors
/// Returns [`CodecError::Syntax`] if `text` is not valid JSON. A valid
/// document of the wrong shape is `Ok(Decoded::Unrecognized(_))`.
pub fn decode_str<T: WireObject>(text: &str) -> CodecResult<Decoded<T>> {
    let raw: Json = serde_json::from_str(text).map_err(CodecError::Syntax)?;
    Ok(decode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpr_model::{Attribute, NamedEntity, Sample, SubjectReference, Treatment, Unit, Value, Version};
    use serde_json::json;

    #[test]
    fn encode_named_entity() {
        let json = encode(&NamedEntity::new("one", "http://one.one")).unwrap();
        assert_eq!(json["object_type"], "named_entity");
    }

    #[test]
    fn decode_rejects_wrong_tag() {
        let raw = json!({"object_type": "sample", "name": "one", "reference": "http://one.one"});
        let decoded = decode::<NamedEntity>(raw.clone());
        assert_eq!(decoded, Decoded::Unrecognized(raw));
    }

    #[test]
    fn decode_rejects_missing_required_field() {
        let raw = json!({"object_type": "named_entity", "name": "one"});
        assert_eq!(decode::<NamedEntity>(raw.clone()), Decoded::Unrecognized(raw));
    }

    #[test]
    fn decode_version_without_tag() {
        let decoded = decode::<Version>(json!({"major": 1, "minor": 2, "patch": 3}));
        assert_eq!(decoded, Decoded::Ok(Version::new(1, 2, 3)));
    }

    #[test]
    fn decode_non_object_passes_through() {
        assert_eq!(decode::<Version>(json!(42)), Decoded::Unrecognized(json!(42)));
        assert_eq!(decode::<Sample>(json!("sample")), Decoded::Unrecognized(json!("sample")));
    }

    #[test]
    fn nested_failure_makes_parent_unrecognized() {
        let raw = json!({
            "object_type": "sample",
            "subject": {"object_type": "subject_reference"}
        });
        assert!(!decode::<Sample>(raw).is_recognized());
    }

    #[test]
    fn decode_str_syntax_error() {
        assert!(matches!(
            decode_str::<NamedEntity>("{not json"),
            Err(CodecError::Syntax(_))
        ));
    }

    #[test]
    fn encode_rejects_non_finite_values() {
        let unit = Unit::new("http://purl.obolibrary.org/obo/UO_0000064");
        let nan = Value::new(f64::NAN, unit.clone());
        let treatment = Treatment::new(
            "iptg",
            vec![Attribute::bound("concentration", Value::new(f64::INFINITY, unit))],
        );

        assert!(matches!(encode(&nan), Err(CodecError::Encode(_))));
        assert!(matches!(encode_to_string(&nan, false), Err(CodecError::Encode(_))));
        assert!(matches!(encode(&treatment), Err(CodecError::Encode(_))));
    }

    #[test]
    fn encode_to_string_pretty_is_multiline() {
        let sample = Sample::new(SubjectReference::new("strain"), Vec::new());
        let pretty = encode_to_string(&sample, true).unwrap();
        let compact = encode_to_string(&sample, false).unwrap();

        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
    }
}
