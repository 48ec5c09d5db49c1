//! cp-request JSON Codec
//!
//! Encode/decode pairs for every model type, keyed by the `object_type` tag.
//!
//! # Overview
//!
//! Decoding is permissive: input whose tag or fields do not match the
//! requested type is handed back untouched as [`Decoded::Unrecognized`]
//! instead of failing, so decoders compose without a schema declared up
//! front. Callers that need a hard failure use [`Decoded::into_result`].
//!
//! # Example
//!
//! ```rust
//! use cpr_codec::{decode_str, encode_to_string, Decoded};
//! use cpr_model::NamedEntity;
//!
//! let entity = NamedEntity::new("one", "http://one.one");
//! let text = encode_to_string(&entity, false).unwrap();
//!
//! let decoded = decode_str::<NamedEntity>(&text).unwrap();
//! assert_eq!(decoded, Decoded::Ok(entity));
//!
//! let other = decode_str::<NamedEntity>(r#"{"foo": "bar"}"#).unwrap();
//! assert!(!other.is_recognized());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod decoded;
pub mod error;
pub mod json;
pub mod object;

// Re-exports
pub use decoded::Decoded;
pub use error::{CodecError, CodecResult};
pub use json::{decode, decode_str, encode, encode_to_string};
pub use object::WireObject;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
