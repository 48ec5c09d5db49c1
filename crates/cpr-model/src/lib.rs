//! cp-request Data Model
//!
//! Typed building blocks of a structured experimental request.
//!
//! # Core Concepts
//!
//! - [`Unit`], [`Value`], [`Attribute`], [`Version`]: immutable leaf values
//! - [`DesignNode`]: closed sum type for the experiment design tree
//! - [`BlockReference`], [`SubjectReference`], [`TreatmentReference`],
//!   [`TreatmentValueReference`]: named pointers resolved through a symbol table
//! - [`NamedEntity`], [`Treatment`], [`Sample`], [`Control`], [`Measurement`]:
//!   container entities
//! - [`ExperimentalRequest`]: the document root
//!
//! Every type carries serde derives that produce the `object_type`-tagged
//! JSON wire format. Permissive decoding lives in `cpr-codec`.
//!
//! # Example
//!
//! ```rust
//! use cpr_model::{Attribute, NamedEntity, Unit, Value};
//!
//! let concentration = Attribute::bound(
//!     "concentration",
//!     Value::new(0.25, Unit::new("http://purl.obolibrary.org/obo/UO_0000064")),
//! );
//! let entity = NamedEntity::new("one", "http://one.one").with_attribute(concentration);
//! assert!(entity.is_bound());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod attribute;
pub mod design;
pub mod entity;
pub mod error;
pub mod measurement;
pub mod request;
pub mod unit;
pub mod value;
pub mod version;

// Re-exports
pub use attribute::Attribute;
pub use design::{
    BlockReference, DesignBlock, DesignNode, GenerateBlock, ProductBlock, ReplicateBlock,
    SubjectReference, SumBlock, TreatmentReference, TreatmentValueReference,
};
pub use entity::{NamedEntity, Treatment};
pub use error::{ModelError, ModelResult};
pub use measurement::{Control, Measurement, Sample};
pub use request::ExperimentalRequest;
pub use unit::Unit;
pub use value::Value;
pub use version::Version;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building requests
    pub use crate::{
        Attribute, BlockReference, Control, DesignBlock, DesignNode, ExperimentalRequest,
        GenerateBlock, Measurement, NamedEntity, ProductBlock, ReplicateBlock, Sample,
        SubjectReference, SumBlock, Treatment, TreatmentReference, TreatmentValueReference, Unit,
        Value, Version,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
