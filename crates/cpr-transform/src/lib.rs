//! cp-request Transforms
//!
//! Rewriting and read-only traversal over experimental requests.
//!
//! # Overview
//!
//! - [`RequestTransformer`]: one overridable hook per model type, with
//!   reference resolution through a per-pass [`SymbolTable`]
//! - [`RequestVisitor`]: read-only walk with early-out per container
//! - [`Transform`] / [`Apply`]: method-style dispatch on model values
//!
//! Built-in passes: [`ReferenceResolver`], [`BlockInliner`],
//! [`SweepExpander`]. Built-in visitors: [`ReferenceCollector`],
//! [`RequestValidator`], [`DesignPrinter`].
//!
//! # Example
//!
//! ```rust
//! use cpr_model::prelude::*;
//! use cpr_transform::{resolve_request, TransformConfig};
//!
//! let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0))
//!     .with_subjects(vec![NamedEntity::new("strain", "http://strain")])
//!     .with_designs(vec![
//!         DesignBlock::new("a", SubjectReference::new("strain").into()),
//!         DesignBlock::new("b", BlockReference::new("a").into()),
//!     ]);
//!
//! let resolved = resolve_request(&request, TransformConfig::default()).unwrap();
//! let DesignNode::BlockReference(reference) = resolved.design("b").unwrap().definition() else {
//!     unreachable!()
//! };
//! assert!(reference.is_resolved());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod collect;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod expand;
pub mod fold;
pub mod inline;
pub mod print;
pub mod resolve;
pub mod symbol;
pub mod transformer;
pub mod validate;
pub mod visitor;

// Re-exports
pub use collect::ReferenceCollector;
pub use config::{TransformConfig, UnresolvedPolicy};
pub use context::TransformContext;
pub use dispatch::{Apply, Transform};
pub use error::{TransformError, TransformResult};
pub use expand::SweepExpander;
pub use inline::BlockInliner;
pub use print::DesignPrinter;
pub use resolve::{resolve_request, ReferenceResolver};
pub use symbol::{Resolvable, Symbol, SymbolKind, SymbolTable};
pub use transformer::RequestTransformer;
pub use validate::{validate_request, RequestValidator, ValidationIssue};
pub use visitor::RequestVisitor;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for writing passes
    pub use crate::{
        fold, Apply, RequestTransformer, RequestVisitor, Transform, TransformConfig, TransformContext,
        TransformError, TransformResult,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
