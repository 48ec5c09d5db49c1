//! Experiment design tree
//!
//! [`DesignNode`] is a closed sum type over composite blocks and named
//! references. Composite blocks own their children; references only hold
//! names (and, after a transform pass, a shared [`std::sync::Arc`] target).

mod block;
mod node;
mod reference;

pub use block::{DesignBlock, GenerateBlock, ProductBlock, ReplicateBlock, SumBlock};
pub use node::DesignNode;
pub use reference::{BlockReference, SubjectReference, TreatmentReference, TreatmentValueReference};
