//! Units of measure
//!
//! A [`Unit`] is identified by an ontology reference, usually a Unit
//! Ontology IRI.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Unit of measure identified by its ontology reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "unit")]
pub struct Unit {
    reference: String,
}

impl Unit {
    /// Create unit from its reference IRI
    #[inline]
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// Ontology reference
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}
