//! Named entities and treatments
//!
//! Both carry a list of [`Attribute`]s and are considered bound when every
//! attribute is bound.

use crate::attribute::Attribute;
use serde::{Deserialize, Serialize};

/// Experiment entity with a name, a definition reference and attributes
///
/// Subjects of an experiment (strains, media, reagents) are named entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "named_entity")]
pub struct NamedEntity {
    name: String,
    reference: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attribute>,
}

impl NamedEntity {
    /// Create entity without attributes
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            attributes: Vec::new(),
        }
    }

    /// Create entity with attributes
    #[inline]
    #[must_use]
    pub fn with_attributes(
        name: impl Into<String>,
        reference: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            attributes,
        }
    }

    /// Append an attribute
    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Entity name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Definition reference (usually a URL)
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Attached attributes
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// True when no attached attribute is unbound
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.attributes.iter().all(Attribute::is_bound)
    }
}

/// Treatment applied to samples, e.g. an inducer at some concentration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "treatment")]
pub struct Treatment {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attribute>,
}

impl Treatment {
    /// Create treatment
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Treatment name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached attributes
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// True when no attached attribute is unbound
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.attributes.iter().all(Attribute::is_bound)
    }
}
