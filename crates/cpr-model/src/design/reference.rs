//! Named references into the request's shared definitions
//!
//! A reference holds a name. Once a transform pass resolves it, it also
//! holds an [`Arc`] to the rewritten target; every reference resolved in the
//! same pass under the same name shares that one target.
//!
//! Equality and the wire format only consider the name (and the fixed value
//! of a [`TreatmentValueReference`]); the resolved target is transient.

use crate::design::block::DesignBlock;
use crate::entity::{NamedEntity, Treatment};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Alias to a [`DesignBlock`] defined elsewhere in the request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "block_reference")]
pub struct BlockReference {
    block_label: String,
    #[serde(skip)]
    block: Option<Arc<DesignBlock>>,
}

impl BlockReference {
    /// Unresolved reference to the block labelled `label`
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            block_label: label.into(),
            block: None,
        }
    }

    /// Reference already attached to its block
    #[inline]
    #[must_use]
    pub fn resolved(block: Arc<DesignBlock>) -> Self {
        Self {
            block_label: block.label().to_string(),
            block: Some(block),
        }
    }

    /// Same label, attached to `block`
    #[inline]
    #[must_use]
    pub fn with_block(&self, block: Arc<DesignBlock>) -> Self {
        Self {
            block_label: self.block_label.clone(),
            block: Some(block),
        }
    }

    /// Label of the referenced block
    #[inline]
    #[must_use]
    pub fn block_label(&self) -> &str {
        &self.block_label
    }

    /// Referenced block, once resolved
    #[inline]
    #[must_use]
    pub fn block(&self) -> Option<&Arc<DesignBlock>> {
        self.block.as_ref()
    }

    /// True once a target is attached
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.block.is_some()
    }
}

impl PartialEq for BlockReference {
    fn eq(&self, other: &Self) -> bool {
        self.block_label == other.block_label
    }
}

impl Display for BlockReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.block_label)
    }
}

/// Pointer to a subject [`NamedEntity`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "subject_reference")]
pub struct SubjectReference {
    subject_name: String,
    #[serde(skip)]
    entity: Option<Arc<NamedEntity>>,
}

impl SubjectReference {
    /// Unresolved reference to the subject `name`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            subject_name: name.into(),
            entity: None,
        }
    }

    /// Reference already attached to its entity
    #[inline]
    #[must_use]
    pub fn resolved(entity: Arc<NamedEntity>) -> Self {
        Self {
            subject_name: entity.name().to_string(),
            entity: Some(entity),
        }
    }

    /// Same name, attached to `entity`
    #[inline]
    #[must_use]
    pub fn with_entity(&self, entity: Arc<NamedEntity>) -> Self {
        Self {
            subject_name: self.subject_name.clone(),
            entity: Some(entity),
        }
    }

    /// Name of the referenced subject
    #[inline]
    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Referenced entity, once resolved
    #[inline]
    #[must_use]
    pub fn entity(&self) -> Option<&Arc<NamedEntity>> {
        self.entity.as_ref()
    }

    /// True once a target is attached
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.entity.is_some()
    }
}

impl PartialEq for SubjectReference {
    fn eq(&self, other: &Self) -> bool {
        self.subject_name == other.subject_name
    }
}

/// Pointer to a [`Treatment`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "treatment_reference")]
pub struct TreatmentReference {
    treatment_name: String,
    #[serde(skip)]
    treatment: Option<Arc<Treatment>>,
}

impl TreatmentReference {
    /// Unresolved reference to the treatment `name`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            treatment_name: name.into(),
            treatment: None,
        }
    }

    /// Reference already attached to its treatment
    #[inline]
    #[must_use]
    pub fn resolved(treatment: Arc<Treatment>) -> Self {
        Self {
            treatment_name: treatment.name().to_string(),
            treatment: Some(treatment),
        }
    }

    /// Same name, attached to `treatment`
    #[inline]
    #[must_use]
    pub fn with_treatment(&self, treatment: Arc<Treatment>) -> Self {
        Self {
            treatment_name: self.treatment_name.clone(),
            treatment: Some(treatment),
        }
    }

    /// Name of the referenced treatment
    #[inline]
    #[must_use]
    pub fn treatment_name(&self) -> &str {
        &self.treatment_name
    }

    /// Referenced treatment, once resolved
    #[inline]
    #[must_use]
    pub fn treatment(&self) -> Option<&Arc<Treatment>> {
        self.treatment.as_ref()
    }

    /// True once a target is attached
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.treatment.is_some()
    }
}

impl PartialEq for TreatmentReference {
    fn eq(&self, other: &Self) -> bool {
        self.treatment_name == other.treatment_name
    }
}

/// Pointer to a [`Treatment`] fixed at one [`Value`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "treatment_value_reference")]
pub struct TreatmentValueReference {
    treatment_name: String,
    value: Value,
    #[serde(skip)]
    treatment: Option<Arc<Treatment>>,
}

impl TreatmentValueReference {
    /// Unresolved reference to treatment `name` at `value`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            treatment_name: name.into(),
            value,
            treatment: None,
        }
    }

    /// Reference already attached to its treatment
    #[inline]
    #[must_use]
    pub fn resolved(treatment: Arc<Treatment>, value: Value) -> Self {
        Self {
            treatment_name: treatment.name().to_string(),
            value,
            treatment: Some(treatment),
        }
    }

    /// Same name, attached to `treatment`, fixed at `value`
    #[inline]
    #[must_use]
    pub fn with_treatment(&self, treatment: Arc<Treatment>, value: Value) -> Self {
        Self {
            treatment_name: self.treatment_name.clone(),
            value,
            treatment: Some(treatment),
        }
    }

    /// Name of the referenced treatment
    #[inline]
    #[must_use]
    pub fn treatment_name(&self) -> &str {
        &self.treatment_name
    }

    /// Fixed treatment value
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Referenced treatment, once resolved
    #[inline]
    #[must_use]
    pub fn treatment(&self) -> Option<&Arc<Treatment>> {
        self.treatment.as_ref()
    }

    /// True once a target is attached
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.treatment.is_some()
    }
}

impl PartialEq for TreatmentValueReference {
    fn eq(&self, other: &Self) -> bool {
        self.treatment_name == other.treatment_name && self.value == other.value
    }
}
