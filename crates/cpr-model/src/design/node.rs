//! The design-tree sum type

use crate::design::block::{DesignBlock, GenerateBlock, ProductBlock, ReplicateBlock, SumBlock};
use crate::design::reference::{
    BlockReference, SubjectReference, TreatmentReference, TreatmentValueReference,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A node of the experiment design tree
///
/// Serializes as the inner variant, which carries its own `object_type`
/// tag. Deserialization dispatches on that tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DesignNode {
    /// Named block
    Block(DesignBlock),
    /// Alias to a named block
    BlockReference(BlockReference),
    /// Union of sub-designs
    Sum(SumBlock),
    /// Cross product of sub-designs
    Product(ProductBlock),
    /// Repeated sub-design
    Replicate(ReplicateBlock),
    /// Parametric sweep
    Generate(GenerateBlock),
    /// Pointer to a subject
    SubjectReference(SubjectReference),
    /// Pointer to a treatment
    TreatmentReference(TreatmentReference),
    /// Pointer to a treatment at a fixed value
    TreatmentValueReference(TreatmentValueReference),
}

impl DesignNode {
    /// Wire tag of every design-node kind
    pub const KINDS: [&'static str; 9] = [
        "design_block",
        "block_reference",
        "sum_block",
        "product_block",
        "replicate_block",
        "generate_block",
        "subject_reference",
        "treatment_reference",
        "treatment_value_reference",
    ];

    /// Wire tag of this node
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Block(_) => "design_block",
            Self::BlockReference(_) => "block_reference",
            Self::Sum(_) => "sum_block",
            Self::Product(_) => "product_block",
            Self::Replicate(_) => "replicate_block",
            Self::Generate(_) => "generate_block",
            Self::SubjectReference(_) => "subject_reference",
            Self::TreatmentReference(_) => "treatment_reference",
            Self::TreatmentValueReference(_) => "treatment_value_reference",
        }
    }

    /// True for the four reference kinds
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::BlockReference(_)
                | Self::SubjectReference(_)
                | Self::TreatmentReference(_)
                | Self::TreatmentValueReference(_)
        )
    }

    /// Direct children, in order
    ///
    /// References have no children: their targets are shared, not owned.
    #[must_use]
    pub fn children(&self) -> Vec<&DesignNode> {
        match self {
            Self::Block(block) => vec![block.definition()],
            Self::Sum(block) => block.block_list().iter().collect(),
            Self::Product(block) => block.block_list().iter().collect(),
            Self::Replicate(block) => vec![block.block()],
            Self::Generate(block) => vec![block.treatment()],
            Self::BlockReference(_)
            | Self::SubjectReference(_)
            | Self::TreatmentReference(_)
            | Self::TreatmentValueReference(_) => Vec::new(),
        }
    }

    /// Decode from a JSON value by dispatching on `object_type`
    ///
    /// # Errors
    /// Returns error if the tag is missing or unknown, or the fields do not
    /// match the tagged kind
    pub fn from_json(raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let tag = raw
            .get("object_type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| serde_json::Error::custom("design node without object_type"))?
            .to_string();

        let node = match tag.as_str() {
            "design_block" => Self::Block(serde_json::from_value(raw)?),
            "block_reference" => Self::BlockReference(serde_json::from_value(raw)?),
            "sum_block" => Self::Sum(serde_json::from_value(raw)?),
            "product_block" => Self::Product(serde_json::from_value(raw)?),
            "replicate_block" => Self::Replicate(serde_json::from_value(raw)?),
            "generate_block" => Self::Generate(serde_json::from_value(raw)?),
            "subject_reference" => Self::SubjectReference(serde_json::from_value(raw)?),
            "treatment_reference" => Self::TreatmentReference(serde_json::from_value(raw)?),
            "treatment_value_reference" => {
                Self::TreatmentValueReference(serde_json::from_value(raw)?)
            }
            other => {
                return Err(serde_json::Error::custom(format!(
                    "unknown design node kind: '{other}'"
                )))
            }
        };
        Ok(node)
    }
}

impl<'de> Deserialize<'de> for DesignNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(raw).map_err(D::Error::custom)
    }
}

impl From<DesignBlock> for DesignNode {
    fn from(block: DesignBlock) -> Self {
        Self::Block(block)
    }
}

impl From<BlockReference> for DesignNode {
    fn from(reference: BlockReference) -> Self {
        Self::BlockReference(reference)
    }
}

impl From<SumBlock> for DesignNode {
    fn from(block: SumBlock) -> Self {
        Self::Sum(block)
    }
}

impl From<ProductBlock> for DesignNode {
    fn from(block: ProductBlock) -> Self {
        Self::Product(block)
    }
}

impl From<ReplicateBlock> for DesignNode {
    fn from(block: ReplicateBlock) -> Self {
        Self::Replicate(block)
    }
}

impl From<GenerateBlock> for DesignNode {
    fn from(block: GenerateBlock) -> Self {
        Self::Generate(block)
    }
}

impl From<SubjectReference> for DesignNode {
    fn from(reference: SubjectReference) -> Self {
        Self::SubjectReference(reference)
    }
}

impl From<TreatmentReference> for DesignNode {
    fn from(reference: TreatmentReference) -> Self {
        Self::TreatmentReference(reference)
    }
}

impl From<TreatmentValueReference> for DesignNode {
    fn from(reference: TreatmentValueReference) -> Self {
        Self::TreatmentValueReference(reference)
    }
}
