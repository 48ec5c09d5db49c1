//! Composite design blocks

use crate::design::node::DesignNode;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Named top-level design block
///
/// Block references resolve to design blocks by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "design_block")]
pub struct DesignBlock {
    label: String,
    definition: Box<DesignNode>,
}

impl DesignBlock {
    /// Create block
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, definition: DesignNode) -> Self {
        Self {
            label: label.into(),
            definition: Box::new(definition),
        }
    }

    /// Block label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Block definition
    #[inline]
    #[must_use]
    pub fn definition(&self) -> &DesignNode {
        &self.definition
    }
}

/// Union of sub-designs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "sum_block")]
pub struct SumBlock {
    block_list: Vec<DesignNode>,
}

impl SumBlock {
    /// Create sum over `block_list`
    #[inline]
    #[must_use]
    pub fn new(block_list: Vec<DesignNode>) -> Self {
        Self { block_list }
    }

    /// Summands, in order
    #[inline]
    #[must_use]
    pub fn block_list(&self) -> &[DesignNode] {
        &self.block_list
    }
}

/// Cross product of sub-designs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "product_block")]
pub struct ProductBlock {
    block_list: Vec<DesignNode>,
}

impl ProductBlock {
    /// Create product over `block_list`
    #[inline]
    #[must_use]
    pub fn new(block_list: Vec<DesignNode>) -> Self {
        Self { block_list }
    }

    /// Factors, in order
    #[inline]
    #[must_use]
    pub fn block_list(&self) -> &[DesignNode] {
        &self.block_list
    }
}

/// Sub-design repeated `count` times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "replicate_block")]
pub struct ReplicateBlock {
    count: u32,
    block: Box<DesignNode>,
}

impl ReplicateBlock {
    /// Create replicate block
    #[inline]
    #[must_use]
    pub fn new(count: u32, block: DesignNode) -> Self {
        Self {
            count,
            block: Box::new(block),
        }
    }

    /// Number of replicates
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Replicated sub-design
    #[inline]
    #[must_use]
    pub fn block(&self) -> &DesignNode {
        &self.block
    }
}

/// Parametric sweep: one variant of `treatment` per value of `attribute_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object_type", rename = "generate_block")]
pub struct GenerateBlock {
    treatment: Box<DesignNode>,
    attribute_name: String,
    values: Vec<Value>,
}

impl GenerateBlock {
    /// Create sweep
    #[inline]
    #[must_use]
    pub fn new(treatment: DesignNode, attribute_name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            treatment: Box::new(treatment),
            attribute_name: attribute_name.into(),
            values,
        }
    }

    /// Swept treatment (usually a treatment reference)
    #[inline]
    #[must_use]
    pub fn treatment(&self) -> &DesignNode {
        &self.treatment
    }

    /// Name of the swept attribute
    #[inline]
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Sweep values, in order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{SubjectReference, TreatmentReference};
    use crate::Unit;

    fn a() -> DesignNode {
        SubjectReference::new("a").into()
    }

    fn b() -> DesignNode {
        SubjectReference::new("b").into()
    }

    #[test]
    fn sum_block_equality_is_order_sensitive() {
        assert_eq!(SumBlock::new(vec![a(), b()]), SumBlock::new(vec![a(), b()]));
        assert_ne!(SumBlock::new(vec![a(), b()]), SumBlock::new(vec![b(), a()]));
    }

    #[test]
    fn design_block_compares_definition() {
        let one = DesignBlock::new("x", a());
        let two = DesignBlock::new("x", b());
        assert_ne!(one, two);
    }

    #[test]
    fn replicate_block_accessors() {
        let block = ReplicateBlock::new(3, a());
        assert_eq!(block.count(), 3);
        assert_eq!(block.block(), &a());
    }

    #[test]
    fn generate_block_wire_shape() {
        let unit = Unit::new("http://purl.obolibrary.org/obo/UO_0000064");
        let block = GenerateBlock::new(
            TreatmentReference::new("iptg").into(),
            "concentration",
            vec![Value::new(0.0, unit.clone()), Value::new(0.25, unit)],
        );
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["object_type"], "generate_block");
        assert_eq!(json["treatment"]["object_type"], "treatment_reference");
        assert_eq!(json["attribute_name"], "concentration");
        assert_eq!(json["values"].as_array().map(Vec::len), Some(2));
    }
}
