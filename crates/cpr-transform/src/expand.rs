//! Sweep expansion pass

use crate::config::TransformConfig;
use crate::context::TransformContext;
use crate::error::{TransformError, TransformResult};
use crate::fold;
use crate::transformer::RequestTransformer;
use cpr_model::{Attribute, DesignNode, GenerateBlock, SumBlock, TreatmentValueReference};

/// Rewrites each generate block over a treatment reference into a sum of
/// treatment value references, one per swept value
///
/// Values are checked against the unit of the treatment's attribute.
/// Generate blocks over anything other than a treatment reference, and
/// sweeps whose treatment stays unresolved, are left as generate blocks.
#[derive(Debug, Default)]
pub struct SweepExpander {
    context: TransformContext,
}

impl SweepExpander {
    /// Expander with its own empty symbol table
    #[inline]
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self {
            context: TransformContext::new(config),
        }
    }

    fn expand(&mut self, block: &GenerateBlock) -> TransformResult<Option<SumBlock>> {
        let DesignNode::TreatmentReference(reference) = block.treatment() else {
            return Ok(None);
        };
        let reference = self.transform_treatment_reference(reference)?;
        let Some(treatment) = reference.treatment() else {
            return Ok(None);
        };
        let attribute = treatment.attribute(block.attribute_name()).ok_or_else(|| {
            TransformError::custom(format!(
                "treatment '{}' has no attribute '{}'",
                reference.treatment_name(),
                block.attribute_name()
            ))
        })?;
        let slot = Attribute::unbound(attribute.name(), attribute.unit().clone());

        let mut variants = Vec::with_capacity(block.values().len());
        for value in block.values() {
            let variant = TreatmentValueReference::new(reference.treatment_name(), value.clone());
            let variant = self.transform_treatment_value_reference(&variant)?;
            slot.bind(variant.value().clone())?;
            variants.push(DesignNode::from(variant));
        }
        tracing::debug!(
            treatment = reference.treatment_name(),
            attribute = block.attribute_name(),
            variants = variants.len(),
            "expanded sweep"
        );
        Ok(Some(SumBlock::new(variants)))
    }
}

impl RequestTransformer for SweepExpander {
    fn context(&mut self) -> &mut TransformContext {
        &mut self.context
    }

    fn transform_design_node(&mut self, node: &DesignNode) -> TransformResult<DesignNode> {
        if let DesignNode::Generate(block) = node {
            self.context.enter()?;
            let expanded = self.expand(block);
            self.context.exit();
            if let Some(sum) = expanded? {
                return Ok(sum.into());
            }
        }
        fold::transform_design_node(self, node)
    }
}
