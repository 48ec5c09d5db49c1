//! Rewriting traversal over a request
//!
//! [`RequestTransformer`] has one hook per model type. Every hook defaults
//! to the matching function in [`fold`](crate::fold), which rebuilds the
//! node from its rewritten children. Override a hook to change one kind of
//! node; call the `fold` function from the override to keep recursing.
//!
//! References resolve through the transformer's [`TransformContext`]: the
//! first reference to a name rewrites the definition and records it, and
//! every later reference to that name shares the recorded rewrite.

use crate::context::TransformContext;
use crate::error::TransformResult;
use crate::fold;
use cpr_model::prelude::*;

/// Rewrites a request into a new one
///
/// # Example
///
/// ```rust
/// use cpr_model::prelude::*;
/// use cpr_transform::{fold, RequestTransformer, TransformContext, TransformResult};
///
/// /// Doubles every replicate count
/// #[derive(Default)]
/// struct Doubler {
///     context: TransformContext,
/// }
///
/// impl RequestTransformer for Doubler {
///     fn context(&mut self) -> &mut TransformContext {
///         &mut self.context
///     }
///
///     fn transform_replicate_block(
///         &mut self,
///         block: &ReplicateBlock,
///     ) -> TransformResult<ReplicateBlock> {
///         let inner = fold::transform_replicate_block(self, block)?;
///         Ok(ReplicateBlock::new(inner.count() * 2, inner.block().clone()))
///     }
/// }
/// ```
pub trait RequestTransformer {
    /// Per-pass state: config, definitions, rewritten symbols
    fn context(&mut self) -> &mut TransformContext;

    /// Rewrite the document root
    ///
    /// # Errors
    /// Propagates any error raised below
    fn transform_request(&mut self, request: &ExperimentalRequest) -> TransformResult<ExperimentalRequest> {
        fold::transform_request(self, request)
    }

    /// Rewrite any design node; dispatches on the variant
    ///
    /// # Errors
    /// Propagates any error raised below
    fn transform_design_node(&mut self, node: &DesignNode) -> TransformResult<DesignNode> {
        fold::transform_design_node(self, node)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_design_block(&mut self, block: &DesignBlock) -> TransformResult<DesignBlock> {
        fold::transform_design_block(self, block)
    }

    /// Resolve a block reference to the shared rewritten block
    ///
    /// # Errors
    /// `UndefinedReference`, `CyclicReference`, or anything raised while
    /// rewriting the target
    fn transform_block_reference(&mut self, reference: &BlockReference) -> TransformResult<BlockReference> {
        fold::transform_block_reference(self, reference)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_sum_block(&mut self, block: &SumBlock) -> TransformResult<SumBlock> {
        fold::transform_sum_block(self, block)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_product_block(&mut self, block: &ProductBlock) -> TransformResult<ProductBlock> {
        fold::transform_product_block(self, block)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_replicate_block(&mut self, block: &ReplicateBlock) -> TransformResult<ReplicateBlock> {
        fold::transform_replicate_block(self, block)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_generate_block(&mut self, block: &GenerateBlock) -> TransformResult<GenerateBlock> {
        fold::transform_generate_block(self, block)
    }

    /// Resolve a subject reference to the shared rewritten entity
    ///
    /// # Errors
    /// `UndefinedReference`, or anything raised while rewriting the target
    fn transform_subject_reference(&mut self, reference: &SubjectReference) -> TransformResult<SubjectReference> {
        fold::transform_subject_reference(self, reference)
    }

    /// Resolve a treatment reference to the shared rewritten treatment
    ///
    /// # Errors
    /// `UndefinedReference`, or anything raised while rewriting the target
    fn transform_treatment_reference(
        &mut self,
        reference: &TreatmentReference,
    ) -> TransformResult<TreatmentReference> {
        fold::transform_treatment_reference(self, reference)
    }

    /// Resolve the treatment and rewrite the fixed value
    ///
    /// # Errors
    /// `UndefinedReference`, or anything raised while rewriting the target
    fn transform_treatment_value_reference(
        &mut self,
        reference: &TreatmentValueReference,
    ) -> TransformResult<TreatmentValueReference> {
        fold::transform_treatment_value_reference(self, reference)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_attribute(&mut self, attribute: &Attribute) -> TransformResult<Attribute> {
        fold::transform_attribute(self, attribute)
    }

    /// # Errors
    /// Never fails by default
    fn transform_version(&mut self, version: Version) -> TransformResult<Version> {
        Ok(version)
    }

    /// # Errors
    /// Never fails by default
    fn transform_unit(&mut self, unit: &Unit) -> TransformResult<Unit> {
        Ok(unit.clone())
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_value(&mut self, value: &Value) -> TransformResult<Value> {
        fold::transform_value(self, value)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_named_entity(&mut self, entity: &NamedEntity) -> TransformResult<NamedEntity> {
        fold::transform_named_entity(self, entity)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_treatment(&mut self, treatment: &Treatment) -> TransformResult<Treatment> {
        fold::transform_treatment(self, treatment)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_sample(&mut self, sample: &Sample) -> TransformResult<Sample> {
        fold::transform_sample(self, sample)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_control(&mut self, control: &Control) -> TransformResult<Control> {
        fold::transform_control(self, control)
    }

    /// # Errors
    /// Propagates any error raised below
    fn transform_measurement(&mut self, measurement: &Measurement) -> TransformResult<Measurement> {
        fold::transform_measurement(self, measurement)
    }
}
