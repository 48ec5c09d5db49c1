//! Method-style entry points on model types
//!
//! [`Transform`] sends a value to the matching `transform_*` hook of a
//! [`RequestTransformer`]; [`Apply`] sends it to the matching walk of a
//! [`RequestVisitor`].

use crate::error::TransformResult;
use crate::transformer::RequestTransformer;
use crate::visitor::{self, RequestVisitor};
use cpr_model::prelude::*;

/// Single dispatch to a transformer hook
pub trait Transform {
    /// Rewritten type; always the same kind as the input
    type Output;

    /// Rewrite `self` with `transformer`
    ///
    /// # Errors
    /// Whatever the transformer raises
    fn transform<T: RequestTransformer + ?Sized>(&self, transformer: &mut T) -> TransformResult<Self::Output>;
}

/// Single dispatch to a visitor
pub trait Apply {
    /// Walk `self` with `visitor`
    fn apply<V: RequestVisitor + ?Sized>(&self, visitor: &mut V);
}

macro_rules! dispatch {
    ($($ty:ty => $hook:ident, $walk:path;)*) => {
        $(
            impl Transform for $ty {
                type Output = $ty;

                fn transform<T: RequestTransformer + ?Sized>(&self, transformer: &mut T) -> TransformResult<$ty> {
                    transformer.$hook(self)
                }
            }

            impl Apply for $ty {
                fn apply<V: RequestVisitor + ?Sized>(&self, visitor: &mut V) {
                    $walk(visitor, self);
                }
            }
        )*
    };
}

dispatch! {
    ExperimentalRequest => transform_request, visitor::walk_request;
    DesignNode => transform_design_node, visitor::walk_design_node;
    DesignBlock => transform_design_block, visitor::walk_design_block;
    SumBlock => transform_sum_block, visitor::walk_sum_block;
    ProductBlock => transform_product_block, visitor::walk_product_block;
    ReplicateBlock => transform_replicate_block, visitor::walk_replicate_block;
    GenerateBlock => transform_generate_block, visitor::walk_generate_block;
    TreatmentValueReference => transform_treatment_value_reference, visitor::walk_treatment_value_reference;
    NamedEntity => transform_named_entity, visitor::walk_named_entity;
    Treatment => transform_treatment, visitor::walk_treatment;
    Attribute => transform_attribute, visitor::walk_attribute;
    Value => transform_value, visitor::walk_value;
    Sample => transform_sample, visitor::walk_sample;
    Control => transform_control, visitor::walk_control;
    Measurement => transform_measurement, visitor::walk_measurement;
    BlockReference => transform_block_reference, visitor::walk_block_reference;
    SubjectReference => transform_subject_reference, visitor::walk_subject_reference;
    TreatmentReference => transform_treatment_reference, visitor::walk_treatment_reference;
    Unit => transform_unit, visitor::walk_unit;
}

impl Transform for Version {
    type Output = Version;

    fn transform<T: RequestTransformer + ?Sized>(&self, transformer: &mut T) -> TransformResult<Version> {
        transformer.transform_version(*self)
    }
}

impl Apply for Version {
    fn apply<V: RequestVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_version(*self);
    }
}
