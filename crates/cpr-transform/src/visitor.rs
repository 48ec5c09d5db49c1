//! Read-only traversal over a request
//!
//! `visit_*` methods on containers return `true` to descend into children.
//! The free `walk_*` functions do the descending, so an override can call
//! them to keep the default recursion. References are leaves: a visitor
//! never follows a reference into its target.

use cpr_model::prelude::*;

/// Visitor over the request model
///
/// Every method has a no-op default.
pub trait RequestVisitor {
    /// Called before any design node is walked; `false` skips it entirely
    fn enter_node(&mut self, _node: &DesignNode) -> bool {
        true
    }

    /// Called after a design node and its children are walked
    fn leave_node(&mut self, _node: &DesignNode) {}

    /// Called for each request
    fn visit_request(&mut self, _request: &ExperimentalRequest) -> bool {
        true
    }

    /// Called for each design block
    fn visit_design_block(&mut self, _block: &DesignBlock) -> bool {
        true
    }

    /// Called for each block reference
    fn visit_block_reference(&mut self, _reference: &BlockReference) {}

    /// Called for each sum block
    fn visit_sum_block(&mut self, _block: &SumBlock) -> bool {
        true
    }

    /// Called for each product block
    fn visit_product_block(&mut self, _block: &ProductBlock) -> bool {
        true
    }

    /// Called for each replicate block
    fn visit_replicate_block(&mut self, _block: &ReplicateBlock) -> bool {
        true
    }

    /// Called for each generate block
    fn visit_generate_block(&mut self, _block: &GenerateBlock) -> bool {
        true
    }

    /// Called for each subject reference
    fn visit_subject_reference(&mut self, _reference: &SubjectReference) {}

    /// Called for each treatment reference
    fn visit_treatment_reference(&mut self, _reference: &TreatmentReference) {}

    /// Called for each treatment value reference
    fn visit_treatment_value_reference(&mut self, _reference: &TreatmentValueReference) -> bool {
        true
    }

    /// Called for each named entity
    fn visit_named_entity(&mut self, _entity: &NamedEntity) -> bool {
        true
    }

    /// Called for each treatment
    fn visit_treatment(&mut self, _treatment: &Treatment) -> bool {
        true
    }

    /// Called for each attribute
    fn visit_attribute(&mut self, _attribute: &Attribute) -> bool {
        true
    }

    /// Called for each value
    fn visit_value(&mut self, _value: &Value) -> bool {
        true
    }

    /// Called for each unit
    fn visit_unit(&mut self, _unit: &Unit) {}

    /// Called for each version
    fn visit_version(&mut self, _version: Version) {}

    /// Called for each sample
    fn visit_sample(&mut self, _sample: &Sample) -> bool {
        true
    }

    /// Called for each control
    fn visit_control(&mut self, _control: &Control) -> bool {
        true
    }

    /// Called for each measurement
    fn visit_measurement(&mut self, _measurement: &Measurement) -> bool {
        true
    }
}

/// Walk a request: version, subjects, treatments, designs, measurements
pub fn walk_request<V: RequestVisitor + ?Sized>(v: &mut V, request: &ExperimentalRequest) {
    if !v.visit_request(request) {
        return;
    }
    v.visit_version(request.version());
    for subject in request.subjects() {
        walk_named_entity(v, subject);
    }
    for treatment in request.treatments() {
        walk_treatment(v, treatment);
    }
    for design in request.designs() {
        walk_design_block(v, design);
    }
    for measurement in request.measurements() {
        walk_measurement(v, measurement);
    }
}

/// Walk a design node, bracketed by `enter_node` and `leave_node`
pub fn walk_design_node<V: RequestVisitor + ?Sized>(v: &mut V, node: &DesignNode) {
    if !v.enter_node(node) {
        return;
    }
    match node {
        DesignNode::Block(block) => walk_design_block(v, block),
        DesignNode::BlockReference(reference) => v.visit_block_reference(reference),
        DesignNode::Sum(block) => walk_sum_block(v, block),
        DesignNode::Product(block) => walk_product_block(v, block),
        DesignNode::Replicate(block) => walk_replicate_block(v, block),
        DesignNode::Generate(block) => walk_generate_block(v, block),
        DesignNode::SubjectReference(reference) => v.visit_subject_reference(reference),
        DesignNode::TreatmentReference(reference) => v.visit_treatment_reference(reference),
        DesignNode::TreatmentValueReference(reference) => walk_treatment_value_reference(v, reference),
    }
    v.leave_node(node);
}

/// Walk a design block
pub fn walk_design_block<V: RequestVisitor + ?Sized>(v: &mut V, block: &DesignBlock) {
    if v.visit_design_block(block) {
        walk_design_node(v, block.definition());
    }
}

/// Walk a sum block
pub fn walk_sum_block<V: RequestVisitor + ?Sized>(v: &mut V, block: &SumBlock) {
    if v.visit_sum_block(block) {
        for child in block.block_list() {
            walk_design_node(v, child);
        }
    }
}

/// Walk a product block
pub fn walk_product_block<V: RequestVisitor + ?Sized>(v: &mut V, block: &ProductBlock) {
    if v.visit_product_block(block) {
        for child in block.block_list() {
            walk_design_node(v, child);
        }
    }
}

/// Walk a replicate block
pub fn walk_replicate_block<V: RequestVisitor + ?Sized>(v: &mut V, block: &ReplicateBlock) {
    if v.visit_replicate_block(block) {
        walk_design_node(v, block.block());
    }
}

/// Walk a generate block
pub fn walk_generate_block<V: RequestVisitor + ?Sized>(v: &mut V, block: &GenerateBlock) {
    if v.visit_generate_block(block) {
        walk_design_node(v, block.treatment());
        for value in block.values() {
            walk_value(v, value);
        }
    }
}

/// Walk a treatment value reference
pub fn walk_treatment_value_reference<V: RequestVisitor + ?Sized>(v: &mut V, reference: &TreatmentValueReference) {
    if v.visit_treatment_value_reference(reference) {
        walk_value(v, reference.value());
    }
}

/// Walk a named entity
pub fn walk_named_entity<V: RequestVisitor + ?Sized>(v: &mut V, entity: &NamedEntity) {
    if v.visit_named_entity(entity) {
        for attribute in entity.attributes() {
            walk_attribute(v, attribute);
        }
    }
}

/// Walk a treatment
pub fn walk_treatment<V: RequestVisitor + ?Sized>(v: &mut V, treatment: &Treatment) {
    if v.visit_treatment(treatment) {
        for attribute in treatment.attributes() {
            walk_attribute(v, attribute);
        }
    }
}

/// Walk an attribute
pub fn walk_attribute<V: RequestVisitor + ?Sized>(v: &mut V, attribute: &Attribute) {
    if v.visit_attribute(attribute) {
        match attribute {
            Attribute::Bound { value, .. } => walk_value(v, value),
            Attribute::Unbound { unit, .. } => v.visit_unit(unit),
        }
    }
}

/// Walk a value
pub fn walk_value<V: RequestVisitor + ?Sized>(v: &mut V, value: &Value) {
    if v.visit_value(value) {
        v.visit_unit(value.unit());
    }
}

/// Walk a block reference
pub fn walk_block_reference<V: RequestVisitor + ?Sized>(v: &mut V, reference: &BlockReference) {
    v.visit_block_reference(reference);
}

/// Walk a subject reference
pub fn walk_subject_reference<V: RequestVisitor + ?Sized>(v: &mut V, reference: &SubjectReference) {
    v.visit_subject_reference(reference);
}

/// Walk a treatment reference
pub fn walk_treatment_reference<V: RequestVisitor + ?Sized>(v: &mut V, reference: &TreatmentReference) {
    v.visit_treatment_reference(reference);
}

/// Walk a unit
pub fn walk_unit<V: RequestVisitor + ?Sized>(v: &mut V, unit: &Unit) {
    v.visit_unit(unit);
}

/// Walk a sample
pub fn walk_sample<V: RequestVisitor + ?Sized>(v: &mut V, sample: &Sample) {
    if v.visit_sample(sample) {
        v.visit_subject_reference(sample.subject());
        for reference in sample.treatments() {
            v.visit_treatment_reference(reference);
        }
    }
}

/// Walk a control
pub fn walk_control<V: RequestVisitor + ?Sized>(v: &mut V, control: &Control) {
    if v.visit_control(control) {
        walk_sample(v, control.sample());
    }
}

/// Walk a measurement
pub fn walk_measurement<V: RequestVisitor + ?Sized>(v: &mut V, measurement: &Measurement) {
    if v.visit_measurement(measurement) {
        v.visit_block_reference(measurement.block());
        for control in measurement.controls() {
            walk_control(v, control);
        }
    }
}
