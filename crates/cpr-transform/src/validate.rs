//! Request validation
//!
//! Structural checks that need the whole request, run as a read-only
//! walk. Issues are collected, never raised, so one run reports them all.

use crate::symbol::SymbolKind;
use crate::visitor::{self, RequestVisitor};
use cpr_model::prelude::*;
use indexmap::IndexSet;
use std::collections::HashSet;

/// A problem found in a request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    /// Reference to a name with no definition of that kind
    #[error("undefined {kind} reference '{name}'")]
    UndefinedReference {
        /// Kind the reference points at
        kind: SymbolKind,
        /// Referenced name
        name: String,
    },

    /// Two definitions of the same kind share a name
    #[error("duplicate {kind} definition '{name}'")]
    DuplicateDefinition {
        /// Kind of both definitions
        kind: SymbolKind,
        /// Shared name
        name: String,
    },

    /// Sum or product block with no children
    #[error("{kind} has an empty block_list")]
    EmptyBlockList {
        /// `sum_block` or `product_block`
        kind: &'static str,
    },

    /// Replicate block with count zero
    #[error("replicate_block has count 0")]
    ZeroReplicateCount,

    /// Generate block with no values
    #[error("generate_block over '{attribute}' has no values")]
    EmptySweep {
        /// Swept attribute
        attribute: String,
    },

    /// Generate block sweeps an attribute the treatment does not declare
    #[error("treatment '{treatment}' has no attribute '{attribute}' to sweep")]
    UnknownSweepAttribute {
        /// Swept treatment
        treatment: String,
        /// Attribute missing from the treatment
        attribute: String,
    },

    /// Sweep value unit differs from the attribute's declared unit
    #[error("sweep over '{treatment}.{attribute}' uses {actual}, expected {expected}")]
    SweepUnitMismatch {
        /// Swept treatment
        treatment: String,
        /// Swept attribute
        attribute: String,
        /// Unit the attribute declares
        expected: Unit,
        /// Unit carried by the sweep value
        actual: Unit,
    },
}

/// Visitor that checks a request against its own definitions
#[derive(Debug)]
pub struct RequestValidator<'a> {
    request: &'a ExperimentalRequest,
    issues: Vec<ValidationIssue>,
    reported: HashSet<(SymbolKind, String)>,
}

impl<'a> RequestValidator<'a> {
    /// Validator for `request`
    #[must_use]
    pub fn new(request: &'a ExperimentalRequest) -> Self {
        Self {
            request,
            issues: Vec::new(),
            reported: HashSet::new(),
        }
    }

    /// Run every check; issues come out in traversal order
    #[must_use]
    pub fn run(mut self) -> Vec<ValidationIssue> {
        let request = self.request;
        self.check_duplicates();
        visitor::walk_request(&mut self, request);
        self.issues
    }

    fn check_duplicates(&mut self) {
        let request = self.request;
        let defined = request
            .subjects()
            .iter()
            .map(|s| (SymbolKind::Subject, s.name()))
            .chain(request.treatments().iter().map(|t| (SymbolKind::Treatment, t.name())))
            .chain(request.designs().iter().map(|d| (SymbolKind::Block, d.label())));

        let mut seen = IndexSet::new();
        let mut duplicates = IndexSet::new();
        for key in defined {
            if !seen.insert(key) {
                duplicates.insert(key);
            }
        }
        for (kind, name) in duplicates {
            self.issues.push(ValidationIssue::DuplicateDefinition {
                kind,
                name: name.to_string(),
            });
        }
    }

    fn is_defined(&self, kind: SymbolKind, name: &str) -> bool {
        match kind {
            SymbolKind::Block => self.request.design(name).is_some(),
            SymbolKind::Subject => self.request.subject(name).is_some(),
            SymbolKind::Treatment => self.request.treatment(name).is_some(),
        }
    }

    fn check_reference(&mut self, kind: SymbolKind, name: &str) {
        if self.is_defined(kind, name) || !self.reported.insert((kind, name.to_string())) {
            return;
        }
        self.issues.push(ValidationIssue::UndefinedReference {
            kind,
            name: name.to_string(),
        });
    }

    fn check_sweep(&mut self, block: &GenerateBlock) {
        let DesignNode::TreatmentReference(reference) = block.treatment() else {
            return;
        };
        let Some(treatment) = self.request.treatment(reference.treatment_name()) else {
            return;
        };
        let Some(attribute) = treatment.attribute(block.attribute_name()) else {
            self.issues.push(ValidationIssue::UnknownSweepAttribute {
                treatment: treatment.name().to_string(),
                attribute: block.attribute_name().to_string(),
            });
            return;
        };
        for value in block.values() {
            if value.unit() != attribute.unit() {
                self.issues.push(ValidationIssue::SweepUnitMismatch {
                    treatment: treatment.name().to_string(),
                    attribute: attribute.name().to_string(),
                    expected: attribute.unit().clone(),
                    actual: value.unit().clone(),
                });
            }
        }
    }
}

impl RequestVisitor for RequestValidator<'_> {
    fn visit_block_reference(&mut self, reference: &BlockReference) {
        self.check_reference(SymbolKind::Block, reference.block_label());
    }

    fn visit_subject_reference(&mut self, reference: &SubjectReference) {
        self.check_reference(SymbolKind::Subject, reference.subject_name());
    }

    fn visit_treatment_reference(&mut self, reference: &TreatmentReference) {
        self.check_reference(SymbolKind::Treatment, reference.treatment_name());
    }

    fn visit_treatment_value_reference(&mut self, reference: &TreatmentValueReference) -> bool {
        self.check_reference(SymbolKind::Treatment, reference.treatment_name());
        false
    }

    fn visit_sum_block(&mut self, block: &SumBlock) -> bool {
        if block.block_list().is_empty() {
            self.issues.push(ValidationIssue::EmptyBlockList { kind: "sum_block" });
        }
        true
    }

    fn visit_product_block(&mut self, block: &ProductBlock) -> bool {
        if block.block_list().is_empty() {
            self.issues.push(ValidationIssue::EmptyBlockList { kind: "product_block" });
        }
        true
    }

    fn visit_replicate_block(&mut self, block: &ReplicateBlock) -> bool {
        if block.count() == 0 {
            self.issues.push(ValidationIssue::ZeroReplicateCount);
        }
        true
    }

    fn visit_generate_block(&mut self, block: &GenerateBlock) -> bool {
        if block.values().is_empty() {
            self.issues.push(ValidationIssue::EmptySweep {
                attribute: block.attribute_name().to_string(),
            });
        }
        self.check_sweep(block);
        true
    }
}

/// Validate `request` against its own definitions
#[must_use]
pub fn validate_request(request: &ExperimentalRequest) -> Vec<ValidationIssue> {
    RequestValidator::new(request).run()
}
