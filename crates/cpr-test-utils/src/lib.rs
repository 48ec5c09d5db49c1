//! Testing utilities for the cp-request workspace
//!
//! Shared fixtures and an instrumented transformer.

#![allow(missing_docs)]

use cpr_model::prelude::*;
use cpr_transform::{fold, RequestTransformer, TransformConfig, TransformContext, TransformResult};
use indexmap::IndexMap;

pub const MOLAR: &str = "http://purl.obolibrary.org/obo/UO_0000064";
pub const HOUR: &str = "http://purl.obolibrary.org/obo/UO_0000027";

pub fn molar() -> Unit {
    Unit::new(MOLAR)
}

pub fn hour() -> Unit {
    Unit::new(HOUR)
}

pub fn molar_value(value: f64) -> Value {
    Value::new(value, molar())
}

/// Bound at 0.25 molar
pub fn concentration() -> Attribute {
    Attribute::bound("concentration", molar_value(0.25))
}

/// Unbound, measured in hours
pub fn timepoint() -> Attribute {
    Attribute::unbound("timepoint", hour())
}

pub fn entity_one() -> NamedEntity {
    NamedEntity::new("one", "http://one.one")
}

/// Small but complete request
///
/// - `strains`: sum over both subjects
/// - `induction`: iptg concentration sweep
/// - `main`: three replicates of strains crossed with each treatment
///
/// `strains` is referenced twice from `main`.
pub fn sample_request() -> ExperimentalRequest {
    let strains = DesignBlock::new(
        "strains",
        SumBlock::new(vec![
            SubjectReference::new("strain1").into(),
            SubjectReference::new("strain2").into(),
        ])
        .into(),
    );
    let induction = DesignBlock::new(
        "induction",
        GenerateBlock::new(
            TreatmentReference::new("iptg").into(),
            "concentration",
            vec![molar_value(0.0), molar_value(0.25), molar_value(0.5)],
        )
        .into(),
    );
    let main = DesignBlock::new(
        "main",
        ReplicateBlock::new(
            3,
            SumBlock::new(vec![
                ProductBlock::new(vec![
                    BlockReference::new("strains").into(),
                    BlockReference::new("induction").into(),
                ])
                .into(),
                ProductBlock::new(vec![
                    BlockReference::new("strains").into(),
                    TreatmentValueReference::new("arabinose", molar_value(1.0)).into(),
                ])
                .into(),
            ])
            .into(),
        )
        .into(),
    );

    ExperimentalRequest::new("sample_challenge", "http://example.org/cp/sample", Version::new(1, 0, 0))
        .with_subjects(vec![
            NamedEntity::new("strain1", "http://example.org/strain1"),
            NamedEntity::new("strain2", "http://example.org/strain2"),
        ])
        .with_treatments(vec![
            Treatment::new("iptg", vec![Attribute::unbound("concentration", molar())]),
            Treatment::new("arabinose", vec![Attribute::unbound("concentration", molar())]),
        ])
        .with_designs(vec![strains, induction, main])
        .with_measurements(vec![Measurement::new(
            "FLOW",
            BlockReference::new("main"),
            vec![Control::new(
                "negative",
                Sample::new(SubjectReference::new("strain1"), Vec::new()),
            )],
            vec!["performer_a".to_string()],
        )])
}

/// Request whose blocks `a` and `b` reference each other
pub fn cyclic_request() -> ExperimentalRequest {
    ExperimentalRequest::new("cyclic", "http://example.org/cp/cyclic", Version::new(1, 0, 0))
        .with_designs(vec![
            DesignBlock::new("a", BlockReference::new("b").into()),
            DesignBlock::new("b", SumBlock::new(vec![BlockReference::new("a").into()]).into()),
        ])
}

/// Transformer that counts how often each definition is rewritten
#[derive(Debug, Default)]
pub struct CountingTransformer {
    context: TransformContext,
    pub blocks: IndexMap<String, usize>,
    pub subjects: IndexMap<String, usize>,
    pub treatments: IndexMap<String, usize>,
}

impl CountingTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            context: TransformContext::new(config),
            ..Self::default()
        }
    }
}

impl RequestTransformer for CountingTransformer {
    fn context(&mut self) -> &mut TransformContext {
        &mut self.context
    }

    fn transform_design_block(&mut self, block: &DesignBlock) -> TransformResult<DesignBlock> {
        *self.blocks.entry(block.label().to_string()).or_default() += 1;
        fold::transform_design_block(self, block)
    }

    fn transform_named_entity(&mut self, entity: &NamedEntity) -> TransformResult<NamedEntity> {
        *self.subjects.entry(entity.name().to_string()).or_default() += 1;
        fold::transform_named_entity(self, entity)
    }

    fn transform_treatment(&mut self, treatment: &Treatment) -> TransformResult<Treatment> {
        *self.treatments.entry(treatment.name().to_string()).or_default() += 1;
        fold::transform_treatment(self, treatment)
    }
}
