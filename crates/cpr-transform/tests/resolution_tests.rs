//! Reference resolution through the transformer's symbol table.
//!
//! Core guarantees exercised here:
//! - Every definition is rewritten at most once per pass, however many
//!   references point at it.
//! - References sharing a name share one rewritten target.
//! - Cycles, undefined names and runaway nesting fail with typed errors.
//! - Each transformer starts from an empty table.

use cpr_model::prelude::*;
use cpr_test_utils::{cyclic_request, molar_value, sample_request, CountingTransformer};
use cpr_transform::prelude::*;
use cpr_transform::{resolve_request, ReferenceResolver, SymbolKind, SymbolTable, UnresolvedPolicy};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn main_products(request: &ExperimentalRequest) -> Vec<&ProductBlock> {
    let DesignNode::Replicate(replicate) = request.design("main").unwrap().definition() else {
        panic!("main is not a replicate block");
    };
    let DesignNode::Sum(sum) = replicate.block() else {
        panic!("replicate body is not a sum block");
    };
    sum.block_list()
        .iter()
        .map(|node| match node {
            DesignNode::Product(product) => product,
            other => panic!("unexpected {}", other.kind()),
        })
        .collect()
}

fn block_target(node: &DesignNode) -> &Arc<DesignBlock> {
    match node {
        DesignNode::BlockReference(reference) => reference.block().expect("resolved"),
        other => panic!("unexpected {}", other.kind()),
    }
}

/// Two references to `strains` observe the same rewritten block, and the
/// block is rewritten exactly once.
#[test]
fn shared_references_resolve_to_one_rewrite() {
    let mut counter = CountingTransformer::default();
    let out = counter.transform_request(&sample_request()).unwrap();

    let products = main_products(&out);
    let first = block_target(&products[0].block_list()[0]);
    let second = block_target(&products[1].block_list()[0]);
    assert!(Arc::ptr_eq(first, second));

    let table = counter.context().symbols();
    assert!(Arc::ptr_eq(first, table.get::<DesignBlock>("strains").unwrap()));

    assert_eq!(counter.blocks.get("strains"), Some(&1));
    assert_eq!(counter.blocks.get("induction"), Some(&1));
    assert_eq!(counter.blocks.get("main"), Some(&1));
    assert!(counter.subjects.values().all(|&n| n == 1));
    assert!(counter.treatments.values().all(|&n| n == 1));
}

/// The measurement's block reference shares the target of the design list.
#[test]
fn measurement_block_is_shared() {
    let mut resolver = ReferenceResolver::default();
    let out = resolver.transform_request(&sample_request()).unwrap();

    let measured = out.measurements()[0].block().block().unwrap();
    assert!(Arc::ptr_eq(measured, resolver.symbols().get::<DesignBlock>("main").unwrap()));
    assert_eq!(measured.as_ref(), out.design("main").unwrap());
}

/// Resolution attaches targets without changing the document.
#[test]
fn resolution_preserves_content() {
    let request = sample_request();
    let out = resolve_request(&request, TransformConfig::default()).unwrap();

    assert_eq!(out, request);
    assert_eq!(
        cpr_codec::encode(&out).unwrap(),
        cpr_codec::encode(&request).unwrap()
    );
}

#[test]
fn subject_and_treatment_references_share_targets() {
    let mut resolver = ReferenceResolver::default();
    let out = resolver.transform_request(&sample_request()).unwrap();

    let control_subject = out.measurements()[0].controls()[0].sample().subject();
    let DesignNode::Sum(strains) = out.design("strains").unwrap().definition() else {
        panic!("strains is not a sum block");
    };
    let DesignNode::SubjectReference(in_design) = &strains.block_list()[0] else {
        panic!("expected subject reference");
    };
    assert!(Arc::ptr_eq(
        control_subject.entity().unwrap(),
        in_design.entity().unwrap()
    ));

    let products = main_products(&out);
    let DesignNode::TreatmentValueReference(arabinose) = &products[1].block_list()[1] else {
        panic!("expected treatment value reference");
    };
    assert!(Arc::ptr_eq(
        arabinose.treatment().unwrap(),
        resolver.symbols().get::<Treatment>("arabinose").unwrap()
    ));
}

#[test]
fn cycle_fails_fast() {
    let err = resolve_request(&cyclic_request(), TransformConfig::default()).unwrap_err();

    assert_eq!(
        err,
        TransformError::CyclicReference {
            kind: SymbolKind::Block,
            name: "a".to_string(),
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        }
    );
}

#[test]
fn self_reference_is_a_cycle() {
    let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0))
        .with_designs(vec![DesignBlock::new("loop", BlockReference::new("loop").into())]);

    assert!(matches!(
        resolve_request(&request, TransformConfig::default()),
        Err(TransformError::CyclicReference { ref name, .. }) if name == "loop"
    ));
}

fn request_with_ghost() -> ExperimentalRequest {
    ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0)).with_designs(vec![DesignBlock::new(
        "main",
        ProductBlock::new(vec![
            SubjectReference::new("ghost").into(),
            TreatmentValueReference::new("phantom", molar_value(1.0)).into(),
        ])
        .into(),
    )])
}

#[test]
fn undefined_reference_errors_by_default() {
    let err = resolve_request(&request_with_ghost(), TransformConfig::default()).unwrap_err();

    assert_eq!(
        err,
        TransformError::UndefinedReference {
            kind: SymbolKind::Subject,
            name: "ghost".to_string()
        }
    );
}

#[test]
fn undefined_reference_kept_when_configured() {
    let config = TransformConfig::new().with_unresolved(UnresolvedPolicy::Keep);
    let request = request_with_ghost();
    let out = resolve_request(&request, config).unwrap();

    assert_eq!(out, request);
    let DesignNode::Product(product) = out.design("main").unwrap().definition() else {
        panic!("main is not a product block");
    };
    assert!(product.block_list().iter().all(|node| match node {
        DesignNode::SubjectReference(r) => !r.is_resolved(),
        DesignNode::TreatmentValueReference(r) => !r.is_resolved(),
        _ => false,
    }));
}

fn nested(levels: u32) -> ExperimentalRequest {
    let mut node: DesignNode = SubjectReference::new("s").into();
    for _ in 1..levels {
        node = ReplicateBlock::new(2, node).into();
    }
    ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0))
        .with_subjects(vec![NamedEntity::new("s", "http://s")])
        .with_designs(vec![DesignBlock::new("deep", node)])
}

#[test]
fn depth_limit_is_enforced() {
    let request = nested(10);

    assert!(resolve_request(&request, TransformConfig::new().with_max_depth(10)).is_ok());
    assert_eq!(
        resolve_request(&request, TransformConfig::new().with_max_depth(9)),
        Err(TransformError::DepthExceeded { limit: 9 })
    );
}

#[test]
fn each_transformer_starts_empty() {
    let mut first = ReferenceResolver::default();
    first.transform_request(&sample_request()).unwrap();
    assert!(!first.symbols().is_empty());

    let second = ReferenceResolver::default();
    assert!(second.symbols().is_empty());
}

#[test]
fn supplied_definitions_take_precedence() {
    let mut definitions = SymbolTable::new();
    definitions.define(Arc::new(NamedEntity::new("strain1", "http://elsewhere/strain1")));

    let mut resolver = ReferenceResolver::default().with_definitions(definitions);
    let out = resolver.transform_request(&sample_request()).unwrap();

    assert_eq!(out.subject("strain1").unwrap().reference(), "http://elsewhere/strain1");
}

#[test]
fn attached_target_resolves_without_definition() {
    let orphan = Arc::new(DesignBlock::new("orphan", SumBlock::new(Vec::new()).into()));
    let node: DesignNode = BlockReference::resolved(orphan).into();

    let out = node.transform(&mut ReferenceResolver::default()).unwrap();
    let DesignNode::BlockReference(reference) = out else {
        panic!("expected block reference");
    };
    assert_eq!(reference.block().unwrap().label(), "orphan");
}

/// A value override reaches attributes, sweeps and fixed treatment values.
#[test]
fn leaf_overrides_apply_everywhere() {
    #[derive(Default)]
    struct Millimolar {
        context: TransformContext,
    }

    impl RequestTransformer for Millimolar {
        fn context(&mut self) -> &mut TransformContext {
            &mut self.context
        }

        fn transform_value(&mut self, value: &Value) -> TransformResult<Value> {
            Ok(value.with_value(value.value() * 1000.0))
        }
    }

    let out = Millimolar::default().transform_request(&sample_request()).unwrap();

    let DesignNode::Generate(sweep) = out.design("induction").unwrap().definition() else {
        panic!("induction is not a generate block");
    };
    let values: Vec<f64> = sweep.values().iter().map(Value::value).collect();
    assert_eq!(values, vec![0.0, 250.0, 500.0]);

    let products = main_products(&out);
    let DesignNode::TreatmentValueReference(arabinose) = &products[1].block_list()[1] else {
        panic!("expected treatment value reference");
    };
    assert_eq!(arabinose.value().value(), 1000.0);
}

#[test]
fn config_reads_from_toml() {
    let config: TransformConfig = toml::from_str("max_depth = 4\nunresolved = \"keep\"\n").unwrap();
    assert_eq!(
        config,
        TransformConfig::new().with_max_depth(4).with_unresolved(UnresolvedPolicy::Keep)
    );

    let partial: TransformConfig = toml::from_str("max_depth = 4\n").unwrap();
    assert_eq!(partial.unresolved, UnresolvedPolicy::Error);
}
