//! Built-in passes and visitors over the shared sample request.

use cpr_model::prelude::*;
use cpr_test_utils::{molar_value, sample_request, MOLAR};
use cpr_transform::prelude::*;
use cpr_transform::{
    validate_request, BlockInliner, DesignPrinter, ReferenceCollector, ReferenceResolver, SweepExpander,
    SymbolKind, ValidationIssue,
};
use pretty_assertions::assert_eq;

fn strains() -> DesignNode {
    SumBlock::new(vec![
        SubjectReference::new("strain1").into(),
        SubjectReference::new("strain2").into(),
    ])
    .into()
}

#[test]
fn inliner_replaces_design_references() {
    let out = BlockInliner::default().transform_request(&sample_request()).unwrap();

    let induction = GenerateBlock::new(
        TreatmentReference::new("iptg").into(),
        "concentration",
        vec![molar_value(0.0), molar_value(0.25), molar_value(0.5)],
    );
    let expected: DesignNode = ReplicateBlock::new(
        3,
        SumBlock::new(vec![
            ProductBlock::new(vec![strains(), induction.into()]).into(),
            ProductBlock::new(vec![
                strains(),
                TreatmentValueReference::new("arabinose", molar_value(1.0)).into(),
            ])
            .into(),
        ])
        .into(),
    )
    .into();

    assert_eq!(out.design("main").unwrap().definition(), &expected);
    assert!(out.measurements()[0].block().is_resolved());
}

#[test]
fn expander_turns_sweep_into_sum() {
    let out = SweepExpander::default().transform_request(&sample_request()).unwrap();

    let expected: DesignNode = SumBlock::new(
        [0.0, 0.25, 0.5]
            .into_iter()
            .map(|v| TreatmentValueReference::new("iptg", molar_value(v)).into())
            .collect(),
    )
    .into();
    assert_eq!(out.design("induction").unwrap().definition(), &expected);
    assert_eq!(out.design("main"), sample_request().design("main"));
}

#[test]
fn passes_compose() {
    let expanded = SweepExpander::default().transform_request(&sample_request()).unwrap();
    let inlined = BlockInliner::default().transform_request(&expanded).unwrap();

    assert!(validate_request(&inlined).is_empty());
    let refs = ReferenceCollector::collect(&inlined);
    assert_eq!(
        refs.names(SymbolKind::Block).iter().collect::<Vec<_>>(),
        vec!["main"]
    );
}

#[test]
fn collector_orders_by_first_sighting() {
    let refs = ReferenceCollector::collect(&sample_request());

    assert_eq!(
        refs.names(SymbolKind::Block).iter().collect::<Vec<_>>(),
        vec!["strains", "induction", "main"]
    );
    assert_eq!(
        refs.names(SymbolKind::Subject).iter().collect::<Vec<_>>(),
        vec!["strain1", "strain2"]
    );
    assert_eq!(
        refs.names(SymbolKind::Treatment).iter().collect::<Vec<_>>(),
        vec!["iptg", "arabinose"]
    );
}

#[test]
fn sample_request_is_valid() {
    assert_eq!(validate_request(&sample_request()), Vec::<ValidationIssue>::new());
}

#[test]
fn validator_reports_measurement_and_control_references() {
    let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0)).with_measurements(vec![
        Measurement::new(
            "FLOW",
            BlockReference::new("nowhere"),
            vec![Control::new(
                "negative",
                Sample::new(SubjectReference::new("nobody"), vec![TreatmentReference::new("nothing")]),
            )],
            Vec::new(),
        ),
    ]);

    let kinds: Vec<SymbolKind> = validate_request(&request)
        .into_iter()
        .map(|issue| match issue {
            ValidationIssue::UndefinedReference { kind, .. } => kind,
            other => panic!("unexpected {other}"),
        })
        .collect();
    assert_eq!(kinds, vec![SymbolKind::Block, SymbolKind::Subject, SymbolKind::Treatment]);
}

#[test]
fn printer_renders_sample_designs() {
    let expected = format!(
        "\
design_block strains
  sum_block
    subject_reference strain1
    subject_reference strain2
design_block induction
  generate_block concentration [0, 0.25, 0.5]
    treatment_reference iptg
design_block main
  replicate_block x3
    sum_block
      product_block
        block_reference -> strains
        block_reference -> induction
      product_block
        block_reference -> strains
        treatment_value_reference arabinose = 1 {MOLAR}
"
    );
    assert_eq!(DesignPrinter::render_request(&sample_request()), expected);
}

#[test]
fn resolver_via_transform_trait() {
    let request = sample_request();
    let out = request.transform(&mut ReferenceResolver::default()).unwrap();
    assert_eq!(out, request);
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    const SUBJECTS: [&str; 3] = ["a", "b", "c"];

    fn design_node() -> impl Strategy<Value = DesignNode> {
        let leaf = prop::sample::select(SUBJECTS.to_vec()).prop_map(|name| DesignNode::from(SubjectReference::new(name)));
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 1..4).prop_map(|list| DesignNode::from(SumBlock::new(list))),
                prop::collection::vec(inner.clone(), 1..4).prop_map(|list| DesignNode::from(ProductBlock::new(list))),
                (1u32..4, inner).prop_map(|(count, node)| DesignNode::from(ReplicateBlock::new(count, node))),
            ]
        })
    }

    #[derive(Default)]
    struct Targets(Vec<(String, Option<Arc<NamedEntity>>)>);

    impl RequestVisitor for Targets {
        fn visit_subject_reference(&mut self, reference: &SubjectReference) {
            self.0
                .push((reference.subject_name().to_string(), reference.entity().cloned()));
        }
    }

    proptest! {
        #[test]
        fn prop_resolution_is_identity_and_shares_targets(node in design_node()) {
            let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0))
                .with_subjects(SUBJECTS.iter().map(|s| NamedEntity::new(*s, format!("http://{s}"))).collect())
                .with_designs(vec![DesignBlock::new("root", node)]);

            let out = ReferenceResolver::default().transform_request(&request).unwrap();
            prop_assert_eq!(&out, &request);

            let mut targets = Targets::default();
            out.apply(&mut targets);

            let mut first: HashMap<String, Arc<NamedEntity>> = HashMap::new();
            for (name, target) in targets.0 {
                let target = target.expect("every subject resolves");
                let seen = first.entry(name).or_insert_with(|| Arc::clone(&target));
                prop_assert!(Arc::ptr_eq(seen, &target));
            }
        }
    }
}
