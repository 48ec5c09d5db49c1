use cpr_model::prelude::*;
use proptest::prelude::*;

fn subject(name: &str) -> DesignNode {
    SubjectReference::new(name).into()
}

proptest! {
    #[test]
    fn prop_sum_block_order_matters(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        let forward = SumBlock::new(vec![subject(&a), subject(&b)]);
        let backward = SumBlock::new(vec![subject(&b), subject(&a)]);

        prop_assert_ne!(forward, backward);
    }

    #[test]
    fn prop_product_block_equal_to_its_clone(names in proptest::collection::vec("[a-z]{1,8}", 0..10)) {
        let block = ProductBlock::new(names.iter().map(|n| subject(n)).collect());
        prop_assert_eq!(block.clone(), block);
    }

    #[test]
    fn prop_replicate_count_participates_in_equality(n in 1u32..100, m in 1u32..100) {
        prop_assume!(n != m);
        prop_assert_ne!(
            ReplicateBlock::new(n, subject("x")),
            ReplicateBlock::new(m, subject("x"))
        );
    }
}

#[test]
fn entity_bound_only_when_every_attribute_bound() {
    let concentration = Attribute::bound(
        "concentration",
        Value::new(0.25, Unit::new("http://purl.obolibrary.org/obo/UO_0000064")),
    );
    let timepoint = Attribute::unbound(
        "timepoint",
        Unit::new("http://purl.obolibrary.org/obo/UO_0000027"),
    );

    let bound = NamedEntity::with_attributes("one", "http://one.one", vec![concentration.clone()]);
    let partly = NamedEntity::with_attributes("one", "http://one.one", vec![concentration, timepoint]);

    assert!(bound.is_bound());
    assert!(!partly.is_bound());
}

#[test]
fn design_nodes_of_different_kinds_never_equal() {
    let nodes: Vec<DesignNode> = vec![
        SumBlock::new(Vec::new()).into(),
        ProductBlock::new(Vec::new()).into(),
        BlockReference::new("x").into(),
        SubjectReference::new("x").into(),
        TreatmentReference::new("x").into(),
    ];

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate() {
            assert_eq!(i == j, a == b, "{} vs {}", a.kind(), b.kind());
        }
    }
}
