//! Wire object contract
//!
//! Ties every model type to its `object_type` tag.

use cpr_model::{
    Attribute, BlockReference, Control, DesignBlock, DesignNode, ExperimentalRequest,
    GenerateBlock, Measurement, NamedEntity, ProductBlock, ReplicateBlock, Sample,
    SubjectReference, SumBlock, Treatment, TreatmentReference, TreatmentValueReference, Unit,
    Value, Version,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A model type with a JSON wire shape
///
/// # Contract
/// - Encoding a tagged type emits `object_type = OBJECT_TYPE`
/// - Decoding checks the tag first when `OBJECT_TYPE` is `Some`
/// - `OBJECT_TYPE` is `None` for [`Version`] (untagged) and for
///   [`DesignNode`], which dispatches on the tag itself
pub trait WireObject: Serialize + DeserializeOwned {
    /// Discriminator value, if the type is tagged directly
    const OBJECT_TYPE: Option<&'static str>;

    /// Name used in diagnostics
    const TYPE_NAME: &'static str;
}

macro_rules! wire_object {
    ($($ty:ty => $tag:literal),* $(,)?) => {
        $(
            impl WireObject for $ty {
                const OBJECT_TYPE: Option<&'static str> = Some($tag);
                const TYPE_NAME: &'static str = $tag;
            }
        )*
    };
}

wire_object! {
    Unit => "unit",
    Value => "value",
    Attribute => "attribute",
    NamedEntity => "named_entity",
    Treatment => "treatment",
    Sample => "sample",
    Control => "control",
    Measurement => "measurement",
    DesignBlock => "design_block",
    BlockReference => "block_reference",
    SumBlock => "sum_block",
    ProductBlock => "product_block",
    ReplicateBlock => "replicate_block",
    GenerateBlock => "generate_block",
    SubjectReference => "subject_reference",
    TreatmentReference => "treatment_reference",
    TreatmentValueReference => "treatment_value_reference",
    ExperimentalRequest => "experimental_request",
}

impl WireObject for Version {
    const OBJECT_TYPE: Option<&'static str> = None;
    const TYPE_NAME: &'static str = "version";
}

impl WireObject for DesignNode {
    const OBJECT_TYPE: Option<&'static str> = None;
    const TYPE_NAME: &'static str = "design_node";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted_tag<T: WireObject>(value: &T) -> Option<String> {
        serde_json::to_value(value)
            .unwrap()
            .get("object_type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    }

    fn assert_tag<T: WireObject>(value: &T) {
        assert_eq!(emitted_tag(value).as_deref(), T::OBJECT_TYPE, "{}", T::TYPE_NAME);
    }

    #[test]
    fn declared_tags_match_serialized_tags() {
        let unit = Unit::new("http://purl.obolibrary.org/obo/UO_0000064");
        let value = Value::new(0.25, unit.clone());
        let sample = Sample::new(SubjectReference::new("s"), Vec::new());

        assert_tag(&unit);
        assert_tag(&value);
        assert_tag(&Attribute::unbound("x", unit));
        assert_tag(&NamedEntity::new("one", "http://one.one"));
        assert_tag(&Treatment::new("t", Vec::new()));
        assert_tag(&sample);
        assert_tag(&Control::new("c", sample));
        assert_tag(&Measurement::new("FLOW", BlockReference::new("b"), Vec::new(), Vec::new()));
        assert_tag(&DesignBlock::new("b", SubjectReference::new("s").into()));
        assert_tag(&BlockReference::new("b"));
        assert_tag(&SumBlock::new(Vec::new()));
        assert_tag(&ProductBlock::new(Vec::new()));
        assert_tag(&ReplicateBlock::new(2, SubjectReference::new("s").into()));
        assert_tag(&GenerateBlock::new(TreatmentReference::new("t").into(), "x", Vec::new()));
        assert_tag(&SubjectReference::new("s"));
        assert_tag(&TreatmentReference::new("t"));
        assert_tag(&TreatmentValueReference::new("t", value));
        assert_tag(&ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0)));
    }

    #[test]
    fn version_is_untagged() {
        assert_eq!(emitted_tag(&Version::new(1, 0, 0)), None);
        assert_eq!(Version::OBJECT_TYPE, None);
    }
}
