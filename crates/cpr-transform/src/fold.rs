//! Default rewrites for [`RequestTransformer`]
//!
//! Each function rebuilds one node from its rewritten children, calling
//! back into the transformer so overrides apply at every level.

use crate::config::UnresolvedPolicy;
use crate::error::{TransformError, TransformResult};
use crate::symbol::Resolvable;
use crate::transformer::RequestTransformer;
use cpr_model::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Rewrite the whole request
///
/// Source definitions are seeded from `request` for names not already
/// known. Each definition is rewritten once; the request's own definition
/// lists share that rewrite with every reference to the same name.
///
/// # Errors
/// Propagates any error raised below
pub fn transform_request<T: RequestTransformer + ?Sized>(
    t: &mut T,
    request: &ExperimentalRequest,
) -> TransformResult<ExperimentalRequest> {
    t.context().definitions_mut().extend_from_request(request);
    tracing::debug!(
        cp_name = request.cp_name(),
        designs = request.designs().len(),
        measurements = request.measurements().len(),
        "transforming request"
    );

    let version = t.transform_version(request.version())?;
    let subjects = transform_definitions(t, request.subjects(), |t, s| t.transform_named_entity(s))?;
    let treatments = transform_definitions(t, request.treatments(), |t, s| t.transform_treatment(s))?;
    let designs = transform_definitions(t, request.designs(), |t, s| t.transform_design_block(s))?;
    let measurements = request
        .measurements()
        .iter()
        .map(|m| t.transform_measurement(m))
        .collect::<TransformResult<Vec<_>>>()?;

    Ok(
        ExperimentalRequest::new(request.cp_name(), request.reference(), version)
            .with_subjects(subjects)
            .with_treatments(treatments)
            .with_designs(designs)
            .with_measurements(measurements),
    )
}

/// Rewrite one definition list
///
/// The first definition of a name goes through the symbol table; later
/// duplicates are rewritten on their own so their content survives.
fn transform_definitions<T, D, F>(t: &mut T, definitions: &[D], mut rewrite: F) -> TransformResult<Vec<D>>
where
    T: RequestTransformer + ?Sized,
    D: Resolvable + Clone,
    F: FnMut(&mut T, &D) -> TransformResult<D>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let name = definition.symbol_name();
        let rewritten = if seen.insert(name) {
            match resolve_shared(t, name, None, &mut rewrite)? {
                Some(shared) => (*shared).clone(),
                None => rewrite(t, definition)?,
            }
        } else {
            rewrite(t, definition)?
        };
        out.push(rewritten);
    }
    Ok(out)
}

/// Find or build the shared rewrite of the definition `name`
///
/// Lookup order: rewrites already recorded this pass, then the target
/// attached to the reference, then the source definitions. `Ok(None)`
/// means undefined under [`UnresolvedPolicy::Keep`].
///
/// # Errors
/// - [`TransformError::UndefinedReference`] under [`UnresolvedPolicy::Error`]
/// - [`TransformError::CyclicReference`] if `name` is already being rewritten
/// - anything `rewrite` raises
pub fn resolve_shared<T, D, F>(
    t: &mut T,
    name: &str,
    attached: Option<&Arc<D>>,
    rewrite: F,
) -> TransformResult<Option<Arc<D>>>
where
    T: RequestTransformer + ?Sized,
    D: Resolvable,
    F: FnOnce(&mut T, &D) -> TransformResult<D>,
{
    let cached = t.context().symbols().get::<D>(name).cloned();
    if let Some(shared) = cached {
        tracing::trace!(kind = %D::KIND, name, "symbol table hit");
        return Ok(Some(shared));
    }

    let source = match attached {
        Some(target) => Arc::clone(target),
        None => {
            let defined = t.context().definitions().get::<D>(name).cloned();
            match defined {
                Some(definition) => definition,
                None => return unresolved::<T, D>(t, name),
            }
        }
    };

    t.context().begin_resolution(D::KIND, name)?;
    let rewritten = rewrite(t, &source);
    t.context().end_resolution();

    let shared = Arc::new(rewritten?);
    t.context()
        .symbols_mut()
        .insert(name, D::into_symbol(Arc::clone(&shared)));
    tracing::debug!(kind = %D::KIND, name, "resolved definition");
    Ok(Some(shared))
}

fn unresolved<T, D>(t: &mut T, name: &str) -> TransformResult<Option<Arc<D>>>
where
    T: RequestTransformer + ?Sized,
    D: Resolvable,
{
    match t.context().config().unresolved {
        UnresolvedPolicy::Error => Err(TransformError::UndefinedReference {
            kind: D::KIND,
            name: name.to_string(),
        }),
        UnresolvedPolicy::Keep => {
            tracing::warn!(kind = %D::KIND, name, "undefined reference kept unresolved");
            Ok(None)
        }
    }
}

/// Dispatch on the node variant, tracking depth
///
/// # Errors
/// [`TransformError::DepthExceeded`] past the configured limit, or
/// anything raised below
pub fn transform_design_node<T: RequestTransformer + ?Sized>(
    t: &mut T,
    node: &DesignNode,
) -> TransformResult<DesignNode> {
    t.context().enter()?;
    let result = match node {
        DesignNode::Block(block) => t.transform_design_block(block).map(DesignNode::from),
        DesignNode::BlockReference(reference) => t.transform_block_reference(reference).map(DesignNode::from),
        DesignNode::Sum(block) => t.transform_sum_block(block).map(DesignNode::from),
        DesignNode::Product(block) => t.transform_product_block(block).map(DesignNode::from),
        DesignNode::Replicate(block) => t.transform_replicate_block(block).map(DesignNode::from),
        DesignNode::Generate(block) => t.transform_generate_block(block).map(DesignNode::from),
        DesignNode::SubjectReference(reference) => t.transform_subject_reference(reference).map(DesignNode::from),
        DesignNode::TreatmentReference(reference) => {
            t.transform_treatment_reference(reference).map(DesignNode::from)
        }
        DesignNode::TreatmentValueReference(reference) => t
            .transform_treatment_value_reference(reference)
            .map(DesignNode::from),
    };
    t.context().exit();
    result
}

/// # Errors
/// Propagates any error raised below
pub fn transform_design_block<T: RequestTransformer + ?Sized>(
    t: &mut T,
    block: &DesignBlock,
) -> TransformResult<DesignBlock> {
    let definition = t.transform_design_node(block.definition())?;
    Ok(DesignBlock::new(block.label(), definition))
}

/// # Errors
/// See [`resolve_shared`]
pub fn transform_block_reference<T: RequestTransformer + ?Sized>(
    t: &mut T,
    reference: &BlockReference,
) -> TransformResult<BlockReference> {
    let resolved = resolve_shared(t, reference.block_label(), reference.block(), |t, block| {
        t.transform_design_block(block)
    })?;
    Ok(match resolved {
        Some(block) => reference.with_block(block),
        None => BlockReference::new(reference.block_label()),
    })
}

fn transform_list<T: RequestTransformer + ?Sized>(
    t: &mut T,
    nodes: &[DesignNode],
) -> TransformResult<Vec<DesignNode>> {
    nodes.iter().map(|node| t.transform_design_node(node)).collect()
}

/// # Errors
/// Propagates any error raised below
pub fn transform_sum_block<T: RequestTransformer + ?Sized>(t: &mut T, block: &SumBlock) -> TransformResult<SumBlock> {
    Ok(SumBlock::new(transform_list(t, block.block_list())?))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_product_block<T: RequestTransformer + ?Sized>(
    t: &mut T,
    block: &ProductBlock,
) -> TransformResult<ProductBlock> {
    Ok(ProductBlock::new(transform_list(t, block.block_list())?))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_replicate_block<T: RequestTransformer + ?Sized>(
    t: &mut T,
    block: &ReplicateBlock,
) -> TransformResult<ReplicateBlock> {
    let inner = t.transform_design_node(block.block())?;
    Ok(ReplicateBlock::new(block.count(), inner))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_generate_block<T: RequestTransformer + ?Sized>(
    t: &mut T,
    block: &GenerateBlock,
) -> TransformResult<GenerateBlock> {
    let treatment = t.transform_design_node(block.treatment())?;
    let values = block
        .values()
        .iter()
        .map(|value| t.transform_value(value))
        .collect::<TransformResult<Vec<_>>>()?;
    Ok(GenerateBlock::new(treatment, block.attribute_name(), values))
}

/// # Errors
/// See [`resolve_shared`]
pub fn transform_subject_reference<T: RequestTransformer + ?Sized>(
    t: &mut T,
    reference: &SubjectReference,
) -> TransformResult<SubjectReference> {
    let resolved = resolve_shared(t, reference.subject_name(), reference.entity(), |t, entity| {
        t.transform_named_entity(entity)
    })?;
    Ok(match resolved {
        Some(entity) => reference.with_entity(entity),
        None => SubjectReference::new(reference.subject_name()),
    })
}

/// # Errors
/// See [`resolve_shared`]
pub fn transform_treatment_reference<T: RequestTransformer + ?Sized>(
    t: &mut T,
    reference: &TreatmentReference,
) -> TransformResult<TreatmentReference> {
    let resolved = resolve_shared(t, reference.treatment_name(), reference.treatment(), |t, treatment| {
        t.transform_treatment(treatment)
    })?;
    Ok(match resolved {
        Some(treatment) => reference.with_treatment(treatment),
        None => TreatmentReference::new(reference.treatment_name()),
    })
}

/// # Errors
/// See [`resolve_shared`]
pub fn transform_treatment_value_reference<T: RequestTransformer + ?Sized>(
    t: &mut T,
    reference: &TreatmentValueReference,
) -> TransformResult<TreatmentValueReference> {
    let resolved = resolve_shared(t, reference.treatment_name(), reference.treatment(), |t, treatment| {
        t.transform_treatment(treatment)
    })?;
    let value = t.transform_value(reference.value())?;
    Ok(match resolved {
        Some(treatment) => reference.with_treatment(treatment, value),
        None => TreatmentValueReference::new(reference.treatment_name(), value),
    })
}

/// # Errors
/// Propagates any error raised below
pub fn transform_attribute<T: RequestTransformer + ?Sized>(t: &mut T, attribute: &Attribute) -> TransformResult<Attribute> {
    Ok(match attribute {
        Attribute::Bound { name, value } => Attribute::bound(name.clone(), t.transform_value(value)?),
        Attribute::Unbound { name, unit } => Attribute::unbound(name.clone(), t.transform_unit(unit)?),
    })
}

/// # Errors
/// Propagates any error raised below
pub fn transform_value<T: RequestTransformer + ?Sized>(t: &mut T, value: &Value) -> TransformResult<Value> {
    let unit = t.transform_unit(value.unit())?;
    Ok(Value::new(value.value(), unit))
}

fn transform_attributes<T: RequestTransformer + ?Sized>(
    t: &mut T,
    attributes: &[Attribute],
) -> TransformResult<Vec<Attribute>> {
    attributes.iter().map(|a| t.transform_attribute(a)).collect()
}

/// # Errors
/// Propagates any error raised below
pub fn transform_named_entity<T: RequestTransformer + ?Sized>(
    t: &mut T,
    entity: &NamedEntity,
) -> TransformResult<NamedEntity> {
    let attributes = transform_attributes(t, entity.attributes())?;
    Ok(NamedEntity::with_attributes(entity.name(), entity.reference(), attributes))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_treatment<T: RequestTransformer + ?Sized>(t: &mut T, treatment: &Treatment) -> TransformResult<Treatment> {
    let attributes = transform_attributes(t, treatment.attributes())?;
    Ok(Treatment::new(treatment.name(), attributes))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_sample<T: RequestTransformer + ?Sized>(t: &mut T, sample: &Sample) -> TransformResult<Sample> {
    let subject = t.transform_subject_reference(sample.subject())?;
    let treatments = sample
        .treatments()
        .iter()
        .map(|reference| t.transform_treatment_reference(reference))
        .collect::<TransformResult<Vec<_>>>()?;
    Ok(Sample::new(subject, treatments))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_control<T: RequestTransformer + ?Sized>(t: &mut T, control: &Control) -> TransformResult<Control> {
    let sample = t.transform_sample(control.sample())?;
    Ok(Control::new(control.name(), sample))
}

/// # Errors
/// Propagates any error raised below
pub fn transform_measurement<T: RequestTransformer + ?Sized>(
    t: &mut T,
    measurement: &Measurement,
) -> TransformResult<Measurement> {
    let block = t.transform_block_reference(measurement.block())?;
    let controls = measurement
        .controls()
        .iter()
        .map(|control| t.transform_control(control))
        .collect::<TransformResult<Vec<_>>>()?;
    Ok(Measurement::new(
        measurement.measurement_type(),
        block,
        controls,
        measurement.performers().to_vec(),
    ))
}
