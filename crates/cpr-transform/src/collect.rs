//! Reference collection

use crate::dispatch::Apply;
use crate::symbol::SymbolKind;
use crate::visitor::RequestVisitor;
use cpr_model::{BlockReference, SubjectReference, TreatmentReference, TreatmentValueReference};
use indexmap::IndexSet;

/// Names referenced anywhere in the visited tree, per kind, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ReferenceCollector {
    blocks: IndexSet<String>,
    subjects: IndexSet<String>,
    treatments: IndexSet<String>,
}

impl ReferenceCollector {
    /// Create empty collector
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect from any model value
    #[must_use]
    pub fn collect<A: Apply + ?Sized>(target: &A) -> Self {
        let mut collector = Self::new();
        target.apply(&mut collector);
        collector
    }

    /// Referenced names of one kind
    #[must_use]
    pub fn names(&self, kind: SymbolKind) -> &IndexSet<String> {
        match kind {
            SymbolKind::Block => &self.blocks,
            SymbolKind::Subject => &self.subjects,
            SymbolKind::Treatment => &self.treatments,
        }
    }

    /// True if `name` is referenced as `kind`
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: SymbolKind, name: &str) -> bool {
        self.names(kind).contains(name)
    }

    /// Every (kind, name) pair
    pub fn iter(&self) -> impl Iterator<Item = (SymbolKind, &str)> {
        self.blocks
            .iter()
            .map(|name| (SymbolKind::Block, name.as_str()))
            .chain(self.subjects.iter().map(|name| (SymbolKind::Subject, name.as_str())))
            .chain(self.treatments.iter().map(|name| (SymbolKind::Treatment, name.as_str())))
    }
}

impl RequestVisitor for ReferenceCollector {
    fn visit_block_reference(&mut self, reference: &BlockReference) {
        self.blocks.insert(reference.block_label().to_string());
    }

    fn visit_subject_reference(&mut self, reference: &SubjectReference) {
        self.subjects.insert(reference.subject_name().to_string());
    }

    fn visit_treatment_reference(&mut self, reference: &TreatmentReference) {
        self.treatments.insert(reference.treatment_name().to_string());
    }

    fn visit_treatment_value_reference(&mut self, reference: &TreatmentValueReference) -> bool {
        self.treatments.insert(reference.treatment_name().to_string());
        false
    }
}
