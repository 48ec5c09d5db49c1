//! Symbol table for shared definitions
//!
//! Definitions are keyed by [`SymbolKind`] and name, so a block label and
//! a subject name never collide, and a lookup can only ever return the
//! kind it asked for.

use cpr_model::{DesignBlock, ExperimentalRequest, NamedEntity, Treatment};
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Namespace of a referenceable definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// [`DesignBlock`], by label
    Block,
    /// Subject [`NamedEntity`], by name
    Subject,
    /// [`Treatment`], by name
    Treatment,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Block => "block",
            Self::Subject => "subject",
            Self::Treatment => "treatment",
        })
    }
}

/// Shared definition
#[derive(Debug, Clone)]
pub enum Symbol {
    /// Design block
    Block(Arc<DesignBlock>),
    /// Subject entity
    Subject(Arc<NamedEntity>),
    /// Treatment
    Treatment(Arc<Treatment>),
}

impl Symbol {
    /// Namespace of this definition
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        match self {
            Self::Block(_) => SymbolKind::Block,
            Self::Subject(_) => SymbolKind::Subject,
            Self::Treatment(_) => SymbolKind::Treatment,
        }
    }

    /// Name the definition declares for itself
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Block(block) => block.label(),
            Self::Subject(entity) => entity.name(),
            Self::Treatment(treatment) => treatment.name(),
        }
    }
}

/// A definition that references can point at
pub trait Resolvable: Sized {
    /// Namespace the definition lives in
    const KIND: SymbolKind;

    /// Name the definition declares for itself
    fn symbol_name(&self) -> &str;

    /// Wrap a shared definition
    fn into_symbol(shared: Arc<Self>) -> Symbol;

    /// Unwrap a symbol of this kind
    fn from_symbol(symbol: &Symbol) -> Option<&Arc<Self>>;
}

impl Resolvable for DesignBlock {
    const KIND: SymbolKind = SymbolKind::Block;

    fn symbol_name(&self) -> &str {
        self.label()
    }

    fn into_symbol(shared: Arc<Self>) -> Symbol {
        Symbol::Block(shared)
    }

    fn from_symbol(symbol: &Symbol) -> Option<&Arc<Self>> {
        match symbol {
            Symbol::Block(block) => Some(block),
            _ => None,
        }
    }
}

impl Resolvable for NamedEntity {
    const KIND: SymbolKind = SymbolKind::Subject;

    fn symbol_name(&self) -> &str {
        self.name()
    }

    fn into_symbol(shared: Arc<Self>) -> Symbol {
        Symbol::Subject(shared)
    }

    fn from_symbol(symbol: &Symbol) -> Option<&Arc<Self>> {
        match symbol {
            Symbol::Subject(entity) => Some(entity),
            _ => None,
        }
    }
}

impl Resolvable for Treatment {
    const KIND: SymbolKind = SymbolKind::Treatment;

    fn symbol_name(&self) -> &str {
        self.name()
    }

    fn into_symbol(shared: Arc<Self>) -> Symbol {
        Symbol::Treatment(shared)
    }

    fn from_symbol(symbol: &Symbol) -> Option<&Arc<Self>> {
        match symbol {
            Symbol::Treatment(treatment) => Some(treatment),
            _ => None,
        }
    }
}

/// Insertion-ordered map from (kind, name) to a shared definition
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: IndexMap<(SymbolKind, String), Symbol>,
}

impl SymbolTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of every definition in `request`
    ///
    /// When a name is defined twice, the first definition wins.
    #[must_use]
    pub fn from_request(request: &ExperimentalRequest) -> Self {
        let mut table = Self::new();
        table.extend_from_request(request);
        table
    }

    /// Add the definitions of `request` whose names are not yet present
    pub fn extend_from_request(&mut self, request: &ExperimentalRequest) {
        for subject in request.subjects() {
            self.insert_missing(subject);
        }
        for treatment in request.treatments() {
            self.insert_missing(treatment);
        }
        for design in request.designs() {
            self.insert_missing(design);
        }
    }

    fn insert_missing<T: Resolvable + Clone>(&mut self, definition: &T) {
        let key = (T::KIND, definition.symbol_name().to_string());
        if self.entries.contains_key(&key) {
            tracing::warn!(kind = %T::KIND, name = %key.1, "duplicate definition ignored");
            return;
        }
        self.entries
            .insert(key, T::into_symbol(Arc::new(definition.clone())));
    }

    /// Bind `name` to `symbol` in the symbol's namespace
    ///
    /// Returns the previous binding, if any.
    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) -> Option<Symbol> {
        self.entries.insert((symbol.kind(), name.into()), symbol)
    }

    /// Bind a definition under the name it declares
    pub fn define<T: Resolvable>(&mut self, definition: Arc<T>) -> Option<Symbol> {
        let name = definition.symbol_name().to_string();
        self.insert(name, T::into_symbol(definition))
    }

    /// Typed lookup
    #[must_use]
    pub fn get<T: Resolvable>(&self, name: &str) -> Option<&Arc<T>> {
        self.entries
            .get(&(T::KIND, name.to_string()))
            .and_then(T::from_symbol)
    }

    /// Untyped lookup
    #[must_use]
    pub fn symbol(&self, kind: SymbolKind, name: &str) -> Option<&Symbol> {
        self.entries.get(&(kind, name.to_string()))
    }

    /// True if `name` is bound in `kind`
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: SymbolKind, name: &str) -> bool {
        self.symbol(kind, name).is_some()
    }

    /// Names bound in `kind`, in insertion order
    pub fn names(&self, kind: SymbolKind) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, name)| name.as_str())
    }

    /// Every binding, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolKind, &str, &Symbol)> {
        self.entries
            .iter()
            .map(|((kind, name), symbol)| (*kind, name.as_str(), symbol))
    }

    /// Number of bindings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is bound
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpr_model::{SubjectReference, Version};

    fn block(label: &str) -> DesignBlock {
        DesignBlock::new(label, SubjectReference::new("s").into())
    }

    #[test]
    fn kinds_do_not_collide() {
        let mut table = SymbolTable::new();
        table.define(Arc::new(block("x")));
        table.define(Arc::new(NamedEntity::new("x", "http://x")));

        assert_eq!(table.len(), 2);
        assert!(table.get::<DesignBlock>("x").is_some());
        assert!(table.get::<NamedEntity>("x").is_some());
        assert!(table.get::<Treatment>("x").is_none());
    }

    #[test]
    fn insert_keys_by_given_name() {
        let mut table = SymbolTable::new();
        table.insert("alias", Symbol::Block(Arc::new(block("original"))));

        assert!(table.contains(SymbolKind::Block, "alias"));
        assert!(!table.contains(SymbolKind::Block, "original"));
    }

    #[test]
    fn first_definition_wins() {
        let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0))
            .with_subjects(vec![
                NamedEntity::new("dup", "http://first"),
                NamedEntity::new("dup", "http://second"),
            ]);
        let table = SymbolTable::from_request(&request);

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get::<NamedEntity>("dup").map(|e| e.reference()),
            Some("http://first")
        );
    }

    #[test]
    fn names_by_kind_in_order() {
        let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0))
            .with_designs(vec![block("b"), block("a")])
            .with_treatments(vec![Treatment::new("t", Vec::new())]);
        let table = SymbolTable::from_request(&request);

        assert_eq!(table.names(SymbolKind::Block).collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(table.names(SymbolKind::Treatment).collect::<Vec<_>>(), vec!["t"]);
        assert_eq!(
            table.iter().map(|(kind, name, symbol)| (kind, name, symbol.name())).collect::<Vec<_>>(),
            vec![
                (SymbolKind::Treatment, "t", "t"),
                (SymbolKind::Block, "b", "b"),
                (SymbolKind::Block, "a", "a"),
            ]
        );
        assert_eq!(SymbolKind::Treatment.to_string(), "treatment");
    }
}
