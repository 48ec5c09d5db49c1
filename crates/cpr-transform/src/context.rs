//! Per-pass transform state

use crate::config::TransformConfig;
use crate::error::{TransformError, TransformResult};
use crate::symbol::{SymbolKind, SymbolTable};

/// State owned by one transformer for one pass
///
/// - `definitions`: source definitions, seeded from the request being
///   transformed (or supplied up front)
/// - `symbols`: rewritten definitions; every reference to the same name
///   resolves to the same entry
///
/// A fresh context per transformer instance means two transformers never
/// share rewrites.
#[derive(Debug, Default)]
pub struct TransformContext {
    config: TransformConfig,
    definitions: SymbolTable,
    symbols: SymbolTable,
    resolving: Vec<(SymbolKind, String)>,
    depth: usize,
}

impl TransformContext {
    /// Empty context
    #[inline]
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builder: seed source definitions
    #[must_use]
    pub fn with_definitions(mut self, definitions: SymbolTable) -> Self {
        self.definitions = definitions;
        self
    }

    /// Pass configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Source definitions
    #[inline]
    #[must_use]
    pub fn definitions(&self) -> &SymbolTable {
        &self.definitions
    }

    /// Source definitions, mutable
    #[inline]
    pub fn definitions_mut(&mut self) -> &mut SymbolTable {
        &mut self.definitions
    }

    /// Rewritten definitions
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Rewritten definitions, mutable
    #[inline]
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Current design nesting depth
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True while `name` is being rewritten further up the stack
    #[must_use]
    pub fn is_resolving(&self, kind: SymbolKind, name: &str) -> bool {
        self.resolving.iter().any(|(k, n)| *k == kind && n == name)
    }

    /// Mark `name` as in progress
    ///
    /// # Errors
    /// Returns [`TransformError::CyclicReference`] if it already is
    pub fn begin_resolution(&mut self, kind: SymbolKind, name: &str) -> TransformResult<()> {
        if let Some(start) = self
            .resolving
            .iter()
            .position(|(k, n)| *k == kind && n == name)
        {
            let mut chain: Vec<String> = self.resolving[start..]
                .iter()
                .map(|(_, n)| n.clone())
                .collect();
            chain.push(name.to_string());
            return Err(TransformError::CyclicReference {
                kind,
                name: name.to_string(),
                chain,
            });
        }
        self.resolving.push((kind, name.to_string()));
        Ok(())
    }

    /// Pop the innermost in-progress name
    pub fn end_resolution(&mut self) {
        self.resolving.pop();
    }

    /// Descend one design level
    ///
    /// # Errors
    /// Returns [`TransformError::DepthExceeded`] past `max_depth`
    pub fn enter(&mut self) -> TransformResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(TransformError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Ascend one design level
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
