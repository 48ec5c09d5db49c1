//! Reference resolution pass

use crate::config::TransformConfig;
use crate::context::TransformContext;
use crate::error::TransformResult;
use crate::symbol::SymbolTable;
use crate::transformer::RequestTransformer;
use cpr_model::ExperimentalRequest;

/// Transformer that only resolves references
///
/// Every hook keeps its default, so the output equals the input while
/// every reference is attached to its shared definition.
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    context: TransformContext,
}

impl ReferenceResolver {
    /// Resolver with its own empty symbol table
    #[inline]
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self {
            context: TransformContext::new(config),
        }
    }

    /// Builder: resolve against `definitions` before the request's own
    #[must_use]
    pub fn with_definitions(mut self, definitions: SymbolTable) -> Self {
        self.context = self.context.with_definitions(definitions);
        self
    }

    /// Rewritten definitions recorded so far
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        self.context.symbols()
    }

    /// Consume, keeping the pass state
    #[must_use]
    pub fn into_context(self) -> TransformContext {
        self.context
    }
}

impl RequestTransformer for ReferenceResolver {
    fn context(&mut self) -> &mut TransformContext {
        &mut self.context
    }
}

/// Resolve every reference in `request` with a fresh resolver
///
/// # Errors
/// `UndefinedReference`, `CyclicReference` or `DepthExceeded`
pub fn resolve_request(request: &ExperimentalRequest, config: TransformConfig) -> TransformResult<ExperimentalRequest> {
    ReferenceResolver::new(config).transform_request(request)
}
