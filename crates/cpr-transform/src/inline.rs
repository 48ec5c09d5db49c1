//! Block inlining pass

use crate::config::TransformConfig;
use crate::context::TransformContext;
use crate::error::TransformResult;
use crate::fold;
use crate::transformer::RequestTransformer;
use cpr_model::DesignNode;

/// Replaces every block reference inside a design tree with a copy of the
/// referenced block's rewritten definition
///
/// Each block is still rewritten once; every inlining site receives a
/// copy of that rewrite. Measurements keep their block references, which
/// are resolved as usual. A reference left unresolved under
/// `UnresolvedPolicy::Keep` stays in place.
#[derive(Debug, Default)]
pub struct BlockInliner {
    context: TransformContext,
}

impl BlockInliner {
    /// Inliner with its own empty symbol table
    #[inline]
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self {
            context: TransformContext::new(config),
        }
    }
}

impl RequestTransformer for BlockInliner {
    fn context(&mut self) -> &mut TransformContext {
        &mut self.context
    }

    fn transform_design_node(&mut self, node: &DesignNode) -> TransformResult<DesignNode> {
        let DesignNode::BlockReference(reference) = node else {
            return fold::transform_design_node(self, node);
        };

        self.context.enter()?;
        let resolved = self.transform_block_reference(reference);
        self.context.exit();

        let resolved = resolved?;
        Ok(match resolved.block() {
            Some(block) => {
                tracing::trace!(label = resolved.block_label(), "inlined block");
                block.definition().clone()
            }
            None => resolved.into(),
        })
    }
}
