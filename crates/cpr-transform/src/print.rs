//! Indented text rendering of design trees

use crate::visitor::{self, RequestVisitor};
use cpr_model::{DesignNode, ExperimentalRequest};

/// Renders design nodes one per line, children indented under parents
///
/// ```text
/// design_block main
///   replicate_block x3
///     block_reference -> strains
/// ```
#[derive(Debug, Clone)]
pub struct DesignPrinter {
    out: String,
    depth: usize,
    indent: usize,
}

impl Default for DesignPrinter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl DesignPrinter {
    /// Printer indenting `indent` spaces per level
    #[must_use]
    pub fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            indent,
        }
    }

    /// Render one tree
    #[must_use]
    pub fn render(node: &DesignNode) -> String {
        let mut printer = Self::default();
        visitor::walk_design_node(&mut printer, node);
        printer.finish()
    }

    /// Render every design block of `request`, in definition order
    #[must_use]
    pub fn render_request(request: &ExperimentalRequest) -> String {
        let mut printer = Self::default();
        for design in request.designs() {
            printer.line(&format!("design_block {}", design.label()));
            printer.depth += 1;
            visitor::walk_design_node(&mut printer, design.definition());
            printer.depth -= 1;
        }
        printer.finish()
    }

    /// Rendered text
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(&" ".repeat(self.depth * self.indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn describe(node: &DesignNode) -> String {
        match node {
            DesignNode::Block(block) => format!("design_block {}", block.label()),
            DesignNode::BlockReference(reference) => format!("block_reference -> {}", reference.block_label()),
            DesignNode::Sum(_) => "sum_block".to_string(),
            DesignNode::Product(_) => "product_block".to_string(),
            DesignNode::Replicate(block) => format!("replicate_block x{}", block.count()),
            DesignNode::Generate(block) => {
                let values: Vec<String> = block.values().iter().map(|v| v.value().to_string()).collect();
                format!("generate_block {} [{}]", block.attribute_name(), values.join(", "))
            }
            DesignNode::SubjectReference(reference) => format!("subject_reference {}", reference.subject_name()),
            DesignNode::TreatmentReference(reference) => {
                format!("treatment_reference {}", reference.treatment_name())
            }
            DesignNode::TreatmentValueReference(reference) => format!(
                "treatment_value_reference {} = {}",
                reference.treatment_name(),
                reference.value()
            ),
        }
    }
}

impl RequestVisitor for DesignPrinter {
    fn enter_node(&mut self, node: &DesignNode) -> bool {
        self.line(&Self::describe(node));
        self.depth += 1;
        true
    }

    fn leave_node(&mut self, _node: &DesignNode) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpr_model::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_tree_is_indented() {
        let node: DesignNode = ReplicateBlock::new(
            3,
            ProductBlock::new(vec![
                BlockReference::new("strains").into(),
                TreatmentReference::new("iptg").into(),
            ])
            .into(),
        )
        .into();

        assert_eq!(
            DesignPrinter::render(&node),
            "replicate_block x3\n  product_block\n    block_reference -> strains\n    treatment_reference iptg\n"
        );
    }

    #[test]
    fn request_blocks_in_order() {
        let request = ExperimentalRequest::new("cp", "http://cp", Version::new(1, 0, 0)).with_designs(vec![
            DesignBlock::new("a", SubjectReference::new("s").into()),
            DesignBlock::new("b", SumBlock::new(Vec::new()).into()),
        ]);

        assert_eq!(
            DesignPrinter::render_request(&request),
            "design_block a\n  subject_reference s\ndesign_block b\n  sum_block\n"
        );
    }
}
