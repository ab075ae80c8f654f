//! Python simplification
//!
//! Indentation carries the structure, so class shells are just the header
//! line with their children indented one level deeper; function bodies
//! reduce to the signature line.

use crate::ast::{NodeId, NodeKind, SourceTree};
use crate::flatten::simplify::{emit_common, Emitter};
use crate::flatten::tree_token::{TreeToken, TreeTokenKind};

/// Flatten a Python tree to its re-indented minified view.
pub fn flatten_python(tree: &SourceTree, indentation: Option<&str>) -> Vec<TreeToken> {
    let mut emitter = Emitter::new(tree, indentation);
    for &child in tree.children(tree.root()) {
        emit(&mut emitter, child);
    }
    emitter.tokens
}

/// Flatten only the subtree at `node`, preceded by its ancestor headers at
/// their indent levels.
pub fn flatten_python_subtree(
    tree: &SourceTree,
    node: NodeId,
    indentation: Option<&str>,
) -> Vec<TreeToken> {
    let mut emitter = Emitter::new(tree, indentation);
    let mut chain = Vec::new();
    let mut current = tree.node(node).parent;
    while let Some(ancestor) = current {
        chain.push(ancestor);
        current = tree.node(ancestor).parent;
    }
    for &ancestor in chain.iter().rev() {
        if let NodeKind::Class {
            definition_text, ..
        } = &tree.node(ancestor).kind
        {
            let text = definition_text.trim().to_string();
            emitter.line(TreeTokenKind::Class, &text, ancestor);
            emitter.level += 1;
        }
    }
    emit(&mut emitter, node);
    emitter.tokens
}

fn emit(emitter: &mut Emitter<'_>, id: NodeId) {
    if emit_common(emitter, id) {
        return;
    }
    let node = emitter.tree.node(id);
    match &node.kind {
        NodeKind::Class {
            definition_text, ..
        } => {
            let text = definition_text.trim().to_string();
            emitter.line(TreeTokenKind::Class, &text, id);
            emitter.level += 1;
            for &child in emitter.tree.children(id) {
                emit(emitter, child);
            }
            emitter.level -= 1;
        }
        NodeKind::FunctionGroup => {
            for &child in emitter.tree.children(id) {
                emit(emitter, child);
            }
        }
        NodeKind::Function {
            definition_text, ..
        } => {
            let text = definition_text.trim().to_string();
            emitter.line(TreeTokenKind::Function, &text, id);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_python;

    fn render(tokens: &[TreeToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_class_with_method() {
        let source = "class A:\n    x: int = 1\n    def m(self, n: int) -> bool:\n        \"\"\"doc\"\"\"\n        return n > 0\n";
        let tree = parse_python(source).unwrap();
        let out = render(&flatten_python(&tree, None));
        assert_eq!(
            out,
            "class A:\n    x: int = 1\n    \"\"\"doc\"\"\"\n    def m(self, n: int) -> bool:\n"
        );
    }

    #[test]
    fn test_custom_indentation() {
        let source = "class A:\n    def m(self):\n        pass\n";
        let tree = parse_python(source).unwrap();
        let out = render(&flatten_python(&tree, Some("  ")));
        assert_eq!(out, "class A:\n  def m(self):\n");
    }

    #[test]
    fn test_references_and_comments() {
        let source = "import os\n# helper\nx = 1\n";
        let tree = parse_python(source).unwrap();
        let out = render(&flatten_python(&tree, None));
        assert_eq!(out, "import os\n# helper\n");
    }

    #[test]
    fn test_subtree_with_ancestor_headers() {
        let source = "class A:\n    def m(self):\n        pass\n";
        let tree = parse_python(source).unwrap();
        let group = tree.find("FunctionGroup").unwrap();
        let out = render(&flatten_python_subtree(&tree, group, None));
        assert_eq!(out, "class A:\n    def m(self):\n");
    }
}
