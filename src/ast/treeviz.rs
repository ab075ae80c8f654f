//! One-line-per-node tree dump
//!
//! Debug view of a parsed tree: nesting as 2-space indentation, an icon per
//! node kind, the label truncated to 30 characters. Handy in test failures
//! and while developing detectors.

use crate::ast::node::{NodeId, NodeKind, SourceTree};

fn icon(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::TopLevel => "⧉",
        NodeKind::Reference { .. } => "⮎",
        NodeKind::Class { .. } => "◇",
        NodeKind::Function { .. } => "ƒ",
        NodeKind::FunctionGroup => "⧈",
        NodeKind::FunctionDeclaration => "⊢",
        NodeKind::Argument { .. } => "·",
        NodeKind::Attribute { .. } => "≔",
        NodeKind::Comment { .. } => "\"",
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated: String = s.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

/// Render the whole tree, one line per node.
pub fn treeviz(tree: &SourceTree) -> String {
    let mut out = String::new();
    render(tree, tree.root(), &mut out);
    out
}

fn render(tree: &SourceTree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    let label = node.kind.label().replace('\n', "↵");
    out.push_str(&"  ".repeat(tree.depth(id)));
    out.push_str(icon(&node.kind));
    out.push(' ');
    out.push_str(node.kind.name());
    if !label.is_empty() {
        out.push(' ');
        out.push_str(&truncate(&label, 30));
    }
    out.push('\n');
    for &child in tree.children(id) {
        render(tree, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Index, Range, SourceLines};

    #[test]
    fn test_treeviz_lines_and_indent() {
        let mut tree = SourceTree::new(SourceLines::new("import os\n"));
        let reference = tree.create(
            NodeKind::Reference {
                text: "import os".into(),
                path: "environment://os".into(),
            },
            Range::new(Index::new(0, 0), Index::new(1, 0)),
        );
        let root = tree.root();
        tree.attach(root, reference);

        let viz = treeviz(&tree);
        let lines: Vec<&str> = viz.lines().collect();
        assert_eq!(lines[0], "⧉ TopLevel");
        assert_eq!(lines[1], "  ⮎ Reference environment://os");
    }

    #[test]
    fn test_long_labels_truncate() {
        let long = "x".repeat(64);
        assert_eq!(truncate(&long, 30).chars().count(), 31);
        assert!(truncate(&long, 30).ends_with('…'));
    }
}
