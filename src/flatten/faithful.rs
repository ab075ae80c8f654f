//! Faithful flattening
//!
//! The invariant everything here serves: concatenating the emitted texts
//! reproduces the source bit for bit, at every fidelity level and flag
//! combination. The walker tracks the end of the last emitted span; before
//! any ranged emission the gap since then is flushed as an OTHERS span, and
//! the tail after the walk is flushed the same way.
//!
//! A function's doc comment needs care: when the function is emitted as one
//! whole span the comment text is already inside it, so emitting the comment
//! separately would duplicate text. The group walk decides which of the two
//! happens.

use crate::ast::{NodeId, NodeKind, SourceTree};
use crate::flatten::tree_token::{Fidelity, TreeToken, TreeTokenKind};
use crate::position::{Index, Range};

/// Flatten the whole tree.
pub fn flatten_faithful(
    tree: &SourceTree,
    fidelity: Fidelity,
    exclude_inner: bool,
) -> Vec<TreeToken> {
    let mut walker = Walker::new(tree, fidelity, exclude_inner, Index::new(0, 0));
    walker.walk(tree.root());
    walker.flush_to(tree.lines().end_index());
    walker.tokens
}

/// Flatten only the subtree rooted at `node`; the concatenation reproduces
/// exactly the text the node covers.
pub fn flatten_faithful_subtree(
    tree: &SourceTree,
    node: NodeId,
    fidelity: Fidelity,
    exclude_inner: bool,
) -> Vec<TreeToken> {
    let range = tree.node(node).range;
    let mut walker = Walker::new(tree, fidelity, exclude_inner, range.start);
    walker.walk(node);
    walker.flush_to(range.end);
    walker.tokens
}

/// Flatten the tree with `node`'s text replaced by a literal.
///
/// The replacement applies when the walk reaches the node itself; pick a
/// fidelity deep enough that its ancestors all open up.
pub fn flatten_replace_node(
    tree: &SourceTree,
    node: NodeId,
    replacement: &str,
    fidelity: Fidelity,
    exclude_inner: bool,
) -> Vec<TreeToken> {
    let mut walker = Walker::new(tree, fidelity, exclude_inner, Index::new(0, 0));
    walker.replace = Some((node, replacement.to_string()));
    walker.walk(tree.root());
    walker.flush_to(tree.lines().end_index());
    walker.tokens
}

/// Flatten the tree with `node` replaced by an empty placeholder; returns the
/// token list and the placeholder's index in it.
pub fn flatten_target_node(
    tree: &SourceTree,
    node: NodeId,
    fidelity: Fidelity,
    exclude_inner: bool,
) -> (Vec<TreeToken>, usize) {
    let mut walker = Walker::new(tree, fidelity, exclude_inner, Index::new(0, 0));
    walker.replace = Some((node, String::new()));
    walker.walk(tree.root());
    walker.flush_to(tree.lines().end_index());
    let target = walker.target_index.expect("target node visited by walk");
    (walker.tokens, target)
}

struct Walker<'t> {
    tree: &'t SourceTree,
    fidelity: Fidelity,
    exclude_inner: bool,
    tokens: Vec<TreeToken>,
    prev_end: Index,
    replace: Option<(NodeId, String)>,
    target_index: Option<usize>,
}

impl<'t> Walker<'t> {
    fn new(tree: &'t SourceTree, fidelity: Fidelity, exclude_inner: bool, start: Index) -> Self {
        Self {
            tree,
            fidelity,
            exclude_inner,
            tokens: Vec::new(),
            prev_end: start,
            replace: None,
            target_index: None,
        }
    }

    /// Emit an OTHERS span covering any gap up to `index`.
    fn flush_to(&mut self, index: Index) {
        if self.prev_end < index {
            let range = Range::new(self.prev_end, index);
            self.tokens.push(TreeToken::new(
                self.tree.lines().text_in(&range),
                TreeTokenKind::Others,
                Some(range),
                None,
            ));
            self.prev_end = index;
        }
    }

    fn emit(&mut self, kind: TreeTokenKind, range: Range, node: Option<NodeId>) {
        if range.is_empty() {
            return;
        }
        self.flush_to(range.start);
        self.tokens.push(TreeToken::new(
            self.tree.lines().text_in(&range),
            kind,
            Some(range),
            node,
        ));
        self.prev_end = range.end;
    }

    /// Whether the replacement intercepted this node.
    fn replaced(&mut self, id: NodeId) -> bool {
        let Some((target, text)) = &self.replace else {
            return false;
        };
        if *target != id {
            return false;
        }
        let node = self.tree.node(id);
        let text = text.clone();
        self.flush_to(node.range.start);
        self.target_index = Some(self.tokens.len());
        self.tokens.push(TreeToken::new(
            text,
            TreeTokenKind::for_node(&node.kind),
            None,
            Some(id),
        ));
        self.prev_end = node.range.end;
        true
    }

    fn walk(&mut self, id: NodeId) {
        if self.replaced(id) {
            return;
        }
        let node = self.tree.node(id);
        match &node.kind {
            NodeKind::TopLevel => {
                if self.fidelity == Fidelity::None {
                    self.emit(TreeTokenKind::TopLevel, node.range, Some(id));
                    return;
                }
                for &child in self.tree.children(id) {
                    self.walk(child);
                }
            }
            NodeKind::Reference { .. } => {
                self.emit(TreeTokenKind::References, node.range, Some(id));
            }
            NodeKind::Comment { .. } => {
                self.emit(TreeTokenKind::Comments, node.range, Some(id));
            }
            NodeKind::Attribute { .. } => {
                self.emit(TreeTokenKind::Attribute, node.range, Some(id));
            }
            NodeKind::Argument { .. } => {
                self.emit(TreeTokenKind::Argument, node.range, Some(id));
            }
            NodeKind::Class { .. } => self.walk_class(id),
            NodeKind::FunctionGroup => self.walk_group(id),
            NodeKind::Function { .. } => self.walk_function(id, None),
            NodeKind::FunctionDeclaration => self.walk_declaration(id),
        }
    }

    fn walk_class(&mut self, id: NodeId) {
        let node = self.tree.node(id);
        if self.fidelity == Fidelity::TopLevelOnly {
            self.emit(TreeTokenKind::Class, node.range, Some(id));
            return;
        }
        let Some(inner) = node.inner_range else {
            self.emit(TreeTokenKind::Class, node.range, Some(id));
            return;
        };
        self.emit(TreeTokenKind::Class, Range::new(node.range.start, inner.start), Some(id));
        for &child in self.tree.children(id) {
            self.walk(child);
        }
        self.flush_to(inner.end);
        self.emit(TreeTokenKind::Class, Range::new(inner.end, node.range.end), Some(id));
    }

    fn walk_group(&mut self, id: NodeId) {
        let node = self.tree.node(id);
        if self.fidelity == Fidelity::TopLevelOnly {
            self.emit(TreeTokenKind::FunctionGroup, node.range, Some(id));
            return;
        }
        let children = self.tree.children(id);
        let function = *children.last().expect("group always holds its function");
        let doc = (children.len() == 2).then(|| children[0]);

        let function_whole =
            self.fidelity == Fidelity::FunctionsAndClasses && !self.exclude_inner;
        if function_whole {
            // One span covers the group: a preceding doc comment and the
            // function text both land inside it, so the comment is skipped.
            self.emit(TreeTokenKind::Function, node.range, Some(function));
            return;
        }

        match doc {
            Some(doc_id) => {
                let doc_range = self.tree.node(doc_id).range;
                let function_range = self.tree.node(function).range;
                if doc_range.end <= function_range.start {
                    // Doc comment written before the function.
                    self.walk(doc_id);
                    self.walk_function(function, None);
                } else {
                    // Doc comment lifted out of the body; it still lives
                    // inside the function's text.
                    self.walk_function(function, Some(doc_id));
                }
            }
            None => self.walk_function(function, None),
        }
    }

    fn walk_function(&mut self, id: NodeId, lifted_doc: Option<NodeId>) {
        if self.replaced(id) {
            return;
        }
        let node = self.tree.node(id);
        let Some(inner) = node.inner_range else {
            self.emit(TreeTokenKind::Function, node.range, Some(id));
            return;
        };

        // Header region.
        match self.fidelity {
            Fidelity::FunctionsAndClasses => {
                self.emit(
                    TreeTokenKind::Function,
                    Range::new(node.range.start, inner.start),
                    Some(id),
                );
            }
            _ => {
                let declaration = self
                    .tree
                    .children(id)
                    .iter()
                    .copied()
                    .find(|&c| matches!(self.tree.node(c).kind, NodeKind::FunctionDeclaration));
                if let Some(decl) = declaration {
                    self.walk_declaration(decl);
                    let decl_end = self.tree.node(decl).range.end;
                    self.emit(TreeTokenKind::Function, Range::new(decl_end, inner.start), Some(id));
                } else {
                    self.emit(
                        TreeTokenKind::Function,
                        Range::new(node.range.start, inner.start),
                        Some(id),
                    );
                }
            }
        }

        // Body region.
        let body_whole = !self.exclude_inner && self.fidelity != Fidelity::Everything;
        if body_whole {
            // The body text goes out as one span; a lifted doc comment is
            // covered by it.
            self.emit(TreeTokenKind::Function, inner, Some(id));
        } else {
            if let Some(doc) = lifted_doc {
                self.walk(doc);
            }
            if self.fidelity == Fidelity::Everything {
                for &child in self.tree.children(id) {
                    if matches!(self.tree.node(child).kind, NodeKind::Comment { .. }) {
                        self.walk(child);
                    }
                }
            }
            // Whatever body text remains becomes an OTHERS gap before the
            // suffix.
            self.flush_to(inner.end);
        }

        // Suffix region.
        self.emit(TreeTokenKind::Function, Range::new(inner.end, node.range.end), Some(id));
    }

    fn walk_declaration(&mut self, id: NodeId) {
        if self.replaced(id) {
            return;
        }
        let node = self.tree.node(id);
        let mut cursor = node.range.start;
        for &child in self.tree.children(id) {
            let child_range = self.tree.node(child).range;
            self.emit(
                TreeTokenKind::FunctionDefinition,
                Range::new(cursor, child_range.start),
                Some(id),
            );
            self.walk(child);
            cursor = child_range.end;
        }
        self.emit(
            TreeTokenKind::FunctionDefinition,
            Range::new(cursor, node.range.end),
            Some(id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse_python, parse_typescript};

    const PY: &str = "import os\n\nclass A:\n    x: int = 1\n    def m(self, n: int) -> bool:\n        \"\"\"doc\"\"\"\n        return n > 0\n";
    const TS: &str = "/** hello */\nfunction f() {}\n";

    fn rebuild(tokens: &[TreeToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn all_fidelities() -> [Fidelity; 5] {
        [
            Fidelity::None,
            Fidelity::TopLevelOnly,
            Fidelity::FunctionsAndClasses,
            Fidelity::FunctionsAndClassesAndArguments,
            Fidelity::Everything,
        ]
    }

    #[test]
    fn test_roundtrip_every_mode_python() {
        let tree = parse_python(PY).unwrap();
        for fidelity in all_fidelities() {
            for exclude in [false, true] {
                let tokens = flatten_faithful(&tree, fidelity, exclude);
                assert_eq!(
                    rebuild(&tokens),
                    PY,
                    "round-trip failed at {fidelity:?} exclude={exclude}"
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_every_mode_typescript() {
        let source = "import {X} from \"./mod\";\nclass B { y: string = \"hi\"; fn(a: number): void { return; } }\n";
        let tree = parse_typescript(source).unwrap();
        for fidelity in all_fidelities() {
            for exclude in [false, true] {
                let tokens = flatten_faithful(&tree, fidelity, exclude);
                assert_eq!(
                    rebuild(&tokens),
                    source,
                    "round-trip failed at {fidelity:?} exclude={exclude}"
                );
            }
        }
    }

    #[test]
    fn test_none_is_one_span() {
        let tree = parse_python(PY).unwrap();
        let tokens = flatten_faithful(&tree, Fidelity::None, false);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TreeTokenKind::TopLevel);
    }

    #[test]
    fn test_doc_comment_skipped_when_function_whole() {
        let tree = parse_typescript(TS).unwrap();
        let tokens = flatten_faithful(&tree, Fidelity::FunctionsAndClasses, false);
        assert!(
            !tokens.iter().any(|t| t.kind == TreeTokenKind::Comments),
            "doc comment must be covered by the function span"
        );
        let function = tokens
            .iter()
            .find(|t| t.kind == TreeTokenKind::Function)
            .expect("function span");
        assert!(function.text.contains("/** hello */"));
        assert!(function.text.contains("function f()"));
    }

    #[test]
    fn test_doc_comment_emitted_when_inner_excluded() {
        let tree = parse_typescript(TS).unwrap();
        let tokens = flatten_faithful(&tree, Fidelity::FunctionsAndClasses, true);
        assert!(tokens.iter().any(|t| t.kind == TreeTokenKind::Comments));
    }

    #[test]
    fn test_arguments_fidelity_exposes_arguments() {
        let tree = parse_python(PY).unwrap();
        let tokens =
            flatten_faithful(&tree, Fidelity::FunctionsAndClassesAndArguments, true);
        let args: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TreeTokenKind::Argument)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(args, vec!["self", " n: int"]);
    }

    #[test]
    fn test_subtree_reproduces_node_text() {
        let tree = parse_python(PY).unwrap();
        let class = tree.find("Class").unwrap();
        let tokens = flatten_faithful_subtree(&tree, class, Fidelity::Everything, true);
        assert_eq!(rebuild(&tokens), tree.text(class));
    }

    #[test]
    fn test_replace_node() {
        let tree = parse_python(PY).unwrap();
        let reference = tree.find("Reference").unwrap();
        let tokens = flatten_replace_node(&tree, reference, "<REF>", Fidelity::Everything, true);
        let rebuilt = rebuild(&tokens);
        assert!(rebuilt.contains("<REF>"));
        assert!(!rebuilt.contains("import os"));
        let replaced = tokens.iter().find(|t| t.text == "<REF>").unwrap();
        assert!(replaced.range.is_none());
    }

    #[test]
    fn test_target_node_reports_index() {
        let tree = parse_python(PY).unwrap();
        let reference = tree.find("Reference").unwrap();
        let (tokens, index) = flatten_target_node(&tree, reference, Fidelity::Everything, true);
        assert_eq!(tokens[index].text, "");
        assert_eq!(tokens[index].kind, TreeTokenKind::References);
    }
}
