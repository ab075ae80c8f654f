//! Simplification flattening
//!
//! A re-indented minified view: reference lines, class shells, attribute
//! lines, signatures with elided bodies, and comments, each on its own line.
//! Indentation restarts from zero and grows one unit per class level, four
//! spaces unless the caller picks otherwise.
//!
//! The emitted tokens carry ranges for spans that came from real source text
//! and no range for scaffolding (the synthesized indentation stays inside
//! the content token; closing delimiters are scaffolding).

pub mod python;
pub mod typescript;

use crate::ast::{NodeId, NodeKind, SourceTree};
use crate::flatten::tree_token::{TreeToken, TreeTokenKind};

pub const DEFAULT_INDENTATION: &str = "    ";

/// Shared emission state for the per-language simplifiers.
pub(crate) struct Emitter<'t> {
    pub tree: &'t SourceTree,
    pub indent_unit: String,
    pub level: usize,
    pub tokens: Vec<TreeToken>,
}

impl<'t> Emitter<'t> {
    pub fn new(tree: &'t SourceTree, indentation: Option<&str>) -> Self {
        Self {
            tree,
            indent_unit: indentation.unwrap_or(DEFAULT_INDENTATION).to_string(),
            level: 0,
            tokens: Vec::new(),
        }
    }

    /// One line of content derived from a node.
    pub fn line(&mut self, kind: TreeTokenKind, text: &str, node: NodeId) {
        let range = self.tree.node(node).range;
        self.push(kind, text, Some(node), Some(range));
    }

    /// One line of synthesized scaffolding.
    pub fn scaffold(&mut self, kind: TreeTokenKind, text: &str) {
        self.push(kind, text, None, None);
    }

    fn push(
        &mut self,
        kind: TreeTokenKind,
        text: &str,
        node: Option<NodeId>,
        range: Option<crate::position::Range>,
    ) {
        let mut rendered = self.indent_unit.repeat(self.level);
        rendered.push_str(text);
        rendered.push('\n');
        self.tokens.push(TreeToken::new(rendered, kind, range, node));
    }

    /// Multi-line comment text, re-indented line by line.
    pub fn comment(&mut self, node: NodeId) {
        let text = self.tree.text(node);
        let lines: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();
        let joined = lines.join(&format!("\n{}", self.indent_unit.repeat(self.level)));
        self.line(TreeTokenKind::Comments, &joined, node);
    }
}

/// The node kinds both language simplifiers render the same way.
pub(crate) fn emit_common(emitter: &mut Emitter<'_>, id: NodeId) -> bool {
    let node = emitter.tree.node(id);
    match &node.kind {
        NodeKind::Reference { text, .. } => {
            let text = text.trim().to_string();
            emitter.line(TreeTokenKind::References, &text, id);
            true
        }
        NodeKind::Comment { .. } => {
            emitter.comment(id);
            true
        }
        NodeKind::Attribute { .. } => {
            let text = emitter.tree.text(id).trim().to_string();
            emitter.line(TreeTokenKind::Attribute, &text, id);
            true
        }
        _ => false,
    }
}
