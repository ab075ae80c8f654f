//! Arena-backed AST node model
//!
//! Every node carries:
//! - `range` - the outer range it covers in the source
//! - `inner_range` - optionally, a tighter range covering "the body"; the
//!   prefix is everything before it, the suffix everything after
//! - `children` - ordered child ids; insertion order is the sibling rank
//! - `parent` - non-owning back reference
//!
//! Nodes are created during parsing and not mutated afterwards, except for
//! attachment bookkeeping and the function body-nonempty flag, both of which
//! go through the methods here.

use crate::position::{Range, SourceLines};

/// Typed index into the tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// The variant tag and per-variant payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root only.
    TopLevel,
    /// One import/export statement.
    Reference {
        /// The statement text as written.
        text: String,
        /// Stable identifier: `local-file://…` or `environment://…`.
        path: String,
    },
    Class {
        /// Kind keyword when the language distinguishes (`class`,
        /// `interface`); absent otherwise.
        class_type: Option<String>,
        /// Header text up to the body opener.
        definition_text: String,
    },
    Function {
        definition_text: String,
        return_type: Option<String>,
        /// True when the body held anything beyond filler and the doc
        /// comment.
        has_body: bool,
    },
    /// Synthetic wrapper bundling a function with its optional doc comment.
    FunctionGroup,
    /// The header of a function; children are its arguments.
    FunctionDeclaration,
    Argument {
        name: String,
        arg_type: Option<String>,
    },
    Attribute {
        name: String,
        attr_type: Option<String>,
    },
    Comment {
        multiline: bool,
        /// Contents with the comment delimiters stripped.
        contents: String,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::TopLevel => "TopLevel",
            NodeKind::Reference { .. } => "Reference",
            NodeKind::Class { .. } => "Class",
            NodeKind::Function { .. } => "Function",
            NodeKind::FunctionGroup => "FunctionGroup",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::Argument { .. } => "Argument",
            NodeKind::Attribute { .. } => "Attribute",
            NodeKind::Comment { .. } => "Comment",
        }
    }

    /// Short human label for tree dumps.
    pub fn label(&self) -> String {
        match self {
            NodeKind::TopLevel => String::new(),
            NodeKind::Reference { path, .. } => path.clone(),
            NodeKind::Class {
                definition_text, ..
            } => definition_text.trim().to_string(),
            NodeKind::Function {
                definition_text, ..
            } => definition_text.trim().to_string(),
            NodeKind::FunctionGroup => String::new(),
            NodeKind::FunctionDeclaration => String::new(),
            NodeKind::Argument { name, .. } => name.clone(),
            NodeKind::Attribute { name, .. } => name.clone(),
            NodeKind::Comment { contents, .. } => contents.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range,
    pub inner_range: Option<Range>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub sibling_rank: usize,
}

/// The parsed tree: node arena plus the normalized source it indexes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    lines: SourceLines,
    nodes: Vec<Node>,
}

impl SourceTree {
    /// A tree with just the root, covering the whole source.
    pub fn new(lines: SourceLines) -> Self {
        let root = Node {
            kind: NodeKind::TopLevel,
            range: lines.full_range(),
            inner_range: None,
            parent: None,
            children: Vec::new(),
            sibling_rank: 0,
        };
        Self {
            lines,
            nodes: vec![root],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn lines(&self) -> &SourceLines {
        &self.lines
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // there is always a root
    }

    /// Create an unattached node. Attach it with [`SourceTree::attach`] or
    /// [`SourceTree::insert_child`]; detached nodes must not leak out of the
    /// parser.
    pub fn create(&mut self, kind: NodeKind, range: Range) -> NodeId {
        self.nodes.push(Node {
            kind,
            range,
            inner_range: None,
            parent: None,
            children: Vec::new(),
            sibling_rank: 0,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Attach a created node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        let rank = self.nodes[parent.0].children.len();
        self.nodes[parent.0].children.push(child);
        let node = &mut self.nodes[child.0];
        debug_assert!(node.parent.is_none(), "node attached twice");
        node.parent = Some(parent);
        node.sibling_rank = rank;
    }

    /// Attach a created node at a given rank, shifting later siblings.
    pub fn insert_child(&mut self, parent: NodeId, rank: usize, child: NodeId) {
        self.nodes[parent.0].children.insert(rank, child);
        let node = &mut self.nodes[child.0];
        debug_assert!(node.parent.is_none(), "node attached twice");
        node.parent = Some(parent);
        node.sibling_rank = rank;
        let later: Vec<NodeId> = self.nodes[parent.0].children[rank + 1..].to_vec();
        for (offset, sibling) in later.into_iter().enumerate() {
            self.nodes[sibling.0].sibling_rank = rank + 1 + offset;
        }
    }

    pub fn set_inner_range(&mut self, id: NodeId, inner: Range) {
        let node = &mut self.nodes[id.0];
        debug_assert!(
            node.range.contains(&inner),
            "inner range {} escapes node range {}",
            inner,
            node.range
        );
        node.inner_range = Some(inner);
    }

    /// Widen a node's range; used when a wrapper absorbs a neighbor.
    pub fn extend_range(&mut self, id: NodeId, range: Range) {
        let node = &mut self.nodes[id.0];
        node.range = Range::new(node.range.start.min(range.start), node.range.end.max(range.end));
    }

    /// Assert the body-nonempty flag on a function node.
    pub fn mark_function_has_body(&mut self, id: NodeId) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Function { has_body, .. } => *has_body = true,
            other => panic!("has-body flag on a {} node", other.name()),
        }
    }

    /// Number of ancestors between a node and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The source text the node covers.
    pub fn text(&self, id: NodeId) -> String {
        self.lines.text_in(&self.node(id).range)
    }

    /// Pre-order walk of the whole tree.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        order
    }

    /// Find the first node of a kind name, depth first. Test convenience.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.walk().into_iter().find(|&id| self.node(id).kind.name() == name)
    }

    /// Structural sanity: containment, sibling ordering, inner ranges,
    /// wrapper shapes. Returns the first violation found.
    ///
    /// A doc comment lifted out of a function body legitimately sits inside
    /// its sibling function's range; that one overlap is allowed.
    pub fn validate(&self) -> Result<(), String> {
        for &id in &self.walk() {
            let node = self.node(id);
            if let Some(parent) = node.parent {
                let parent_node = self.node(parent);
                if !parent_node.range.contains(&node.range) {
                    return Err(format!(
                        "{} range {} escapes parent {} range {}",
                        node.kind.name(),
                        node.range,
                        parent_node.kind.name(),
                        parent_node.range
                    ));
                }
            }
            if let Some(inner) = &node.inner_range {
                if !node.range.contains(inner) {
                    return Err(format!(
                        "{} inner range {} escapes its range {}",
                        node.kind.name(),
                        inner,
                        node.range
                    ));
                }
            }
            let lifted_doc = matches!(node.kind, NodeKind::FunctionGroup);
            for pair in node.children.windows(2) {
                let (a, b) = (self.node(pair[0]), self.node(pair[1]));
                let doc_overlap = lifted_doc
                    && matches!(a.kind, NodeKind::Comment { .. })
                    && b.range.contains(&a.range);
                if !doc_overlap && a.range.end > b.range.start {
                    return Err(format!(
                        "siblings {} {} and {} {} overlap",
                        a.kind.name(),
                        a.range,
                        b.kind.name(),
                        b.range
                    ));
                }
            }
            if let NodeKind::FunctionGroup = node.kind {
                let shape_ok = match node.children.as_slice() {
                    [only] => matches!(self.node(*only).kind, NodeKind::Function { .. }),
                    [first, second] => {
                        matches!(self.node(*first).kind, NodeKind::Comment { .. })
                            && matches!(self.node(*second).kind, NodeKind::Function { .. })
                    }
                    _ => false,
                };
                if !shape_ok {
                    return Err("function group is not [comment?] + function".to_string());
                }
            }
            for (rank, &child) in node.children.iter().enumerate() {
                if self.node(child).sibling_rank != rank {
                    return Err(format!("sibling rank drift under {}", node.kind.name()));
                }
                if self.node(child).parent != Some(id) {
                    return Err(format!("parent drift under {}", node.kind.name()));
                }
            }
        }
        Ok(())
    }
}
