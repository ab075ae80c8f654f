//! Fluent assertions over parsed trees
//!
//! Test support for this crate and for downstream language packs: deep
//! structural checks that read as a description of the expected tree.
//!
//! ```ignore
//! assert_tree(&tree).child_count(1).child(0, |class| {
//!     class
//!         .assert_class()
//!         .definition_contains("class A")
//!         .child(0, |attr| {
//!             attr.assert_attribute().name("x").attr_type("int");
//!         });
//! });
//! ```

use crate::ast::{NodeId, NodeKind, SourceTree};

/// Entry point: assertions rooted at the tree's top level.
pub fn assert_tree(tree: &SourceTree) -> NodeAssert<'_> {
    NodeAssert {
        tree,
        id: tree.root(),
    }
}

#[derive(Clone, Copy)]
pub struct NodeAssert<'t> {
    tree: &'t SourceTree,
    id: NodeId,
}

impl<'t> NodeAssert<'t> {
    fn node(&self) -> &'t crate::ast::Node {
        self.tree.node(self.id)
    }

    #[track_caller]
    pub fn kind(self, name: &str) -> Self {
        assert_eq!(
            self.node().kind.name(),
            name,
            "expected a {name} node, found {}",
            self.node().kind.name()
        );
        self
    }

    #[track_caller]
    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.tree.children(self.id).len(),
            expected,
            "child count of {} node",
            self.node().kind.name()
        );
        self
    }

    #[track_caller]
    pub fn child(self, rank: usize, check: impl FnOnce(NodeAssert<'t>)) -> Self {
        let children = self.tree.children(self.id);
        assert!(
            rank < children.len(),
            "{} node has no child at rank {rank}",
            self.node().kind.name()
        );
        check(NodeAssert {
            tree: self.tree,
            id: children[rank],
        });
        self
    }

    pub fn assert_reference(self) -> ReferenceAssert<'t> {
        self.kind("Reference");
        ReferenceAssert(self)
    }

    pub fn assert_class(self) -> ClassAssert<'t> {
        self.kind("Class");
        ClassAssert(self)
    }

    pub fn assert_group(self) -> Self {
        self.kind("FunctionGroup")
    }

    pub fn assert_function(self) -> FunctionAssert<'t> {
        self.kind("Function");
        FunctionAssert(self)
    }

    pub fn assert_declaration(self) -> Self {
        self.kind("FunctionDeclaration")
    }

    pub fn assert_argument(self) -> ArgumentAssert<'t> {
        self.kind("Argument");
        ArgumentAssert(self)
    }

    pub fn assert_attribute(self) -> AttributeAssert<'t> {
        self.kind("Attribute");
        AttributeAssert(self)
    }

    pub fn assert_comment(self) -> CommentAssert<'t> {
        self.kind("Comment");
        CommentAssert(self)
    }
}

pub struct ReferenceAssert<'t>(NodeAssert<'t>);

impl<'t> ReferenceAssert<'t> {
    #[track_caller]
    pub fn path(self, expected: &str) -> Self {
        let NodeKind::Reference { path, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(path, expected, "reference path");
        self
    }

    #[track_caller]
    pub fn text(self, expected: &str) -> Self {
        let NodeKind::Reference { text, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(text, expected, "reference text");
        self
    }
}

pub struct ClassAssert<'t>(NodeAssert<'t>);

impl<'t> ClassAssert<'t> {
    #[track_caller]
    pub fn definition_contains(self, needle: &str) -> Self {
        let NodeKind::Class {
            definition_text, ..
        } = &self.0.node().kind
        else {
            unreachable!()
        };
        assert!(
            definition_text.contains(needle),
            "class definition {definition_text:?} does not contain {needle:?}"
        );
        self
    }

    #[track_caller]
    pub fn class_type(self, expected: Option<&str>) -> Self {
        let NodeKind::Class { class_type, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(class_type.as_deref(), expected, "class type");
        self
    }

    #[track_caller]
    pub fn has_inner_range(self) -> Self {
        assert!(self.0.node().inner_range.is_some(), "class without body range");
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        ClassAssert(self.0.child_count(expected))
    }

    pub fn child(self, rank: usize, check: impl FnOnce(NodeAssert<'t>)) -> Self {
        ClassAssert(self.0.child(rank, check))
    }
}

pub struct FunctionAssert<'t>(NodeAssert<'t>);

impl<'t> FunctionAssert<'t> {
    #[track_caller]
    pub fn definition_contains(self, needle: &str) -> Self {
        let NodeKind::Function {
            definition_text, ..
        } = &self.0.node().kind
        else {
            unreachable!()
        };
        assert!(
            definition_text.contains(needle),
            "function definition {definition_text:?} does not contain {needle:?}"
        );
        self
    }

    #[track_caller]
    pub fn has_body(self, expected: bool) -> Self {
        let NodeKind::Function { has_body, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(*has_body, expected, "function body flag");
        self
    }

    #[track_caller]
    pub fn return_type(self, expected: Option<&str>) -> Self {
        let NodeKind::Function { return_type, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(return_type.as_deref(), expected, "function return type");
        self
    }

    /// Assertions over the declaration child's arguments.
    #[track_caller]
    pub fn arguments(self, check: impl FnOnce(Vec<ArgumentAssert<'t>>)) -> Self {
        let declaration = self
            .0
            .tree
            .children(self.0.id)
            .iter()
            .copied()
            .find(|&c| matches!(self.0.tree.node(c).kind, NodeKind::FunctionDeclaration))
            .expect("function without declaration child");
        let args = self
            .0
            .tree
            .children(declaration)
            .iter()
            .copied()
            .filter(|&c| matches!(self.0.tree.node(c).kind, NodeKind::Argument { .. }))
            .map(|id| {
                ArgumentAssert(NodeAssert {
                    tree: self.0.tree,
                    id,
                })
            })
            .collect();
        check(args);
        self
    }

    pub fn child(self, rank: usize, check: impl FnOnce(NodeAssert<'t>)) -> Self {
        FunctionAssert(self.0.child(rank, check))
    }
}

pub struct ArgumentAssert<'t>(NodeAssert<'t>);

impl<'t> ArgumentAssert<'t> {
    #[track_caller]
    pub fn name(self, expected: &str) -> Self {
        let NodeKind::Argument { name, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(name, expected, "argument name");
        self
    }

    #[track_caller]
    pub fn arg_type(self, expected: Option<&str>) -> Self {
        let NodeKind::Argument { arg_type, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(arg_type.as_deref(), expected, "argument type");
        self
    }
}

pub struct AttributeAssert<'t>(NodeAssert<'t>);

impl<'t> AttributeAssert<'t> {
    #[track_caller]
    pub fn name(self, expected: &str) -> Self {
        let NodeKind::Attribute { name, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(name, expected, "attribute name");
        self
    }

    #[track_caller]
    pub fn attr_type(self, expected: Option<&str>) -> Self {
        let NodeKind::Attribute { attr_type, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(attr_type.as_deref(), expected, "attribute type");
        self
    }
}

pub struct CommentAssert<'t>(NodeAssert<'t>);

impl<'t> CommentAssert<'t> {
    #[track_caller]
    pub fn contents(self, expected: &str) -> Self {
        let NodeKind::Comment { contents, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(contents, expected, "comment contents");
        self
    }

    #[track_caller]
    pub fn multiline(self, expected: bool) -> Self {
        let NodeKind::Comment { multiline, .. } = &self.0.node().kind else {
            unreachable!()
        };
        assert_eq!(*multiline, expected, "comment multiline flag");
        self
    }
}
