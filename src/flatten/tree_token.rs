//! Tree-token model
//!
//! The flatteners turn a parsed tree into a flat sequence of labeled text
//! spans. Consumers (summarizers, search indexers, the visualizer) only ever
//! see this sequence, never the tree itself.

use crate::ast::{NodeId, NodeKind};
use crate::position::Range;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeTokenKind {
    TopLevel,
    References,
    FunctionGroup,
    Function,
    FunctionDefinition,
    Comments,
    Class,
    Attribute,
    Argument,
    /// Source text not owned by any structural node: gaps, fillers,
    /// scaffolding.
    Others,
}

impl TreeTokenKind {
    pub fn for_node(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::TopLevel => TreeTokenKind::TopLevel,
            NodeKind::Reference { .. } => TreeTokenKind::References,
            NodeKind::Class { .. } => TreeTokenKind::Class,
            NodeKind::Function { .. } => TreeTokenKind::Function,
            NodeKind::FunctionGroup => TreeTokenKind::FunctionGroup,
            NodeKind::FunctionDeclaration => TreeTokenKind::FunctionDefinition,
            NodeKind::Argument { .. } => TreeTokenKind::Argument,
            NodeKind::Attribute { .. } => TreeTokenKind::Attribute,
            NodeKind::Comment { .. } => TreeTokenKind::Comments,
        }
    }
}

/// One flattened span.
///
/// `range` is present when the text is real source text; scaffolding and
/// replacement text carry no range. `node` is an in-process back reference
/// for interactive consumers and is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeToken {
    pub text: String,
    pub kind: TreeTokenKind,
    pub range: Option<Range>,
    #[serde(skip)]
    pub node: Option<NodeId>,
}

impl TreeToken {
    pub fn new(text: String, kind: TreeTokenKind, range: Option<Range>, node: Option<NodeId>) -> Self {
        Self {
            text,
            kind,
            range,
            node,
        }
    }
}

/// How much structure the faithful flattener exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fidelity {
    /// The whole source as one span.
    None,
    /// Top-level statements, each as one span.
    TopLevelOnly,
    /// Classes open up; functions stay opaque.
    FunctionsAndClasses,
    /// Function declarations open up into argument spans.
    FunctionsAndClassesAndArguments,
    /// Body comments too.
    Everything,
}
