//! The structural tree
//!
//! Nodes live in an arena owned by [`SourceTree`]; identity is a typed index.
//! Parents own their children through the child-id lists, children point back
//! with a plain id, so the parent/child cycle never turns into an ownership
//! cycle.

pub mod node;
pub mod treeviz;

pub use node::{Node, NodeId, NodeKind, SourceTree};
pub use treeviz::treeviz;
