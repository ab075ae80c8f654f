//! Tree flattening
//!
//! Two families of flatteners over a parsed tree:
//!
//! - [`faithful`] - exact-source spans at a chosen fidelity; concatenation
//!   reproduces the source bit for bit
//! - [`simplify`] - a re-indented minified view per language
//!
//! Both read the tree and never mutate it.

pub mod faithful;
pub mod simplify;
pub mod tree_token;

pub use faithful::{
    flatten_faithful, flatten_faithful_subtree, flatten_replace_node, flatten_target_node,
};
pub use simplify::python::{flatten_python, flatten_python_subtree};
pub use simplify::typescript::{flatten_typescript, flatten_typescript_subtree};
pub use simplify::DEFAULT_INDENTATION;
pub use tree_token::{Fidelity, TreeToken, TreeTokenKind};
