//! # outline-parser
//!
//! A language-agnostic structural analyzer for source files. One pass of
//! coarse lexing, one grammar-driven structural parse, and a flattening pass
//! turn a file into annotated spans covering its references, classes,
//! attributes, functions and comments — enough for documentation
//! summarization, code search and visualization, and deliberately nothing
//! like a compiler front end.
//!
//! ```text
//! source ─► lexer ─► tokens ─► parser ─► tree ─► flattener ─► tree-tokens
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use outline_parser::{parse_python, flatten_faithful, Fidelity};
//!
//! let tree = parse_python("class A:\n    def m(self):\n        pass\n")?;
//! let spans = flatten_faithful(&tree, Fidelity::FunctionsAndClasses, true);
//! ```
//!
//! Everything is synchronous and allocation-owned: a parse is a pure
//! function from source text to a [`SourceTree`], flattening a pure function
//! from tree to spans. Parallelism across files means independent calls.

pub mod ast;
pub mod error;
pub mod flatten;
pub mod lexing;
pub mod matchers;
pub mod parsing;
pub mod position;
pub mod testing;

pub use ast::{treeviz, Node, NodeId, NodeKind, SourceTree};
pub use error::{DetectorError, OutlineError, OutlineResult, ParseError, ParseResult};
pub use flatten::{
    flatten_faithful, flatten_faithful_subtree, flatten_python, flatten_python_subtree,
    flatten_replace_node, flatten_target_node, flatten_typescript, flatten_typescript_subtree,
    Fidelity, TreeToken, TreeTokenKind,
};
pub use lexing::{tokenize_python, tokenize_typescript, Token, TokenKind};
pub use matchers::{BracesMatcher, ExpressionMatcher, StringExpressionMatcher};
pub use parsing::{parse_python, parse_typescript, Detector, Symbol};
pub use position::{Index, Range, SourceLines};

/// The language a source file is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    TypeScript,
}

impl Language {
    /// Lex only.
    pub fn tokenize(self, source: &str) -> ParseResult<Vec<Token>> {
        match self {
            Language::Python => tokenize_python(source),
            Language::TypeScript => tokenize_typescript(source),
        }
    }

    /// Full structural parse.
    pub fn parse(self, source: &str) -> OutlineResult<SourceTree> {
        match self {
            Language::Python => parse_python(source),
            Language::TypeScript => parse_typescript(source),
        }
    }

    /// Simplification-mode flatten.
    pub fn flatten(self, tree: &SourceTree, indentation: Option<&str>) -> Vec<TreeToken> {
        match self {
            Language::Python => flatten_python(tree, indentation),
            Language::TypeScript => flatten_typescript(tree, indentation),
        }
    }
}
