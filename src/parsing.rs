//! Structural parsing
//!
//! The [`driver`] owns the grammar mechanics and is language-agnostic; the
//! per-language [`Detector`] implementations classify token runs into grammar
//! symbols through the directive protocol in [`directive`]. Parsing is a pure
//! function of the source text; parser state lives only for the duration of
//! one parse.

pub mod detector;
pub mod directive;
pub mod driver;
pub mod grammar;
pub mod python;
pub mod typescript;

pub use detector::{Detector, RunContext};
pub use directive::{NodeSeed, SymbolDirective, SymbolSpec, TokenRange};
pub use driver::parse_tokens;
pub use grammar::Symbol;
pub use python::PythonDetector;
pub use typescript::TypeScriptDetector;

use crate::ast::SourceTree;
use crate::error::OutlineResult;
use crate::lexing;
use crate::position::SourceLines;

/// Full structural parse of Python source.
pub fn parse_python(source: &str) -> OutlineResult<SourceTree> {
    let lines = SourceLines::new(source);
    let tokens = lexing::run_lexer(&mut lexing::PythonLexerRules::new(), &lines)?;
    let mut detector = PythonDetector::new(&lines)?;
    parse_tokens(lines, tokens, &mut detector)
}

/// Full structural parse of TypeScript-like source.
pub fn parse_typescript(source: &str) -> OutlineResult<SourceTree> {
    let lines = SourceLines::new(source);
    let tokens = lexing::run_lexer(&mut lexing::TypeScriptLexerRules::new(), &lines)?;
    let mut detector = TypeScriptDetector::new(&lines);
    parse_tokens(lines, tokens, &mut detector)
}
