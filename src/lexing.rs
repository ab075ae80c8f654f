//! Lexical analysis
//!
//! One pass, character at a time, complete before parsing starts. The
//! framework in [`machine`] owns the buffer discipline; the per-language rule
//! sets in [`python`] and [`typescript`] own the state machines.
//!
//! Tokens carry flat character spans over the normalized source (every
//! physical line newline-terminated); concatenating their texts reproduces
//! that source exactly.

pub mod machine;
pub mod python;
pub mod token;
pub mod typescript;

pub use machine::{run_lexer, LexerRules, SplitDirective};
pub use python::PythonLexerRules;
pub use token::{Token, TokenKind};
pub use typescript::TypeScriptLexerRules;

use crate::error::ParseResult;
use crate::position::SourceLines;

/// Lex Python source into the coarse token stream.
pub fn tokenize_python(source: &str) -> ParseResult<Vec<Token>> {
    run_lexer(&mut PythonLexerRules::new(), &SourceLines::new(source))
}

/// Lex TypeScript-like source into the coarse token stream.
pub fn tokenize_typescript(source: &str) -> ParseResult<Vec<Token>> {
    run_lexer(&mut TypeScriptLexerRules::new(), &SourceLines::new(source))
}
