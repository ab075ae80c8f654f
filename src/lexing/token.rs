//! Lexical token model
//!
//! Tokens are contiguous and non-overlapping; concatenating their texts
//! reproduces the normalized source exactly (every physical line ends with a
//! logical `'\n'`). Spans are flat character offsets, half-open.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range as CharSpan;

/// Coarse lexical classification.
///
/// The set is deliberately small: the grammar stage only needs to tell
/// comments, strings, spacing and punctuation apart. Everything that carries
/// code meaning lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Triple-quoted Python literals, `/*…*/` blocks, template strings.
    /// Whether one is a comment or data is decided positionally later.
    MultilineCommentOrString,
    SinglelineComment,
    StringLiteral,
    Spacing,
    Brace,
    Comma,
    Other,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::MultilineCommentOrString => "multiline-comment-or-string",
            TokenKind::SinglelineComment => "singleline-comment",
            TokenKind::StringLiteral => "string",
            TokenKind::Spacing => "spacing",
            TokenKind::Brace => "brace",
            TokenKind::Comma => "comma",
            TokenKind::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// One lexical token: classification, text, and flat character span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: CharSpan<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, span: CharSpan<usize>) -> Self {
        Self { kind, text, span }
    }

    pub fn is_spacing(&self) -> bool {
        self.kind == TokenKind::Spacing
    }

    /// Spacing that carries no newline; gaps inside a single line.
    pub fn is_inline_spacing(&self) -> bool {
        self.is_spacing() && !self.contains_newline()
    }

    pub fn contains_newline(&self) -> bool {
        self.text.contains('\n')
    }

    pub fn ends_with_backslash(&self) -> bool {
        self.text.ends_with('\\')
    }

    pub fn char_len(&self) -> usize {
        self.span.end - self.span.start
    }
}
