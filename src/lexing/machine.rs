//! Character-fed tokenizer framework
//!
//! The machine owns a growing character buffer. After each character it asks
//! the language rules what to do with the buffer via a [`SplitDirective`]:
//! keep accumulating, emit everything, emit the head and give the tail its
//! own token, or emit the head and keep the tail as the start of the next
//! token. The last form is what lets a rule say "the earlier part turned out
//! to be one thing, but the tail already belongs to something else".
//!
//! Directive bookkeeping (piece lengths, emptiness) is validated here;
//! violations are rule bugs and panic. Input problems the rules notice
//! (unterminated strings and the like) flow out as [`ParseError`]s.

use crate::error::ParseResult;
use crate::lexing::token::{Token, TokenKind};
use crate::position::SourceLines;

/// What to do with the buffer after the character just consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirective {
    /// Emit the entire buffer as one token.
    Emit(TokenKind),
    /// Emit the buffer head as `kind` and the last `tail_len` characters as a
    /// separate `tail_kind` token.
    EmitSplit {
        kind: TokenKind,
        tail_kind: TokenKind,
        tail_len: usize,
    },
    /// Emit the buffer head as `kind`; the last `tail_len` characters stay
    /// buffered as the start of the next token.
    EmitRetain { kind: TokenKind, tail_len: usize },
}

/// The per-language lexer state machine.
///
/// `match_next` is called once per character, after the character has been
/// appended to `buffer`. `match_end` classifies whatever remains when the
/// stream ends; `None` is only legal for an empty buffer.
pub trait LexerRules {
    fn match_next(&mut self, ch: char, buffer: &[char]) -> ParseResult<Option<SplitDirective>>;
    fn match_end(&mut self, buffer: &[char]) -> ParseResult<Option<TokenKind>>;
    fn reset(&mut self);
}

/// Drive a rule set over the normalized source, producing the token stream.
pub fn run_lexer<R: LexerRules>(rules: &mut R, lines: &SourceLines) -> ParseResult<Vec<Token>> {
    rules.reset();
    let mut machine = Machine::new();
    for ch in lines.chars() {
        machine.push(ch, rules)?;
    }
    let tokens = machine.finish(rules)?;
    log::debug!("lexed {} tokens from {} lines", tokens.len(), lines.line_count());
    Ok(tokens)
}

struct Machine {
    buffer: Vec<char>,
    /// Flat character offset of `buffer[0]`.
    buffer_start: usize,
    tokens: Vec<Token>,
    finished: bool,
}

impl Machine {
    fn new() -> Self {
        Self {
            buffer: Vec::new(),
            buffer_start: 0,
            tokens: Vec::new(),
            finished: false,
        }
    }

    fn push<R: LexerRules>(&mut self, ch: char, rules: &mut R) -> ParseResult<()> {
        assert!(!self.finished, "character fed after end of stream");
        self.buffer.push(ch);
        if let Some(directive) = rules.match_next(ch, &self.buffer)? {
            self.apply(directive);
        }
        Ok(())
    }

    fn finish<R: LexerRules>(mut self, rules: &mut R) -> ParseResult<Vec<Token>> {
        assert!(!self.finished, "finish called twice");
        self.finished = true;
        match rules.match_end(&self.buffer)? {
            Some(kind) => {
                assert!(!self.buffer.is_empty(), "end classification of an empty buffer");
                self.emit(kind, self.buffer.len());
            }
            None => {
                assert!(
                    self.buffer.is_empty(),
                    "rules left {} characters unclassified at end",
                    self.buffer.len()
                );
            }
        }
        Ok(self.tokens)
    }

    fn apply(&mut self, directive: SplitDirective) {
        let len = self.buffer.len();
        match directive {
            SplitDirective::Emit(kind) => {
                self.emit(kind, len);
            }
            SplitDirective::EmitSplit {
                kind,
                tail_kind,
                tail_len,
            } => {
                assert!(
                    tail_len >= 1 && len >= tail_len + 1,
                    "split of {len} characters into head + {tail_len}-tail leaves an empty piece"
                );
                self.emit(kind, len - tail_len);
                self.emit(tail_kind, tail_len);
            }
            SplitDirective::EmitRetain { kind, tail_len } => {
                assert!(
                    tail_len >= 1 && len >= tail_len + 1,
                    "retain of {tail_len} from {len} characters leaves an empty head"
                );
                self.emit(kind, len - tail_len);
            }
        }
    }

    /// Emit the first `count` buffered characters as one token.
    fn emit(&mut self, kind: TokenKind, count: usize) {
        let text: String = self.buffer[..count].iter().collect();
        let span = self.buffer_start..self.buffer_start + count;
        self.tokens.push(Token::new(kind, text, span));
        self.buffer.drain(..count);
        self.buffer_start += count;
    }
}
