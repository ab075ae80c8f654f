//! TypeScript-like lexer rules
//!
//! Multi-character comment delimiters are found with a streaming
//! [`StringExpressionMatcher`] over `//`, `/*` and `*/` instead of lookahead.
//! An `=` is deferred one character so `=>` comes out as a single token while
//! a lone `=` still gets one of its own; the detectors rely on that when
//! splitting variable declarations.
//!
//! Classification:
//! - `//…`                 → SinglelineComment (newline excluded)
//! - `/*…*/`               → MultilineCommentOrString
//! - `` `…` ``             → MultilineCommentOrString (template literals span lines)
//! - `'…'`, `"…"`          → StringLiteral
//! - space, tab, newline, `;` → Spacing runs
//! - `()[]{}`              → Brace, `,` → Comma
//! - everything else, `:` `<` `>` `=` `=>` included → Other

use crate::error::{ParseError, ParseResult};
use crate::lexing::machine::{LexerRules, SplitDirective};
use crate::lexing::token::TokenKind;
use crate::matchers::expression::{string_matcher, StringExpressionMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CommentKey {
    LineStart,
    BlockStart,
    BlockEnd,
}

fn comment_matcher() -> StringExpressionMatcher<CommentKey> {
    string_matcher(
        [
            (CommentKey::LineStart, "//"),
            (CommentKey::BlockStart, "/*"),
            (CommentKey::BlockEnd, "*/"),
        ]
        .into_iter()
        .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Spacing,
    Brace,
    Comma,
    Equals,
    Quote(char),
    Other,
}

fn classify(ch: char) -> CharClass {
    match ch {
        ' ' | '\t' | '\n' | ';' => CharClass::Spacing,
        '(' | ')' | '[' | ']' | '{' | '}' => CharClass::Brace,
        ',' => CharClass::Comma,
        '=' => CharClass::Equals,
        '\'' | '"' | '`' => CharClass::Quote(ch),
        _ => CharClass::Other,
    }
}

fn run_kind(first: char) -> TokenKind {
    if classify(first) == CharClass::Spacing {
        TokenKind::Spacing
    } else {
        TokenKind::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    /// Buffer is a lone `=`; the next character decides `=>` vs `=`.
    EqualsPending,
    LineComment,
    BlockComment,
    Quote { quote: char, escaped: bool },
    Template { escaped: bool },
}

/// The TypeScript-like lexer state machine.
#[derive(Debug, Clone)]
pub struct TypeScriptLexerRules {
    state: State,
    matcher: StringExpressionMatcher<CommentKey>,
}

impl TypeScriptLexerRules {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            matcher: comment_matcher(),
        }
    }

    /// Return to Normal mode. The matcher restarts; characters a directive
    /// retained into the next buffer are replayed so delimiter detection
    /// stays aligned with the buffer.
    fn enter_normal(&mut self, retained: &[char]) {
        self.state = State::Normal;
        self.matcher.reset();
        for &ch in retained {
            self.matcher.next(&ch);
        }
    }

    fn normal_step(&mut self, ch: char, prev_len: usize, first: char) -> Option<SplitDirective> {
        match self.matcher.next(&ch) {
            Some(CommentKey::LineStart) => {
                self.state = State::LineComment;
                return (prev_len > 1).then(|| SplitDirective::EmitRetain {
                    kind: run_kind(first),
                    tail_len: 2,
                });
            }
            Some(CommentKey::BlockStart) => {
                self.state = State::BlockComment;
                self.matcher.reset();
                return (prev_len > 1).then(|| SplitDirective::EmitRetain {
                    kind: run_kind(first),
                    tail_len: 2,
                });
            }
            // A stray "*/" outside any comment is just text.
            Some(CommentKey::BlockEnd) | None => {}
        }
        match classify(ch) {
            CharClass::Equals => {
                self.state = State::EqualsPending;
                (prev_len > 0).then(|| SplitDirective::EmitRetain {
                    kind: run_kind(first),
                    tail_len: 1,
                })
            }
            CharClass::Quote(quote) => {
                self.enter_quote(quote);
                (prev_len > 0).then(|| SplitDirective::EmitRetain {
                    kind: run_kind(first),
                    tail_len: 1,
                })
            }
            CharClass::Brace => Some(if prev_len == 0 {
                SplitDirective::Emit(TokenKind::Brace)
            } else {
                SplitDirective::EmitSplit {
                    kind: run_kind(first),
                    tail_kind: TokenKind::Brace,
                    tail_len: 1,
                }
            }),
            CharClass::Comma => Some(if prev_len == 0 {
                SplitDirective::Emit(TokenKind::Comma)
            } else {
                SplitDirective::EmitSplit {
                    kind: run_kind(first),
                    tail_kind: TokenKind::Comma,
                    tail_len: 1,
                }
            }),
            class @ (CharClass::Spacing | CharClass::Other) => {
                if prev_len == 0 {
                    return None;
                }
                let kind = run_kind(first);
                let incoming = if class == CharClass::Spacing {
                    TokenKind::Spacing
                } else {
                    TokenKind::Other
                };
                (kind != incoming).then(|| SplitDirective::EmitRetain { kind, tail_len: 1 })
            }
        }
    }

    fn enter_quote(&mut self, quote: char) {
        self.matcher.reset();
        self.state = if quote == '`' {
            State::Template { escaped: false }
        } else {
            State::Quote {
                quote,
                escaped: false,
            }
        };
    }

    /// The pending `=` did not become `=>`; emit it and route `ch`.
    fn resolve_equals(&mut self, ch: char) -> SplitDirective {
        match classify(ch) {
            CharClass::Brace => {
                self.enter_normal(&[]);
                SplitDirective::EmitSplit {
                    kind: TokenKind::Other,
                    tail_kind: TokenKind::Brace,
                    tail_len: 1,
                }
            }
            CharClass::Comma => {
                self.enter_normal(&[]);
                SplitDirective::EmitSplit {
                    kind: TokenKind::Other,
                    tail_kind: TokenKind::Comma,
                    tail_len: 1,
                }
            }
            CharClass::Equals => {
                // "==" and friends: each '=' is its own Other token.
                self.state = State::EqualsPending;
                SplitDirective::EmitRetain {
                    kind: TokenKind::Other,
                    tail_len: 1,
                }
            }
            CharClass::Quote(quote) => {
                self.enter_quote(quote);
                SplitDirective::EmitRetain {
                    kind: TokenKind::Other,
                    tail_len: 1,
                }
            }
            CharClass::Spacing | CharClass::Other => {
                self.enter_normal(&[ch]);
                SplitDirective::EmitRetain {
                    kind: TokenKind::Other,
                    tail_len: 1,
                }
            }
        }
    }
}

impl Default for TypeScriptLexerRules {
    fn default() -> Self {
        Self::new()
    }
}

impl LexerRules for TypeScriptLexerRules {
    fn match_next(&mut self, ch: char, buffer: &[char]) -> ParseResult<Option<SplitDirective>> {
        let prev_len = buffer.len() - 1;
        match self.state {
            State::Normal => Ok(self.normal_step(ch, prev_len, buffer[0])),
            State::EqualsPending => {
                if ch == '>' {
                    self.enter_normal(&[]);
                    Ok(Some(SplitDirective::Emit(TokenKind::Other)))
                } else {
                    Ok(Some(self.resolve_equals(ch)))
                }
            }
            State::LineComment => {
                if ch == '\n' {
                    self.enter_normal(&[ch]);
                    Ok(Some(SplitDirective::EmitRetain {
                        kind: TokenKind::SinglelineComment,
                        tail_len: 1,
                    }))
                } else {
                    Ok(None)
                }
            }
            State::BlockComment => {
                if self.matcher.next(&ch) == Some(CommentKey::BlockEnd) {
                    self.enter_normal(&[]);
                    Ok(Some(SplitDirective::Emit(TokenKind::MultilineCommentOrString)))
                } else {
                    Ok(None)
                }
            }
            State::Quote { quote, escaped } => {
                if escaped {
                    self.state = State::Quote {
                        quote,
                        escaped: false,
                    };
                    return Ok(None);
                }
                match ch {
                    '\\' => {
                        self.state = State::Quote {
                            quote,
                            escaped: true,
                        };
                        Ok(None)
                    }
                    '\n' => Err(ParseError::UnterminatedConstruct {
                        construct: "string literal",
                        found: buffer.iter().collect(),
                    }),
                    c if c == quote => {
                        self.enter_normal(&[]);
                        Ok(Some(SplitDirective::Emit(TokenKind::StringLiteral)))
                    }
                    _ => Ok(None),
                }
            }
            State::Template { escaped } => {
                if escaped {
                    self.state = State::Template { escaped: false };
                    return Ok(None);
                }
                match ch {
                    '\\' => {
                        self.state = State::Template { escaped: true };
                        Ok(None)
                    }
                    '`' => {
                        self.enter_normal(&[]);
                        Ok(Some(SplitDirective::Emit(TokenKind::MultilineCommentOrString)))
                    }
                    _ => Ok(None),
                }
            }
        }
    }

    fn match_end(&mut self, buffer: &[char]) -> ParseResult<Option<TokenKind>> {
        match self.state {
            State::Normal => Ok(buffer.first().map(|&first| run_kind(first))),
            State::EqualsPending => Ok(Some(TokenKind::Other)),
            State::LineComment => Ok(Some(TokenKind::SinglelineComment)),
            State::BlockComment => Err(ParseError::UnterminatedConstruct {
                construct: "block comment",
                found: buffer.iter().rev().take(16).rev().collect(),
            }),
            State::Quote { .. } => Err(ParseError::UnterminatedConstruct {
                construct: "string literal",
                found: buffer.iter().collect(),
            }),
            State::Template { .. } => Err(ParseError::UnterminatedConstruct {
                construct: "template string",
                found: buffer.iter().rev().take(16).rev().collect(),
            }),
        }
    }

    fn reset(&mut self) {
        self.state = State::Normal;
        self.matcher.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::machine::run_lexer;
    use crate::lexing::token::Token;
    use crate::position::SourceLines;

    fn lex(source: &str) -> Vec<Token> {
        run_lexer(&mut TypeScriptLexerRules::new(), &SourceLines::new(source)).unwrap()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_semicolon_is_spacing() {
        let tokens = lex("a;b");
        assert_eq!(texts(&tokens), vec!["a", ";", "b", "\n"]);
        assert_eq!(tokens[1].kind, TokenKind::Spacing);
    }

    #[test]
    fn test_line_comment() {
        let tokens = lex("x // note\ny");
        assert_eq!(
            texts(&tokens),
            vec!["x", " ", "// note", "\n", "y", "\n"]
        );
        assert_eq!(tokens[2].kind, TokenKind::SinglelineComment);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let tokens = lex("a /* one\ntwo */ b");
        assert_eq!(tokens[2].kind, TokenKind::MultilineCommentOrString);
        assert_eq!(tokens[2].text, "/* one\ntwo */");
    }

    #[test]
    fn test_block_comment_with_inner_slashes() {
        let tokens = lex("/* see http://x */");
        assert_eq!(tokens[0].kind, TokenKind::MultilineCommentOrString);
        assert_eq!(tokens[0].text, "/* see http://x */");
    }

    #[test]
    fn test_arrow_is_one_token() {
        let tokens = lex("a => b");
        assert_eq!(texts(&tokens), vec!["a", " ", "=>", " ", "b", "\n"]);
        assert_eq!(tokens[2].kind, TokenKind::Other);
    }

    #[test]
    fn test_lone_equals_is_its_own_token() {
        let tokens = lex("x=1");
        assert_eq!(texts(&tokens), vec!["x", "=", "1", "\n"]);
    }

    #[test]
    fn test_double_equals_splits() {
        let tokens = lex("a==b");
        assert_eq!(texts(&tokens), vec!["a", "=", "=", "b", "\n"]);
    }

    #[test]
    fn test_equals_then_string() {
        let tokens = lex("y = \"hi\"");
        assert_eq!(texts(&tokens), vec!["y", " ", "=", " ", "\"hi\"", "\n"]);
        assert_eq!(tokens[4].kind, TokenKind::StringLiteral);
    }

    #[test]
    fn test_template_literal_spans_lines() {
        let tokens = lex("t = `one\ntwo`");
        assert_eq!(tokens[4].kind, TokenKind::MultilineCommentOrString);
        assert_eq!(tokens[4].text, "`one\ntwo`");
    }

    #[test]
    fn test_comment_after_equals() {
        // The '/' retained out of EqualsPending must still start "//".
        let tokens = lex("x =// c\ny");
        assert_eq!(
            texts(&tokens),
            vec!["x", " ", "=", "// c", "\n", "y", "\n"]
        );
        assert_eq!(tokens[3].kind, TokenKind::SinglelineComment);
    }

    #[test]
    fn test_colon_and_angles_stay_in_runs() {
        let tokens = lex("a: Map<K>");
        assert_eq!(texts(&tokens), vec!["a:", " ", "Map<K>", "\n"]);
        assert_eq!(tokens[0].kind, TokenKind::Other);
    }

    #[test]
    fn test_unterminated_block_comment_errors() {
        let lines = SourceLines::new("/* open\n");
        let result = run_lexer(&mut TypeScriptLexerRules::new(), &lines);
        assert!(matches!(
            result,
            Err(ParseError::UnterminatedConstruct { construct: "block comment", .. })
        ));
    }

    #[test]
    fn test_roundtrip_concatenation() {
        let source = "import {X} from \"./mod\";\nclass B { y: string = \"hi\"; fn(a: number): void { return; } }\n";
        let tokens = lex(source);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, source);
    }
}
