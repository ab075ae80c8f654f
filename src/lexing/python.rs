//! Python lexer rules
//!
//! State flags follow the language surface: inside single/double quotes,
//! inside triple quotes, inside a `#` comment, an escape-seen bit, and a
//! count of consecutive opening quotes so `''` followed by a third `'`
//! upgrades into triple-quoted mode.
//!
//! Classification:
//! - `#…`                  → SinglelineComment (newline excluded)
//! - `'''…'''`, `"""…"""`  → MultilineCommentOrString
//! - `'…'`, `"…"`          → StringLiteral
//! - space, tab, newline   → Spacing runs
//! - `()[]{}`              → Brace, one character each
//! - `,`                   → Comma
//! - everything else       → Other runs (the colon stays in them; the
//!                           detectors split declarations on it)

use crate::error::{ParseError, ParseResult};
use crate::lexing::machine::{LexerRules, SplitDirective};
use crate::lexing::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Spacing,
    Brace,
    Comma,
    Hash,
    Quote(char),
    Other,
}

fn classify(ch: char) -> CharClass {
    match ch {
        ' ' | '\t' | '\n' => CharClass::Spacing,
        '(' | ')' | '[' | ']' | '{' | '}' => CharClass::Brace,
        ',' => CharClass::Comma,
        '#' => CharClass::Hash,
        '\'' | '"' => CharClass::Quote(ch),
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
    Comment,
    /// Inside a quoted literal. `opens` is the consecutive opening-quote
    /// count: 1 = ordinary string, 2 = just saw the empty pair and the next
    /// character decides between "empty string" and triple-quote upgrade.
    Quote {
        quote: char,
        opens: u8,
        escaped: bool,
    },
    Triple {
        quote: char,
        closes: u8,
        escaped: bool,
    },
}

/// The Python lexer state machine.
#[derive(Debug, Clone)]
pub struct PythonLexerRules {
    state: State,
}

impl PythonLexerRules {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
        }
    }

    fn normal_step(&mut self, ch: char, prev_len: usize, first: char) -> Option<SplitDirective> {
        match classify(ch) {
            CharClass::Hash => {
                self.state = State::Comment;
                (prev_len > 0).then(|| SplitDirective::EmitRetain {
                    kind: run_kind(first),
                    tail_len: 1,
                })
            }
            CharClass::Quote(quote) => {
                self.state = State::Quote {
                    quote,
                    opens: 1,
                    escaped: false,
                };
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

    /// The buffer holds exactly two quotes; `ch` resolved them to an empty
    /// string. Emit it and route `ch` the way a fresh buffer would.
    fn after_empty_string(&mut self, ch: char) -> SplitDirective {
        match classify(ch) {
            CharClass::Brace => {
                self.state = State::Normal;
                SplitDirective::EmitSplit {
                    kind: TokenKind::StringLiteral,
                    tail_kind: TokenKind::Brace,
                    tail_len: 1,
                }
            }
            CharClass::Comma => {
                self.state = State::Normal;
                SplitDirective::EmitSplit {
                    kind: TokenKind::StringLiteral,
                    tail_kind: TokenKind::Comma,
                    tail_len: 1,
                }
            }
            CharClass::Hash => {
                self.state = State::Comment;
                SplitDirective::EmitRetain {
                    kind: TokenKind::StringLiteral,
                    tail_len: 1,
                }
            }
            CharClass::Quote(quote) => {
                self.state = State::Quote {
                    quote,
                    opens: 1,
                    escaped: false,
                };
                SplitDirective::EmitRetain {
                    kind: TokenKind::StringLiteral,
                    tail_len: 1,
                }
            }
            CharClass::Spacing | CharClass::Other => {
                self.state = State::Normal;
                SplitDirective::EmitRetain {
                    kind: TokenKind::StringLiteral,
                    tail_len: 1,
                }
            }
        }
    }
}

impl Default for PythonLexerRules {
    fn default() -> Self {
        Self::new()
    }
}

impl LexerRules for PythonLexerRules {
    fn match_next(&mut self, ch: char, buffer: &[char]) -> ParseResult<Option<SplitDirective>> {
        let prev_len = buffer.len() - 1;
        match self.state {
            State::Normal => Ok(self.normal_step(ch, prev_len, buffer[0])),
            State::Comment => {
                if ch == '\n' {
                    self.state = State::Normal;
                    Ok(Some(SplitDirective::EmitRetain {
                        kind: TokenKind::SinglelineComment,
                        tail_len: 1,
                    }))
                } else {
                    Ok(None)
                }
            }
            State::Quote {
                quote,
                opens,
                escaped,
            } => {
                if opens == 2 {
                    if ch == quote {
                        self.state = State::Triple {
                            quote,
                            closes: 0,
                            escaped: false,
                        };
                        return Ok(None);
                    }
                    return Ok(Some(self.after_empty_string(ch)));
                }
                if escaped {
                    self.state = State::Quote {
                        quote,
                        opens,
                        escaped: false,
                    };
                    return Ok(None);
                }
                match ch {
                    '\\' => {
                        self.state = State::Quote {
                            quote,
                            opens,
                            escaped: true,
                        };
                        Ok(None)
                    }
                    '\n' => Err(ParseError::UnterminatedConstruct {
                        construct: "string literal",
                        found: buffer.iter().collect(),
                    }),
                    c if c == quote => {
                        if prev_len == 1 {
                            // Second consecutive quote: empty pair, maybe a
                            // triple opener.
                            self.state = State::Quote {
                                quote,
                                opens: 2,
                                escaped: false,
                            };
                            Ok(None)
                        } else {
                            self.state = State::Normal;
                            Ok(Some(SplitDirective::Emit(TokenKind::StringLiteral)))
                        }
                    }
                    _ => Ok(None),
                }
            }
            State::Triple {
                quote,
                closes,
                escaped,
            } => {
                if escaped {
                    self.state = State::Triple {
                        quote,
                        closes: 0,
                        escaped: false,
                    };
                    return Ok(None);
                }
                match ch {
                    '\\' => {
                        self.state = State::Triple {
                            quote,
                            closes: 0,
                            escaped: true,
                        };
                        Ok(None)
                    }
                    c if c == quote => {
                        if closes == 2 {
                            self.state = State::Normal;
                            Ok(Some(SplitDirective::Emit(
                                TokenKind::MultilineCommentOrString,
                            )))
                        } else {
                            self.state = State::Triple {
                                quote,
                                closes: closes + 1,
                                escaped: false,
                            };
                            Ok(None)
                        }
                    }
                    _ => {
                        self.state = State::Triple {
                            quote,
                            closes: 0,
                            escaped: false,
                        };
                        Ok(None)
                    }
                }
            }
        }
    }

    fn match_end(&mut self, buffer: &[char]) -> ParseResult<Option<TokenKind>> {
        match self.state {
            State::Normal => Ok(buffer.first().map(|&first| run_kind(first))),
            State::Comment => Ok(Some(TokenKind::SinglelineComment)),
            State::Quote { opens: 2, .. } => Ok(Some(TokenKind::StringLiteral)),
            State::Quote { .. } => Err(ParseError::UnterminatedConstruct {
                construct: "string literal",
                found: buffer.iter().collect(),
            }),
            State::Triple { .. } => Err(ParseError::UnterminatedConstruct {
                construct: "triple-quoted string",
                found: buffer.iter().rev().take(16).rev().collect(),
            }),
        }
    }

    fn reset(&mut self) {
        self.state = State::Normal;
    }
}
