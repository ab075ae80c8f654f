//! Python symbol detector
//!
//! One indentation-aware line machine serves every run kind. The machine
//! tracks the bracket depth (newlines inside brackets never end a
//! statement), backslash continuations, and the indentation at each line
//! start; statements whose first line sits at the run's expected indent are
//! eligible for structural classification, everything else is statement
//! filler.
//!
//! Run kinds:
//! - TOP_LEVEL / CLASSES / FUNCTION_BODY: statement segmentation. `from`,
//!   `import`, `def` and `class` upgrade a statement at the expected indent;
//!   a standalone triple-quoted literal becomes a multi-line comment; inside
//!   classes a line with an unenclosed `:` becomes an attribute.
//! - FUNCTIONS: split the block at the header colon into declaration and
//!   body.
//! - FUNCTION_DECLARATION: split the parenthesized region into arguments at
//!   depth-1 commas.

pub mod indent;

use crate::error::{ParseError, ParseResult};
use crate::lexing::{Token, TokenKind};
use crate::matchers::BracesMatcher;
use crate::parsing::detector::{Detector, RunContext};
use crate::parsing::directive::{NodeSeed, SymbolDirective, SymbolSpec};
use crate::parsing::grammar::Symbol;
use crate::position::SourceLines;
use indent::{detect_indent_unit, IndentUnit};
use once_cell::sync::Lazy;
use regex::Regex;

static FROM_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^from\s+([.\w]+)\s+import\b").expect("static regex"));
static PLAIN_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^import\s+([\w.]+)").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    References,
    CommentSingle,
    CommentMulti,
    Plain,
}

#[derive(Debug, Clone)]
struct Statement {
    kind: StatementKind,
    tokens: Vec<Token>,
    demoted: bool,
    attr_candidate: bool,
    saw_multiline_string: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Functions,
    Classes,
}

#[derive(Debug, Clone)]
struct Block {
    kind: BlockKind,
    start: usize,
    header_indent: usize,
    colon: Option<usize>,
    header_done: bool,
    header_tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
enum Mode {
    /// Only spacing buffered; waiting for a statement to start.
    Filler,
    Statement(Statement),
    Block(Block),
    /// FUNCTIONS run: scanning the header for its colon.
    FnSplit { start: usize, start_line: usize },
    /// FUNCTIONS run: everything after the declaration is the body.
    FnBody { body_start: usize },
    /// FUNCTION_DECLARATION run: before the opening parenthesis.
    DeclHeader,
    /// FUNCTION_DECLARATION run: inside the parameter list.
    DeclArgs {
        tokens: Vec<Token>,
        significant: bool,
    },
    /// FUNCTION_DECLARATION run: after the closing parenthesis.
    DeclTail,
}

/// Spacing geometry of the most recent token, when it was spacing.
#[derive(Debug, Clone, Copy)]
struct SpacingInfo {
    newlines: usize,
    trailing_indent: usize,
}

pub struct PythonDetector {
    lines: SourceLines,
    indent: IndentUnit,
    ctx: RunContext,
    mode: Mode,
    braces: BracesMatcher,
    buffered: usize,
    any_token_seen: bool,
    prev_spacing: Option<SpacingInfo>,
    prev_ends_backslash: bool,
}

impl PythonDetector {
    /// Preparses indentation; fails on tab/space mixing.
    pub fn new(lines: &SourceLines) -> ParseResult<Self> {
        let indent = detect_indent_unit(lines)?;
        Ok(Self {
            lines: lines.clone(),
            indent,
            ctx: RunContext {
                nonterminal: Symbol::TopLevel,
                depth: 0,
            },
            mode: Mode::Filler,
            braces: BracesMatcher::common(),
            buffered: 0,
            any_token_seen: false,
            prev_spacing: None,
            prev_ends_backslash: false,
        })
    }

    fn expected_indent(&self) -> usize {
        self.ctx.depth * self.indent.width()
    }

    fn line_of(&self, token: &Token) -> usize {
        self.lines.offset_to_index(token.span.start).line
    }

    /// Indent of the line a just-arrived token starts, when it starts one.
    /// Newlines at bracket depth > 0 and escaped newlines do not open lines.
    fn line_start_indent(&self) -> Option<usize> {
        if !self.any_token_seen {
            return (self.ctx.nonterminal == Symbol::TopLevel).then_some(0);
        }
        let spacing = self.prev_spacing?;
        if spacing.newlines == 0 || self.braces.current_depth() > 0 {
            return None;
        }
        if self.prev_ends_backslash && spacing.newlines == 1 {
            return None;
        }
        Some(spacing.trailing_indent)
    }

    /// Bookkeeping shared by every mode, applied after a token is handled.
    fn note_token(&mut self, token: &Token) {
        self.any_token_seen = true;
        if token.is_spacing() {
            self.prev_spacing = Some(match token.text.rfind('\n') {
                Some(pos) => SpacingInfo {
                    newlines: token.text.matches('\n').count(),
                    trailing_indent: token.text[pos + 1..].chars().count(),
                },
                None => SpacingInfo {
                    newlines: 0,
                    trailing_indent: 0,
                },
            });
        } else {
            self.prev_spacing = None;
            self.prev_ends_backslash =
                token.kind == TokenKind::Other && token.text.ends_with('\\');
        }
    }

    fn feed_braces(&mut self, token: &Token) -> ParseResult<()> {
        if token.kind != TokenKind::Brace {
            return Ok(());
        }
        let ch = token.text.chars().next().expect("brace token has one char");
        self.braces.next(ch).map_err(|e| ParseError::UnbalancedBracket {
            message: e.to_string(),
            line: self.line_of(token),
        })?;
        Ok(())
    }

    /// True at a spacing token that ends the current statement: it carries an
    /// unescaped newline at bracket depth zero.
    fn ends_statement(&self, token: &Token) -> bool {
        if !token.is_spacing() {
            return false;
        }
        let newlines = token.text.matches('\n').count();
        if newlines == 0 || self.braces.current_depth() > 0 {
            return false;
        }
        !(self.prev_ends_backslash && newlines == 1)
    }

    /// Classify the first significant token of a statement and install the
    /// matching mode.
    fn start_statement(&mut self, index: usize, token: &Token) {
        let line_indent = self.line_start_indent();
        let indent_matched = match line_indent {
            Some(indent) => indent == self.expected_indent(),
            // Statements opening on the run's first line (one-liner bodies)
            // cannot sit at a wrong indent.
            None => true,
        };

        if token.kind == TokenKind::SinglelineComment {
            self.mode = Mode::Statement(Statement {
                kind: StatementKind::CommentSingle,
                tokens: vec![token.clone()],
                demoted: false,
                attr_candidate: false,
                saw_multiline_string: false,
            });
            return;
        }
        if token.kind == TokenKind::MultilineCommentOrString {
            let kind = if indent_matched {
                StatementKind::CommentMulti
            } else {
                StatementKind::Plain
            };
            self.mode = Mode::Statement(Statement {
                kind,
                tokens: vec![token.clone()],
                demoted: false,
                attr_candidate: false,
                saw_multiline_string: true,
            });
            return;
        }

        if token.kind == TokenKind::Other && indent_matched {
            let text = token.text.as_str();
            let in_top_level = self.ctx.nonterminal == Symbol::TopLevel;
            let in_classes = self.ctx.nonterminal == Symbol::Classes;
            if in_top_level && (text == "from" || text == "import") {
                self.mode = Mode::Statement(Statement {
                    kind: StatementKind::References,
                    tokens: vec![token.clone()],
                    demoted: false,
                    attr_candidate: false,
                    saw_multiline_string: false,
                });
                return;
            }
            if (in_top_level || in_classes) && text == "def" {
                self.mode = Mode::Block(Block {
                    kind: BlockKind::Functions,
                    start: index,
                    header_indent: line_indent.unwrap_or(self.expected_indent()),
                    colon: None,
                    header_done: false,
                    header_tokens: vec![token.clone()],
                });
                return;
            }
            if in_top_level && text == "class" {
                self.mode = Mode::Block(Block {
                    kind: BlockKind::Classes,
                    start: index,
                    header_indent: line_indent.unwrap_or(self.expected_indent()),
                    colon: None,
                    header_done: false,
                    header_tokens: vec![token.clone()],
                });
                return;
            }
        }

        // Statement starts always sit at bracket depth zero, so a colon in
        // the opening token is never enclosed.
        self.mode = Mode::Statement(Statement {
            kind: StatementKind::Plain,
            tokens: vec![token.clone()],
            demoted: false,
            attr_candidate: token.kind == TokenKind::Other && token.text.contains(':'),
            saw_multiline_string: false,
        });
    }

    fn resolve_statement(&self, statement: &Statement) -> SymbolSpec {
        match statement.kind {
            StatementKind::References => SymbolSpec::with_seed(
                Symbol::References,
                reference_seed(&statement.tokens),
            ),
            StatementKind::CommentSingle => SymbolSpec::with_seed(
                Symbol::CommentSingleline,
                NodeSeed::Comment {
                    multiline: false,
                    contents: single_comment_contents(&statement.tokens[0].text),
                },
            ),
            StatementKind::CommentMulti => {
                if statement.demoted {
                    SymbolSpec::plain(Symbol::StatementsFiller)
                } else {
                    SymbolSpec::with_seed(
                        Symbol::CommentMultiline,
                        NodeSeed::Comment {
                            multiline: true,
                            contents: multi_comment_contents(&statement.tokens[0].text),
                        },
                    )
                }
            }
            StatementKind::Plain => {
                if self.ctx.nonterminal == Symbol::Classes && statement.attr_candidate {
                    let (name, attr_type) = split_name_type(&statement.tokens);
                    SymbolSpec::with_seed(
                        Symbol::Attributes,
                        NodeSeed::Attribute { name, attr_type },
                    )
                } else {
                    SymbolSpec::plain(Symbol::StatementsFiller)
                }
            }
        }
    }

    fn block_spec(&self, block: &Block, body_end: usize) -> ParseResult<SymbolSpec> {
        let colon = block.colon.ok_or_else(|| ParseError::MissingBodyOpener {
            construct: match block.kind {
                BlockKind::Functions => "function",
                BlockKind::Classes => "class",
            },
            line: self.line_of(&block.header_tokens[0]),
        })?;
        let header_text: String = block
            .header_tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        Ok(match block.kind {
            BlockKind::Functions => SymbolSpec {
                symbol: Symbol::Functions,
                parse_range: Some(block.start..body_end),
                seed: Some(NodeSeed::Function {
                    return_type: python_return_type(&header_text),
                    definition_text: header_text,
                }),
            },
            BlockKind::Classes => SymbolSpec {
                symbol: Symbol::Classes,
                parse_range: Some(colon + 1..body_end),
                seed: Some(NodeSeed::Class {
                    class_type: None,
                    definition_text: header_text,
                }),
            },
        })
    }

    /// TOP_LEVEL, CLASSES and FUNCTION_BODY runs: statement segmentation.
    fn statement_run(
        &mut self,
        index: usize,
        token: Option<&Token>,
    ) -> ParseResult<Option<SymbolDirective>> {
        let Some(token) = token else {
            let mode = std::mem::replace(&mut self.mode, Mode::Filler);
            let directive = match mode {
                Mode::Filler => {
                    (self.buffered > 0).then(|| SymbolDirective::one(SymbolSpec::plain(Symbol::Filler)))
                }
                Mode::Statement(statement) => {
                    Some(SymbolDirective::one(self.resolve_statement(&statement)))
                }
                Mode::Block(block) => Some(SymbolDirective::one(self.block_spec(&block, index)?)),
                _ => unreachable!("statement run in declaration mode"),
            };
            self.buffered = 0;
            return Ok(directive);
        };

        match std::mem::replace(&mut self.mode, Mode::Filler) {
            Mode::Filler => {
                if token.is_spacing() {
                    self.mode = Mode::Filler;
                    self.buffered += 1;
                    self.note_token(token);
                    return Ok(None);
                }
                let directive = (self.buffered > 0).then(|| {
                    SymbolDirective::retain(SymbolSpec::plain(Symbol::Filler), 1)
                });
                self.start_statement(index, token);
                self.feed_braces(token)?;
                self.buffered = 1;
                self.note_token(token);
                Ok(directive)
            }
            Mode::Statement(mut statement) => {
                if self.ends_statement(token) {
                    let spec = self.resolve_statement(&statement);
                    self.mode = Mode::Filler;
                    self.buffered = 1;
                    self.note_token(token);
                    return Ok(Some(SymbolDirective::retain(spec, 1)));
                }
                self.feed_braces(token)?;
                self.track_statement_token(&mut statement, token);
                self.mode = Mode::Statement(statement);
                self.buffered += 1;
                self.note_token(token);
                Ok(None)
            }
            Mode::Block(mut block) => {
                let line_indent = self.line_start_indent();
                if block.header_done {
                    let terminates = !token.is_spacing()
                        && token.kind != TokenKind::SinglelineComment
                        && line_indent.is_some_and(|i| i <= block.header_indent);
                    if terminates {
                        // Commit the block, give the line-leading spacing its
                        // own filler, keep the terminator as the next
                        // statement's first token.
                        let spec = self.block_spec(&block, index - 1)?;
                        let directive = SymbolDirective::ThreeWaySplit {
                            first: spec,
                            second: SymbolSpec::plain(Symbol::Filler),
                            second_len: 1,
                            retain_len: 1,
                        };
                        self.start_statement(index, token);
                        self.feed_braces(token)?;
                        self.buffered = 1;
                        self.note_token(token);
                        return Ok(Some(directive));
                    }
                    self.feed_braces(token)?;
                } else {
                    self.feed_braces(token)?;
                    if block.colon.is_none() {
                        if self.ends_statement(token) {
                            return Err(ParseError::MissingBodyOpener {
                                construct: match block.kind {
                                    BlockKind::Functions => "function",
                                    BlockKind::Classes => "class",
                                },
                                line: self.line_of(token),
                            });
                        }
                        block.header_tokens.push(token.clone());
                        if token.kind == TokenKind::Other
                            && self.braces.current_depth() == 0
                            && token.text.contains(':')
                        {
                            block.colon = Some(index);
                        }
                    } else if self.ends_statement(token) {
                        block.header_done = true;
                    }
                }
                self.mode = Mode::Block(block);
                self.buffered += 1;
                self.note_token(token);
                Ok(None)
            }
            other => {
                self.mode = other;
                unreachable!("statement run in declaration mode")
            }
        }
    }

    fn track_statement_token(&mut self, statement: &mut Statement, token: &Token) {
        statement.tokens.push(token.clone());
        let significant = !token.is_spacing() && token.kind != TokenKind::SinglelineComment;
        if statement.kind == StatementKind::CommentMulti && significant {
            statement.demoted = true;
        }
        if token.kind == TokenKind::MultilineCommentOrString {
            statement.saw_multiline_string = true;
        }
        if statement.kind == StatementKind::Plain
            && !statement.attr_candidate
            && !statement.saw_multiline_string
            && token.kind == TokenKind::Other
            && self.braces.current_depth() == 0
            && token.text.contains(':')
        {
            statement.attr_candidate = true;
        }
    }

    /// FUNCTIONS run: declaration up to the header colon, body after it.
    fn functions_run(
        &mut self,
        index: usize,
        token: Option<&Token>,
    ) -> ParseResult<Option<SymbolDirective>> {
        if let Mode::Filler = self.mode {
            match token {
                Some(t) => {
                    self.mode = Mode::FnSplit {
                        start: index,
                        start_line: self.line_of(t),
                    };
                }
                None => return Ok(None),
            }
        }
        match self.mode {
            Mode::FnSplit { start, start_line } => match token {
                Some(t) => {
                    self.feed_braces(t)?;
                    self.note_token(t);
                    if t.kind == TokenKind::Other
                        && self.braces.current_depth() == 0
                        && t.text.contains(':')
                    {
                        self.mode = Mode::FnBody {
                            body_start: index + 1,
                        };
                        return Ok(Some(SymbolDirective::one(SymbolSpec::nonterminal(
                            Symbol::FunctionDeclaration,
                            start..index + 1,
                        ))));
                    }
                    Ok(None)
                }
                None => Err(ParseError::MissingBodyOpener {
                    construct: "function",
                    line: start_line,
                }),
            },
            Mode::FnBody { body_start } => match token {
                Some(t) => {
                    self.note_token(t);
                    Ok(None)
                }
                None => {
                    self.mode = Mode::Filler;
                    Ok(Some(SymbolDirective::one(SymbolSpec::nonterminal(
                        Symbol::FunctionBody,
                        body_start..index,
                    ))))
                }
            },
            _ => unreachable!("functions run in statement mode"),
        }
    }

    /// FUNCTION_DECLARATION run: arguments split at depth-1 commas.
    fn declaration_run(
        &mut self,
        _index: usize,
        token: Option<&Token>,
    ) -> ParseResult<Option<SymbolDirective>> {
        match (&mut self.mode, token) {
            (Mode::Filler, Some(t)) => {
                self.mode = Mode::DeclHeader;
                self.declaration_run(_index, Some(t))
            }
            (Mode::DeclHeader, Some(t)) => {
                self.feed_braces(t)?;
                self.note_token(t);
                self.buffered += 1;
                if t.kind == TokenKind::Brace && self.braces.current_depth() == 1 {
                    self.mode = Mode::DeclArgs {
                        tokens: Vec::new(),
                        significant: false,
                    };
                    self.buffered = 0;
                    return Ok(Some(SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))));
                }
                Ok(None)
            }
            (Mode::DeclArgs { tokens, significant }, Some(t)) => {
                let was_significant = *significant;
                let arg_tokens = tokens.clone();
                if t.kind == TokenKind::Brace {
                    self.feed_braces(t)?;
                    if self.braces.current_depth() == 0 {
                        // Closing parenthesis of the parameter list.
                        let directive = if was_significant {
                            SymbolDirective::SplitTwo {
                                first: SymbolSpec::with_seed(
                                    Symbol::Argument,
                                    argument_seed(&arg_tokens),
                                ),
                                second: SymbolSpec::plain(Symbol::Filler),
                                second_len: 1,
                            }
                        } else {
                            SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))
                        };
                        self.mode = Mode::DeclTail;
                        self.buffered = 0;
                        self.note_token(t);
                        return Ok(Some(directive));
                    }
                    if let Mode::DeclArgs { tokens, .. } = &mut self.mode {
                        tokens.push(t.clone());
                    }
                    self.buffered += 1;
                    self.note_token(t);
                    return Ok(None);
                }
                if t.kind == TokenKind::Comma && self.braces.current_depth() == 1 {
                    let directive = if was_significant {
                        SymbolDirective::SplitTwo {
                            first: SymbolSpec::with_seed(
                                Symbol::Argument,
                                argument_seed(&arg_tokens),
                            ),
                            second: SymbolSpec::plain(Symbol::Filler),
                            second_len: 1,
                        }
                    } else {
                        SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))
                    };
                    self.mode = Mode::DeclArgs {
                        tokens: Vec::new(),
                        significant: false,
                    };
                    self.buffered = 0;
                    self.note_token(t);
                    return Ok(Some(directive));
                }
                if let Mode::DeclArgs { tokens, significant } = &mut self.mode {
                    tokens.push(t.clone());
                    *significant |= !t.is_spacing() && t.kind != TokenKind::SinglelineComment;
                }
                self.buffered += 1;
                self.note_token(t);
                Ok(None)
            }
            (Mode::DeclTail, Some(t)) => {
                self.note_token(t);
                self.buffered += 1;
                Ok(None)
            }
            (_, None) => {
                let had_buffer = self.buffered > 0;
                self.mode = Mode::Filler;
                self.buffered = 0;
                Ok(had_buffer.then(|| SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))))
            }
            _ => unreachable!("declarations run in statement mode"),
        }
    }
}

impl Detector for PythonDetector {
    fn comment_before_function(&self) -> bool {
        false
    }

    fn begin_run(&mut self, ctx: RunContext) {
        self.ctx = ctx;
        self.mode = Mode::Filler;
        self.braces.reset();
        self.buffered = 0;
        self.any_token_seen = false;
        self.prev_spacing = None;
        self.prev_ends_backslash = false;
    }

    fn next_symbol(
        &mut self,
        index: usize,
        token: Option<&Token>,
    ) -> ParseResult<Option<SymbolDirective>> {
        match self.ctx.nonterminal {
            Symbol::TopLevel | Symbol::Classes | Symbol::FunctionBody => {
                self.statement_run(index, token)
            }
            Symbol::Functions => self.functions_run(index, token),
            Symbol::FunctionDeclaration => self.declaration_run(index, token),
            other => unreachable!("detector run for terminal {other:?}"),
        }
    }
}

/// Build the reference seed from the statement tokens.
fn reference_seed(tokens: &[Token]) -> NodeSeed {
    let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let text = text.trim_end().to_string();
    let module = FROM_IMPORT
        .captures(&text)
        .or_else(|| PLAIN_IMPORT.captures(&text))
        .map(|c| c[1].to_string())
        .unwrap_or_default();
    NodeSeed::Reference {
        path: reference_path(&module),
        text,
    }
}

/// Dots map to the local-file scheme, everything else to environment.
fn reference_path(module: &str) -> String {
    let dots = module.chars().take_while(|&c| c == '.').count();
    let rest = &module[dots..];
    if dots > 0 {
        let mut path = String::from("local-file://");
        for _ in 1..dots {
            path.push_str("../");
        }
        path.push_str(&rest.replace('.', "/"));
        path
    } else {
        format!("environment://{}", rest.replace('.', "/"))
    }
}

fn single_comment_contents(text: &str) -> String {
    text.trim_start_matches('#').trim().to_string()
}

fn multi_comment_contents(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() >= 6 {
        chars[3..chars.len() - 3].iter().collect::<String>().trim().to_string()
    } else {
        text.to_string()
    }
}

/// Return annotation between `->` and the final colon, when present.
fn python_return_type(header: &str) -> Option<String> {
    let arrow = header.rfind("->")?;
    let after = &header[arrow + 2..];
    let colon = after.rfind(':')?;
    let ty = after[..colon].trim();
    (!ty.is_empty()).then(|| ty.to_string())
}

#[derive(PartialEq)]
enum SplitPhase {
    Name,
    Type,
    Default,
}

/// Split a declaration-like token run into name and optional type:
/// everything after `=` is dropped, the first unenclosed `:` separates name
/// from type. Comments and line-continuation backslashes are stripped.
fn split_name_type(tokens: &[Token]) -> (String, Option<String>) {
    let mut name = String::new();
    let mut ty = String::new();
    let mut phase = SplitPhase::Name;
    let mut depth: usize = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Spacing => {
                let target = match phase {
                    SplitPhase::Name => &mut name,
                    SplitPhase::Type => &mut ty,
                    SplitPhase::Default => continue,
                };
                if !target.is_empty() && !target.ends_with(' ') {
                    target.push(' ');
                }
            }
            TokenKind::SinglelineComment => {}
            TokenKind::Brace => {
                let ch = token.text.chars().next().expect("brace token has one char");
                if matches!(ch, '(' | '[' | '{') {
                    depth += 1;
                } else {
                    depth = depth.saturating_sub(1);
                }
                match phase {
                    SplitPhase::Name => name.push(ch),
                    SplitPhase::Type => ty.push(ch),
                    SplitPhase::Default => {}
                }
            }
            TokenKind::StringLiteral | TokenKind::MultilineCommentOrString => {
                match phase {
                    SplitPhase::Name => name.push_str(&token.text),
                    SplitPhase::Type => ty.push_str(&token.text),
                    SplitPhase::Default => {}
                }
            }
            TokenKind::Other | TokenKind::Comma => {
                let chars: Vec<char> = token.text.chars().collect();
                for (i, &ch) in chars.iter().enumerate() {
                    if ch == '\\' && i + 1 == chars.len() {
                        continue;
                    }
                    if depth == 0 && phase == SplitPhase::Name && ch == ':' {
                        phase = SplitPhase::Type;
                        continue;
                    }
                    if depth == 0 && phase != SplitPhase::Default && ch == '=' {
                        phase = SplitPhase::Default;
                        continue;
                    }
                    match phase {
                        SplitPhase::Name => name.push(ch),
                        SplitPhase::Type => ty.push(ch),
                        SplitPhase::Default => {}
                    }
                }
            }
        }
    }

    let name = name.trim().to_string();
    let ty = ty.trim().to_string();
    (name, (!ty.is_empty()).then_some(ty))
}

fn argument_seed(tokens: &[Token]) -> NodeSeed {
    let (name, arg_type) = split_name_type(tokens);
    NodeSeed::Argument { name, arg_type }
}
