//! TypeScript-like symbol detector
//!
//! No indentation here: statements end at a newline with all brackets closed
//! or at a `;` outside curly braces. Two bracket matchers run side by side,
//! the general `()[]{}` one and a curly-only one, because the two
//! termination rules key off different depths.
//!
//! Classification at statement start is evidence-driven: keywords upgrade a
//! pending statement (`import`, `export … from`, `class`, `interface`,
//! `function`), a `:` with only plain texts before it upgrades to an
//! attribute inside classes, and an opening parenthesis in class context
//! arms the sequential function-shape machine (params, optional return-type
//! region, braced body). Anything that never completes its shape falls back
//! to statement filler.

pub mod var_decl;

use crate::error::{ParseError, ParseResult};
use crate::lexing::{Token, TokenKind};
use crate::matchers::BracesMatcher;
use crate::parsing::detector::{Detector, RunContext};
use crate::parsing::directive::{NodeSeed, SymbolDirective, SymbolSpec};
use crate::parsing::grammar::Symbol;
use crate::position::SourceLines;
use var_decl::VarDeclMatcher;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TsKind {
    Plain,
    References,
    Classes { keyword: String },
    Functions,
    CommentSingle,
    CommentMulti,
    Attribute,
}

/// Sequential function-shape detector: `(` … `)` … optional return type …
/// `{` body `}`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FnShape {
    Start,
    Params,
    AfterParams {
        type_depth: usize,
        last_significant: Option<char>,
    },
    Body {
        curly_base: usize,
    },
    AfterBody,
    Downgraded,
}

#[derive(Debug, Clone)]
struct TsStatement {
    kind: TsKind,
    start: usize,
    tokens: Vec<Token>,
    /// Only spacings and plain texts seen so far; upgrades are still legal.
    prefix_texts_only: bool,
    export_seen: bool,
    demoted: bool,
    fn_shape: FnShape,
    /// Token index of the `{` opening a function body, within this statement.
    fn_body_open: Option<usize>,
    class_open: Option<usize>,
    class_close: Option<usize>,
    class_curly_base: usize,
}

impl TsStatement {
    fn new(start: usize) -> Self {
        Self {
            kind: TsKind::Plain,
            start,
            tokens: Vec::new(),
            prefix_texts_only: true,
            export_seen: false,
            demoted: false,
            fn_shape: FnShape::Start,
            fn_body_open: None,
            class_open: None,
            class_close: None,
            class_curly_base: 0,
        }
    }

    /// Statement text before the token at `cut` (an index into the stream).
    fn text_before(&self, cut: usize) -> String {
        self.tokens[..cut - self.start]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Filler,
    Statement(TsStatement),
    /// FUNCTIONS run: scanning for the body-opening brace.
    FnScan {
        start: usize,
        start_line: usize,
        last_significant: Option<char>,
    },
    /// FUNCTIONS run: inside the body braces.
    FnBody { open: usize, curly_base: usize },
    /// FUNCTIONS run: after the body closed.
    FnTail,
    /// FUNCTION_DECLARATION run states.
    DeclHeader,
    DeclArgs {
        tokens: Vec<Token>,
        significant: bool,
        /// Live splitter deciding which commas separate arguments; commas
        /// inside generic or nested types sit at splitter depth > 0.
        splitter: VarDeclMatcher,
    },
    DeclTail,
}

pub struct TypeScriptDetector {
    lines: SourceLines,
    ctx: RunContext,
    mode: Mode,
    general: BracesMatcher,
    curly: BracesMatcher,
    buffered: usize,
}

impl TypeScriptDetector {
    pub fn new(lines: &SourceLines) -> Self {
        Self {
            lines: lines.clone(),
            ctx: RunContext {
                nonterminal: Symbol::TopLevel,
                depth: 0,
            },
            mode: Mode::Filler,
            general: BracesMatcher::common(),
            curly: BracesMatcher::curly(),
            buffered: 0,
        }
    }

    fn line_of(&self, token: &Token) -> usize {
        self.lines.offset_to_index(token.span.start).line
    }

    fn feed_braces(&mut self, token: &Token) -> ParseResult<()> {
        if token.kind != TokenKind::Brace {
            return Ok(());
        }
        let ch = token.text.chars().next().expect("brace token has one char");
        let line = self.line_of(token);
        self.general
            .next(ch)
            .map_err(|e| ParseError::UnbalancedBracket {
                message: e.to_string(),
                line,
            })?;
        if self.curly.is_brace(ch) {
            self.curly
                .next(ch)
                .map_err(|e| ParseError::UnbalancedBracket {
                    message: e.to_string(),
                    line,
                })?;
        }
        Ok(())
    }

    /// A spacing token ends the statement on a newline with all brackets
    /// closed, or on a semicolon outside curly braces.
    fn ends_statement(&self, token: &Token) -> bool {
        if !token.is_spacing() {
            return false;
        }
        (token.text.contains('\n') && self.general.current_depth() == 0)
            || (token.text.contains(';') && self.curly.current_depth() == 0)
    }

    /// Advance the per-statement evidence with one significant token.
    fn scan_token(&mut self, statement: &mut TsStatement, index: usize, token: &Token) {
        let significant = !token.is_spacing();
        if statement.kind == TsKind::CommentMulti && significant && !statement.tokens.is_empty() {
            statement.demoted = true;
        }

        let top_level = self.ctx.nonterminal == Symbol::TopLevel;

        // `export … from` upgrades whenever the `from` sits outside every
        // bracket; the braces of an export list do not disarm it.
        if statement.kind == TsKind::Plain
            && statement.export_seen
            && top_level
            && token.kind == TokenKind::Other
            && token.text == "from"
            && self.general.current_depth() == 0
        {
            statement.kind = TsKind::References;
            return;
        }

        // Keyword and shape upgrades while the prefix is still plain.
        if statement.kind == TsKind::Plain && statement.prefix_texts_only {
            match token.kind {
                TokenKind::Other => {
                    let text = token.text.as_str();
                    if text == "=" || text == "=>" {
                        statement.prefix_texts_only = false;
                    } else if top_level && text == "import" {
                        statement.kind = TsKind::References;
                    } else if top_level && text == "export" {
                        statement.export_seen = true;
                    } else if top_level && (text == "class" || text == "interface") {
                        statement.kind = TsKind::Classes {
                            keyword: text.to_string(),
                        };
                    } else if top_level && text == "function" {
                        statement.kind = TsKind::Functions;
                    } else if self.ctx.nonterminal == Symbol::Classes && text.contains(':') {
                        statement.kind = TsKind::Attribute;
                    }
                }
                TokenKind::Brace => {
                    let ch = token.text.chars().next().expect("brace token has one char");
                    if ch == '(' && self.ctx.nonterminal == Symbol::Classes {
                        // Method shape: the parenthesis arms the function
                        // machine.
                        statement.kind = TsKind::Functions;
                    } else {
                        statement.prefix_texts_only = false;
                    }
                }
                _ => statement.prefix_texts_only = false,
            }
        }

        match statement.kind {
            TsKind::Functions => self.advance_fn_shape(statement, index, token),
            TsKind::Classes { .. } => self.track_class_braces(statement, index, token),
            _ => {}
        }
    }

    fn advance_fn_shape(&mut self, statement: &mut TsStatement, index: usize, token: &Token) {
        if token.is_spacing() {
            return;
        }
        match &mut statement.fn_shape {
            FnShape::Start => {
                if token.kind == TokenKind::Brace
                    && token.text == "("
                    && self.general.current_depth() == 1
                {
                    statement.fn_shape = FnShape::Params;
                }
            }
            FnShape::Params => {
                if token.kind == TokenKind::Brace
                    && token.text == ")"
                    && self.general.current_depth() == 0
                {
                    statement.fn_shape = FnShape::AfterParams {
                        type_depth: 0,
                        last_significant: None,
                    };
                }
            }
            FnShape::AfterParams {
                type_depth,
                last_significant,
            } => match token.kind {
                TokenKind::Brace => {
                    let ch = token.text.chars().next().expect("brace token has one char");
                    if ch == '{' && *type_depth == 0 && *last_significant != Some(':') {
                        statement.fn_body_open = Some(index);
                        statement.fn_shape = FnShape::Body {
                            curly_base: self.curly.current_depth(),
                        };
                    } else {
                        match ch {
                            '(' | '[' | '{' => *type_depth += 1,
                            _ => *type_depth = type_depth.saturating_sub(1),
                        }
                        *last_significant = Some(ch);
                    }
                }
                _ => {
                    if token.text != "=>" {
                        for ch in token.text.chars() {
                            match ch {
                                '<' => *type_depth += 1,
                                '>' => *type_depth = type_depth.saturating_sub(1),
                                _ => {}
                            }
                        }
                    }
                    if let Some(ch) = token.text.chars().rev().find(|c| !c.is_whitespace()) {
                        *last_significant = Some(ch);
                    }
                }
            },
            FnShape::Body { curly_base } => {
                if token.kind == TokenKind::Brace
                    && token.text == "}"
                    && self.curly.current_depth() + 1 == *curly_base
                {
                    statement.fn_shape = FnShape::AfterBody;
                }
            }
            FnShape::AfterBody => {
                statement.fn_shape = FnShape::Downgraded;
            }
            FnShape::Downgraded => {}
        }
    }

    fn track_class_braces(&mut self, statement: &mut TsStatement, index: usize, token: &Token) {
        if token.kind != TokenKind::Brace {
            return;
        }
        if token.text == "{" && statement.class_open.is_none() {
            statement.class_open = Some(index);
            statement.class_curly_base = self.curly.current_depth();
        } else if token.text == "}"
            && statement.class_open.is_some()
            && statement.class_close.is_none()
            && self.curly.current_depth() + 1 == statement.class_curly_base
        {
            statement.class_close = Some(index);
        }
    }

    /// Resolve a finished statement to its symbol.
    fn resolve_statement(&self, statement: &TsStatement, end: usize) -> SymbolSpec {
        match &statement.kind {
            TsKind::CommentSingle => SymbolSpec::with_seed(
                Symbol::CommentSingleline,
                NodeSeed::Comment {
                    multiline: false,
                    contents: line_comment_contents(&statement.tokens[0].text),
                },
            ),
            TsKind::CommentMulti if !statement.demoted => SymbolSpec::with_seed(
                Symbol::CommentMultiline,
                NodeSeed::Comment {
                    multiline: true,
                    contents: block_comment_contents(&statement.tokens[0].text),
                },
            ),
            TsKind::References => SymbolSpec::with_seed(
                Symbol::References,
                reference_seed(&statement.tokens),
            ),
            TsKind::Classes { keyword } => {
                match (statement.class_open, statement.class_close) {
                    (Some(open), Some(close)) => SymbolSpec {
                        symbol: Symbol::Classes,
                        parse_range: Some(open + 1..close),
                        seed: Some(NodeSeed::Class {
                            class_type: Some(keyword.clone()),
                            definition_text: statement.text_before(open).trim().to_string(),
                        }),
                    },
                    _ => SymbolSpec::plain(Symbol::StatementsFiller),
                }
            }
            TsKind::Functions => {
                let complete =
                    statement.fn_shape == FnShape::AfterBody && statement.fn_body_open.is_some();
                if !complete {
                    return SymbolSpec::plain(Symbol::StatementsFiller);
                }
                let body_open = statement.fn_body_open.expect("checked above");
                SymbolSpec {
                    symbol: Symbol::Functions,
                    parse_range: Some(statement.start..end),
                    seed: Some(NodeSeed::Function {
                        definition_text: statement.text_before(body_open).trim().to_string(),
                        return_type: function_return_type(statement),
                    }),
                }
            }
            TsKind::Attribute => {
                let mut matcher = VarDeclMatcher::new();
                feed_var_decl(&mut matcher, &statement.tokens);
                let (name, attr_type) = matcher.finish();
                SymbolSpec::with_seed(Symbol::Attributes, NodeSeed::Attribute { name, attr_type })
            }
            _ => SymbolSpec::plain(Symbol::StatementsFiller),
        }
    }

    /// TOP_LEVEL, CLASSES and FUNCTION_BODY runs.
    fn statement_run(
        &mut self,
        index: usize,
        token: Option<&Token>,
    ) -> ParseResult<Option<SymbolDirective>> {
        let Some(token) = token else {
            let mode = std::mem::replace(&mut self.mode, Mode::Filler);
            let directive = match mode {
                Mode::Filler => (self.buffered > 0)
                    .then(|| SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))),
                Mode::Statement(statement) => Some(SymbolDirective::one(
                    self.resolve_statement(&statement, index),
                )),
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
                    return Ok(None);
                }
                let directive = (self.buffered > 0)
                    .then(|| SymbolDirective::retain(SymbolSpec::plain(Symbol::Filler), 1));
                let mut statement = TsStatement::new(index);
                if token.kind == TokenKind::SinglelineComment {
                    statement.kind = TsKind::CommentSingle;
                } else if token.kind == TokenKind::MultilineCommentOrString
                    && token.text.starts_with("/*")
                {
                    statement.kind = TsKind::CommentMulti;
                }
                self.feed_braces(token)?;
                self.scan_token(&mut statement, index, token);
                statement.tokens.push(token.clone());
                self.mode = Mode::Statement(statement);
                self.buffered = 1;
                Ok(directive)
            }
            Mode::Statement(mut statement) => {
                if self.ends_statement(token) {
                    let spec = self.resolve_statement(&statement, index);
                    self.mode = Mode::Filler;
                    self.buffered = 1;
                    return Ok(Some(SymbolDirective::retain(spec, 1)));
                }
                self.feed_braces(token)?;
                if !token.is_spacing() {
                    self.scan_token(&mut statement, index, token);
                }
                statement.tokens.push(token.clone());
                self.mode = Mode::Statement(statement);
                self.buffered += 1;
                Ok(None)
            }
            _ => unreachable!("statement run in declaration mode"),
        }
    }

    /// FUNCTIONS run: declaration before the body brace, braced body after.
    fn functions_run(
        &mut self,
        index: usize,
        token: Option<&Token>,
    ) -> ParseResult<Option<SymbolDirective>> {
        if let Mode::Filler = self.mode {
            match token {
                Some(t) => {
                    self.mode = Mode::FnScan {
                        start: index,
                        start_line: self.line_of(t),
                        last_significant: None,
                    };
                }
                None => return Ok(None),
            }
        }
        match self.mode {
            Mode::FnScan {
                start,
                start_line,
                last_significant,
            } => match token {
                Some(t) => {
                    self.feed_braces(t)?;
                    // The body brace is the first '{' outside every bracket
                    // that does not directly follow a colon (that one opens
                    // an object type).
                    if t.kind == TokenKind::Brace
                        && t.text == "{"
                        && self.curly.current_depth() == 1
                        && self.general.current_depth() == 1
                        && last_significant != Some(':')
                    {
                        self.mode = Mode::FnBody {
                            open: index,
                            curly_base: 1,
                        };
                        return Ok(Some(SymbolDirective::retain(
                            SymbolSpec::nonterminal(Symbol::FunctionDeclaration, start..index),
                            1,
                        )));
                    }
                    if !t.is_spacing() {
                        if let Some(ch) = t.text.chars().rev().find(|c| !c.is_whitespace()) {
                            self.mode = Mode::FnScan {
                                start,
                                start_line,
                                last_significant: Some(ch),
                            };
                        }
                    }
                    Ok(None)
                }
                None => Err(ParseError::MissingBodyOpener {
                    construct: "function",
                    line: start_line,
                }),
            },
            Mode::FnBody { open, curly_base } => match token {
                Some(t) => {
                    self.feed_braces(t)?;
                    if t.kind == TokenKind::Brace
                        && t.text == "}"
                        && self.curly.current_depth() + 1 == curly_base
                    {
                        self.mode = Mode::FnTail;
                        self.buffered = 0;
                        return Ok(Some(SymbolDirective::one(SymbolSpec::nonterminal(
                            Symbol::FunctionBody,
                            open + 1..index,
                        ))));
                    }
                    Ok(None)
                }
                None => Err(ParseError::Syntax {
                    message: "function body never closes".to_string(),
                    line: self.lines.line_count().saturating_sub(1),
                }),
            },
            Mode::FnTail => match token {
                Some(t) => {
                    self.feed_braces(t)?;
                    self.buffered += 1;
                    Ok(None)
                }
                None => {
                    let had_buffer = self.buffered > 0;
                    self.mode = Mode::Filler;
                    self.buffered = 0;
                    Ok(had_buffer.then(|| SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))))
                }
            },
            _ => unreachable!("functions run in statement mode"),
        }
    }

    /// FUNCTION_DECLARATION run: arguments between depth-1 commas.
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
                self.buffered += 1;
                if t.kind == TokenKind::Brace
                    && t.text == "("
                    && self.general.current_depth() == 1
                {
                    self.mode = Mode::DeclArgs {
                        tokens: Vec::new(),
                        significant: false,
                        splitter: VarDeclMatcher::new(),
                    };
                    self.buffered = 0;
                    return Ok(Some(SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))));
                }
                Ok(None)
            }
            (
                Mode::DeclArgs {
                    tokens,
                    significant,
                    splitter,
                },
                Some(t),
            ) => {
                let was_significant = *significant;
                let arg_tokens = tokens.clone();
                let splitter_depth = splitter.current_depth();
                if t.kind == TokenKind::Brace {
                    self.feed_braces(t)?;
                    if self.general.current_depth() == 0 {
                        // Closing parenthesis of the parameter list.
                        let directive = if was_significant {
                            SymbolDirective::SplitTwo {
                                first: SymbolSpec::with_seed(
                                    Symbol::Argument,
                                    ts_argument_seed(&arg_tokens),
                                ),
                                second: SymbolSpec::plain(Symbol::Filler),
                                second_len: 1,
                            }
                        } else {
                            SymbolDirective::one(SymbolSpec::plain(Symbol::Filler))
                        };
                        self.mode = Mode::DeclTail;
                        self.buffered = 0;
                        return Ok(Some(directive));
                    }
                    if let Mode::DeclArgs {
                        tokens,
                        significant,
                        splitter,
                    } = &mut self.mode
                    {
                        tokens.push(t.clone());
                        *significant = true;
                        for ch in t.text.chars() {
                            splitter.next(ch);
                        }
                    }
                    self.buffered += 1;
                    return Ok(None);
                }
                if t.kind == TokenKind::Comma
                    && self.general.current_depth() == 1
                    && splitter_depth == 0
                {
                    let directive = if was_significant {
                        SymbolDirective::SplitTwo {
                            first: SymbolSpec::with_seed(
                                Symbol::Argument,
                                ts_argument_seed(&arg_tokens),
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
                        splitter: VarDeclMatcher::new(),
                    };
                    self.buffered = 0;
                    return Ok(Some(directive));
                }
                if let Mode::DeclArgs {
                    tokens,
                    significant,
                    splitter,
                } = &mut self.mode
                {
                    tokens.push(t.clone());
                    *significant |= !t.is_spacing() && t.kind != TokenKind::SinglelineComment;
                    match t.kind {
                        TokenKind::SinglelineComment => {}
                        TokenKind::Spacing => splitter.next(' '),
                        _ => {
                            for ch in t.text.chars() {
                                splitter.next(ch);
                            }
                        }
                    }
                }
                self.buffered += 1;
                Ok(None)
            }
            (Mode::DeclTail, Some(t)) => {
                self.feed_braces(t)?;
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

impl Detector for TypeScriptDetector {
    fn comment_before_function(&self) -> bool {
        true
    }

    fn begin_run(&mut self, ctx: RunContext) {
        self.ctx = ctx;
        self.mode = Mode::Filler;
        self.general.reset();
        self.curly.reset();
        self.buffered = 0;
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

/// The cleaned text between the parameter list's `)` and the body `{`.
fn function_return_type(statement: &TsStatement) -> Option<String> {
    let FnShape::AfterBody = statement.fn_shape else {
        return None;
    };
    let body_open = statement.fn_body_open?;
    // Walk the statement tokens between the closing parenthesis and the
    // body brace.
    let mut close_paren: Option<usize> = None;
    let mut depth = 0usize;
    for (i, token) in statement.tokens.iter().enumerate() {
        if token.kind == TokenKind::Brace {
            match token.text.as_str() {
                "(" => depth += 1,
                ")" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && close_paren.is_none() {
                        close_paren = Some(i);
                    }
                }
                _ => {}
            }
        }
    }
    let close = close_paren?;
    let body = body_open - statement.start;
    let region: String = statement.tokens[close + 1..body]
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    let cleaned = region.trim().trim_start_matches(':').trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn feed_var_decl(matcher: &mut VarDeclMatcher, tokens: &[Token]) {
    for token in tokens {
        match token.kind {
            TokenKind::SinglelineComment => {}
            TokenKind::Spacing => matcher.next(' '),
            _ => {
                for ch in token.text.chars() {
                    matcher.next(ch);
                }
            }
        }
    }
}

fn ts_argument_seed(tokens: &[Token]) -> NodeSeed {
    let mut matcher = VarDeclMatcher::new();
    feed_var_decl(&mut matcher, tokens);
    let (name, arg_type) = matcher.finish();
    NodeSeed::Argument { name, arg_type }
}

/// Reference seed: the path comes from the statement's final string literal.
fn reference_seed(tokens: &[Token]) -> NodeSeed {
    let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let path = tokens
        .iter()
        .rev()
        .find(|t| t.kind == TokenKind::StringLiteral)
        .map(|t| reference_path(strip_quotes(&t.text)))
        .unwrap_or_default();
    NodeSeed::Reference {
        text: text.trim_end().to_string(),
        path,
    }
}

fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    let (first, last) = (chars.next(), chars.next_back());
    if matches!(first, Some('"') | Some('\'')) && first == last {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

fn reference_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("./") {
        format!("local-file://{rest}")
    } else if path.starts_with("../") {
        format!("local-file://{path}")
    } else {
        format!("environment://{path}")
    }
}

fn line_comment_contents(text: &str) -> String {
    text.trim_start_matches('/').trim().to_string()
}

/// Strip `/*`…`*/` and the decorative leading asterisks doc comments carry.
fn block_comment_contents(text: &str) -> String {
    let inner = text
        .strip_prefix("/*")
        .unwrap_or(text)
        .strip_suffix("*/")
        .unwrap_or(text);
    inner
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text.to_string(), 0..text.chars().count())
    }

    #[test]
    fn test_reference_paths() {
        assert_eq!(reference_path("./mod"), "local-file://mod");
        assert_eq!(reference_path("../lib/util"), "local-file://../lib/util");
        assert_eq!(reference_path("react"), "environment://react");
        assert_eq!(reference_path("react/dom"), "environment://react/dom");
    }

    #[test]
    fn test_reference_seed_takes_final_string() {
        let tokens = [
            token(TokenKind::Other, "import"),
            token(TokenKind::Spacing, " "),
            token(TokenKind::Brace, "{"),
            token(TokenKind::Other, "X"),
            token(TokenKind::Brace, "}"),
            token(TokenKind::Spacing, " "),
            token(TokenKind::Other, "from"),
            token(TokenKind::Spacing, " "),
            token(TokenKind::StringLiteral, "\"./mod\""),
        ];
        let NodeSeed::Reference { text, path } = reference_seed(&tokens) else {
            panic!("not a reference seed");
        };
        assert_eq!(text, "import {X} from \"./mod\"");
        assert_eq!(path, "local-file://mod");
    }

    #[test]
    fn test_comment_contents() {
        assert_eq!(line_comment_contents("// note"), "note");
        assert_eq!(block_comment_contents("/* hello */"), "hello");
        assert_eq!(block_comment_contents("/** hello */"), "hello");
        assert_eq!(
            block_comment_contents("/**\n * one\n * two\n */"),
            "one\ntwo"
        );
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"./mod\""), "./mod");
        assert_eq!(strip_quotes("'x'"), "x");
        assert_eq!(strip_quotes("bare"), "bare");
    }
}
