//! The generic production-rule engine
//!
//! One driver serves every language. For each non-terminal it starts a
//! detector run over a token range, accumulates the returned symbol
//! directives, checks that the run tiled the range completely and conformed
//! to the production rules, materializes nodes, and recurses into every
//! non-terminal symbol through its parse range.
//!
//! Function assembly is the one special case: a FUNCTIONS run must come out
//! as declaration-then-body, the function node always lands inside a
//! FunctionGroup wrapper, and doc comments attach to that wrapper according
//! to the language's `comment_before_function` policy.

use crate::ast::{NodeId, NodeKind, SourceTree};
use crate::error::{DetectorError, OutlineResult, ParseError};
use crate::lexing::Token;
use crate::parsing::detector::{Detector, RunContext};
use crate::parsing::directive::{NodeSeed, SymbolDirective, SymbolSpec, TokenRange};
use crate::parsing::grammar::{validate_production, Symbol};
use crate::position::{Range, SourceLines};

/// Parse a lexed token stream into a structural tree.
pub fn parse_tokens<D: Detector>(
    lines: SourceLines,
    tokens: Vec<Token>,
    detector: &mut D,
) -> OutlineResult<SourceTree> {
    let token_count = tokens.len();
    let mut driver = Driver {
        tokens,
        detector,
        tree: SourceTree::new(lines),
    };
    let root = driver.tree.root();
    driver.parse_block(Symbol::TopLevel, 0..token_count, root, 0)?;
    Ok(driver.tree)
}

/// One accumulated symbol of a detector run.
#[derive(Debug, Clone)]
struct SymbolEntry {
    symbol: Symbol,
    token_range: TokenRange,
    parse_range: Option<TokenRange>,
    seed: Option<NodeSeed>,
}

struct Driver<'d, D: Detector> {
    tokens: Vec<Token>,
    detector: &'d mut D,
    tree: SourceTree,
}

impl<'d, D: Detector> Driver<'d, D> {
    /// Convert a token-index range to a source range. An empty token range
    /// becomes the empty source range at the position of its start token.
    fn tokens_to_range(&self, token_range: &TokenRange) -> Range {
        let lines = self.tree.lines();
        if token_range.start == token_range.end {
            let offset = if token_range.start < self.tokens.len() {
                self.tokens[token_range.start].span.start
            } else {
                lines.total_chars()
            };
            let index = lines.offset_to_index(offset);
            return Range::new(index, index);
        }
        Range::new(
            lines.offset_to_index(self.tokens[token_range.start].span.start),
            lines.offset_to_index(self.tokens[token_range.end - 1].span.end),
        )
    }

    /// Run the detector over a token range and accumulate its directives.
    fn collect(
        &mut self,
        nonterminal: Symbol,
        range: TokenRange,
        depth: usize,
    ) -> OutlineResult<Vec<SymbolEntry>> {
        self.detector.begin_run(RunContext { nonterminal, depth });
        let mut entries = Vec::new();
        let mut buffer_start = range.start;
        for index in range.clone() {
            let token = &self.tokens[index];
            if let Some(directive) = self.detector.next_symbol(index, Some(token))? {
                buffer_start =
                    apply_directive(directive, buffer_start, index + 1, &mut entries)?;
            }
        }
        if let Some(directive) = self.detector.next_symbol(range.end, None)? {
            buffer_start = apply_directive(directive, buffer_start, range.end, &mut entries)?;
        }
        if buffer_start != range.end {
            return Err(ParseError::UnparsedResidue {
                context: format!(
                    "{nonterminal:?} run left tokens {buffer_start}..{} unaccounted for",
                    range.end
                ),
            }
            .into());
        }
        let symbols: Vec<Symbol> = entries.iter().map(|e| e.symbol).collect();
        validate_production(nonterminal, &symbols)?;
        log::trace!("{nonterminal:?} run over {range:?}: {symbols:?}");
        Ok(entries)
    }

    /// Parse a TOP_LEVEL or CLASSES range, attaching children to `parent`.
    fn parse_block(
        &mut self,
        nonterminal: Symbol,
        range: TokenRange,
        parent: NodeId,
        depth: usize,
    ) -> OutlineResult<()> {
        let entries = self.collect(nonterminal, range, depth)?;
        let mut pending_doc: Option<usize> = None;
        for idx in 0..entries.len() {
            let entry = &entries[idx];
            match entry.symbol {
                Symbol::Filler | Symbol::StatementsFiller => {}
                Symbol::References | Symbol::Attributes | Symbol::CommentSingleline => {
                    let node = self.node_from_entry(entry.clone())?;
                    self.tree.attach(parent, node);
                }
                Symbol::CommentMultiline => {
                    let function_follows = self.detector.comment_before_function()
                        && entries[idx + 1..]
                            .iter()
                            .find(|e| e.symbol != Symbol::Filler)
                            .is_some_and(|e| e.symbol == Symbol::Functions);
                    if function_follows {
                        pending_doc = Some(idx);
                    } else {
                        let node = self.node_from_entry(entry.clone())?;
                        self.tree.attach(parent, node);
                    }
                }
                Symbol::Classes => {
                    let entry = entry.clone();
                    let parse_range = required_parse_range(&entry)?;
                    let node_range = self.tokens_to_range(&entry.token_range);
                    let inner = self.tokens_to_range(&parse_range);
                    let class = self.node_from_seed(entry.seed, entry.symbol, node_range)?;
                    self.tree.set_inner_range(class, inner);
                    self.tree.attach(parent, class);
                    self.parse_block(Symbol::Classes, parse_range, class, depth + 1)?;
                }
                Symbol::Functions => {
                    let entry = entry.clone();
                    let doc_entry = pending_doc.take().map(|i| entries[i].clone());
                    self.build_function(entry, doc_entry, parent, depth)?;
                }
                other => {
                    return Err(DetectorError::IllegalProduction {
                        parent: nonterminal,
                        child: other,
                    }
                    .into())
                }
            }
        }
        Ok(())
    }

    /// Assemble the FunctionGroup wrapper, the function node, and its
    /// declaration/body sub-parses.
    fn build_function(
        &mut self,
        entry: SymbolEntry,
        doc_entry: Option<SymbolEntry>,
        parent: NodeId,
        depth: usize,
    ) -> OutlineResult<()> {
        let parse_range = required_parse_range(&entry)?;
        let function_range = self.tokens_to_range(&entry.token_range);
        let group_range = match &doc_entry {
            Some(doc) => {
                let doc_range = self.tokens_to_range(&doc.token_range);
                Range::merge([&doc_range, &function_range].into_iter()).expect("two ranges")
            }
            None => function_range,
        };

        let group = self.tree.create(NodeKind::FunctionGroup, group_range);
        self.tree.attach(parent, group);
        if let Some(doc) = doc_entry {
            let node = self.node_from_entry(doc)?;
            self.tree.attach(group, node);
        }
        let function = self.node_from_seed(entry.seed, entry.symbol, function_range)?;
        self.tree.attach(group, function);
        self.parse_functions(parse_range, function, group, depth)
    }

    /// Sub-parse a FUNCTIONS range: exactly one declaration, then one body.
    fn parse_functions(
        &mut self,
        range: TokenRange,
        function: NodeId,
        group: NodeId,
        depth: usize,
    ) -> OutlineResult<()> {
        let entries = self.collect(Symbol::Functions, range, depth)?;
        let significant: Vec<&SymbolEntry> =
            entries.iter().filter(|e| e.symbol != Symbol::Filler).collect();
        let (declaration, body) = match significant.as_slice() {
            [decl, body]
                if decl.symbol == Symbol::FunctionDeclaration
                    && body.symbol == Symbol::FunctionBody =>
            {
                ((*decl).clone(), (*body).clone())
            }
            other => {
                return Err(DetectorError::MalformedFunctions {
                    detail: format!(
                        "expected declaration then body, found {:?}",
                        other.iter().map(|e| e.symbol).collect::<Vec<_>>()
                    ),
                }
                .into())
            }
        };

        let decl_range = required_parse_range(&declaration)?;
        let decl_node_range = self.tokens_to_range(&declaration.token_range);
        let decl_node = self
            .tree
            .create(NodeKind::FunctionDeclaration, decl_node_range);
        self.tree.attach(function, decl_node);
        self.parse_declaration(decl_range, decl_node, depth)?;

        let body_range = required_parse_range(&body)?;
        let inner = self.tokens_to_range(&body_range);
        self.tree.set_inner_range(function, inner);
        self.parse_body(body_range, function, group, depth + 1)
    }

    fn parse_declaration(
        &mut self,
        range: TokenRange,
        declaration: NodeId,
        depth: usize,
    ) -> OutlineResult<()> {
        let entries = self.collect(Symbol::FunctionDeclaration, range, depth)?;
        for entry in entries {
            match entry.symbol {
                Symbol::Filler => {}
                Symbol::Argument | Symbol::CommentSingleline | Symbol::CommentMultiline => {
                    let node = self.node_from_entry(entry)?;
                    self.tree.attach(declaration, node);
                }
                other => {
                    return Err(DetectorError::IllegalProduction {
                        parent: Symbol::FunctionDeclaration,
                        child: other,
                    }
                    .into())
                }
            }
        }
        Ok(())
    }

    /// Sub-parse a FUNCTION_BODY range directly into the function node.
    ///
    /// A leading multi-line comment is lifted to the FunctionGroup when the
    /// language keeps doc comments inside the body; it is the one body
    /// element that does not assert the body-nonempty flag.
    fn parse_body(
        &mut self,
        range: TokenRange,
        function: NodeId,
        group: NodeId,
        depth: usize,
    ) -> OutlineResult<()> {
        let entries = self.collect(Symbol::FunctionBody, range, depth)?;
        let first_significant = entries.iter().position(|e| !e.symbol.is_filler());
        let mut has_body = false;
        for (idx, entry) in entries.into_iter().enumerate() {
            match entry.symbol {
                Symbol::Filler => {}
                Symbol::StatementsFiller => has_body = true,
                Symbol::CommentSingleline | Symbol::CommentMultiline => {
                    let lift = entry.symbol == Symbol::CommentMultiline
                        && Some(idx) == first_significant
                        && !self.detector.comment_before_function();
                    let node = self.node_from_entry(entry)?;
                    if lift {
                        self.tree.insert_child(group, 0, node);
                    } else {
                        has_body = true;
                        self.tree.attach(function, node);
                    }
                }
                other => {
                    return Err(DetectorError::IllegalProduction {
                        parent: Symbol::FunctionBody,
                        child: other,
                    }
                    .into())
                }
            }
        }
        if has_body {
            self.tree.mark_function_has_body(function);
        }
        Ok(())
    }

    fn node_from_entry(&mut self, entry: SymbolEntry) -> OutlineResult<NodeId> {
        let range = self.tokens_to_range(&entry.token_range);
        self.node_from_seed(entry.seed, entry.symbol, range)
    }

    fn node_from_seed(
        &mut self,
        seed: Option<NodeSeed>,
        symbol: Symbol,
        range: Range,
    ) -> OutlineResult<NodeId> {
        let seed = seed.ok_or(DetectorError::MissingSeed { symbol })?;
        let kind = match seed {
            NodeSeed::Reference { text, path } => NodeKind::Reference { text, path },
            NodeSeed::Class {
                class_type,
                definition_text,
            } => NodeKind::Class {
                class_type,
                definition_text,
            },
            NodeSeed::Function {
                definition_text,
                return_type,
            } => NodeKind::Function {
                definition_text,
                return_type,
                has_body: false,
            },
            NodeSeed::Comment {
                multiline,
                contents,
            } => NodeKind::Comment {
                multiline,
                contents,
            },
            NodeSeed::Argument { name, arg_type } => NodeKind::Argument { name, arg_type },
            NodeSeed::Attribute { name, attr_type } => NodeKind::Attribute { name, attr_type },
        };
        Ok(self.tree.create(kind, range))
    }
}

fn required_parse_range(entry: &SymbolEntry) -> OutlineResult<TokenRange> {
    entry
        .parse_range
        .clone()
        .ok_or_else(|| DetectorError::MissingParseRange { symbol: entry.symbol }.into())
}

/// Slice the committed buffer according to the directive and validate the
/// spec of every emitted symbol.
fn apply_directive(
    directive: SymbolDirective,
    buffer_start: usize,
    buffer_end: usize,
    entries: &mut Vec<SymbolEntry>,
) -> OutlineResult<usize> {
    let len = buffer_end - buffer_start;
    match directive {
        SymbolDirective::OneSymbol { symbol } => {
            if len == 0 {
                return Err(DetectorError::EmptySplit {
                    detail: "symbol over an empty buffer".into(),
                }
                .into());
            }
            push_symbol(symbol, buffer_start..buffer_end, entries)?;
            Ok(buffer_end)
        }
        SymbolDirective::SplitTwo {
            first,
            second,
            second_len,
        } => {
            if second_len == 0 || second_len >= len {
                return Err(DetectorError::EmptySplit {
                    detail: format!("two-way split of {len} tokens at {second_len}"),
                }
                .into());
            }
            let cut = buffer_end - second_len;
            push_symbol(first, buffer_start..cut, entries)?;
            push_symbol(second, cut..buffer_end, entries)?;
            Ok(buffer_end)
        }
        SymbolDirective::RetainSuffix { first, retain_len } => {
            if retain_len == 0 || retain_len >= len {
                return Err(DetectorError::EmptySplit {
                    detail: format!("retain of {retain_len} from {len} tokens"),
                }
                .into());
            }
            let cut = buffer_end - retain_len;
            push_symbol(first, buffer_start..cut, entries)?;
            Ok(cut)
        }
        SymbolDirective::ThreeWaySplit {
            first,
            second,
            second_len,
            retain_len,
        } => {
            if second_len == 0 || retain_len == 0 || second_len + retain_len >= len {
                return Err(DetectorError::EmptySplit {
                    detail: format!(
                        "three-way split of {len} tokens into head + {second_len} + {retain_len}"
                    ),
                }
                .into());
            }
            let second_cut = buffer_end - retain_len - second_len;
            push_symbol(first, buffer_start..second_cut, entries)?;
            push_symbol(second, second_cut..buffer_end - retain_len, entries)?;
            Ok(buffer_end - retain_len)
        }
    }
}

fn push_symbol(
    spec: SymbolSpec,
    token_range: TokenRange,
    entries: &mut Vec<SymbolEntry>,
) -> OutlineResult<()> {
    if spec.symbol == Symbol::TopLevel {
        return Err(DetectorError::ForbiddenSymbol {
            symbol: spec.symbol,
        }
        .into());
    }
    if spec.symbol.is_nonterminal() {
        let parse_range = spec
            .parse_range
            .as_ref()
            .ok_or(DetectorError::MissingParseRange {
                symbol: spec.symbol,
            })?;
        let contained =
            token_range.start <= parse_range.start && parse_range.end <= token_range.end;
        if !contained {
            return Err(DetectorError::ParseRangeOutsideSymbol {
                symbol: spec.symbol,
            }
            .into());
        }
    } else if spec.parse_range.is_some() {
        return Err(DetectorError::ParseRangeOnTerminal {
            symbol: spec.symbol,
        }
        .into());
    }
    entries.push(SymbolEntry {
        symbol: spec.symbol,
        token_range,
        parse_range: spec.parse_range,
        seed: spec.seed,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OutlineError, ParseResult};
    use std::collections::HashMap;

    /// Replays directives from a script keyed by token index. Lets the tests
    /// drive the engine without a real language.
    struct ScriptedDetector {
        script: HashMap<usize, SymbolDirective>,
        comment_before_function: bool,
    }

    impl ScriptedDetector {
        fn new(script: Vec<(usize, SymbolDirective)>) -> Self {
            Self {
                script: script.into_iter().collect(),
                comment_before_function: true,
            }
        }
    }

    impl Detector for ScriptedDetector {
        fn comment_before_function(&self) -> bool {
            self.comment_before_function
        }

        fn begin_run(&mut self, _ctx: RunContext) {}

        fn next_symbol(
            &mut self,
            index: usize,
            _token: Option<&Token>,
        ) -> ParseResult<Option<SymbolDirective>> {
            Ok(self.script.remove(&index))
        }
    }

    fn lex(source: &str) -> (SourceLines, Vec<Token>) {
        let lines = SourceLines::new(source);
        let tokens = crate::lexing::run_lexer(
            &mut crate::lexing::PythonLexerRules::new(),
            &lines,
        )
        .unwrap();
        (lines, tokens)
    }

    fn reference_spec(name: &str) -> SymbolSpec {
        SymbolSpec::with_seed(
            Symbol::References,
            NodeSeed::Reference {
                text: format!("import {name}"),
                path: format!("environment://{name}"),
            },
        )
    }

    #[test]
    fn test_single_reference_builds_node() {
        // "import os\n" lexes to [import][ ][os][\n]
        let (lines, tokens) = lex("import os\n");
        let mut detector = ScriptedDetector::new(vec![
            (
                3,
                SymbolDirective::retain(reference_spec("os"), 1),
            ),
            (
                4,
                SymbolDirective::one(SymbolSpec::plain(Symbol::Filler)),
            ),
        ]);
        let tree = parse_tokens(lines, tokens, &mut detector).unwrap();

        let root = tree.root();
        assert_eq!(tree.children(root).len(), 1);
        let reference = tree.children(root)[0];
        assert!(matches!(
            tree.node(reference).kind,
            NodeKind::Reference { .. }
        ));
        assert_eq!(tree.text(reference), "import os");
        tree.validate().unwrap();
    }

    #[test]
    fn test_unaccounted_tokens_fail() {
        let (lines, tokens) = lex("import os\n");
        let mut detector = ScriptedDetector::new(vec![]);
        let result = parse_tokens(lines, tokens, &mut detector);
        assert!(matches!(
            result,
            Err(OutlineError::Parse(ParseError::UnparsedResidue { .. }))
        ));
    }

    #[test]
    fn test_forbidden_symbol_is_detector_bug() {
        let (lines, tokens) = lex("import os\n");
        let mut detector = ScriptedDetector::new(vec![(
            4,
            SymbolDirective::one(SymbolSpec::nonterminal(Symbol::TopLevel, 0..4)),
        )]);
        let result = parse_tokens(lines, tokens, &mut detector);
        assert!(matches!(
            result,
            Err(OutlineError::Detector(DetectorError::ForbiddenSymbol { .. }))
        ));
    }

    #[test]
    fn test_illegal_rhs_symbol_is_detector_bug() {
        // ATTRIBUTES is not on TOP_LEVEL's right-hand side.
        let (lines, tokens) = lex("x: int\n");
        let count = tokens.len();
        let mut detector = ScriptedDetector::new(vec![(
            count,
            SymbolDirective::one(SymbolSpec::with_seed(
                Symbol::Attributes,
                NodeSeed::Attribute {
                    name: "x".into(),
                    attr_type: Some("int".into()),
                },
            )),
        )]);
        let result = parse_tokens(lines, tokens, &mut detector);
        assert!(matches!(
            result,
            Err(OutlineError::Detector(DetectorError::IllegalProduction { .. }))
        ));
    }

    #[test]
    fn test_zero_length_split_is_detector_bug() {
        let (lines, tokens) = lex("import os\n");
        let mut detector = ScriptedDetector::new(vec![(
            0,
            SymbolDirective::retain(reference_spec("os"), 1),
        )]);
        // Retaining 1 out of a 1-token buffer leaves an empty head.
        let result = parse_tokens(lines, tokens, &mut detector);
        assert!(matches!(
            result,
            Err(OutlineError::Detector(DetectorError::EmptySplit { .. }))
        ));
    }

    #[test]
    fn test_parse_range_escaping_symbol_is_detector_bug() {
        let (lines, tokens) = lex("class A: pass\n");
        let count = tokens.len();
        let mut detector = ScriptedDetector::new(vec![(
            count,
            SymbolDirective::one(SymbolSpec {
                symbol: Symbol::Classes,
                parse_range: Some(0..count + 4),
                seed: Some(NodeSeed::Class {
                    class_type: None,
                    definition_text: "class A:".into(),
                }),
            }),
        )]);
        let result = parse_tokens(lines, tokens, &mut detector);
        assert!(matches!(
            result,
            Err(OutlineError::Detector(
                DetectorError::ParseRangeOutsideSymbol { .. }
            ))
        ));
    }

    #[test]
    fn test_terminal_with_parse_range_is_detector_bug() {
        let (lines, tokens) = lex("import os\n");
        let mut detector = ScriptedDetector::new(vec![(
            4,
            SymbolDirective::one(SymbolSpec {
                symbol: Symbol::References,
                parse_range: Some(0..1),
                seed: None,
            }),
        )]);
        let result = parse_tokens(lines, tokens, &mut detector);
        assert!(matches!(
            result,
            Err(OutlineError::Detector(
                DetectorError::ParseRangeOnTerminal { .. }
            ))
        ));
    }
}
