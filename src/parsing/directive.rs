//! The symbol addition directive
//!
//! A detector answers the driver one token at a time. When it has seen
//! enough, it commits the buffered tokens with a directive: one symbol, a
//! two-way split, or either of those with a suffix of the buffer held back
//! for continued detection. The four shapes are the whole algebra; modelling
//! them as a sum keeps impossible combinations unrepresentable.

use crate::parsing::grammar::Symbol;

/// Token-index range, half-open, absolute within the token stream.
pub type TokenRange = std::ops::Range<usize>;

/// Everything needed to later build the node for one emitted symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSeed {
    Reference {
        text: String,
        path: String,
    },
    Class {
        class_type: Option<String>,
        definition_text: String,
    },
    Function {
        definition_text: String,
        return_type: Option<String>,
    },
    Comment {
        multiline: bool,
        contents: String,
    },
    Argument {
        name: String,
        arg_type: Option<String>,
    },
    Attribute {
        name: String,
        attr_type: Option<String>,
    },
}

/// One symbol to emit: its kind, where a sub-parse should happen (non-
/// terminals only) and the node payload (node-producing terminals and the
/// node-backed non-terminals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSpec {
    pub symbol: Symbol,
    pub parse_range: Option<TokenRange>,
    pub seed: Option<NodeSeed>,
}

impl SymbolSpec {
    pub fn plain(symbol: Symbol) -> Self {
        Self {
            symbol,
            parse_range: None,
            seed: None,
        }
    }

    pub fn with_seed(symbol: Symbol, seed: NodeSeed) -> Self {
        Self {
            symbol,
            parse_range: None,
            seed: Some(seed),
        }
    }

    pub fn nonterminal(symbol: Symbol, parse_range: TokenRange) -> Self {
        Self {
            symbol,
            parse_range: Some(parse_range),
            seed: None,
        }
    }
}

/// How the buffered tokens are committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolDirective {
    /// The whole buffer is one symbol.
    OneSymbol { symbol: SymbolSpec },
    /// The buffer splits into two symbols; the second covers the trailing
    /// `second_len` tokens.
    SplitTwo {
        first: SymbolSpec,
        second: SymbolSpec,
        second_len: usize,
    },
    /// One symbol, but the trailing `retain_len` tokens stay buffered as the
    /// start of the next detection.
    RetainSuffix {
        first: SymbolSpec,
        retain_len: usize,
    },
    /// Two symbols with a retained tail.
    ThreeWaySplit {
        first: SymbolSpec,
        second: SymbolSpec,
        second_len: usize,
        retain_len: usize,
    },
}

impl SymbolDirective {
    pub fn one(symbol: SymbolSpec) -> Self {
        SymbolDirective::OneSymbol { symbol }
    }

    pub fn retain(first: SymbolSpec, retain_len: usize) -> Self {
        SymbolDirective::RetainSuffix { first, retain_len }
    }
}
