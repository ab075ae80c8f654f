//! Error types for lexing and parsing
//!
//! Failures split into two classes with different audiences:
//!
//! - [`ParseError`] - the *source being parsed* is at fault: unterminated
//!   constructs, mixed indentation, unbalanced brackets, residue the grammar
//!   could not account for. Reported to whoever supplied the source.
//! - [`DetectorError`] - a *language detector* violated the driver's
//!   contract. This is a bug in detector code, never in user input.
//!
//! Everything else (out-of-range positions, feeding a finished tokenizer) is
//! a programmer error in the caller and panics.

use crate::parsing::grammar::Symbol;
use crate::position::SourceLines;
use std::fmt;

/// Input-side syntactic failure. The parse fails fast; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A string, comment or block was still open when the stream ended.
    UnterminatedConstruct {
        construct: &'static str,
        found: String,
    },
    /// Python indentation mixes tabs and spaces.
    MixedIndentation { line: usize },
    /// Bracket nesting went wrong while scanning a statement.
    UnbalancedBracket { message: String, line: usize },
    /// A class or function header never reached its body delimiter.
    MissingBodyOpener {
        construct: &'static str,
        line: usize,
    },
    /// The detector run left part of the token stream unaccounted for.
    UnparsedResidue { context: String },
    /// Catch-all syntactic violation with a positioned message.
    Syntax { message: String, line: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnterminatedConstruct { construct, found } => {
                write!(f, "unterminated {construct} at end of input (near {found:?})")
            }
            ParseError::MixedIndentation { line } => {
                write!(f, "line {}: indentation mixes tabs and spaces", line + 1)
            }
            ParseError::UnbalancedBracket { message, line } => {
                write!(f, "line {}: {message}", line + 1)
            }
            ParseError::MissingBodyOpener { construct, line } => {
                write!(f, "line {}: {construct} header has no body delimiter", line + 1)
            }
            ParseError::UnparsedResidue { context } => {
                write!(f, "non-parsed portions remain: {context}")
            }
            ParseError::Syntax { message, line } => {
                write!(f, "line {}: {message}", line + 1)
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Detector contract violation. Indicates a bug in a language detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// A detector emitted the root symbol, which only the driver owns.
    ForbiddenSymbol { symbol: Symbol },
    /// A split directive produced an empty piece.
    EmptySplit { detail: String },
    /// A non-terminal's parse range escapes its symbol range.
    ParseRangeOutsideSymbol { symbol: Symbol },
    /// A terminal symbol carried a parse range.
    ParseRangeOnTerminal { symbol: Symbol },
    /// A non-terminal symbol arrived without a parse range.
    MissingParseRange { symbol: Symbol },
    /// A symbol is not on the right-hand side of the enclosing production.
    IllegalProduction { parent: Symbol, child: Symbol },
    /// A node-producing symbol arrived without its construction payload.
    MissingSeed { symbol: Symbol },
    /// A FUNCTIONS run did not come out as declaration-then-body.
    MalformedFunctions { detail: String },
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorError::ForbiddenSymbol { symbol } => {
                write!(f, "detector emitted forbidden symbol {symbol:?}")
            }
            DetectorError::EmptySplit { detail } => {
                write!(f, "detector split produced an empty piece: {detail}")
            }
            DetectorError::ParseRangeOutsideSymbol { symbol } => {
                write!(f, "parse range for {symbol:?} escapes its symbol range")
            }
            DetectorError::ParseRangeOnTerminal { symbol } => {
                write!(f, "terminal symbol {symbol:?} carries a parse range")
            }
            DetectorError::MissingParseRange { symbol } => {
                write!(f, "non-terminal symbol {symbol:?} is missing its parse range")
            }
            DetectorError::IllegalProduction { parent, child } => {
                write!(f, "{child:?} is not allowed inside {parent:?}")
            }
            DetectorError::MissingSeed { symbol } => {
                write!(f, "no node payload supplied for {symbol:?}")
            }
            DetectorError::MalformedFunctions { detail } => {
                write!(f, "malformed function production: {detail}")
            }
        }
    }
}

impl std::error::Error for DetectorError {}

/// Either error class, as returned by the public parse operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    Parse(ParseError),
    Detector(DetectorError),
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineError::Parse(e) => write!(f, "{e}"),
            OutlineError::Detector(e) => write!(f, "detector bug: {e}"),
        }
    }
}

impl std::error::Error for OutlineError {}

impl From<ParseError> for OutlineError {
    fn from(e: ParseError) -> Self {
        OutlineError::Parse(e)
    }
}

impl From<DetectorError> for OutlineError {
    fn from(e: DetectorError) -> Self {
        OutlineError::Detector(e)
    }
}

pub type OutlineResult<T> = Result<T, OutlineError>;

/// Format source lines around an error location.
///
/// Shows 2 lines before the error, the error line with a >> marker, and 2
/// lines after, all numbered for reference.
pub fn format_source_context(lines: &SourceLines, error_line: usize) -> String {
    let start = error_line.saturating_sub(2);
    let end = (error_line + 3).min(lines.line_count());

    let mut context = String::new();
    for line_num in start..end {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker,
            line_num + 1,
            lines.line(line_num)
        ));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_context() {
        let lines = SourceLines::new("line 1\nline 2\nline 3\nerror line\nline 5\nline 6\n");
        let context = format_source_context(&lines, 3);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 5"));
        assert!(!context.contains("line 6\n>>"));
    }

    #[test]
    fn test_parse_error_display_is_one_indexed() {
        let err = ParseError::MixedIndentation { line: 4 };
        assert_eq!(err.to_string(), "line 5: indentation mixes tabs and spaces");
    }

    #[test]
    fn test_outline_error_wraps_both_classes() {
        let parse: OutlineError = ParseError::Syntax {
            message: "bad".into(),
            line: 0,
        }
        .into();
        assert!(matches!(parse, OutlineError::Parse(_)));

        let detector: OutlineError = DetectorError::EmptySplit {
            detail: "first piece".into(),
        }
        .into();
        assert!(detector.to_string().starts_with("detector bug:"));
    }
}
