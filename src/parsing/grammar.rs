//! Grammar symbols and production-rule validation
//!
//! The grammar is fixed and small. Non-terminals get re-parsed recursively;
//! terminals become nodes (or nothing, for the filler symbols).
//!
//! ```text
//! TOP_LEVEL            → (FILLER | STATEMENTS_FILLER | COMMENT_* | REFERENCES | CLASSES | FUNCTIONS)*
//! CLASSES              → (FILLER | STATEMENTS_FILLER | COMMENT_* | ATTRIBUTES | FUNCTIONS)*
//! FUNCTIONS            → FUNCTION_DECLARATION FUNCTION_BODY   (fillers allowed around)
//! FUNCTION_DECLARATION → (FILLER | COMMENT_* | ARGUMENT)*
//! FUNCTION_BODY        → (FILLER | STATEMENTS_FILLER | COMMENT_*)*
//! ```

use crate::error::DetectorError;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A grammar symbol: the classification a detector assigns to a run of
/// tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    // Non-terminals
    TopLevel,
    Classes,
    Functions,
    FunctionDeclaration,
    FunctionBody,
    // Terminals
    References,
    Argument,
    Attributes,
    CommentSingleline,
    CommentMultiline,
    /// Whitespace-only glue between symbols. Produces no node.
    Filler,
    /// Code the grammar does not classify further. Produces no node.
    StatementsFiller,
}

impl Symbol {
    pub fn is_nonterminal(self) -> bool {
        matches!(
            self,
            Symbol::TopLevel
                | Symbol::Classes
                | Symbol::Functions
                | Symbol::FunctionDeclaration
                | Symbol::FunctionBody
        )
    }

    pub fn is_filler(self) -> bool {
        matches!(self, Symbol::Filler | Symbol::StatementsFiller)
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Symbol::CommentSingleline | Symbol::CommentMultiline)
    }
}

/// Legal right-hand-side symbols per non-terminal.
static PRODUCTIONS: Lazy<HashMap<Symbol, Vec<Symbol>>> = Lazy::new(|| {
    use Symbol::*;
    HashMap::from([
        (
            TopLevel,
            vec![
                Filler,
                StatementsFiller,
                CommentSingleline,
                CommentMultiline,
                References,
                Classes,
                Functions,
            ],
        ),
        (
            Classes,
            vec![
                Filler,
                StatementsFiller,
                CommentSingleline,
                CommentMultiline,
                Attributes,
                Functions,
            ],
        ),
        (Functions, vec![Filler, FunctionDeclaration, FunctionBody]),
        (
            FunctionDeclaration,
            vec![Filler, CommentSingleline, CommentMultiline, Argument],
        ),
        (
            FunctionBody,
            vec![Filler, StatementsFiller, CommentSingleline, CommentMultiline],
        ),
    ])
});

/// Check every produced symbol against the non-terminal's legal set.
pub fn validate_production(parent: Symbol, children: &[Symbol]) -> Result<(), DetectorError> {
    let allowed = PRODUCTIONS
        .get(&parent)
        .unwrap_or_else(|| panic!("{parent:?} is not a non-terminal"));
    for &child in children {
        if !allowed.contains(&child) {
            return Err(DetectorError::IllegalProduction { parent, child });
        }
    }
    Ok(())
}
