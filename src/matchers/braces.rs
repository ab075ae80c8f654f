//! Balanced-bracket depth tracking
//!
//! The matcher is fed bracket characters one at a time and answers with the
//! nesting depth after the character. Non-bracket input is rejected; callers
//! pre-filter the stream.

use std::fmt;

/// Error raised when the fed character stream is not properly balanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BraceError {
    /// A closing bracket arrived while a different pair was open.
    Mismatch { expected: char, found: char },
    /// A closing bracket arrived with nothing open.
    Underflow { found: char },
    /// The character is not part of the configured pair set.
    NotABrace { found: char },
}

impl fmt::Display for BraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BraceError::Mismatch { expected, found } => {
                write!(f, "mismatched bracket: expected '{expected}', found '{found}'")
            }
            BraceError::Underflow { found } => {
                write!(f, "unbalanced closing bracket '{found}'")
            }
            BraceError::NotABrace { found } => {
                write!(f, "'{found}' is not a bracket character")
            }
        }
    }
}

impl std::error::Error for BraceError {}

/// Stack-based balanced-bracket tracker.
#[derive(Debug, Clone)]
pub struct BracesMatcher {
    pairs: Vec<(char, char)>,
    stack: Vec<char>,
}

impl BracesMatcher {
    /// Build a matcher for the given (open, close) pairs.
    ///
    /// Panics when any open or close character appears twice across the pair
    /// list; ambiguous pair sets are a programming error.
    pub fn new(pairs: &[(char, char)]) -> Self {
        let mut seen = Vec::new();
        for &(open, close) in pairs {
            for ch in [open, close] {
                assert!(
                    !seen.contains(&ch),
                    "duplicate bracket character '{ch}' in pair set"
                );
                seen.push(ch);
            }
        }
        Self {
            pairs: pairs.to_vec(),
            stack: Vec::new(),
        }
    }

    /// The conventional round/square/curly set.
    pub fn common() -> Self {
        Self::new(&[('(', ')'), ('[', ']'), ('{', '}')])
    }

    /// Curly brackets only.
    pub fn curly() -> Self {
        Self::new(&[('{', '}')])
    }

    /// Feed one character; returns the depth after it.
    pub fn next(&mut self, ch: char) -> Result<usize, BraceError> {
        if let Some(&(_, close)) = self.pairs.iter().find(|&&(open, _)| open == ch) {
            self.stack.push(close);
            return Ok(self.stack.len());
        }
        if self.pairs.iter().any(|&(_, close)| close == ch) {
            return match self.stack.last() {
                None => Err(BraceError::Underflow { found: ch }),
                Some(&expected) if expected != ch => Err(BraceError::Mismatch { expected, found: ch }),
                Some(_) => {
                    self.stack.pop();
                    Ok(self.stack.len())
                }
            };
        }
        Err(BraceError::NotABrace { found: ch })
    }

    pub fn is_brace(&self, ch: char) -> bool {
        self.pairs
            .iter()
            .any(|&(open, close)| open == ch || close == ch)
    }

    pub fn current_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }
}
