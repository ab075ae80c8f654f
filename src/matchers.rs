//! Streaming matchers shared by the lexers and detectors
//!
//! Two small resettable automata:
//!
//! - [`BracesMatcher`] - balanced-bracket depth tracking over a configurable
//!   pair set
//! - [`ExpressionMatcher`] - multi-pattern streaming matcher that emits a key
//!   the moment one of its patterns completes
//!
//! Both carry mutable state and expose an explicit `reset()`. Construction
//! validates its input strictly and panics on caller bugs; only runtime input
//! problems surface as errors.

pub mod braces;
pub mod expression;

pub use braces::BracesMatcher;
pub use expression::{ExpressionMatcher, StringExpressionMatcher};
