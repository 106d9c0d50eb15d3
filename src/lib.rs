//! # topdown
//!
//! Top-down parser combinators for grammars declared as data.
//!
//! A grammar is built from primitives (literals, patterns, named captures,
//! custom matchers) composed with ordered choice, sequences, repetition and
//! lookahead. Rules reference each other by name through [`grammar`], so
//! forward and recursive references work. Matching follows PEG semantics:
//! choice takes the first alternative that succeeds and sequences are
//! atomic.
//!
//! ## Resource model
//!
//! Parsing is synchronous and allocation-light, but it is recursive descent:
//! stack depth grows with grammar nesting in the input (deeply nested
//! parentheses, for example). There is no built-in depth limit.

pub mod cache;
pub mod combinators;
pub mod error;
pub mod grammar;
pub mod input;
pub mod matcher;
pub mod primitive;
pub mod value;

pub use cache::cached;
pub use combinators::{all, all_with, any, not, one, one_of, one_or_more, optional};
pub use error::{GrammarError, ParseError};
pub use grammar::{grammar, Grammar, RuleSet};
pub use input::Input;
pub use matcher::{MatchResult, Matcher};
pub use primitive::{
    from_named_capture, from_pattern, from_pattern_with, from_sequence, from_string, lit, named,
    pat, Primitive,
};
pub use value::{Bindings, Value};
