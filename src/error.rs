//! Failure types
//!
//! Two kinds of things go wrong in this crate and they are kept apart:
//! a matcher not matching its input (`ParseError`, flows through every
//! combinator as the `Err` arm of a match result) and a grammar that is
//! malformed before any input is read (`GrammarError`, reported once at
//! construction time).

use std::fmt;
use std::sync::Arc;

use crate::input::{position_of, Input};

/// How many characters of the unmatched remainder to show when rendering
const FOUND_PREVIEW_CHARS: usize = 12;

/// A failed match: what was expected, where, and which alternatives failed.
///
/// The offset is recorded at the point the failure is created, so positions
/// are exact even after the error has bubbled through enclosing combinators.
/// Line and column are derived from it on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    message: String,
    offset: usize,
    source: Arc<str>,
    alternatives: Vec<ParseError>,
}

impl ParseError {
    /// Failure with a free-form message at the given position
    pub fn new(message: impl Into<String>, at: &Input) -> ParseError {
        ParseError {
            message: message.into(),
            offset: at.offset(),
            source: at.shared_source(),
            alternatives: Vec::new(),
        }
    }

    /// Failure reading `expected <label>`
    pub fn expected(label: impl fmt::Display, at: &Input) -> ParseError {
        ParseError::new(format!("expected {}", label), at)
    }

    /// Failure reading `unexpected <label>`, for negative lookahead
    pub fn unexpected(label: impl fmt::Display, at: &Input) -> ParseError {
        ParseError::new(format!("unexpected {}", label), at)
    }

    /// Failure reading `expected at least one <label>`, for empty repetition
    pub fn at_least_one(label: impl fmt::Display, at: &Input) -> ParseError {
        ParseError::new(format!("expected at least one {}", label), at)
    }

    /// Combine the failures of an exhausted alternation.
    ///
    /// The message joins the child messages with " or "; the children stay
    /// available through [`ParseError::alternatives`] in their original
    /// order.
    pub fn aggregate(children: Vec<ParseError>, at: &Input) -> ParseError {
        let message = children
            .iter()
            .map(|child| child.message.as_str())
            .collect::<Vec<_>>()
            .join(" or ");
        let mut error = ParseError::new(message, at);
        error.alternatives = children;
        error
    }

    /// The human-readable phrase, without position information
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the failure within the full source
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of the failure
    pub fn line(&self) -> usize {
        position_of(&self.source, self.offset).0
    }

    /// 1-based column of the failure
    pub fn column(&self) -> usize {
        position_of(&self.source, self.offset).1
    }

    /// Child failures of an exhausted alternation, in alternative order.
    ///
    /// Empty for every other kind of failure.
    pub fn alternatives(&self) -> &[ParseError] {
        &self.alternatives
    }

    /// A short quoted preview of what was found instead, or `end of input`
    pub fn found(&self) -> String {
        let rest = &self.source[self.offset..];
        if rest.is_empty() {
            return "end of input".to_string();
        }
        let preview: String = rest.chars().take(FOUND_PREVIEW_CHARS).collect();
        if preview.len() < rest.len() {
            format!("{:?}...", preview)
        } else {
            format!("{:?}", preview)
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = position_of(&self.source, self.offset);
        write!(
            f,
            "{} at line {}, column {}, found {}",
            self.message,
            line,
            column,
            self.found()
        )
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while building a grammar, before any parsing happens
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// The entry rule name is not present in the rule table
    MissingEntry(String),
    /// A rule was referenced during construction but never defined
    UnresolvedRule(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::MissingEntry(name) => {
                write!(f, "entry rule '{}' is not defined in the grammar", name)
            }
            GrammarError::UnresolvedRule(name) => {
                write!(f, "rule '{}' is referenced but never defined", name)
            }
        }
    }
}

impl std::error::Error for GrammarError {}
