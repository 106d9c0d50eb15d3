//! Input view for matchers
//!
//! Matchers never mutate the text they read. An `Input` is a cheap view into
//! a shared source string: consuming text means deriving a new view with a
//! larger offset. The full source stays reachable from every view so that
//! failures can be rendered with line and column information later.

use std::fmt;
use std::sync::Arc;

/// A position in a source string, seen as the remaining suffix.
#[derive(Clone)]
pub struct Input {
    source: Arc<str>,
    offset: usize,
}

impl Input {
    /// Create a view over a full source string, positioned at the start
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Input {
            source: text.into(),
            offset: 0,
        }
    }

    /// The remaining text from the current position to the end
    pub fn as_str(&self) -> &str {
        &self.source[self.offset..]
    }

    /// The entire source string this view was created from
    pub fn full_source(&self) -> &str {
        &self.source
    }

    /// Byte offset of the current position within the full source
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read
    pub fn len(&self) -> usize {
        self.source.len() - self.offset
    }

    /// Check whether the input is exhausted
    pub fn is_empty(&self) -> bool {
        self.offset == self.source.len()
    }

    /// Derive a view advanced by `bytes`.
    ///
    /// Matchers advance by the length of the text they matched, so the new
    /// position is always a character boundary.
    pub fn advance(&self, bytes: usize) -> Input {
        let offset = self.offset + bytes;
        debug_assert!(
            self.source.is_char_boundary(offset),
            "advance must land on a character boundary"
        );
        Input {
            source: Arc::clone(&self.source),
            offset,
        }
    }

    /// Line and column (both 1-based) of the current position
    pub fn line_col(&self) -> (usize, usize) {
        position_of(&self.source, self.offset)
    }

    pub(crate) fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("offset", &self.offset)
            .field("rest", &self.as_str())
            .finish()
    }
}

/// Compute the 1-based line and column of a byte offset in `source`
pub(crate) fn position_of(source: &str, offset: usize) -> (usize, usize) {
    let consumed = &source[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(newline) => consumed[newline + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}
