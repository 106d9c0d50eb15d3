//! The matcher function wrapper
//!
//! A matcher is a function from an input position to a match result. This
//! module wraps that function in a cheaply clonable handle together with the
//! two tags combinators care about: an optional capture name (read by
//! sequences when collecting named results) and an optional human label
//! (used for default failure messages).
//!
//! ## Design
//!
//! Matchers are pure: they borrow an [`Input`] view and return either the
//! produced value with the remaining input, or a failure. All composition
//! happens by wrapping one matcher function in another, so a built grammar
//! is an ordinary call tree.

use std::fmt;
use std::sync::Arc;

use crate::error::ParseError;
use crate::input::Input;
use crate::value::Value;

/// Outcome of applying a matcher: the value and the remaining input, or a
/// failure that consumed nothing
pub type MatchResult = Result<(Value, Input), ParseError>;

type MatchFn = dyn Fn(&Input) -> MatchResult + Send + Sync;

/// A composable matching function with optional capture and label tags
#[derive(Clone)]
pub struct Matcher {
    run: Arc<MatchFn>,
    capture: Option<Arc<str>>,
    label: Option<Arc<str>>,
}

impl Matcher {
    /// Wrap a bare matching function.
    ///
    /// This is the escape hatch for conditions the built-in primitives
    /// cannot express, e.g. an end-of-input check:
    ///
    /// ```ignore
    /// let eof = Matcher::new(|input| {
    ///     if input.is_empty() {
    ///         Ok((Value::Absent, input.clone()))
    ///     } else {
    ///         Err(ParseError::expected("end of input", input))
    ///     }
    /// });
    /// ```
    pub fn new(run: impl Fn(&Input) -> MatchResult + Send + Sync + 'static) -> Matcher {
        Matcher {
            run: Arc::new(run),
            capture: None,
            label: None,
        }
    }

    /// Apply the matcher at an input position
    pub fn apply(&self, input: &Input) -> MatchResult {
        (self.run)(input)
    }

    /// Match `text` from its start and return only the produced value.
    ///
    /// Trailing input left over after the match is accepted silently; a
    /// grammar that must consume everything ends with an explicit
    /// end-of-input matcher.
    pub fn parse(&self, text: &str) -> Result<Value, ParseError> {
        self.apply(&Input::new(text)).map(|(value, _)| value)
    }

    /// Transform the value of a successful match
    pub fn map(self, transform: impl Fn(Value) -> Value + Send + Sync + 'static) -> Matcher {
        let inner = self.run;
        Matcher {
            run: Arc::new(move |input| {
                inner(input).map(|(value, rest)| (transform(value), rest))
            }),
            capture: self.capture,
            label: self.label,
        }
    }

    /// Rewrite the failure of an unsuccessful match.
    ///
    /// The function receives the underlying failure; for an exhausted
    /// alternation that failure carries the per-alternative errors in
    /// [`ParseError::alternatives`].
    pub fn map_err(
        self,
        rewrite: impl Fn(ParseError) -> ParseError + Send + Sync + 'static,
    ) -> Matcher {
        let inner = self.run;
        Matcher {
            run: Arc::new(move |input| inner(input).map_err(|error| rewrite(error))),
            capture: self.capture,
            label: self.label,
        }
    }

    /// Give the matcher a human-readable name.
    ///
    /// Any failure is replaced by `expected <label>` anchored at the position
    /// the matcher started from, and the label becomes the default
    /// description used by enclosing `one_or_more`/`not` combinators.
    pub fn expected(self, label: impl Into<String>) -> Matcher {
        let label: Arc<str> = Arc::from(label.into());
        let in_errors = Arc::clone(&label);
        let inner = self.run;
        Matcher {
            run: Arc::new(move |input| {
                inner(input).map_err(|_| ParseError::expected(&in_errors, input))
            }),
            capture: self.capture,
            label: Some(label),
        }
    }

    /// The capture name a sequence will bind this matcher's value under
    pub fn capture_name(&self) -> Option<&str> {
        self.capture.as_deref()
    }

    /// The human label used in default failure messages
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn with_capture(self, name: impl Into<String>) -> Matcher {
        let name: Arc<str> = Arc::from(name.into());
        // a capture name doubles as the label unless one is already set
        let label = self.label.or_else(|| Some(Arc::clone(&name)));
        Matcher {
            run: self.run,
            capture: Some(name),
            label,
        }
    }

    pub(crate) fn with_label(self, label: Arc<str>) -> Matcher {
        Matcher {
            label: Some(label),
            ..self
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("capture", &self.capture)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
