//! Grammar-as-data primitives and their normalization
//!
//! Combinators accept grammars declared as plain data: string literals,
//! regular expressions, named captures, and nested sequences, next to
//! already-built matchers. `Primitive` is the tagged union of those forms
//! and [`Primitive::into_matcher`] is the single place where each form is
//! turned into a runnable [`Matcher`].
//!
//! ## Design
//!
//! Normalization is idempotent: an already-built matcher passes through
//! unchanged, so combinators can normalize their arguments unconditionally.
//! Patterns are implicitly anchored to the current position; a pattern that
//! does not start with `^` is recompiled inside `^(?:...)` at construction,
//! while failure messages keep the pattern as the author spelled it.
//!
//! ## Example
//!
//! ```ignore
//! // all of these are one primitive each
//! let comma = lit(",");
//! let digits = pat("[0-9]+");
//! let field = named("field", pat("[a-z]+"));
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::combinators::all;
use crate::error::ParseError;
use crate::matcher::Matcher;
use crate::value::Value;

/// A matcher description: data to be normalized, or a finished matcher
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Verbatim text, matched exactly (never interpreted as a pattern)
    Literal(String),
    /// A regular expression, anchored to the current position
    Pattern(Regex),
    /// A description whose value is bound under `name` by enclosing sequences
    Capture { name: String, inner: Box<Primitive> },
    /// A nested sequence, shorthand for `all(...)`
    Sequence(Vec<Primitive>),
    /// An already-built matcher, passed through unchanged
    Matcher(Matcher),
}

impl Primitive {
    /// Build a pattern primitive from a pattern string.
    ///
    /// # Panics
    /// Panics if the pattern does not compile; pass a pre-built
    /// [`regex::Regex`] to handle pattern errors yourself.
    pub fn pattern(pattern: &str) -> Primitive {
        match Regex::new(pattern) {
            Ok(regex) => Primitive::Pattern(regex),
            Err(error) => panic!("invalid pattern {:?}: {}", pattern, error),
        }
    }

    /// The description used in failure messages when no label is given.
    ///
    /// Literals and patterns describe themselves, captures answer to their
    /// name, and a bare matcher carries whatever label it was given.
    /// Sequences have no default description.
    pub fn default_label(&self) -> Option<String> {
        match self {
            Primitive::Literal(text) => Some(text.clone()),
            Primitive::Pattern(regex) => Some(regex.as_str().to_string()),
            Primitive::Capture { name, .. } => Some(name.clone()),
            Primitive::Sequence(_) => None,
            Primitive::Matcher(matcher) => matcher.label().map(|label| label.to_string()),
        }
    }

    /// Normalize this description into a runnable matcher
    pub fn into_matcher(self) -> Matcher {
        match self {
            Primitive::Literal(text) => from_string(text),
            Primitive::Pattern(regex) => from_pattern(regex),
            Primitive::Capture { name, inner } => from_named_capture(name, *inner),
            Primitive::Sequence(parts) => from_sequence(parts),
            Primitive::Matcher(matcher) => matcher,
        }
    }
}

impl From<&str> for Primitive {
    fn from(text: &str) -> Primitive {
        Primitive::Literal(text.to_string())
    }
}

impl From<String> for Primitive {
    fn from(text: String) -> Primitive {
        Primitive::Literal(text)
    }
}

impl From<char> for Primitive {
    fn from(character: char) -> Primitive {
        Primitive::Literal(character.to_string())
    }
}

impl From<Regex> for Primitive {
    fn from(regex: Regex) -> Primitive {
        Primitive::Pattern(regex)
    }
}

impl From<Matcher> for Primitive {
    fn from(matcher: Matcher) -> Primitive {
        Primitive::Matcher(matcher)
    }
}

impl From<Vec<Primitive>> for Primitive {
    fn from(parts: Vec<Primitive>) -> Primitive {
        Primitive::Sequence(parts)
    }
}

/// Literal text primitive
pub fn lit(text: impl Into<String>) -> Primitive {
    Primitive::Literal(text.into())
}

/// Pattern primitive compiled from a pattern string.
///
/// # Panics
/// Panics if the pattern does not compile.
pub fn pat(pattern: &str) -> Primitive {
    Primitive::pattern(pattern)
}

/// Capture primitive: bind the value of `description` under `name` in the
/// enclosing sequence
pub fn named(name: impl Into<String>, description: impl Into<Primitive>) -> Primitive {
    Primitive::Capture {
        name: name.into(),
        inner: Box::new(description.into()),
    }
}

/// Matcher for verbatim text.
///
/// The text is never interpreted as a pattern: `from_string("ad*")` matches
/// the three characters `a`, `d`, `*`. The empty literal always succeeds and
/// consumes nothing.
pub fn from_string(literal: impl Into<String>) -> Matcher {
    let literal = literal.into();
    let label: Arc<str> = Arc::from(literal.as_str());
    let matcher = Matcher::new(move |input| {
        if input.as_str().starts_with(literal.as_str()) {
            Ok((Value::text(literal.clone()), input.advance(literal.len())))
        } else {
            Err(ParseError::expected(&literal, input))
        }
    });
    matcher.with_label(label)
}

/// Matcher for a regular expression, yielding the full match as text
pub fn from_pattern(pattern: Regex) -> Matcher {
    from_pattern_with(pattern, |captures: &regex::Captures| {
        Value::text(&captures[0])
    })
}

/// Matcher for a regular expression with access to its capture groups.
///
/// `read` receives the regex captures of a successful match (group 0 is the
/// full match) and produces the value. The match consumes exactly the full
/// match, which may be empty for patterns like `[0-9]*`.
pub fn from_pattern_with(
    pattern: Regex,
    read: impl Fn(&regex::Captures) -> Value + Send + Sync + 'static,
) -> Matcher {
    let label: Arc<str> = Arc::from(pattern.as_str());
    let in_errors = Arc::clone(&label);
    let anchored = anchor_start(&pattern);
    let matcher = Matcher::new(move |input| match anchored.captures(input.as_str()) {
        Some(captures) => {
            let end = captures.get(0).map(|m| m.end()).unwrap_or(0);
            Ok((read(&captures), input.advance(end)))
        }
        None => Err(ParseError::expected(&in_errors, input)),
    });
    matcher.with_label(label)
}

/// Matcher whose value is bound under `name` by the enclosing sequence
pub fn from_named_capture(name: impl Into<String>, description: impl Into<Primitive>) -> Matcher {
    description.into().into_matcher().with_capture(name)
}

/// Matcher for a nested sequence of primitives
pub fn from_sequence(parts: Vec<Primitive>) -> Matcher {
    all(parts)
}

/// Anchor a pattern to the start of the remaining input.
///
/// Wrapping in a non-capturing group keeps group numbering and semantics
/// intact. A pattern that already starts with `^` is used as is.
fn anchor_start(pattern: &Regex) -> Regex {
    let source = pattern.as_str();
    if source.starts_with('^') {
        return pattern.clone();
    }
    match Regex::new(&format!("^(?:{})", source)) {
        Ok(anchored) => anchored,
        // a valid pattern stays valid inside a group; fall back unanchored
        // rather than fail at match time
        Err(_) => pattern.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    #[test]
    fn test_literal_matches_and_advances() {
        let matcher = from_string("_");
        let (value, rest) = matcher.apply(&Input::new("_asd_asd")).unwrap();
        assert_eq!(value, Value::text("_"));
        assert_eq!(rest.as_str(), "asd_asd");
    }

    #[test]
    fn test_literal_is_not_a_pattern() {
        // "ad*" is three characters, not "a followed by ds"
        let matcher = from_string("ad*");
        let error = matcher.parse("addd").unwrap_err();
        assert_eq!(error.message(), "expected ad*");
        assert_eq!(matcher.parse("ad*rest").unwrap(), Value::text("ad*"));
    }

    #[test]
    fn test_empty_literal_consumes_nothing() {
        let matcher = from_string("");
        let (value, rest) = matcher.apply(&Input::new("abc")).unwrap();
        assert_eq!(value, Value::text(""));
        assert_eq!(rest.as_str(), "abc");
    }

    #[test]
    fn test_pattern_is_anchored_to_current_position() {
        // would match at offset 1 if unanchored
        let matcher = from_pattern(Regex::new("b+").unwrap());
        assert!(matcher.parse("abb").is_err());
        assert_eq!(matcher.parse("bba").unwrap(), Value::text("bb"));
    }

    #[test]
    fn test_pattern_with_explicit_anchor_is_kept() {
        let matcher = from_pattern(Regex::new("^[a-z]+").unwrap());
        assert_eq!(matcher.parse("abc123").unwrap(), Value::text("abc"));
    }

    #[test]
    fn test_pattern_failure_keeps_spelled_source() {
        let matcher = from_pattern(Regex::new("[0-9]+").unwrap());
        let error = matcher.parse("x").unwrap_err();
        assert_eq!(error.message(), "expected [0-9]+");
    }

    #[test]
    fn test_pattern_may_match_empty() {
        let matcher = from_pattern(Regex::new(r"\d*(?:\.\d+)?").unwrap());
        let (value, rest) = matcher.apply(&Input::new("123.456d")).unwrap();
        assert_eq!(value, Value::text("123.456"));
        assert_eq!(rest.as_str(), "d");
        // no digits at all still succeeds, consuming nothing
        let (value, rest) = matcher.apply(&Input::new("xyz")).unwrap();
        assert_eq!(value, Value::text(""));
        assert_eq!(rest.as_str(), "xyz");
    }

    #[test]
    fn test_pattern_groups_via_read() {
        let comment = from_pattern_with(
            Regex::new(r"/\*(.*)\*/").unwrap(),
            |captures: &regex::Captures| Value::text(&captures[1]),
        );
        let (value, rest) = comment.apply(&Input::new("/* my comment */ d ")).unwrap();
        assert_eq!(value, Value::text(" my comment "));
        assert_eq!(rest.as_str(), " d ");
        assert!(comment.parse(" my comment */ d ").is_err());
    }

    #[test]
    fn test_named_capture_tags_matcher() {
        let matcher = from_named_capture("text", "a");
        assert_eq!(matcher.capture_name(), Some("text"));
        // the capture name doubles as the label
        assert_eq!(matcher.label(), Some("text"));
    }

    #[test]
    fn test_normalizing_a_matcher_is_identity() {
        let matcher = from_string("a").with_capture("tag");
        let normalized = Primitive::from(matcher).into_matcher();
        assert_eq!(normalized.capture_name(), Some("tag"));
        assert_eq!(normalized.parse("ab").unwrap(), Value::text("a"));
    }

    #[test]
    fn test_char_literals() {
        let matcher = Primitive::from('(').into_matcher();
        assert_eq!(matcher.parse("(x").unwrap(), Value::text("("));
    }

    #[test]
    fn test_sequence_primitive_matches_in_order() {
        let matcher = from_sequence(vec![lit("a"), lit("b")]);
        let (value, rest) = matcher.apply(&Input::new("ab123")).unwrap();
        assert_eq!(value, Value::seq([Value::text("a"), Value::text("b")]));
        assert_eq!(rest.as_str(), "123");
    }

    #[test]
    #[should_panic(expected = "invalid pattern")]
    fn test_pat_panics_on_bad_pattern() {
        let _ = pat("[unclosed");
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(lit("abc").default_label(), Some("abc".to_string()));
        assert_eq!(pat("[0-9]+").default_label(), Some("[0-9]+".to_string()));
        assert_eq!(named("n", "x").default_label(), Some("n".to_string()));
        assert_eq!(Primitive::Sequence(vec![]).default_label(), None);
    }
}
