//! The combinator set
//!
//! Eight operations compose matchers into grammars: `one` (normalize and
//! name a single description), `one_of` (ordered choice), `all`/`all_with`
//! (sequence, with positional and named results), `any` (zero or more),
//! `optional`, `one_or_more`, and `not` (negative lookahead).
//!
//! ## Design
//!
//! Choice is ordered in the PEG sense: the first alternative that matches
//! wins, regardless of how much later alternatives could consume. Sequences
//! are atomic: when an element fails, the whole sequence fails and the
//! caller's input is untouched. Repetition is greedy and stops at the first
//! failure; the failing attempt is discarded, never propagated.

use crate::error::ParseError;
use crate::input::Input;
use crate::matcher::Matcher;
use crate::primitive::Primitive;
use crate::value::{Bindings, Value};

/// Normalize a single matcher description.
///
/// By itself this only turns data into a runnable matcher; it is also the
/// natural spot to attach a human name, since the returned matcher accepts
/// [`Matcher::expected`] and [`Matcher::map`]:
///
/// ```ignore
/// let linebreak = one(lit("\r\n")).expected("linebreak");
/// ```
pub fn one(description: impl Into<Primitive>) -> Matcher {
    description.into().into_matcher()
}

/// Ordered choice among alternatives.
///
/// Alternatives are tried strictly in list order against the same input and
/// the first success wins; later alternatives are not attempted. When every
/// alternative fails, the failure aggregates the child messages joined with
/// " or " and keeps the children reachable through
/// [`ParseError::alternatives`].
///
/// # Panics
/// Panics when `alternatives` is empty; a choice among nothing is a
/// malformed grammar.
pub fn one_of(alternatives: Vec<Primitive>) -> Matcher {
    assert!(
        !alternatives.is_empty(),
        "one_of requires at least one alternative"
    );
    let alternatives: Vec<Matcher> = alternatives
        .into_iter()
        .map(Primitive::into_matcher)
        .collect();
    Matcher::new(move |input| {
        let mut failures = Vec::with_capacity(alternatives.len());
        for alternative in &alternatives {
            match alternative.apply(input) {
                Ok(success) => return Ok(success),
                Err(failure) => failures.push(failure),
            }
        }
        Err(ParseError::aggregate(failures, input))
    })
}

/// Sequence of parts, yielding the positional values.
///
/// Parts run left to right, each continuing where the previous one stopped.
/// The value is the sequence of all part values in order. The first failing
/// part fails the whole sequence and the caller's input stays where it was.
///
/// # Panics
/// Panics when `parts` is empty.
pub fn all(parts: Vec<Primitive>) -> Matcher {
    all_with(parts, |values, _| Value::Seq(values))
}

/// Sequence of parts, reduced to a value by `reduce`.
///
/// `reduce` receives the positional values and the named bindings collected
/// from parts declared with [`named`](crate::primitive::named). Only direct
/// children contribute bindings; captures nested inside other combinators do
/// not bubble up. When two parts bind the same name the later one wins.
///
/// # Panics
/// Panics when `parts` is empty.
pub fn all_with(
    parts: Vec<Primitive>,
    reduce: impl Fn(Vec<Value>, Bindings) -> Value + Send + Sync + 'static,
) -> Matcher {
    assert!(!parts.is_empty(), "all requires at least one part");
    let parts: Vec<Matcher> = parts.into_iter().map(Primitive::into_matcher).collect();
    Matcher::new(move |input| {
        let mut values = Vec::with_capacity(parts.len());
        let mut bindings = Bindings::new();
        let mut rest = input.clone();
        for part in &parts {
            let (value, after) = part.apply(&rest)?;
            if let Some(name) = part.capture_name() {
                bindings.insert(name.to_string(), value.clone());
            }
            values.push(value);
            rest = after;
        }
        Ok((reduce(values, bindings), rest))
    })
}

/// Zero or more repetitions, greedy.
///
/// Collects values until the first failure and succeeds with the sequence
/// collected so far, which may be empty. This matcher never fails.
///
/// The repeated matcher must consume input when it succeeds: one that
/// succeeds on empty consumption would repeat forever.
pub fn any(description: impl Into<Primitive>) -> Matcher {
    let matcher = description.into().into_matcher();
    Matcher::new(move |input| {
        let (values, rest) = repeat(&matcher, input);
        Ok((Value::Seq(values), rest))
    })
}

/// Match if possible; succeed with [`Value::Absent`] otherwise.
///
/// On failure the input is left untouched and the child failure is
/// discarded. A transform attached with [`Matcher::map`] sees the absent
/// value too, which is how "default on missing" is written:
///
/// ```ignore
/// let field = optional(one_of(vec![text, escaped]))
///     .map(|value| if value.is_absent() { Value::text("") } else { value });
/// ```
pub fn optional(description: impl Into<Primitive>) -> Matcher {
    let matcher = description.into().into_matcher();
    Matcher::new(move |input| match matcher.apply(input) {
        Ok(success) => Ok(success),
        Err(_) => Ok((Value::Absent, input.clone())),
    })
}

/// One or more repetitions, greedy.
///
/// Like [`any`] but fails with `expected at least one <label>` when nothing
/// matched, where the label is the description of the repeated matcher.
pub fn one_or_more(description: impl Into<Primitive>) -> Matcher {
    let description = description.into();
    let label = description
        .default_label()
        .unwrap_or_else(|| "match".to_string());
    let matcher = description.into_matcher();
    Matcher::new(move |input| {
        let (values, rest) = repeat(&matcher, input);
        if values.is_empty() {
            Err(ParseError::at_least_one(&label, input))
        } else {
            Ok((Value::Seq(values), rest))
        }
    })
}

/// Negative lookahead.
///
/// Succeeds with [`Value::Absent`] when the wrapped matcher fails, and fails
/// with `unexpected <label>` when it succeeds. Consumes nothing either way.
pub fn not(description: impl Into<Primitive>) -> Matcher {
    let description = description.into();
    let label = description
        .default_label()
        .unwrap_or_else(|| "input".to_string());
    let matcher = description.into_matcher();
    Matcher::new(move |input| match matcher.apply(input) {
        Ok(_) => Err(ParseError::unexpected(&label, input)),
        Err(_) => Ok((Value::Absent, input.clone())),
    })
}

/// Apply `matcher` repeatedly from `input`, stopping at the first failure
fn repeat(matcher: &Matcher, input: &Input) -> (Vec<Value>, Input) {
    let mut values = Vec::new();
    let mut rest = input.clone();
    while let Ok((value, after)) = matcher.apply(&rest) {
        values.push(value);
        rest = after;
    }
    (values, rest)
}
