//! Construction memoization
//!
//! Building a matcher can be expensive (pattern compilation, nested
//! combinator trees). `cached` defers that work to the first application and
//! reuses the built matcher afterwards, which matters for matchers that are
//! assembled inside rule initializers or shared across grammars.

use once_cell::sync::Lazy;

use crate::matcher::Matcher;

/// Defer matcher construction to first use and reuse it afterwards.
///
/// The factory runs at most once; every application after that goes straight
/// to the built matcher. This memoizes construction only, not match results
/// at input positions.
///
/// ```ignore
/// let whitespace = cached(|| one(pat(r"[ \t\n\r]*")).expected("whitespace"));
/// ```
pub fn cached<F>(build: F) -> Matcher
where
    F: FnOnce() -> Matcher + Send + 'static,
{
    let cell: Lazy<Matcher, F> = Lazy::new(build);
    Matcher::new(move |input| cell.apply(input))
}
