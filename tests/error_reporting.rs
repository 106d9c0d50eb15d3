//! Integration tests for failure reporting
//!
//! Every user-facing failure string is pinned here: the phrase, the
//! 1-based line and column, and the quoted preview of what was found
//! instead of the expected input.

use insta::assert_snapshot;
use topdown::{all, grammar, lit, not, one, one_of, one_or_more, pat};

#[test]
fn test_literal_failure_shows_position_and_preview() {
    let error = one(lit("abc")).parse("xyz").unwrap_err();
    assert_snapshot!(error, @r#"expected abc at line 1, column 1, found "xyz""#);
}

#[test]
fn test_positions_count_lines_and_columns() {
    let error = all(vec![lit("ab\n"), lit("xx")]).parse("ab\ncd").unwrap_err();
    assert_snapshot!(error, @r#"expected xx at line 2, column 1, found "cd""#);
}

#[test]
fn test_exhausted_choice_joins_the_alternatives() {
    let error = one_of(vec![lit("a"), lit("b")]).parse("c").unwrap_err();
    assert_snapshot!(error, @r#"expected a or expected b at line 1, column 1, found "c""#);
}

#[test]
fn test_empty_repetition_names_what_was_repeated() {
    let error = one_or_more(pat("[0-9]")).parse("x").unwrap_err();
    assert_snapshot!(error, @r#"expected at least one [0-9] at line 1, column 1, found "x""#);
}

#[test]
fn test_lookahead_failure_reads_unexpected() {
    let error = not(lit("a")).parse("abc").unwrap_err();
    assert_snapshot!(error, @r#"unexpected a at line 1, column 1, found "abc""#);
}

#[test]
fn test_exhausted_input_reads_end_of_input() {
    let error = one(lit("a")).parse("").unwrap_err();
    assert_snapshot!(error, @"expected a at line 1, column 1, found end of input");
}

#[test]
fn test_long_remainders_are_truncated() {
    let error = one(lit("z")).parse("abcdefghijklmnop").unwrap_err();
    assert_snapshot!(error, @r#"expected z at line 1, column 1, found "abcdefghijkl"..."#);
}

#[test]
fn test_expected_replaces_the_description() {
    let error = one(pat("[0-9]+")).expected("integer").parse("abc").unwrap_err();
    assert_snapshot!(error, @r#"expected integer at line 1, column 1, found "abc""#);
}

#[test]
fn test_control_characters_are_escaped_in_previews() {
    let error = one(lit("a")).parse("\r\nx").unwrap_err();
    assert_snapshot!(error, @r#"expected a at line 1, column 1, found "\r\nx""#);
}

#[test]
fn test_missing_entry_rule_is_reported_at_construction() {
    let error = grammar(|_| (vec![("word", one(lit("a")))], "missing")).unwrap_err();
    assert_snapshot!(error, @"entry rule 'missing' is not defined in the grammar");
}

#[test]
fn test_unresolved_rule_is_reported_at_construction() {
    let error = grammar(|rules| (vec![("start", rules.rule("ghost"))], "start")).unwrap_err();
    assert_snapshot!(error, @"rule 'ghost' is referenced but never defined");
}
