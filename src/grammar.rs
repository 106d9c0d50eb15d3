//! Grammar tables with by-name rule resolution
//!
//! Rules in a real grammar refer to each other forward and recursively, so
//! they cannot be built bottom-up as plain values. A grammar is built through
//! an initializer that receives a [`RuleSet`] handle: `rules.rule("Term")`
//! returns a matcher that resolves the name when it is applied, not when it
//! is created. The initializer returns the rule table and the entry rule
//! name; construction validates both before any parsing can happen.
//!
//! ## Design
//!
//! The table is installed write-once into a cell shared by every rule
//! reference. During parsing the references only read, so a built [`Grammar`]
//! is immutable and can be shared freely. Every rule name requested during
//! initialization is recorded, which makes a dangling reference a
//! construction error instead of a surprise mid-parse.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::{GrammarError, ParseError};
use crate::input::Input;
use crate::matcher::Matcher;
use crate::value::Value;

type RuleTable = HashMap<String, Matcher>;

/// Registry handle passed to a grammar initializer
pub struct RuleSet {
    table: Arc<OnceLock<RuleTable>>,
    requested: Mutex<HashSet<String>>,
}

impl RuleSet {
    /// A matcher that applies the rule registered under `name`.
    ///
    /// Resolution happens at application time, so the rule may be defined
    /// later in the table, reference the requesting rule back, or reference
    /// itself. The rule name doubles as the matcher's label.
    pub fn rule(&self, name: impl Into<String>) -> Matcher {
        let name = name.into();
        if let Ok(mut requested) = self.requested.lock() {
            requested.insert(name.clone());
        }
        let label: Arc<str> = Arc::from(name.as_str());
        let table = Arc::clone(&self.table);
        let matcher = Matcher::new(move |input| match table.get() {
            Some(rules) => match rules.get(&name) {
                Some(rule) => rule.apply(input),
                None => Err(ParseError::new(
                    format!("unknown grammar rule '{}'", name),
                    input,
                )),
            },
            None => Err(ParseError::new(
                format!("rule '{}' used before the grammar was built", name),
                input,
            )),
        });
        matcher.with_label(label)
    }
}

/// A validated grammar: a rule table and its entry rule
#[derive(Debug, Clone)]
pub struct Grammar {
    table: Arc<OnceLock<RuleTable>>,
    entry: String,
}

impl Grammar {
    /// Parse `text` with the entry rule and return the produced value.
    ///
    /// Trailing input the entry rule did not consume is accepted; a grammar
    /// that must consume the whole input ends with an end-of-input matcher.
    pub fn parse(&self, text: &str) -> Result<Value, ParseError> {
        let input = Input::new(text);
        let rule = self.rule(&self.entry).ok_or_else(|| {
            ParseError::new(format!("unknown grammar rule '{}'", self.entry), &input)
        })?;
        rule.apply(&input).map(|(value, _)| value)
    }

    /// Name of the entry rule
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Look up a rule matcher by name, e.g. to parse a fragment in a test
    pub fn rule(&self, name: &str) -> Option<Matcher> {
        self.table.get().and_then(|rules| rules.get(name).cloned())
    }

    /// Names of all registered rules, sorted
    pub fn rule_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .table
            .get()
            .map(|rules| rules.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// Build a grammar from an initializer.
///
/// The initializer receives the [`RuleSet`] handle and returns the rule
/// table (any iterable of name/matcher pairs) together with the entry rule
/// name:
///
/// ```ignore
/// let numbers = grammar(|rules| {
///     (
///         vec![
///             ("number", any(rules.rule("digit")).map(to_number)),
///             ("digit", one(pat("[0-9]"))),
///         ],
///         "number",
///     )
/// })?;
/// let value = numbers.parse("123")?;
/// ```
///
/// Construction fails with [`GrammarError::MissingEntry`] when the entry
/// name is not in the table and with [`GrammarError::UnresolvedRule`] when a
/// name requested through [`RuleSet::rule`] is never defined.
pub fn grammar<T, N, E>(init: impl FnOnce(&RuleSet) -> (T, E)) -> Result<Grammar, GrammarError>
where
    T: IntoIterator<Item = (N, Matcher)>,
    N: Into<String>,
    E: Into<String>,
{
    let rules = RuleSet {
        table: Arc::new(OnceLock::new()),
        requested: Mutex::new(HashSet::new()),
    };
    let (table, entry) = init(&rules);
    let entry = entry.into();
    let table: RuleTable = table
        .into_iter()
        .map(|(name, matcher)| (name.into(), matcher))
        .collect();

    if !table.contains_key(&entry) {
        return Err(GrammarError::MissingEntry(entry));
    }

    let requested: Vec<String> = match rules.requested.lock() {
        Ok(requested) => requested.iter().cloned().collect(),
        Err(_) => Vec::new(),
    };
    let mut missing: Vec<String> = requested
        .into_iter()
        .filter(|name| !table.contains_key(name))
        .collect();
    missing.sort();
    if let Some(name) = missing.into_iter().next() {
        return Err(GrammarError::UnresolvedRule(name));
    }

    // the cell is freshly created above, so this cannot already be set
    let _ = rules.table.set(table);
    Ok(Grammar {
        table: rules.table,
        entry,
    })
}
