//! Text-pattern rules for recognizing query statements.
//!
//! Each rule is a substring pattern with a kind: `Builds` marks a line
//! that constructs or refines a query, `Executes` marks the call that
//! finally runs it. The rule set is an explicitly ordered list so the
//! heuristic can be swapped without touching the scoring engine. All
//! patterns are compiled into one aho-corasick automaton; a line is
//! classified by the rules its text contains.

use aho_corasick::AhoCorasick;

/// What a matching line contributes to a query group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRuleKind {
    /// Constructs or refines a query without running it.
    Builds,
    /// Runs the query; closes the current group.
    Executes,
}

/// One substring rule.
#[derive(Debug, Clone)]
pub struct QueryRule {
    pub pattern: String,
    pub kind: QueryRuleKind,
}

impl QueryRule {
    pub fn new(pattern: impl Into<String>, kind: QueryRuleKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
        }
    }
}

/// An ordered rule list compiled for matching.
#[derive(Debug)]
pub struct QueryRuleSet {
    rules: Vec<QueryRule>,
    matcher: AhoCorasick,
}

impl QueryRuleSet {
    /// Compiles a rule list. Order is preserved for reporting, but a
    /// line matching any `Executes` rule is classified `Executes`
    /// regardless of what else it matches: a one-line build-and-run
    /// query must close its own group.
    ///
    /// # Panics
    ///
    /// Panics if the patterns exceed the aho-corasick automaton size
    /// limits. Patterns are plain substrings, so this takes a rule
    /// list in the gigabyte range.
    pub fn new(rules: Vec<QueryRule>) -> Self {
        let matcher = AhoCorasick::new(rules.iter().map(|r| r.pattern.as_str()))
            .expect("query rule patterns are valid");
        Self { rules, matcher }
    }

    /// The built-in rule set for Hibernate-style persistence code.
    pub fn hibernate() -> Self {
        use QueryRuleKind::{Builds, Executes};
        Self::new(vec![
            QueryRule::new("createQuery(", Builds),
            QueryRule::new("createCriteria(", Builds),
            QueryRule::new(".setString(", Builds),
            QueryRule::new(".setParameter(", Builds),
            QueryRule::new(".add(Restrictions", Builds),
            QueryRule::new(".createAlias(", Builds),
            QueryRule::new(".list()", Executes),
            QueryRule::new(".uniqueResult()", Executes),
            QueryRule::new(".executeUpdate()", Executes),
            QueryRule::new(".scroll()", Executes),
        ])
    }

    /// The rules, in their configured order.
    pub fn rules(&self) -> &[QueryRule] {
        &self.rules
    }

    /// Classifies one statement text, or `None` when no rule matches.
    pub fn classify(&self, text: &str) -> Option<QueryRuleKind> {
        let mut matched = None;
        for found in self.matcher.find_overlapping_iter(text) {
            match self.rules[found.pattern().as_usize()].kind {
                QueryRuleKind::Executes => return Some(QueryRuleKind::Executes),
                QueryRuleKind::Builds => matched = Some(QueryRuleKind::Builds),
            }
        }
        matched
    }
}

impl Default for QueryRuleSet {
    fn default() -> Self {
        Self::hibernate()
    }
}
