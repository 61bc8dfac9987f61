#![forbid(unsafe_code)]

//! Rule string parsing
//!
//! Grammar: `rule(,rule)*` where `rule := name | name=argument`. The literal
//! `-` (or an empty string) means the field carries no rules at all.
//!
//! Tokens are taken verbatim: `"trim_space, lower"` names a rule called
//! `" lower"`, and `"a,,b"` names an empty rule. Neither is registered, so
//! such typos surface as unsupported rules instead of being ignored.

use std::fmt;

/// Directive requesting descent into nested records and sequence elements
pub const DIVE: &str = "dive";

/// Placeholder meaning "no rules, skip this field"
pub const SKIP: &str = "-";

/// A single parsed rule: a name plus an argument (empty when omitted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<'a> {
    pub name: &'a str,
    pub argument: &'a str,
}

impl<'a> Rule<'a> {
    /// Parses one `name` or `name=argument` token
    ///
    /// Neither side is trimmed.
    pub fn parse(token: &'a str) -> Self {
        match token.split_once('=') {
            Some((name, argument)) => Rule { name, argument },
            None => Rule {
                name: token,
                argument: "",
            },
        }
    }

    /// Whether this rule is the `dive` traversal directive
    pub fn is_dive(&self) -> bool {
        self.name == DIVE
    }
}

impl fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.argument.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{}={}", self.name, self.argument)
        }
    }
}

/// Ordered rules parsed from one field's rule string
///
/// Order is significant: rules run left to right, each seeing the result of
/// the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet<'a> {
    rules: Vec<Rule<'a>>,
    dive: bool,
}

impl<'a> RuleSet<'a> {
    /// Parses a raw rule string
    ///
    /// Only the string as a whole is trimmed; a blank string yields an empty
    /// set. Callers are expected to check [`is_skipped`] first; parsing `-`
    /// yields a rule literally named `-`.
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return RuleSet::default();
        }
        let rules: Vec<Rule<'a>> = raw.split(',').map(Rule::parse).collect();
        let dive = rules.iter().any(Rule::is_dive);

        RuleSet { rules, dive }
    }

    /// Whether the rule string requested descent
    pub fn dive(&self) -> bool {
        self.dive
    }

    /// All rules in declaration order, including any `dive` directive
    pub fn iter(&self) -> impl Iterator<Item = &Rule<'a>> {
        self.rules.iter()
    }

    /// Rules to dispatch to transformers (every rule except `dive`)
    pub fn transforms(&self) -> impl Iterator<Item = &Rule<'a>> {
        self.rules.iter().filter(|rule| !rule.is_dive())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Whether a raw rule string means "no rules" (empty or `-`)
pub fn is_skipped(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == SKIP
}

/// Whether any token of a raw rule string is `dive`
pub fn has_dive(raw: &str) -> bool {
    raw.trim().split(',').any(|token| token == DIVE)
}

/// Removes a leading `dive` token, leaving the rules meant for the next level
pub fn strip_dive(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.strip_prefix(DIVE).and_then(|rest| rest.strip_prefix(',')) {
        Some(rest) => rest.trim(),
        None => raw,
    }
}
