//! Rule string parsing
//!
//! A rule string is a `;`-separated list of `key:value` clauses, e.g.
//! `"min:3;max:5;in:foo,bar"`. Recognized keys are `max`, `min`, `len` and
//! `in`; anything else is ignored.

use crate::errors::{Violation, ViolationKind};

/// Key of the upper bound clause
pub const MAX_KEY: &str = "max";
/// Key of the lower bound clause
pub const MIN_KEY: &str = "min";
/// Key of the exact length clause
pub const LEN_KEY: &str = "len";
/// Key of the allowed values clause
pub const IN_KEY: &str = "in";

/// Constraints parsed from one field's rule string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Upper bound: text length for text, value for integers
    pub max: Option<i64>,
    /// Lower bound: text length for text, value for integers
    pub min: Option<i64>,
    /// Exact text length, never negative
    pub len: Option<i64>,
    /// Allowed alternatives as raw tokens
    pub allowed: Option<Vec<String>>,
}

impl ConstraintSet {
    /// Parse a rule string into a fresh violation list
    pub fn parse(field: &str, rule: &str) -> (Self, Vec<Violation>) {
        let mut violations = Vec::new();
        let constraints = parse_rule(field, rule, &mut violations);
        (constraints, violations)
    }

    /// Whether no constraint is set
    pub fn is_empty(&self) -> bool {
        self.max.is_none() && self.min.is_none() && self.len.is_none() && self.allowed.is_none()
    }
}

/// Parse `rule` for `field`, appending syntax violations to `violations`.
///
/// A malformed clause leaves its constraint unset and never stops the
/// remaining clauses from being parsed. Later clauses overwrite earlier ones
/// with the same key.
pub fn parse_rule(field: &str, rule: &str, violations: &mut Vec<Violation>) -> ConstraintSet {
    let mut constraints = ConstraintSet::default();

    if rule.is_empty() {
        return constraints;
    }

    for clause in rule.split(';') {
        let (key, value) = clause.split_once(':').unwrap_or((clause, ""));
        log::trace!("field {}: clause key={:?} value={:?}", field, key, value);

        match key {
            MAX_KEY => {
                if let Some(max) = parse_int(field, clause, value, violations) {
                    constraints.max = Some(max);
                }
            }
            MIN_KEY => {
                if let Some(min) = parse_int(field, clause, value, violations) {
                    constraints.min = Some(min);
                }
            }
            LEN_KEY => match parse_int(field, clause, value, violations) {
                Some(len) if len < 0 => {
                    violations.push(Violation::new(field, ViolationKind::NegativeLength { len }));
                }
                Some(len) => constraints.len = Some(len),
                None => {}
            },
            IN_KEY => {
                constraints.allowed = Some(value.split(',').map(str::to_string).collect());
            }
            _ => {}
        }
    }

    constraints
}

fn parse_int(field: &str, clause: &str, value: &str, violations: &mut Vec<Violation>) -> Option<i64> {
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            violations.push(Violation::new(
                field,
                ViolationKind::invalid_syntax(format!("'{}' is not an integer in '{}'", value, clause)),
            ));
            None
        }
    }
}
