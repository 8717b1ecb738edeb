//! Text constraint checks
//!
//! `max`, `min` and `len` apply to the text length (measured per
//! [`LengthUnit`]), `in` to exact token membership. Every present constraint
//! is evaluated, even after an earlier one failed.

use crate::constraints::ConstraintSet;
use crate::errors::{Violation, ViolationKind};
use crate::LengthUnit;

/// Length of `s` in the given unit
pub fn text_length(s: &str, unit: LengthUnit) -> i64 {
    let length = match unit {
        LengthUnit::Bytes => s.len(),
        LengthUnit::Chars => s.chars().count(),
    };
    i64::try_from(length).unwrap_or(i64::MAX)
}

/// Check a text value
pub fn check_text(
    field: &str,
    s: &str,
    constraints: &ConstraintSet,
    unit: LengthUnit,
    violations: &mut Vec<Violation>,
) {
    let length = text_length(s, unit);

    if let Some(max) = constraints.max {
        if length > max {
            violations.push(Violation::new(field, ViolationKind::TooLong { max }));
        }
    }

    if let Some(min) = constraints.min {
        if length < min {
            violations.push(Violation::new(field, ViolationKind::TooShort { min }));
        }
    }

    if let Some(len) = constraints.len {
        if length != len {
            violations.push(Violation::new(field, ViolationKind::LengthMismatch { len }));
        }
    }

    if let Some(allowed) = &constraints.allowed {
        if !allowed.iter().any(|candidate| candidate == s) {
            violations.push(Violation::new(field, ViolationKind::NotAllowed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn run(rule: &str, value: &str, unit: LengthUnit) -> Vec<ViolationKind> {
        let (constraints, mut violations) = ConstraintSet::parse("name", rule);
        check_text("name", value, &constraints, unit, &mut violations);
        violations.into_iter().map(|v| v.kind).collect()
    }

    #[test_case("ab", vec![ViolationKind::TooShort { min: 3 }] ; "below min")]
    #[test_case("abcdef", vec![ViolationKind::TooLong { max: 5 }] ; "above max")]
    #[test_case("abc", vec![] ; "within bounds")]
    #[test_case("abcde", vec![] ; "at max")]
    fn test_min_max(value: &str, expected: Vec<ViolationKind>) {
        assert_eq!(run("min:3;max:5", value, LengthUnit::Bytes), expected);
    }

    #[test]
    fn test_exact_length() {
        assert!(run("len:4", "abcd", LengthUnit::Bytes).is_empty());
        assert_eq!(
            run("len:4", "abc", LengthUnit::Bytes),
            vec![ViolationKind::LengthMismatch { len: 4 }]
        );
    }

    #[test]
    fn test_membership_is_exact() {
        assert!(run("in:admin,user", "user", LengthUnit::Bytes).is_empty());
        assert_eq!(run("in:admin,user", "User", LengthUnit::Bytes), vec![ViolationKind::NotAllowed]);
        assert_eq!(run("in:admin,user", "use", LengthUnit::Bytes), vec![ViolationKind::NotAllowed]);
    }

    #[test]
    fn test_all_checks_run_independently() {
        assert_eq!(
            run("max:2;min:1;len:1;in:a", "xyz", LengthUnit::Bytes),
            vec![
                ViolationKind::TooLong { max: 2 },
                ViolationKind::LengthMismatch { len: 1 },
                ViolationKind::NotAllowed,
            ]
        );
    }

    #[test]
    fn test_length_unit() {
        assert_eq!(text_length("héllo", LengthUnit::Bytes), 6);
        assert_eq!(text_length("héllo", LengthUnit::Chars), 5);
        assert!(run("len:5", "héllo", LengthUnit::Chars).is_empty());
        assert_eq!(
            run("len:5", "héllo", LengthUnit::Bytes),
            vec![ViolationKind::LengthMismatch { len: 5 }]
        );
    }

    #[test]
    fn test_empty_token_matches_empty_text() {
        assert!(run("in:", "", LengthUnit::Bytes).is_empty());
    }
}
