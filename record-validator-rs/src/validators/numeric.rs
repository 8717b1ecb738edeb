//! Integer constraint checks

use crate::constraints::ConstraintSet;
use crate::errors::{Violation, ViolationKind};

/// Check an integer value.
///
/// `len` has no meaning for integers, so its presence is always reported as
/// invalid syntax. `in` tokens that are not integers are reported one by one
/// and left out of the membership test.
pub fn check_integer(field: &str, value: i128, constraints: &ConstraintSet, violations: &mut Vec<Violation>) {
    if let Some(max) = constraints.max {
        if value > i128::from(max) {
            violations.push(Violation::new(field, ViolationKind::AboveMaximum { max }));
        }
    }

    if let Some(min) = constraints.min {
        if value < i128::from(min) {
            violations.push(Violation::new(field, ViolationKind::BelowMinimum { min }));
        }
    }

    if constraints.len.is_some() {
        violations.push(Violation::new(
            field,
            ViolationKind::invalid_syntax("'len' is not applicable to integers"),
        ));
    }

    if let Some(allowed) = &constraints.allowed {
        let mut found = false;
        for token in allowed {
            match token.parse::<i128>() {
                Ok(candidate) if candidate == value => {
                    found = true;
                    break;
                }
                Ok(_) => {}
                Err(_) => violations.push(Violation::new(
                    field,
                    ViolationKind::invalid_syntax(format!("'{}' in 'in' is not an integer", token)),
                )),
            }
        }

        if !found {
            violations.push(Violation::new(field, ViolationKind::NotAllowed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn run(rule: &str, value: i128) -> Vec<ViolationKind> {
        let (constraints, mut violations) = ConstraintSet::parse("age", rule);
        check_integer("age", value, &constraints, &mut violations);
        violations.into_iter().map(|v| v.kind).collect()
    }

    #[test_case(5, vec![ViolationKind::NotAllowed] ; "not contained")]
    #[test_case(2, vec![] ; "contained")]
    fn test_membership(value: i128, expected: Vec<ViolationKind>) {
        assert_eq!(run("in:1,2,3", value), expected);
    }

    #[test_case(-100)]
    #[test_case(0)]
    #[test_case(3)]
    #[test_case(i128::MAX)]
    fn test_len_always_invalid(value: i128) {
        let kinds = run("len:3", value);
        assert_eq!(kinds.len(), 1);
        assert!(matches!(kinds[0], ViolationKind::InvalidSyntax { .. }));
    }

    #[test]
    fn test_bounds() {
        assert!(run("min:18;max:65", 30).is_empty());
        assert_eq!(run("min:18;max:65", 17), vec![ViolationKind::BelowMinimum { min: 18 }]);
        assert_eq!(run("min:18;max:65", 66), vec![ViolationKind::AboveMaximum { max: 65 }]);
    }

    #[test]
    fn test_negative_bounds_are_real() {
        assert_eq!(run("min:-1", -2), vec![ViolationKind::BelowMinimum { min: -1 }]);
        assert!(run("max:-1", -1).is_empty());
    }

    #[test]
    fn test_bad_token_is_skipped() {
        let kinds = run("in:1,x,3", 3);
        assert_eq!(kinds.len(), 1);
        assert!(matches!(kinds[0], ViolationKind::InvalidSyntax { .. }));

        // An unparsable token never matches, even for zero.
        let kinds = run("in:x", 0);
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[1], ViolationKind::NotAllowed);
    }

    #[test]
    fn test_check_order() {
        let kinds = run("max:1;min:5;len:1;in:7", 3);
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[0], ViolationKind::AboveMaximum { max: 1 });
        assert_eq!(kinds[1], ViolationKind::BelowMinimum { min: 5 });
        assert!(kinds[2].is_syntax_error());
        assert_eq!(kinds[3], ViolationKind::NotAllowed);
    }
}
