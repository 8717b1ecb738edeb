//! Sequence constraint checks
//!
//! Each element is checked on its own against the field's constraint set and
//! labeled with its zero-based position.

use crate::constraints::ConstraintSet;
use crate::errors::Violation;
use crate::LengthUnit;

use super::{check_integer, check_text};

/// Label used for violations of the `idx`-th element of `field`
pub fn element_label(field: &str, idx: usize) -> String {
    format!("{} {}th element", field, idx)
}

/// Check every element of an integer sequence
pub fn check_integers(field: &str, items: &[i128], constraints: &ConstraintSet, violations: &mut Vec<Violation>) {
    for (idx, item) in items.iter().enumerate() {
        check_integer(&element_label(field, idx), *item, constraints, violations);
    }
}

/// Check every element of a text sequence
pub fn check_texts(
    field: &str,
    items: &[&str],
    constraints: &ConstraintSet,
    unit: LengthUnit,
    violations: &mut Vec<Violation>,
) {
    for (idx, item) in items.iter().enumerate() {
        check_text(&element_label(field, idx), item, constraints, unit, violations);
    }
}
