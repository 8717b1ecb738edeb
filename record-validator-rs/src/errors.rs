//! Error handling for the record validator
//!
//! Two tiers of failure exist. Fatal errors abort a whole validation call and
//! are returned on their own; per-field violations are accumulated into a
//! [`ViolationList`] and returned together once every field has been checked.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Error returned by a validation call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The value handed to the validator is not a record
    #[error("wrong argument given, should be a record: got {type_name}")]
    NotARecord {
        /// Type name of the rejected value
        type_name: &'static str,
    },

    /// A non-exported field carries a rule string
    #[error("validation for unexported field is not allowed: {field}")]
    UnexportedFieldValidated {
        /// Name of the offending field
        field: String,
    },

    /// One or more fields violated their constraints
    #[error("{0}")]
    Violations(ViolationList),
}

impl ValidationError {
    /// Returns true for errors that aborted the call before all fields were checked
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ValidationError::Violations(_))
    }

    /// The accumulated violations, if this error carries any
    pub fn violations(&self) -> Option<&ViolationList> {
        match self {
            ValidationError::Violations(list) => Some(list),
            _ => None,
        }
    }
}

/// The specific way a field failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Text is longer than `max`
    TooLong { max: i64 },
    /// Text is shorter than `min`
    TooShort { min: i64 },
    /// Text length differs from `len`
    LengthMismatch { len: i64 },
    /// Integer is greater than `max`
    AboveMaximum { max: i64 },
    /// Integer is less than `min`
    BelowMinimum { min: i64 },
    /// Value is not one of the `in` alternatives
    NotAllowed,
    /// The rule string (or its use on this kind) is malformed
    InvalidSyntax { detail: String },
    /// `len` was given a negative value
    NegativeLength { len: i64 },
}

impl ViolationKind {
    pub(crate) fn invalid_syntax<S: Into<String>>(detail: S) -> Self {
        ViolationKind::InvalidSyntax {
            detail: detail.into(),
        }
    }

    /// Returns true if the violation comes from the rule itself rather than the value
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ViolationKind::InvalidSyntax { .. } | ViolationKind::NegativeLength { .. }
        )
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::TooLong { max } => write!(f, "length can't be more than max ({})", max),
            ViolationKind::TooShort { min } => write!(f, "length can't be less than min ({})", min),
            ViolationKind::LengthMismatch { len } => {
                write!(f, "length must be equal to len ({})", len)
            }
            ViolationKind::AboveMaximum { max } => write!(f, "value can't be more than max ({})", max),
            ViolationKind::BelowMinimum { min } => write!(f, "value can't be less than min ({})", min),
            ViolationKind::NotAllowed => write!(f, "value is not contained in the 'in'"),
            ViolationKind::InvalidSyntax { detail } => {
                write!(f, "invalid validator syntax: {}", detail)
            }
            ViolationKind::NegativeLength { len } => write!(f, "wrong length: {}", len),
        }
    }
}

/// A single failed constraint or rule syntax error, scoped to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field label; sequence elements carry a positional suffix
    pub field: String,
    /// What went wrong
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    /// Create a new violation for a field
    pub fn new<S: Into<String>>(field: S, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field: {} err: {}", self.field, self.kind)
    }
}

/// Ordered violations collected during one validation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationList {
    violations: Vec<Violation>,
}

impl ViolationList {
    /// Wrap collected violations
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether no violations were collected
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterate violations in accumulation order
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Violations raised for `field`, including those of its sequence elements
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| {
            v.field == field
                || v.field
                    .strip_prefix(field)
                    .map_or(false, |rest| rest.starts_with(' ') && rest.ends_with("th element"))
        })
    }

    /// Empty lists are success; anything else becomes [`ValidationError::Violations`]
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Violations(self))
        }
    }

    /// Consume the list, returning the raw violations
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, violation) in self.violations.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl From<Vec<Violation>> for ViolationList {
    fn from(violations: Vec<Violation>) -> Self {
        Self::new(violations)
    }
}

impl IntoIterator for ViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message() {
        let v = Violation::new("name", ViolationKind::TooShort { min: 3 });
        assert_eq!(v.to_string(), "field: name err: length can't be less than min (3)");
    }

    #[test]
    fn test_list_is_comma_joined() {
        let list = ViolationList::from(vec![
            Violation::new("a", ViolationKind::NotAllowed),
            Violation::new("b", ViolationKind::AboveMaximum { max: 1 }),
        ]);

        assert_eq!(
            list.to_string(),
            "field: a err: value is not contained in the 'in',field: b err: value can't be more than max (1)"
        );
    }

    #[test]
    fn test_empty_list_is_success() {
        assert_eq!(ViolationList::default().into_result(), Ok(()));

        let err = ViolationList::from(vec![Violation::new("a", ViolationKind::NotAllowed)])
            .into_result()
            .unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(err.violations().map(ViolationList::len), Some(1));
    }

    #[test]
    fn test_for_field_includes_elements() {
        let list = ViolationList::from(vec![
            Violation::new("tags 0th element", ViolationKind::NotAllowed),
            Violation::new("tags", ViolationKind::invalid_syntax("max:x")),
            Violation::new("tagsx", ViolationKind::NotAllowed),
        ]);

        assert_eq!(list.for_field("tags").count(), 2);
    }

    #[test]
    fn test_fatal_errors() {
        let err = ValidationError::NotARecord { type_name: "i64" };
        assert!(err.is_fatal());
        assert!(err.violations().is_none());
    }
}
