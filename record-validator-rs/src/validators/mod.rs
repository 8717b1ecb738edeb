//! Constraint checking
//!
//! This module evaluates a parsed [`ConstraintSet`] against one field value.
//! Dispatch happens once per field on the [`FieldValue`] variant; each kind
//! has its own checker module.

pub mod numeric;
pub mod sequence;
pub mod string;

pub use numeric::check_integer;
pub use sequence::{check_integers, check_texts};
pub use string::check_text;

use crate::constraints::ConstraintSet;
use crate::errors::Violation;
use crate::LengthUnit;

/// Runtime value of a field, classified by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text value
    Text(&'a str),
    /// Integer value, widened so every primitive integer fits
    Integer(i128),
    /// Sequence of integers
    IntegerSeq(Vec<i128>),
    /// Sequence of text values
    TextSeq(Vec<&'a str>),
    /// Any kind no constraint applies to
    Unsupported,
}

impl FieldValue<'_> {
    /// Short kind name for logging
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::IntegerSeq(items) if items.is_empty() => "empty sequence",
            FieldValue::TextSeq(items) if items.is_empty() => "empty sequence",
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::IntegerSeq(_) => "integer sequence",
            FieldValue::TextSeq(_) => "text sequence",
            FieldValue::Unsupported => "unsupported",
        }
    }
}

/// Conversion of a field's Rust value into a [`FieldValue`].
///
/// The default method classifies the type as unsupported, so opting a nested
/// type in is a one-line `impl AsFieldValue for MyType {}`.
pub trait AsFieldValue {
    /// Classify this value
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Unsupported
    }
}

impl AsFieldValue for str {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl AsFieldValue for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self.as_str())
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

macro_rules! impl_integer_value {
    ($($ty:ty),*) => {
        $(
            impl AsFieldValue for $ty {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Integer(i128::from(*self))
                }
            }
        )*
    };
}

impl_integer_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl AsFieldValue for isize {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Integer(*self as i128)
    }
}

impl AsFieldValue for usize {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Integer(*self as i128)
    }
}

impl AsFieldValue for bool {}
impl AsFieldValue for char {}
impl AsFieldValue for f32 {}
impl AsFieldValue for f64 {}
impl<T> AsFieldValue for Option<T> {}

impl<T: AsFieldValue> AsFieldValue for [T] {
    fn field_value(&self) -> FieldValue<'_> {
        sequence_value(self)
    }
}

impl<T: AsFieldValue> AsFieldValue for Vec<T> {
    fn field_value(&self) -> FieldValue<'_> {
        sequence_value(self.as_slice())
    }
}

impl<T: AsFieldValue, const N: usize> AsFieldValue for [T; N] {
    fn field_value(&self) -> FieldValue<'_> {
        sequence_value(self.as_slice())
    }
}

fn sequence_value<T: AsFieldValue>(items: &[T]) -> FieldValue<'_> {
    let mut integers = Vec::new();
    let mut texts = Vec::new();

    for item in items {
        match item.field_value() {
            FieldValue::Integer(n) => integers.push(n),
            FieldValue::Text(s) => texts.push(s),
            _ => return FieldValue::Unsupported,
        }
    }

    if texts.is_empty() {
        FieldValue::IntegerSeq(integers)
    } else {
        FieldValue::TextSeq(texts)
    }
}

/// Check `value` against `constraints`, appending violations labeled with `field`
pub fn check(
    field: &str,
    value: &FieldValue<'_>,
    constraints: &ConstraintSet,
    unit: LengthUnit,
    violations: &mut Vec<Violation>,
) {
    match value {
        FieldValue::Text(s) => check_text(field, s, constraints, unit, violations),
        FieldValue::Integer(n) => check_integer(field, *n, constraints, violations),
        FieldValue::IntegerSeq(items) => check_integers(field, items, constraints, violations),
        FieldValue::TextSeq(items) => check_texts(field, items, constraints, unit, violations),
        FieldValue::Unsupported => {}
    }
}
