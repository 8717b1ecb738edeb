//! Record field inspection
//!
//! A record exposes its declared fields through the [`Inspect`] trait: one
//! [`FieldDescriptor`] per field, in declaration order, carrying the field's
//! name, whether it is exported, its raw rule string and its runtime value.
//! The [`record!`](crate::record) macro generates this table from a struct
//! definition; hand-written implementations are equally valid.

use crate::constraints::parse_rule;
use crate::errors::{ValidationError, ValidationResult, ViolationList};
use crate::validators::{self, AsFieldValue, FieldValue};
use crate::ValidationConfig;

/// Metadata and value of one record field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<'a> {
    /// Declared field name
    pub name: &'a str,
    /// Whether the field is part of the type's public contract
    pub exported: bool,
    /// Raw rule string, empty when the field carries none
    pub rule: &'a str,
    /// Runtime value, classified by kind
    pub value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Create a field descriptor
    pub fn new(name: &'a str, exported: bool, rule: &'a str, value: FieldValue<'a>) -> Self {
        Self {
            name,
            exported,
            rule,
            value,
        }
    }

    /// Descriptor for an exported field without a rule
    pub fn exported<T: AsFieldValue + ?Sized>(name: &'a str, value: &'a T) -> Self {
        Self::new(name, true, "", value.field_value())
    }

    /// Descriptor for a non-exported field without a rule
    pub fn unexported<T: AsFieldValue + ?Sized>(name: &'a str, value: &'a T) -> Self {
        Self::new(name, false, "", value.field_value())
    }

    /// Attach a rule string
    pub fn with_rule(mut self, rule: &'a str) -> Self {
        self.rule = rule;
        self
    }
}

/// Shape of a value as seen by the validator
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'a> {
    /// A record with its declared fields
    Record(Vec<FieldDescriptor<'a>>),
    /// Anything that is not a record
    Other {
        /// Type name used in the error message
        type_name: &'static str,
    },
}

/// Types the validator can be handed
pub trait Inspect {
    /// Describe this value
    fn inspect(&self) -> Shape<'_>;
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Shape<'_> {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Shape<'_> {
        (**self).inspect()
    }
}

macro_rules! impl_not_a_record {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Shape<'_> {
                    Shape::Other {
                        type_name: std::any::type_name::<$ty>(),
                    }
                }
            }
        )*
    };
}

impl_not_a_record!(
    str, String, bool, char, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, ()
);

impl<T> Inspect for [T] {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other {
            type_name: std::any::type_name::<[T]>(),
        }
    }
}

impl<T> Inspect for Vec<T> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other {
            type_name: std::any::type_name::<Vec<T>>(),
        }
    }
}

impl<T> Inspect for Option<T> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other {
            type_name: std::any::type_name::<Option<T>>(),
        }
    }
}

/// Walk the fields of `value`, parsing and checking each one in declaration order.
///
/// A rule on a non-exported field aborts the walk and drops whatever
/// violations earlier fields produced.
pub(crate) fn inspect_record<T: Inspect + ?Sized>(value: &T, config: &ValidationConfig) -> ValidationResult<()> {
    let fields = match value.inspect() {
        Shape::Record(fields) => fields,
        Shape::Other { type_name } => {
            log::warn!("refusing to validate non-record value of type {}", type_name);
            return Err(ValidationError::NotARecord { type_name });
        }
    };

    let mut violations = Vec::new();

    for field in &fields {
        if !field.exported && !field.rule.is_empty() {
            log::warn!("field {} is not exported but carries rule {:?}", field.name, field.rule);
            return Err(ValidationError::UnexportedFieldValidated {
                field: field.name.to_string(),
            });
        }

        log::debug!(
            "validating {} field {} against {:?}",
            field.value.kind_name(),
            field.name,
            field.rule
        );

        let constraints = parse_rule(field.name, field.rule, &mut violations);
        validators::check(field.name, &field.value, &constraints, config.length_unit, &mut violations);
    }

    if !violations.is_empty() {
        log::debug!("{} violation(s) across {} field(s)", violations.len(), fields.len());
    }

    ViolationList::new(violations).into_result()
}

/// Declare a struct whose fields carry validation rules.
///
/// A rule follows the field type after `=>`. Only fields declared `pub` count
/// as exported; a rule on any other field makes validation fail.
///
/// ```
/// record_validator::record! {
///     #[derive(Debug)]
///     pub struct Account {
///         pub login: String => "min:3;max:16",
///         pub role: String => "in:admin,user",
///         pub age: i32 => "min:18",
///         pub tags: Vec<String> => "len:4",
///         note: String,
///     }
/// }
///
/// let account = Account {
///     login: "neo".into(),
///     role: "user".into(),
///     age: 30,
///     tags: vec!["core".into()],
///     note: String::new(),
/// };
/// assert!(record_validator::validate(&account).is_ok());
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $rule:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Inspect for $name {
            fn inspect(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(::std::vec![
                    $(
                        $crate::FieldDescriptor::new(
                            ::std::stringify!($field),
                            ::std::stringify!($fvis) == "pub",
                            $crate::__record_rule!($($rule)?),
                            $crate::AsFieldValue::field_value(&self.$field),
                        ),
                    )*
                ])
            }
        }

        impl $crate::AsFieldValue for $name {}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_rule {
    () => {
        ""
    };
    ($rule:literal) => {
        $rule
    };
}
