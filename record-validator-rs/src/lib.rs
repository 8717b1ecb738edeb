//! # Record Validator
//!
//! Declarative field validation for single records. Each field may carry a
//! compact rule string such as `"min:3;max:16"` or `"in:admin,user"`; the
//! validator parses every rule, checks the field's value against it and
//! reports all violations of the record at once.
//!
//! ## Rule grammar
//!
//! ```text
//! max:<int>;min:<int>;len:<non-negative int>;in:<v1>,<v2>,...
//! ```
//!
//! - Text fields: `max`, `min` and `len` bound the length, `in` lists the
//!   allowed values.
//! - Integer fields: `max` and `min` bound the value, `in` lists allowed
//!   integers. `len` is invalid.
//! - Sequences of text or integers: every element is checked on its own.
//! - Other kinds are not checked.
//!
//! Unknown keys are ignored and a repeated key overrides earlier ones.

mod builder;
mod constraints;
mod errors;
mod schema;
pub mod validators;

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use builder::{Validator, ValidatorBuilder};
pub use constraints::{parse_rule, ConstraintSet};
pub use errors::{ValidationError, ValidationResult, Violation, ViolationKind, ViolationList};
pub use schema::{FieldDescriptor, Inspect, Shape};
pub use validators::{AsFieldValue, FieldValue};

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::builder::{Validator, ValidatorBuilder};
    pub use crate::errors::{ValidationError, ValidationResult, Violation, ViolationKind, ViolationList};
    pub use crate::record;
    pub use crate::schema::{FieldDescriptor, Inspect, Shape};
    pub use crate::validators::{AsFieldValue, FieldValue};
    pub use crate::{validate, LengthUnit, ValidationConfig};
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable selecting the text length unit
pub const LENGTH_UNIT_ENV: &str = "RECORD_VALIDATOR_LENGTH_UNIT";

/// How text length is measured for `max`, `min` and `len`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// UTF-8 byte count
    #[default]
    Bytes,
    /// Unicode scalar value count
    Chars,
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bytes" => Ok(LengthUnit::Bytes),
            "chars" => Ok(LengthUnit::Chars),
            other => Err(format!("unknown length unit '{}'", other)),
        }
    }
}

/// Configuration for the validator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Unit used to measure text length
    pub length_unit: LengthUnit,
}

impl ValidationConfig {
    /// Load configuration from the environment (and a `.env` file, if any).
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(raw) = env::var(LENGTH_UNIT_ENV) {
            match raw.parse::<LengthUnit>() {
                Ok(unit) => config.length_unit = unit,
                Err(e) => {
                    log::warn!("Invalid {}: {}, using default {:?}", LENGTH_UNIT_ENV, e, config.length_unit);
                }
            }
        }

        config
    }
}

/// Get a new default configuration
pub fn default_config() -> ValidationConfig {
    ValidationConfig::default()
}

#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Validate a record with default settings
pub fn validate<T: Inspect + ?Sized>(value: &T) -> ValidationResult<()> {
    schema::inspect_record(value, &ValidationConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.length_unit, LengthUnit::Bytes);
    }

    #[test_case("bytes", Ok(LengthUnit::Bytes))]
    #[test_case(" Chars ", Ok(LengthUnit::Chars))]
    #[test_case("graphemes", Err("unknown length unit 'graphemes'".to_string()))]
    fn test_length_unit_from_str(raw: &str, expected: Result<LengthUnit, String>) {
        assert_eq!(raw.parse::<LengthUnit>(), expected);
    }

    #[test]
    fn test_config_serde() {
        let config: ValidationConfig = serde_json::from_str(r#"{"length_unit":"chars"}"#).unwrap();
        assert_eq!(config.length_unit, LengthUnit::Chars);

        let config: ValidationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        env::set_var(LENGTH_UNIT_ENV, "chars");
        assert_eq!(ValidationConfig::from_env().length_unit, LengthUnit::Chars);

        env::set_var(LENGTH_UNIT_ENV, "nonsense");
        assert_eq!(ValidationConfig::from_env().length_unit, LengthUnit::Bytes);

        env::remove_var(LENGTH_UNIT_ENV);
        assert_eq!(ValidationConfig::from_env().length_unit, LengthUnit::Bytes);
    }
}
