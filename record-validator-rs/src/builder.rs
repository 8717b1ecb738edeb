//! Validator construction
//!
//! [`Validator`] pairs the record walk with a [`ValidationConfig`];
//! [`ValidatorBuilder`] offers a fluent way to set that configuration up.

use crate::errors::ValidationResult;
use crate::schema::{inspect_record, Inspect};
use crate::{LengthUnit, ValidationConfig};

/// Validates records with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a builder for a validator
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Create a validator configured from the environment
    pub fn from_env() -> Self {
        Self::new(ValidationConfig::from_env())
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate one record, returning every violation found
    pub fn validate<T: Inspect + ?Sized>(&self, value: &T) -> ValidationResult<()> {
        inspect_record(value, &self.config)
    }
}

/// Builder for [`Validator`]
#[derive(Debug, Clone, Default)]
pub struct ValidatorBuilder {
    config: ValidationConfig,
}

impl ValidatorBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the unit used to measure text length
    pub fn length_unit(mut self, unit: LengthUnit) -> Self {
        self.config.length_unit = unit;
        self
    }

    /// Build the validator
    pub fn build(self) -> Validator {
        Validator::new(self.config)
    }
}
