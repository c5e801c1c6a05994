//! Configuration validation
//!
//! Collects every problem before failing, so a broken config file is
//! reported in one pass.
//!
//! # Example
//!
//! ```rust
//! use staybook_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .range("search.benefit_similarity_threshold", 0.7, 0.0, 1.0)
//!     .non_empty("search.substring_sizes", &[2, 3, 4])
//!     .validate();
//!
//! assert!(result.is_ok());
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            )
            .with_suggestion("Fix the listed keys in your .staybook.toml"))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a list has at least one entry
    pub fn non_empty<T>(mut self, field: &str, values: &[T]) -> Self {
        if values.is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Must contain at least one value".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty list".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate a keyword list: non-empty, no blank entries
    ///
    /// Only trimming is applied here; callers that fold text further must
    /// check the folded form themselves.
    pub fn keywords(mut self, field: &str, values: &[String]) -> Self {
        let blank = values.iter().filter(|v| v.trim().is_empty()).count();
        if values.is_empty() || blank > 0 {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Must list at least one keyword and no blank keywords".to_string(),
                code: "KEYWORDS".to_string(),
                expected: Some("non-blank keywords".to_string()),
                actual: Some(format!("{} keywords, {} blank", values.len(), blank)),
            });
        }
        self
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + Copy + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if !(min..=max).contains(&value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: "RANGE".to_string(),
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Get the validation result without converting it
    pub fn finish(self) -> ValidationResult {
        self.result
    }

    /// Convert the collected errors into a `Result`
    pub fn validate(self) -> Result<()> {
        self.result.to_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_accepts_bounds() {
        let result = Validator::new().range("x", 1.0, 0.0, 1.0).finish();
        assert!(result.is_valid());
    }

    #[test]
    fn test_range_rejects_nan() {
        let result = Validator::new().range("x", f64::NAN, 0.0, 1.0).finish();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "RANGE");
    }

    #[test]
    fn test_collects_all_errors() {
        let result = Validator::new()
            .range("a", 5, 0, 1)
            .non_empty::<u8>("b", &[])
            .keywords("c", &["".to_string()])
            .finish();

        assert_eq!(result.errors().len(), 3);
        assert_eq!(result.errors()[1].code, "REQUIRED");
    }

    #[test]
    fn test_to_result_uses_validation_code() {
        let err = Validator::new().range("a", 5, 0, 1).validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("a: Must be between 0 and 1"));
    }
}
