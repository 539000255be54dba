//! Field validation shared by the entity setters.
//!
//! # Invariants
//! - Error messages are fixed strings; callers match on the variant, users
//!   read the message.
//! - Accepted text values are stored trimmed.

use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invalid-argument error raised when a field assignment is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Name,
    JobTitle,
    DepartmentId,
    Location,
}

impl ValidationError {
    pub fn message(self) -> &'static str {
        match self {
            Self::Name => "Name must be a non-empty string.",
            Self::JobTitle => "Job title must be a non-empty string.",
            Self::DepartmentId => {
                "department_id must be an integer that references a valid Department."
            }
            Self::Location => "Location must be a non-empty string.",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

/// Returns the trimmed value, or `error` when nothing is left after trimming.
pub(crate) fn non_empty_trimmed(value: &str, error: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_string())
}

/// Unwraps a TEXT column; any other storage class is rejected with `error`.
pub(crate) fn text_column(value: &Value, error: ValidationError) -> Result<&str, ValidationError> {
    match value {
        Value::Text(text) => Ok(text.as_str()),
        _ => Err(error),
    }
}

/// Fully validates one TEXT column: storage class first, then blankness.
pub(crate) fn text_field(value: &Value, error: ValidationError) -> Result<String, ValidationError> {
    non_empty_trimmed(text_column(value, error)?, error)
}

/// Unwraps an INTEGER column; any other storage class is rejected with `error`.
pub(crate) fn integer_column(value: &Value, error: ValidationError) -> Result<i64, ValidationError> {
    match value {
        Value::Integer(number) => Ok(*number),
        _ => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::{integer_column, non_empty_trimmed, text_column, text_field, ValidationError};
    use rusqlite::types::Value;

    #[test]
    fn non_empty_trimmed_strips_surrounding_whitespace() {
        let value = non_empty_trimmed("  Ada Lovelace \t", ValidationError::Name).unwrap();
        assert_eq!(value, "Ada Lovelace");
    }

    #[test]
    fn non_empty_trimmed_rejects_blank_input() {
        assert_eq!(
            non_empty_trimmed("", ValidationError::JobTitle),
            Err(ValidationError::JobTitle)
        );
        assert_eq!(
            non_empty_trimmed(" \n\t ", ValidationError::JobTitle),
            Err(ValidationError::JobTitle)
        );
    }

    #[test]
    fn column_helpers_reject_foreign_storage_classes() {
        assert_eq!(
            text_column(&Value::Integer(7), ValidationError::Name),
            Err(ValidationError::Name)
        );
        assert_eq!(text_column(&Value::Null, ValidationError::Name), Err(ValidationError::Name));
        assert_eq!(
            integer_column(&Value::Text("7".into()), ValidationError::DepartmentId),
            Err(ValidationError::DepartmentId)
        );
        assert_eq!(
            integer_column(&Value::Real(7.0), ValidationError::DepartmentId),
            Err(ValidationError::DepartmentId)
        );
        assert_eq!(integer_column(&Value::Integer(7), ValidationError::DepartmentId), Ok(7));
    }

    #[test]
    fn text_field_checks_class_then_content() {
        assert_eq!(
            text_field(&Value::Text("  Ops ".into()), ValidationError::Location),
            Ok("Ops".to_string())
        );
        assert_eq!(
            text_field(&Value::Text("  ".into()), ValidationError::Location),
            Err(ValidationError::Location)
        );
        assert_eq!(
            text_field(&Value::Null, ValidationError::Location),
            Err(ValidationError::Location)
        );
    }

    #[test]
    fn messages_match_field_contracts() {
        assert_eq!(ValidationError::Name.to_string(), "Name must be a non-empty string.");
        assert_eq!(
            ValidationError::JobTitle.to_string(),
            "Job title must be a non-empty string."
        );
        assert_eq!(
            ValidationError::DepartmentId.to_string(),
            "department_id must be an integer that references a valid Department."
        );
    }
}
