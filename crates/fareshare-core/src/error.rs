//! # Error Types
//!
//! Domain-specific error types for fareshare-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fareshare-core errors (this file)                                     │
//! │  ├── CoreError        - Trip reducer failures                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fareshare-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → terminal           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! The settlement engine itself (`balance`, `settlement`, `report`) has no
//! error type at all. It accepts whatever it is given: unknown person ids,
//! custom splits that don't add up, non-positive amounts. Only the trip
//! reducer rejects bad input, before it ever reaches the engine.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Trip state errors.
///
/// Returned by [`crate::trip::reduce`] when a command can't be applied.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The command references a person that isn't on the trip.
    ///
    /// ## When This Occurs
    /// - Renaming or removing an id that was already removed
    /// - A stale id from a front end that didn't reload the trip
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// The command references an expense that isn't on the trip.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    /// An entity with this id already exists on the trip.
    #[error("{entity} '{id}' already exists")]
    DuplicateId { entity: String, id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the checks in [`crate::validation`] before a person, expense,
/// or trip detail is accepted.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric amount, bad currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An id that should name a person on the trip doesn't.
    #[error("{field} references unknown person '{id}'")]
    UnknownReference { field: String, id: String },

    /// Duplicate value (e.g., same person listed twice in a split).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// Start of a range comes after its end.
    #[error("{field} starts after it ends")]
    InvalidRange { field: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an UnknownReference error.
    pub fn unknown_reference(field: impl Into<String>, id: impl Into<String>) -> Self {
        ValidationError::UnknownReference {
            field: field.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PersonNotFound("p-42".to_string());
        assert_eq!(err.to_string(), "Person not found: p-42");

        let err = CoreError::DuplicateId {
            entity: "Expense".to_string(),
            id: "e1".to_string(),
        };
        assert_eq!(err.to_string(), "Expense 'e1' already exists");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("description");
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::unknown_reference("paid_by", "ghost");
        assert_eq!(err.to_string(), "paid_by references unknown person 'ghost'");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "name must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
