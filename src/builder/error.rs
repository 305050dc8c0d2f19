//! Error types for request building
//!
//! Enumerated fields with a rejecting policy and computed fields whose input
//! cannot be derived fail at runtime; every other setter writes
//! unconditionally.

use thiserror::Error;

use crate::schema::Operation;

/// Errors raised while assembling a request payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Value outside the field's enumeration under a rejecting policy
    #[error("Invalid value '{value}' for '{field}'. Allowed values are: {}", .allowed.join(", "))]
    Validation {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Input a computed field cannot derive its stored value from
    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Field name not declared by the operation schema
    #[error("Operation {operation} has no field '{field}'")]
    UnknownField { operation: Operation, field: String },

    /// Policy override requested for a field without an enumeration
    #[error("Field '{0}' is not enumerated; its policy cannot be changed")]
    NotEnumerated(String),
}

/// Result type for builder operations
pub type BuilderResult<T> = Result<T, BuilderError>;

impl BuilderError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            BuilderError::Validation { field, .. }
            | BuilderError::InvalidValue { field, .. }
            | BuilderError::UnknownField { field, .. } => field,
            BuilderError::NotEnumerated(field) => field,
        }
    }
}
