//! # Error Handling
//!
//! Provides the unified `AppError` enum used by the decoder and the mapper.

use derive_more::Display;

/// The Global Error Enum.
///
/// Every variant aborts the current decode or mapping call; there is no
/// partial-success mode.
#[derive(Debug, Display)]
pub enum AppError {
    /// Malformed JSON, invalid UTF-8, or a duplicate key inside one object.
    #[display("Unable to load JSON: {_0}")]
    Parse(String),

    /// The source is not a mapping, or the target is not an OpenAPI object.
    #[display("Type mismatch: {_0}")]
    TypeMismatch(String),

    /// The source names a field the target type does not declare.
    #[display("Field {field} not found in the target object {type_name}")]
    FieldNotFound {
        /// The offending key.
        field: String,
        /// Name of the target type.
        type_name: String,
    },

    /// A field value was rejected while constructing the target type.
    #[display("Invalid value for {type_name}.{field}: {reason}")]
    InvalidField {
        /// Name of the type under construction.
        type_name: String,
        /// The field whose value was rejected.
        field: String,
        /// Why the value could not be stored.
        reason: String,
    },
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub(crate) fn field_not_found(field: impl Into<String>, type_name: &str) -> Self {
        AppError::FieldNotFound {
            field: field.into(),
            type_name: type_name.to_string(),
        }
    }

    pub(crate) fn invalid_field(type_name: &str, field: &str, reason: impl ToString) -> Self {
        AppError::InvalidField {
            type_name: type_name.to_string(),
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
