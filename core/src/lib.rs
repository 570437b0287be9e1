#![deny(missing_docs)]

//! # OpenAPI Objects
//!
//! Strict JSON decoding and schema-validated construction of generated
//! OpenAPI model objects.
//!
//! - [`decode`] parses JSON and rejects objects with repeated keys.
//! - [`build_typed_object`] populates a new model value from a decoded
//!   mapping, checking every key against the model's field table and
//!   recursing into nested models.

#[macro_use]
mod macros;

/// Shared error types.
pub mod error;

/// Strict JSON decoding.
pub mod decode;

/// The OpenAPI object capability and field builders.
pub mod object;

/// Decoded JSON to OpenAPI object mapping.
pub mod mapper;

pub use decode::{decode, decode_into};
pub use error::{AppError, AppResult};
pub use mapper::{build_typed_object, create_openapi_object};
pub use object::{is_openapi, FieldRef, FieldSet, FieldValue, OpenApiObject};

/// Support code for `openapi_object!` expansions.
#[doc(hidden)]
pub mod __private {
    use serde::Serialize;
    use serde_json::Value;

    /// Snapshot of a plain field's current value.
    ///
    /// Values JSON cannot represent (maps with non-string keys, for example)
    /// read as `Null`; the mapper only uses the snapshot to tell plain fields
    /// from nested objects.
    pub fn to_plain<T: Serialize>(value: &T) -> Value {
        serde_json::to_value(value).unwrap_or(Value::Null)
    }
}
