//! # Object Mapping
//!
//! Builds OpenAPI model objects from decoded JSON.
//!
//! The target object acts as a template: its type supplies the field table,
//! and its nested objects tell the mapper where to recurse. The target itself
//! is never modified; every call returns a freshly constructed value.

use crate::error::{AppError, AppResult};
use crate::object::{FieldRef, FieldSet, FieldValue, OpenApiObject};
use serde_json::{Map, Value};

/// Creates a new object of `target`'s runtime type from `source`.
///
/// `source` must be a JSON object and `target` must be an OpenAPI object,
/// otherwise the call fails with [`AppError::TypeMismatch`]. Every key of
/// `source` must be a declared field of the target type
/// ([`AppError::FieldNotFound`] otherwise). Nested-object fields are built
/// recursively; all other values are passed through without validation of
/// their contents.
pub fn create_openapi_object(
    source: &Value,
    target: &FieldRef<'_>,
) -> AppResult<Box<dyn OpenApiObject>> {
    let source = source
        .as_object()
        .ok_or_else(|| AppError::TypeMismatch("source must be a mapping".into()))?;
    let target = target
        .as_object()
        .ok_or_else(|| AppError::TypeMismatch("target must be an OpenAPI object".into()))?;

    build_from_map(source, target)
}

/// Typed form of [`create_openapi_object`].
///
/// Returns a new `T`; `target` is only read.
pub fn build_typed_object<T: OpenApiObject>(source: &Value, target: &T) -> AppResult<T> {
    let built = create_openapi_object(source, &FieldRef::Object(target))?;
    let found = built.type_name();
    built.into_any().downcast::<T>().map(|b| *b).map_err(|_| {
        AppError::TypeMismatch(format!(
            "constructed {} while building {}",
            found,
            target.type_name()
        ))
    })
}

fn build_from_map(
    source: &Map<String, Value>,
    target: &dyn OpenApiObject,
) -> AppResult<Box<dyn OpenApiObject>> {
    let mut fields = FieldSet::with_capacity(source.len());

    for (key, value) in source {
        let sub_target = target
            .field(key)
            .ok_or_else(|| AppError::field_not_found(key.as_str(), target.type_name()))?;

        // Lists, maps and enums are not checked element-wise here; the
        // field's declared Rust type is the only constraint.
        let resolved = match sub_target {
            FieldRef::Object(nested) => {
                tracing::trace!(
                    field = %key,
                    nested = nested.type_name(),
                    "building nested OpenAPI object"
                );
                FieldValue::Object(create_openapi_object(value, &sub_target)?)
            }
            FieldRef::Plain(_) => FieldValue::Value(value.clone()),
        };
        fields.insert(key.clone(), resolved);
    }

    tracing::debug!(
        target_type = target.type_name(),
        fields = fields.len(),
        "constructing OpenAPI object"
    );
    target.construct(fields)
}
