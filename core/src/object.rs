//! # OpenAPI Objects
//!
//! The capability every generated model type exposes to the mapper.
//!
//! A model type declares a fixed table of field names. For each field the
//! mapper needs to know whether the field is itself an OpenAPI object
//! (so it can recurse) or a plain value (copied as-is). New values are never
//! assembled in place: validated assignments are collected in a [`FieldSet`]
//! and handed to exactly one construction call.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::fmt;

/// A generated data-model type the mapper can populate.
///
/// Implementations are normally produced by [`openapi_object!`](crate::openapi_object),
/// which builds the field table once per type.
pub trait OpenApiObject: Any + fmt::Debug + Send + Sync {
    /// The name of the concrete type, used in error messages.
    fn type_name(&self) -> &'static str;

    /// Declared field names, in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Reads the current value of a declared field.
    ///
    /// Returns `None` when `name` is not declared on this type.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Constructs a new value of this exact runtime type from `fields`.
    ///
    /// Fields missing from the set keep the type's default value.
    fn construct(&self, fields: FieldSet) -> AppResult<Box<dyn OpenApiObject>>;

    /// Static factory behind [`construct`](OpenApiObject::construct).
    fn from_fields(fields: FieldSet) -> AppResult<Self>
    where
        Self: Sized;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Owned upcast for downcasting to the concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// A borrowed view of a field's current value.
#[derive(Debug, Clone)]
pub enum FieldRef<'a> {
    /// The field holds a nested OpenAPI object.
    Object(&'a dyn OpenApiObject),
    /// The field holds a plain value (primitive, list, mapping, option...).
    Plain(Value),
}

impl<'a> FieldRef<'a> {
    /// Returns the nested object if this field is a family member.
    pub fn as_object(&self) -> Option<&'a dyn OpenApiObject> {
        match self {
            FieldRef::Object(obj) => Some(*obj),
            FieldRef::Plain(_) => None,
        }
    }
}

impl<'a, T: OpenApiObject> From<&'a T> for FieldRef<'a> {
    fn from(obj: &'a T) -> Self {
        FieldRef::Object(obj)
    }
}

/// Checks whether a value belongs to the OpenAPI object family.
pub fn is_openapi(value: &FieldRef<'_>) -> bool {
    matches!(value, FieldRef::Object(_))
}

/// A validated value waiting to be stored in a new object.
#[derive(Debug)]
pub enum FieldValue {
    /// A freshly constructed nested object.
    Object(Box<dyn OpenApiObject>),
    /// A plain JSON value, stored without coercion.
    Value(Value),
}

impl FieldValue {
    /// Converts a plain assignment into the field's declared type.
    pub fn into_plain<T: DeserializeOwned>(self, type_name: &str, field: &str) -> AppResult<T> {
        match self {
            FieldValue::Value(value) => serde_json::from_value(value)
                .map_err(|e| AppError::invalid_field(type_name, field, e)),
            FieldValue::Object(obj) => Err(AppError::invalid_field(
                type_name,
                field,
                format!("expected a plain value, found {}", obj.type_name()),
            )),
        }
    }

    /// Converts a nested-object assignment into the field's declared type.
    pub fn into_object<T: OpenApiObject>(self, type_name: &str, field: &str) -> AppResult<T> {
        match self {
            FieldValue::Object(obj) => {
                let found = obj.type_name();
                obj.into_any().downcast::<T>().map(|b| *b).map_err(|_| {
                    AppError::invalid_field(
                        type_name,
                        field,
                        format!("expected {}, found {}", std::any::type_name::<T>(), found),
                    )
                })
            }
            FieldValue::Value(value) => Err(AppError::invalid_field(
                type_name,
                field,
                format!("expected an OpenAPI object, found plain value {}", value),
            )),
        }
    }
}

/// Ordered set of field assignments used to construct one object.
#[derive(Debug, Default)]
pub struct FieldSet {
    fields: IndexMap<String, FieldValue>,
}

impl FieldSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` assignments.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Records an assignment, replacing any earlier value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Takes the assignment for `name` out of the set.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.shift_remove(name)
    }

    /// Looks up an assignment without consuming it.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Number of pending assignments.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no assignments are pending.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of pending assignments, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fails with `FieldNotFound` if any assignment was not consumed by the
    /// constructor of `type_name`.
    pub fn ensure_consumed(&self, type_name: &str) -> AppResult<()> {
        match self.fields.keys().next() {
            Some(name) => Err(AppError::field_not_found(name.as_str(), type_name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Probe;

    impl OpenApiObject for Probe {
        fn type_name(&self) -> &'static str {
            "Probe"
        }

        fn field_names(&self) -> &'static [&'static str] {
            &[]
        }

        fn field(&self, _name: &str) -> Option<FieldRef<'_>> {
            None
        }

        fn construct(&self, fields: FieldSet) -> AppResult<Box<dyn OpenApiObject>> {
            Ok(Box::new(Self::from_fields(fields)?))
        }

        fn from_fields(fields: FieldSet) -> AppResult<Self> {
            fields.ensure_consumed("Probe")?;
            Ok(Probe)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    }

    #[test]
    fn test_marker_check() {
        let probe = Probe;
        assert!(is_openapi(&FieldRef::from(&probe)));
        assert!(!is_openapi(&FieldRef::Plain(json!({"a": 1}))));
    }

    #[test]
    fn test_into_plain_rejects_wrong_shape() {
        let err = FieldValue::Value(json!("three"))
            .into_plain::<u32>("Spec", "replicas")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidField { ref field, .. } if field == "replicas"));
    }

    #[test]
    fn test_into_plain_accepts_raw_value() {
        let raw: Value = FieldValue::Value(json!({"any": [1, "thing"]}))
            .into_plain("Spec", "extra")
            .unwrap();
        assert_eq!(raw, json!({"any": [1, "thing"]}));
    }

    #[test]
    fn test_into_object_downcasts() {
        let value = FieldValue::Object(Box::new(Probe));
        assert!(value.into_object::<Probe>("Outer", "probe").is_ok());

        let err = FieldValue::Value(json!(1))
            .into_object::<Probe>("Outer", "probe")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidField { .. }));
    }

    #[test]
    fn test_field_set_keeps_order_and_reports_leftovers() {
        let mut set = FieldSet::with_capacity(2);
        set.insert("b", FieldValue::Value(json!(1)));
        set.insert("a", FieldValue::Value(json!(2)));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["b", "a"]);

        assert!(matches!(set.get("a"), Some(FieldValue::Value(v)) if v == &json!(2)));
        assert!(set.remove("b").is_some());
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());

        let err = set.ensure_consumed("Probe").unwrap_err();
        assert_eq!(err.to_string(), "Field a not found in the target object Probe");
    }
}
