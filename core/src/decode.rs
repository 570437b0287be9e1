//! # Strict Decoding
//!
//! JSON decoding that rejects objects with repeated keys.
//!
//! `serde_json::Value` keeps the last occurrence of a repeated key, which lets
//! a payload such as `{"replicas": 1, "replicas": 100}` slip through review.
//! Every value here is assembled by a dedicated visitor that refuses the
//! second occurrence instead.

use crate::error::{AppError, AppResult};
use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Decodes JSON text or UTF-8 bytes into a `serde_json::Value`.
///
/// Fails with [`AppError::Parse`] when the input is not valid UTF-8, is not
/// valid JSON, or contains an object that repeats a key at any depth. The
/// duplicate-key message names the key.
pub fn decode(input: impl AsRef<[u8]>) -> AppResult<Value> {
    let bytes = input.as_ref();
    tracing::trace!(len = bytes.len(), "decoding JSON payload");

    let text = std::str::from_utf8(bytes)
        .map_err(|e| AppError::Parse(format!("input is not valid UTF-8: {}", e)))?;

    let StrictValue(value) = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "rejected JSON payload");
        AppError::Parse(e.to_string())
    })?;

    Ok(value)
}

/// Strictly decodes the input, then deserializes the checked value into `T`.
///
/// Derived `Deserialize` impls silently keep the last duplicate key, so this
/// is the entry point for callers that want a concrete type without losing
/// the duplicate-key guarantee.
pub fn decode_into<T: DeserializeOwned>(input: impl AsRef<[u8]>) -> AppResult<T> {
    let value = decode(input)?;
    serde_json::from_value(value).map_err(|e| AppError::Parse(e.to_string()))
}

fn duplicate_key_message(key: &str) -> String {
    format!(
        "duplicate key {} detected; JSON objects must have unique keys",
        key
    )
}

/// A `Value` assembled under the duplicate-key policy.
struct StrictValue(Value);

impl<'de> Deserialize<'de> for StrictValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StrictValueVisitor).map(StrictValue)
    }
}

struct StrictValueVisitor;

impl<'de> Visitor<'de> for StrictValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        StrictValue::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(StrictValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            // The value is assembled first so a duplicate nested inside it is
            // reported before a duplicate of the enclosing key.
            let StrictValue(value) = access.next_value()?;
            if object.contains_key(&key) {
                return Err(de::Error::custom(duplicate_key_message(&key)));
            }
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}
