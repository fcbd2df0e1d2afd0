//! Type coercion from runtime [`Value`]s to canonical comparison types
//!
//! The actual side of an assertion rarely has the literal's exact shape: a
//! database column may decode as `Int` while a header is always a `String`.
//! These functions normalize an actual value to the canonical type declared by
//! the expected literal's tag. `None` means "not coercible", which the
//! `equal` operator reports as a type mismatch.
//!
//! ```
//! use verdict::{coerce, Value};
//!
//! assert_eq!(coerce::as_int64(&Value::from("42")), Some(42));
//! assert_eq!(coerce::as_float64(&Value::Int(3)), Some(3.0));
//! assert_eq!(coerce::as_bool(&Value::Int(1)), Some(true));
//! assert_eq!(coerce::as_bool(&Value::Int(2)), None);
//! ```

use std::borrow::Cow;

use uuid::Uuid;

use crate::literal::parse_bool;
use crate::Value;

/// Coerce to a signed 64-bit integer.
///
/// Accepts `Int`, or a `String` holding a base-10 integer.
#[must_use]
pub fn as_int64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerce to a 64-bit float.
///
/// Accepts `Float`, `Int` (widened), or a `String` holding a float.
#[must_use]
pub fn as_float64(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerce to a boolean.
///
/// Accepts `Bool`, an `Int` that is exactly `0` or `1`, or a `String` in
/// the permissive bool grammar (see [`parse_bool`]).
#[must_use]
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(0) => Some(false),
        Value::Int(1) => Some(true),
        Value::String(s) => parse_bool(s),
        _ => None,
    }
}

/// Default string representation of any value.
///
/// Strings are borrowed as-is; everything else is rendered with `Display`.
#[must_use]
pub fn as_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Coerce to a UUID.
///
/// Accepts `Uuid`, or a `String` in any form [`Uuid::parse_str`] accepts.
#[must_use]
pub fn as_uuid(value: &Value) -> Option<Uuid> {
    match value {
        Value::Uuid(u) => Some(*u),
        Value::String(s) => Uuid::parse_str(s).ok(),
        _ => None,
    }
}
