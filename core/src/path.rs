//! Path navigation over [`Value`]
//!
//! A path is a dot-separated list of segments. Each segment is interpreted by
//! the container it is applied to:
//!
//! - `Map` - literal key
//! - `Array` - non-negative base-10 index
//! - `Record` - field name, converted to PascalCase first
//!
//! Resolution never panics. Any segment that cannot be applied yields `None`.
//!
//! ```
//! use verdict::{path, Value};
//!
//! let body: Value = serde_json::json!({"a": {"b": [10, 20, 30]}}).into();
//!
//! assert_eq!(path::resolve(&body, "a.b.1"), Some(&Value::Int(20)));
//! assert_eq!(path::resolve(&body, "a.b.9"), None);
//! assert_eq!(path::resolve(&body, "a.b.x"), None);
//! ```

use std::borrow::Cow;

use crate::Value;

/// Segment separator.
pub const SEPARATOR: char = '.';

/// Resolve `path` against `value`.
///
/// Returns `None` when a key or field is unknown, an index is non-numeric or
/// out of range, or the walk reaches a scalar (including `Null`) while
/// segments remain.
#[must_use]
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(SEPARATOR)
        .try_fold(value, |current, segment| step(current, segment))
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Map(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|i| items.get(i)),
        Value::Record(record) => record.field(&to_field_name(segment)),
        _ => None,
    }
}

// `usize::from_str` accepts a leading `+`, which is not an index.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Enumerate every fully-qualified path to a leaf of `value`, depth first.
///
/// Array order is preserved, maps are visited in key order and records in
/// field order. An empty container below the root is a leaf at its own path.
/// A scalar or empty container at the root has no paths.
///
/// ```
/// use verdict::{path, Value};
///
/// let body: Value = serde_json::json!([{"key": {"path": ["a", "b", "c"]}}]).into();
///
/// assert_eq!(
///     path::leaf_paths(&body),
///     vec!["0.key.path.0", "0.key.path.1", "0.key.path.2"],
/// );
/// ```
#[must_use]
pub fn leaf_paths(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    for (segment, child) in children(value) {
        walk(child, segment.into_owned(), &mut paths);
    }
    paths
}

fn walk(value: &Value, prefix: String, paths: &mut Vec<String>) {
    let children = children(value);
    if children.is_empty() {
        paths.push(prefix);
        return;
    }
    for (segment, child) in children {
        walk(child, format!("{prefix}{SEPARATOR}{segment}"), paths);
    }
}

fn children(value: &Value) -> Vec<(Cow<'_, str>, &Value)> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (Cow::Owned(i.to_string()), item))
            .collect(),
        Value::Map(map) => map
            .iter()
            .map(|(key, item)| (Cow::Borrowed(key.as_str()), item))
            .collect(),
        Value::Record(record) => record
            .fields()
            .map(|(name, item)| (Cow::Borrowed(name), item))
            .collect(),
        _ => Vec::new(),
    }
}

/// Convert a path segment to a record field name (PascalCase).
///
/// `_`, `-` and spaces separate words. The first letter of each word is
/// upper-cased, as is a letter directly after a digit. Existing capitals are
/// kept.
///
/// ```
/// use verdict::path::to_field_name;
///
/// assert_eq!(to_field_name("fooBar"), "FooBar");
/// assert_eq!(to_field_name("foo_bar"), "FooBar");
/// assert_eq!(to_field_name("ID"), "ID");
/// ```
#[must_use]
pub fn to_field_name(segment: &str) -> String {
    let mut name = String::with_capacity(segment.len());
    let mut upper_next = true;
    for c in segment.chars() {
        if matches!(c, '_' | '-' | ' ') {
            upper_next = true;
            continue;
        }
        if upper_next {
            name.extend(c.to_uppercase());
        } else {
            name.push(c);
        }
        upper_next = c.is_ascii_digit();
    }
    name
}
