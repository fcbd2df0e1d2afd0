//! `Value` - Decoded runtime data that every assertion runs against
//!
//! Collaborators (JSON bodies, scanned database rows, queue payloads, stored
//! variables) decode their data into this closed union exactly once. The
//! engine never inspects foreign types: navigation, coercion and matching all
//! pattern-match over [`Value`].
//!
//! # Widening at the boundary
//!
//! There is a single integer variant and a single float variant. Narrower
//! widths widen through `From`:
//!
//! ```
//! use verdict::Value;
//!
//! assert_eq!(Value::from(7i8), Value::Int(7));
//! assert_eq!(Value::from(1.5f32), Value::Float(1.5));
//! assert_eq!(Value::from(Option::<i32>::None), Value::Null);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use uuid::Uuid;

/// A named-field record, such as a scanned database row or a decoded struct.
///
/// Field names are stored in the record's canonical PascalCase convention.
/// Path segments are converted with [`to_field_name`](crate::path::to_field_name)
/// before lookup, so `"userId"` finds the `UserId` field.
///
/// # Example
///
/// ```
/// use verdict::{Record, Value};
///
/// let row = Record::new("Account")
///     .with("Id", 7i64)
///     .with("Email", "ada@example.com");
///
/// assert_eq!(row.field("Id"), Some(&Value::Int(7)));
/// assert_eq!(row.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field (builder pattern). Field order is preserved.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// The record's type name, reported by the `type` operator.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field by its exact (canonical) name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The decoded data type every engine operation reads.
///
/// # Variants
///
/// - `Null` - absent or null data (JSON `null`, SQL `NULL`, `None`)
/// - `Bool` - boolean data
/// - `Int` - any signed or small unsigned integer, widened to 64 bits
/// - `Float` - any float, widened to 64 bits
/// - `String` - text data
/// - `Uuid` - 128-bit identifiers scanned from typed columns
/// - `Array` - ordered sequence
/// - `Map` - string-keyed mapping (key order is irrelevant)
/// - `Record` - named-field record
///
/// # Example
///
/// ```
/// use verdict::Value;
///
/// let data = Value::String("hello".to_string());
/// assert_eq!(data.as_str(), Some("hello"));
/// assert_eq!(data.type_name(), "string");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No data.
    #[default]
    Null,

    /// Boolean data.
    Bool(bool),

    /// Integer data.
    Int(i64),

    /// Floating point data.
    Float(f64),

    /// String data. Headers and untyped cells land here.
    String(String),

    /// UUID data.
    Uuid(Uuid),

    /// Ordered sequence.
    Array(Vec<Value>),

    /// String-keyed mapping.
    Map(BTreeMap<String, Value>),

    /// Named-field record.
    Record(Record),
}

impl Value {
    /// Returns `true` if this is the `Null` variant.
    ///
    /// # Example
    ///
    /// ```
    /// use verdict::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::String("x".to_string()).is_null());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is the `String` variant.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` for `Array`, `Map` and `Record`.
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Map(_) | Self::Record(_))
    }

    /// Try to get the value as a string slice.
    ///
    /// Only the `String` variant is string-like. Numbers are never
    /// formatted here; use [`as_string`](crate::coerce::as_string) for that.
    ///
    /// ```
    /// use verdict::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::Int(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as an integer, without coercion.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a float, without coercion.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get the value as a boolean, without coercion.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a UUID, without coercion.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Try to get the value as a slice of elements.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Try to get the value as a mapping.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get the value as a record.
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the runtime type name compared by the `type` operator.
    ///
    /// Records report their own name, so a scanned `Account` row has type
    /// `"Account"`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int64",
            Self::Float(_) => "float64",
            Self::String(_) => "string",
            Self::Uuid(_) => "uuid",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Record(record) => record.name(),
        }
    }

    /// Length for values that have one.
    ///
    /// Strings report their byte length. Arrays and maps report their
    /// element count, records their field count. Scalars and `Null` have no
    /// length and return `None`.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.len()),
            Self::Array(items) => Some(items.len()),
            Self::Map(map) => Some(map.len()),
            Self::Record(record) => Some(record.len()),
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Uuid(_) => {
                None
            }
        }
    }

    /// Returns `true` if the value is the zero value of its type.
    ///
    /// `Null`, `false`, `0`, `0.0`, `""` and the nil UUID are zero. A record
    /// is zero when every field is zero. Arrays and maps are never zero, even
    /// when empty: a decoded empty sequence is still a present value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::String(s) => s.is_empty(),
            Self::Uuid(u) => u.is_nil(),
            Self::Array(_) | Self::Map(_) => false,
            Self::Record(record) => record.fields().all(|(_, value)| value.is_zero()),
        }
    }
}

/// Default string representation, used for `as_string` coercion and for the
/// actual side of mismatch diagnostics.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Record(record) => {
                write!(f, "{} {{", record.name())?;
                for (i, (name, value)) in record.fields().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════════

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! widen_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Self::Int(i64::from(i))
                }
            }
        )*
    };
}

widen_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values above `i64::MAX` cannot be widened losslessly and become `Float`.
impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::Float(u as f64), Self::Int)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<BTreeMap<String, T>> for Value
where
    T: Into<Value>,
{
    fn from(map: BTreeMap<String, T>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T> From<HashMap<String, T>> for Value
where
    T: Into<Value>,
{
    fn from(map: HashMap<String, T>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Decode boundary for JSON payloads.
///
/// Numbers that fit in an `i64` become `Int`; every other number becomes
/// `Float`.
#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(feature = "json")]
impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Self::from(json.clone())
    }
}
