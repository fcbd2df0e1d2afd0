//! Typed literals - `raw((type))` test-table values
//!
//! Test tables are text. A cell declares the canonical type it should be
//! compared as with a `((type))` suffix:
//!
//! | literal | parsed |
//! |---|---|
//! | `hello` | `String("hello")` |
//! | `12((int))` | `Int(12)` |
//! | `12.5((float))` / `12.5((number))` | `Float(12.5)` |
//! | `true((bool))` / `T((boolean))` | `Bool(true)` |
//! | `67e55044-10b1-426f-9247-bb680e5fe0c8((uuid))` | `Uuid(..)` |
//! | `12((string))` | `String("12")` |
//! | `[1((int)),x]((array))` | `Array([Int(1), String("x")])` |
//!
//! The last `((` wins, so a raw value may itself contain `((`:
//! `a((b((string))` is the string `a((b`.
//!
//! ```
//! use verdict::{literal, Value};
//!
//! assert_eq!(literal::parse_literal("12((int))").unwrap(), Value::Int(12));
//! assert_eq!(
//!     literal::parse_literal("[1((int)),2.5((float)),x]((array))").unwrap(),
//!     Value::Array(vec![Value::Int(1), Value::Float(2.5), Value::from("x")]),
//! );
//! ```

use std::fmt;

use uuid::Uuid;

use crate::{MatchError, Value};

const TAG_OPEN: &str = "((";
const TAG_CLOSE: &str = "))";
const BOOL_GRAMMAR: &str = "expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False";

/// A literal split into its raw text and optional type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedLiteral<'a> {
    /// Text before the tag, or the whole literal when untagged.
    pub raw: &'a str,
    /// Tag text between the last `((` and the trailing `))`.
    pub tag: Option<&'a str>,
}

impl<'a> TypedLiteral<'a> {
    /// Split a literal into raw text and tag.
    ///
    /// One trailing `))` is stripped, then the text is split on `((`. With a
    /// single part there is no tag and `raw` is the whole, unstripped literal.
    /// Otherwise the last part is the tag and the rest, re-joined with `((`,
    /// is the raw text. An empty tag counts as no tag.
    ///
    /// ```
    /// use verdict::literal::TypedLiteral;
    ///
    /// let lit = TypedLiteral::split("12((int))");
    /// assert_eq!((lit.raw, lit.tag), ("12", Some("int")));
    ///
    /// let lit = TypedLiteral::split("plain))");
    /// assert_eq!((lit.raw, lit.tag), ("plain))", None));
    /// ```
    #[must_use]
    pub fn split(literal: &'a str) -> Self {
        let trimmed = literal.strip_suffix(TAG_CLOSE).unwrap_or(literal);
        // Non-overlapping, left to right: "a(((int" splits as ["a", "(int"].
        let Some((idx, _)) = trimmed.match_indices(TAG_OPEN).last() else {
            return Self::untagged(literal);
        };

        let tag = &trimmed[idx + TAG_OPEN.len()..];
        if tag.is_empty() {
            return Self::untagged(literal);
        }

        Self {
            raw: &trimmed[..idx],
            tag: Some(tag),
        }
    }

    fn untagged(literal: &'a str) -> Self {
        Self {
            raw: literal,
            tag: None,
        }
    }

    /// Resolve the tag to a [`TypeTag`].
    ///
    /// Returns `Ok(None)` for untagged literals.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidArgument`] for an unknown tag.
    pub fn type_tag(&self) -> Result<Option<TypeTag>, MatchError> {
        self.tag
            .map(|tag| {
                TypeTag::from_tag(tag).ok_or_else(|| {
                    MatchError::invalid_argument(format!("unknown type tag \"{tag}\""))
                })
            })
            .transpose()
    }
}

/// Canonical types a literal can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `int` - signed 64-bit integer.
    Int,
    /// `float` or `number` - 64-bit float.
    Float,
    /// `bool` or `boolean`.
    Bool,
    /// `uuid`.
    Uuid,
    /// `string` - raw text, compared against the actual's string form.
    String,
    /// `array` - bracketed, comma-separated, recursively tagged elements.
    Array,
}

impl TypeTag {
    /// Look up a tag by its exact name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int" => Some(Self::Int),
            "float" | "number" => Some(Self::Float),
            "bool" | "boolean" => Some(Self::Bool),
            "uuid" => Some(Self::Uuid),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// Canonical tag name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Uuid => "uuid",
            Self::String => "string",
            Self::Array => "array",
        }
    }

    /// Parse raw text as this type.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidArgument`] if `raw` is not valid for the
    /// type.
    pub fn parse(self, raw: &str) -> Result<Value, MatchError> {
        let invalid = |detail: &dyn fmt::Display| {
            MatchError::invalid_argument(format!("cannot parse \"{raw}\" as {self}: {detail}"))
        };

        match self {
            Self::Int => raw.parse().map(Value::Int).map_err(|e| invalid(&e)),
            Self::Float => raw.parse().map(Value::Float).map_err(|e| invalid(&e)),
            Self::Bool => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| invalid(&BOOL_GRAMMAR)),
            Self::Uuid => Uuid::parse_str(raw)
                .map(Value::Uuid)
                .map_err(|e| invalid(&e)),
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Array => parse_array(raw),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a literal into its canonical [`Value`].
///
/// Untagged literals are always `Value::String` of the whole literal.
///
/// # Errors
///
/// Returns [`MatchError::InvalidArgument`] for an unknown tag or a raw value
/// that does not parse as its tag's type. For arrays the first failing
/// element's error is returned.
pub fn parse_literal(literal: &str) -> Result<Value, MatchError> {
    let typed = TypedLiteral::split(literal);
    match typed.type_tag()? {
        Some(tag) => tag.parse(typed.raw),
        None => Ok(Value::String(literal.to_string())),
    }
}

fn parse_array(raw: &str) -> Result<Value, MatchError> {
    let body = raw.strip_prefix('[').unwrap_or(raw);
    let body = body.strip_suffix(']').unwrap_or(body);
    if body.is_empty() {
        return Ok(Value::Array(Vec::new()));
    }

    body.split(',')
        .map(parse_literal)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Parse the permissive boolean grammar.
///
/// `1 t T TRUE true True` are true, `0 f F FALSE false False` are false.
/// Everything else is `None`.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
