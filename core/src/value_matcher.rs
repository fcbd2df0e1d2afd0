//! `ValueMatcher` - Compiled matcher operators
//!
//! An operator plus its expected literal compiles once into a
//! [`ValueMatcher`], which then checks any number of actual values. The trait
//! is non-generic: every matcher works on the closed [`Value`] union, so the
//! same compiled matcher serves JSON bodies, rows and headers alike.
//!
//! # Available Matchers
//!
//! - [`EqualMatcher`] - typed equality (`equal`)
//! - [`RegexMatcher`] - regex search on strings (`match`)
//! - [`ContainsMatcher`] - substring test on strings (`contain`)
//! - [`PresentMatcher`] - value is defined (`present`)
//! - [`NotZeroMatcher`] - value is not its type's zero (`not zero`)
//! - [`InMatcher`] - equality against any of a comma-separated list (`in`)
//! - [`LengthMatcher`] - length equality (`length equals`)
//! - [`TypeMatcher`] - runtime type name equality (`type`)

use std::fmt::Debug;

use crate::coerce::{as_bool, as_float64, as_int64, as_string, as_uuid};
use crate::literal::{TypeTag, TypedLiteral};
use crate::{MatchError, Value, MAX_REGEX_PATTERN_LENGTH};

/// Sentinel string some collaborators produce for an absent value.
pub const UNDEFINED: &str = "undefined";

/// Checks an actual [`Value`] against a compiled expectation.
///
/// `Ok(true)` and `Ok(false)` are the comparison result. `Err` means the
/// comparison could not be made at all (wrong actual type, not coercible).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one compiled matcher can be
/// shared by concurrent pollers.
///
/// # Example
///
/// ```
/// use verdict::{EqualMatcher, Value, ValueMatcher};
///
/// let matcher = EqualMatcher::new("645((int))").unwrap();
/// assert_eq!(matcher.matches(&Value::Int(645)), Ok(true));
/// assert_eq!(matcher.matches(&Value::from("645")), Ok(true));
/// assert_eq!(matcher.matches(&Value::Int(646)), Ok(false));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `ValueMatcher`",
    label = "this type cannot match against Value",
    note = "implement `matches(&self, &Value) -> Result<bool, MatchError>` or use a built-in matcher"
)]
pub trait ValueMatcher: Send + Sync + Debug {
    /// Check whether `actual` satisfies this matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::TypeMismatch`] or [`MatchError::InvalidArgument`]
    /// when `actual` cannot be compared.
    fn matches(&self, actual: &Value) -> Result<bool, MatchError>;
}

#[diagnostic::do_not_recommend]
impl ValueMatcher for Box<dyn ValueMatcher> {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        (**self).matches(actual)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Expected {
    /// Untagged: raw string equality with the whole literal.
    Untyped,
    Typed(TypeTag, Value),
}

/// Typed equality matcher.
///
/// An untagged literal only matches a `String` actual with the exact same
/// text. A tagged literal coerces the actual to the tag's canonical type
/// first; if that is impossible the result is a type mismatch, not `false`.
///
/// # Example
///
/// ```
/// use verdict::{EqualMatcher, MatchError, Value, ValueMatcher};
///
/// let untyped = EqualMatcher::new("123").unwrap();
/// assert_eq!(untyped.matches(&Value::from("123")), Ok(true));
/// assert!(matches!(
///     untyped.matches(&Value::Int(123)),
///     Err(MatchError::TypeMismatch { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EqualMatcher {
    literal: String,
    expected: Expected,
}

impl EqualMatcher {
    /// Compile an expected literal.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidArgument`] for an unknown tag or a raw
    /// value that does not parse as its tag.
    pub fn new(literal: impl Into<String>) -> Result<Self, MatchError> {
        let literal = literal.into();
        let typed = TypedLiteral::split(&literal);
        let expected = match typed.type_tag()? {
            Some(tag) => Expected::Typed(tag, tag.parse(typed.raw)?),
            None => Expected::Untyped,
        };
        Ok(Self { literal, expected })
    }

    /// Returns the literal this matcher was compiled from.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Returns the declared tag, or `None` for an untagged literal.
    #[must_use]
    pub fn tag(&self) -> Option<TypeTag> {
        match &self.expected {
            Expected::Untyped => None,
            Expected::Typed(tag, _) => Some(*tag),
        }
    }
}

impl ValueMatcher for EqualMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        match &self.expected {
            Expected::Untyped => actual
                .as_str()
                .map(|s| s == self.literal)
                .ok_or_else(|| MatchError::type_mismatch(actual, "string")),
            Expected::Typed(tag, expected) => {
                typed_equals(*tag, expected, actual)
                    .ok_or_else(|| MatchError::type_mismatch(actual, tag.as_str()))
            }
        }
    }
}

/// `None` when `actual` cannot be coerced to the tag's type.
fn typed_equals(tag: TypeTag, expected: &Value, actual: &Value) -> Option<bool> {
    match (tag, expected) {
        (TypeTag::String, Value::String(s)) => Some(as_string(actual) == s.as_str()),
        (TypeTag::Array, Value::Array(items)) => {
            actual.as_array().map(|a| prefix_equals(items, a))
        }
        _ => scalar_equals(expected, actual),
    }
}

fn scalar_equals(expected: &Value, actual: &Value) -> Option<bool> {
    match expected {
        Value::Int(i) => as_int64(actual).map(|a| a == *i),
        Value::Float(f) => as_float64(actual).map(|a| a == *f),
        Value::Bool(b) => as_bool(actual).map(|a| a == *b),
        Value::Uuid(u) => as_uuid(actual).map(|a| a == *u),
        other => Some(other == actual),
    }
}

/// Expected elements must equal the leading elements of `actual`. Trailing
/// actual elements are not compared.
fn prefix_equals(expected: &[Value], actual: &[Value]) -> bool {
    expected.len() <= actual.len()
        && expected.iter().zip(actual).all(|(e, a)| element_equals(e, a))
}

/// Array elements compare by their own parsed type. Untagged elements are
/// strings and only equal string actuals.
fn element_equals(expected: &Value, actual: &Value) -> bool {
    match expected {
        Value::String(s) => actual.as_str() == Some(s.as_str()),
        Value::Array(items) => actual.as_array().is_some_and(|a| prefix_equals(items, a)),
        other => scalar_equals(other, actual).unwrap_or(false),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// String Matchers
// ═══════════════════════════════════════════════════════════════════════════════

fn require_str<'a>(operator: &str, actual: &'a Value) -> Result<&'a str, MatchError> {
    actual.as_str().ok_or_else(|| {
        MatchError::invalid_argument(format!(
            "{operator} requires a string actual value, got {} ({actual})",
            actual.type_name()
        ))
    })
}

/// Regex search matcher.
///
/// Uses Rust's `regex` crate, which guarantees linear-time matching. The
/// pattern is unanchored: `ab` matches `"cabd"`.
///
/// ```
/// use verdict::{RegexMatcher, Value, ValueMatcher};
///
/// let matcher = RegexMatcher::new(r"^user-\d+$").unwrap();
/// assert_eq!(matcher.matches(&Value::from("user-123")), Ok(true));
/// assert_eq!(matcher.matches(&Value::from("user-abc")), Ok(false));
/// assert!(matcher.matches(&Value::Int(1)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: regex::Regex,
}

impl RegexMatcher {
    /// Compile a regex pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidArgument`] if the pattern is invalid or
    /// longer than [`MAX_REGEX_PATTERN_LENGTH`].
    pub fn new(pattern: &str) -> Result<Self, MatchError> {
        if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
            return Err(MatchError::invalid_argument(format!(
                "regex pattern length is {}, but maximum allowed is {MAX_REGEX_PATTERN_LENGTH}",
                pattern.len()
            )));
        }
        regex::Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|e| MatchError::invalid_argument(format!("invalid regex \"{pattern}\": {e}")))
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl ValueMatcher for RegexMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        require_str("match", actual).map(|s| self.regex.is_match(s))
    }
}

/// Substring matcher.
///
/// ```
/// use verdict::{ContainsMatcher, Value, ValueMatcher};
///
/// let matcher = ContainsMatcher::new("world");
/// assert_eq!(matcher.matches(&Value::from("hello world")), Ok(true));
/// assert!(matcher.matches(&Value::Int(42)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    substring: String,
}

impl ContainsMatcher {
    /// Create a new contains matcher.
    pub fn new(substring: impl Into<String>) -> Self {
        Self {
            substring: substring.into(),
        }
    }

    /// Returns the substring being searched for.
    #[must_use]
    pub fn substring(&self) -> &str {
        &self.substring
    }
}

impl ValueMatcher for ContainsMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        require_str("contain", actual).map(|s| s.contains(self.substring.as_str()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Presence Matchers
// ═══════════════════════════════════════════════════════════════════════════════

fn is_undefined(actual: &Value) -> bool {
    actual.as_str() == Some(UNDEFINED)
}

/// Matches any value except `Null` and the string `"undefined"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentMatcher;

impl ValueMatcher for PresentMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        Ok(!actual.is_null() && !is_undefined(actual))
    }
}

/// Matches any value that is not the zero value of its type.
///
/// See [`Value::is_zero`]. The string `"undefined"` also counts as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotZeroMatcher;

impl ValueMatcher for NotZeroMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        Ok(!actual.is_zero() && !is_undefined(actual))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Membership, Length, Type
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches when the actual equals any candidate of a comma-separated list.
///
/// Each candidate is a (possibly tagged) equality literal. Candidates that do
/// not compile, or that cannot be compared with the actual, never match.
///
/// ```
/// use verdict::{InMatcher, Value, ValueMatcher};
///
/// let matcher = InMatcher::new("1((int)),2((int)),three");
/// assert_eq!(matcher.matches(&Value::Int(2)), Ok(true));
/// assert_eq!(matcher.matches(&Value::from("three")), Ok(true));
/// assert_eq!(matcher.matches(&Value::Int(4)), Ok(false));
/// ```
#[derive(Debug, Clone)]
pub struct InMatcher {
    candidates: Vec<EqualMatcher>,
}

impl InMatcher {
    /// Compile a comma-separated candidate list.
    pub fn new(list: &str) -> Self {
        Self {
            candidates: list
                .split(',')
                .filter_map(|candidate| EqualMatcher::new(candidate).ok())
                .collect(),
        }
    }

    /// Returns the candidates that compiled.
    #[must_use]
    pub fn candidates(&self) -> &[EqualMatcher] {
        &self.candidates
    }
}

impl ValueMatcher for InMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        Ok(self
            .candidates
            .iter()
            .any(|candidate| candidate.matches(actual).unwrap_or(false)))
    }
}

/// Length equality matcher.
///
/// Strings are measured in bytes, arrays and maps by element count, records
/// by field count.
///
/// ```
/// use verdict::{LengthMatcher, Value, ValueMatcher};
///
/// let matcher = LengthMatcher::new("5").unwrap();
/// assert_eq!(matcher.matches(&Value::from("abcde")), Ok(true));
/// assert!(matcher.matches(&Value::Int(12345)).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LengthMatcher {
    expected: usize,
}

impl LengthMatcher {
    /// Parse the expected length.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidArgument`] unless `expected` is a
    /// non-negative integer.
    pub fn new(expected: &str) -> Result<Self, MatchError> {
        expected
            .parse()
            .map(|expected| Self { expected })
            .map_err(|e| {
                MatchError::invalid_argument(format!(
                    "length target \"{expected}\" is not a non-negative integer: {e}"
                ))
            })
    }

    /// Returns the expected length.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.expected
    }
}

impl ValueMatcher for LengthMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        actual.len().map(|len| len == self.expected).ok_or_else(|| {
            MatchError::invalid_argument(format!(
                "{} value ({actual}) has no length",
                actual.type_name()
            ))
        })
    }
}

/// Runtime type name matcher, see [`Value::type_name`].
///
/// ```
/// use verdict::{TypeMatcher, Value, ValueMatcher};
///
/// assert_eq!(TypeMatcher::new("int64").matches(&Value::Int(1)), Ok(true));
/// assert_eq!(TypeMatcher::new("string").matches(&Value::Int(1)), Ok(false));
/// ```
#[derive(Debug, Clone)]
pub struct TypeMatcher {
    type_name: String,
}

impl TypeMatcher {
    /// Create a type matcher for the given type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl ValueMatcher for TypeMatcher {
    fn matches(&self, actual: &Value) -> Result<bool, MatchError> {
        Ok(actual.type_name() == self.type_name)
    }
}
