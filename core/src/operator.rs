//! `Operator` - Matcher names as written in test tables
//!
//! A table cell names an operator (`equal`, `=~`, `size is`, ...). The name is
//! parsed case-insensitively into an [`Operator`], which compiles the expected
//! literal into a runtime [`ValueMatcher`] via [`compile()`](Operator::compile).
//!
//! | names | operator |
//! |---|---|
//! | `equal`, `eq`, `equals`, `=`, `==`, (empty) | [`Operator::Equal`] |
//! | `match`, `matches`, `=~` | [`Operator::Match`] |
//! | `contain`, `contains` | [`Operator::Contain`] |
//! | `present`, `defined` | [`Operator::Present`] |
//! | `not zero` | [`Operator::NotZero`] |
//! | `in` | [`Operator::In`] |
//! | `length equals`, `l=`, `s=`, `size is` | [`Operator::LengthEquals`] |
//! | `type` | [`Operator::Type`] |

use std::fmt;
use std::str::FromStr;

use crate::value_matcher::{
    ContainsMatcher, EqualMatcher, InMatcher, LengthMatcher, NotZeroMatcher, PresentMatcher,
    RegexMatcher, TypeMatcher, ValueMatcher,
};
use crate::{MatchError, Value};

/// A matcher operator.
///
/// # Example
///
/// ```
/// use verdict::{Operator, Value};
///
/// let op = Operator::parse("Size Is").unwrap();
/// assert_eq!(op, Operator::LengthEquals);
///
/// let matcher = op.compile("3").unwrap();
/// assert_eq!(matcher.matches(&Value::from("abc")), Ok(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Typed equality.
    Equal,
    /// Regex search on a string actual.
    Match,
    /// Substring test on a string actual.
    Contain,
    /// Actual is neither null nor `"undefined"`.
    Present,
    /// Actual is not the zero value of its type.
    NotZero,
    /// Actual equals one of a comma-separated list.
    In,
    /// Length equality.
    LengthEquals,
    /// Runtime type name equality.
    Type,
}

impl Operator {
    /// Every operator, in documentation order.
    pub const ALL: [Self; 8] = [
        Self::Equal,
        Self::Match,
        Self::Contain,
        Self::Present,
        Self::NotZero,
        Self::In,
        Self::LengthEquals,
        Self::Type,
    ];

    /// Accepted names, lower-case. The first is the canonical name.
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Equal => &["equal", "eq", "equals", "=", "==", ""],
            Self::Match => &["match", "matches", "=~"],
            Self::Contain => &["contain", "contains"],
            Self::Present => &["present", "defined"],
            Self::NotZero => &["not zero"],
            Self::In => &["in"],
            Self::LengthEquals => &["length equals", "l=", "s=", "size is"],
            Self::Type => &["type"],
        }
    }

    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Parse an operator name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UndefinedOperator`] for an unknown name.
    pub fn parse(name: &str) -> Result<Self, MatchError> {
        let lower = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.aliases().contains(&lower.as_str()))
            .ok_or_else(|| MatchError::UndefinedOperator {
                name: name.to_string(),
            })
    }

    /// Compile `expected` into a runtime [`ValueMatcher`] for this operator.
    ///
    /// `present`, `not zero` ignore `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidArgument`] if `expected` is not valid for
    /// this operator (bad typed literal, bad regex, bad length target).
    pub fn compile(&self, expected: &str) -> Result<Box<dyn ValueMatcher>, MatchError> {
        Ok(match self {
            Self::Equal => Box::new(EqualMatcher::new(expected)?),
            Self::Match => Box::new(RegexMatcher::new(expected)?),
            Self::Contain => Box::new(ContainsMatcher::new(expected)),
            Self::Present => Box::new(PresentMatcher),
            Self::NotZero => Box::new(NotZeroMatcher),
            Self::In => Box::new(InMatcher::new(expected)),
            Self::LengthEquals => Box::new(LengthMatcher::new(expected)?),
            Self::Type => Box::new(TypeMatcher::new(expected)),
        })
    }
}

impl FromStr for Operator {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse `operator`, compile `expected`, and run it against `actual`.
///
/// # Errors
///
/// Any error from [`Operator::parse`], [`Operator::compile`] or
/// [`ValueMatcher::matches`].
pub fn dispatch(operator: &str, actual: &Value, expected: &str) -> Result<bool, MatchError> {
    Operator::parse(operator)?.compile(expected)?.matches(actual)
}
