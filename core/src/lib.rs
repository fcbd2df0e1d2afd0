//! verdict - Typed matching engine for table-driven test assertions
//!
//! Test authors write expectations as text ("field `a.b.1` equals
//! `20((int))`"). This crate turns that text into a verdict against decoded
//! runtime data.
//!
//! # Architecture
//!
//! - [`Value`] - Closed union every collaborator decodes its data into
//! - [`path`] - Dot-path navigation and leaf path enumeration
//! - [`literal`] - `raw((type))` literal parsing
//! - [`coerce`] - Actual-side coercion to canonical types
//! - [`Operator`] / [`ValueMatcher`] - Operator names compiled into matchers
//! - [`Engine`] - The orchestrator: dispatch, error classification, logging
//!
//! # Key Design Insights
//!
//! 1. **Decode once**: collaborators convert to [`Value`] at the boundary.
//!    Nothing downstream inspects foreign types.
//!
//! 2. **Typed by the expected side**: the literal's tag decides how the
//!    actual is coerced. `"645((int))"` accepts `Int(645)` and `"645"`.
//!
//! 3. **Mismatch is the only retryable outcome**: pollers keep polling on
//!    [`MatchError::is_mismatch`] and abort on anything else.
//!
//! # Example
//!
//! ```
//! use verdict::prelude::*;
//!
//! let body: Value = serde_json::json!({"user": {"id": 645, "tags": ["a", "b"]}}).into();
//! let engine = Engine::default();
//!
//! let id = engine.resolve(&body, "user.id").unwrap();
//! assert!(engine.assert("equal", id, "645((int))").is_ok());
//!
//! let tags = engine.resolve(&body, "user.tags").unwrap();
//! assert!(engine.assert("size is", tags, "2").is_ok());
//!
//! let err = engine.assert("equal", id, "645").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::TypeMismatch);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

pub mod coerce;
mod engine;
pub mod literal;
mod operator;
pub mod path;
mod value;
mod value_matcher;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use engine::Engine;
pub use literal::{TypeTag, TypedLiteral};
pub use operator::Operator;
pub use value::{Record, Value};
pub use value_matcher::ValueMatcher;

// Concrete matchers
pub use value_matcher::{
    ContainsMatcher, EqualMatcher, InMatcher, LengthMatcher, NotZeroMatcher, PresentMatcher,
    RegexMatcher, TypeMatcher, UNDEFINED,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use verdict::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core types
        Engine,
        // Errors
        ErrorKind,
        MatchError,
        Operator,
        Record,
        TypeTag,
        Value,
        // Traits
        ValueMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum length for `match` operator patterns.
///
/// Regex compilation is the only operation whose cost grows with the expected
/// literal. The linear-time `regex` crate bounds matching, this bounds
/// compilation.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Why an assertion did not pass.
///
/// Only [`Mismatch`](Self::Mismatch) means "the data is not (yet) what was
/// expected". Every other variant means the assertion itself cannot succeed
/// as written, so retrying is pointless.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The operator name is not recognized.
    #[error("undefined matcher \"{name}\"")]
    UndefinedOperator {
        /// The name as written.
        name: String,
    },

    /// The expected literal or the actual value is unusable for the operator.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong.
        reason: String,
    },

    /// The actual value cannot be coerced to the literal's declared type.
    #[error("actual value {actual} does not match type {expected_type}")]
    TypeMismatch {
        /// String form of the actual value.
        actual: String,
        /// The type the expected literal declared.
        expected_type: String,
    },

    /// The values are comparable but do not match.
    #[error("actual ({actual}) value does not match expected ({expected}) value")]
    Mismatch {
        /// String form of the actual value.
        actual: String,
        /// The expected literal as written.
        expected: String,
    },
}

/// Classification of a [`MatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`MatchError::UndefinedOperator`].
    UndefinedOperator,
    /// See [`MatchError::InvalidArgument`].
    InvalidArgument,
    /// See [`MatchError::TypeMismatch`].
    TypeMismatch,
    /// See [`MatchError::Mismatch`].
    Mismatch,
}

impl MatchError {
    /// Returns the error's classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UndefinedOperator { .. } => ErrorKind::UndefinedOperator,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Mismatch { .. } => ErrorKind::Mismatch,
        }
    }

    /// Returns `true` for a plain mismatch, the only retryable outcome.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn type_mismatch(actual: &Value, expected_type: &str) -> Self {
        Self::TypeMismatch {
            actual: format!("{actual} ({})", actual.type_name()),
            expected_type: expected_type.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Free functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Assert without logging. See [`Engine::assert`].
///
/// # Errors
///
/// See [`Engine::assert`].
pub fn assert(operator: &str, actual: &Value, expected: &str) -> Result<(), MatchError> {
    let passed = dispatch(operator, actual, expected)?;
    engine::verdict(passed, actual, expected)
}

/// Dispatch without logging. See [`Engine::dispatch`].
///
/// # Errors
///
/// See [`Engine::dispatch`].
pub fn dispatch(operator: &str, actual: &Value, expected: &str) -> Result<bool, MatchError> {
    operator::dispatch(operator, actual, expected)
}

/// Resolve a dot-separated path. See [`path::resolve`].
#[must_use]
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path::resolve(value, path)
}

/// Enumerate leaf paths. See [`path::leaf_paths`].
#[must_use]
pub fn leaf_paths(value: &Value) -> Vec<String> {
    path::leaf_paths(value)
}

/// Parse a typed literal. See [`literal::parse_literal`].
///
/// # Errors
///
/// See [`literal::parse_literal`].
pub fn parse_literal(text: &str) -> Result<Value, MatchError> {
    literal::parse_literal(text)
}
