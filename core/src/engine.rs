//! `Engine` - The assertion orchestrator
//!
//! Every collaborator (HTTP body checks, row checks, queue payload checks)
//! goes through [`Engine::assert`]. The engine holds nothing but a logger, so
//! it is cheap to clone and safe to share across threads.

use slog::{debug, o, warn, Discard, Logger};

use crate::{literal, operator::Operator, path, MatchError, Value};

/// Assertion entry point with an injected logger.
///
/// # Example
///
/// ```
/// use verdict::{Engine, MatchError, Value};
///
/// let engine = Engine::default();
///
/// assert!(engine.assert("equal", &Value::Int(645), "645((int))").is_ok());
/// assert!(matches!(
///     engine.assert("equal", &Value::Int(645), "646((int))"),
///     Err(MatchError::Mismatch { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    logger: Logger,
}

impl Engine {
    /// Create an engine that logs to `logger`.
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Returns the engine's logger.
    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run `operator` with `expected` against `actual`.
    ///
    /// # Errors
    ///
    /// [`MatchError::UndefinedOperator`], [`MatchError::InvalidArgument`] or
    /// [`MatchError::TypeMismatch`] when no comparison could be made.
    pub fn dispatch(
        &self,
        operator: &str,
        actual: &Value,
        expected: &str,
    ) -> Result<bool, MatchError> {
        let logger = self.logger.new(o!("operator" => operator.to_string()));
        debug!(logger, "asserting"; "actual" => %actual, "expected" => expected);

        let op = Operator::parse(operator).map_err(|e| {
            warn!(logger, "undefined matcher"; "name" => operator);
            e
        })?;

        let result = op.compile(expected).and_then(|matcher| matcher.matches(actual));
        match &result {
            Ok(passed) => debug!(logger, "assertion evaluated"; "result" => passed),
            Err(e) => debug!(logger, "assertion encountered error"; "error" => %e),
        }
        result
    }

    /// Assert that `actual` satisfies `operator` with `expected`.
    ///
    /// A comparison that runs but fails becomes [`MatchError::Mismatch`],
    /// which carries the actual value's string form and the expected literal.
    ///
    /// # Errors
    ///
    /// Any error from [`dispatch`](Self::dispatch), or
    /// [`MatchError::Mismatch`].
    pub fn assert(&self, operator: &str, actual: &Value, expected: &str) -> Result<(), MatchError> {
        let passed = self.dispatch(operator, actual, expected)?;
        verdict(passed, actual, expected)
    }

    /// Resolve a dot-separated path, see [`path::resolve`].
    #[must_use]
    pub fn resolve<'a>(&self, value: &'a Value, path: &str) -> Option<&'a Value> {
        let found = path::resolve(value, path);
        match found {
            Some(v) => debug!(self.logger, "path resolved"; "path" => path, "type" => v.type_name()),
            None => debug!(self.logger, "path not found"; "path" => path),
        }
        found
    }

    /// Enumerate leaf paths, see [`path::leaf_paths`].
    #[must_use]
    pub fn leaf_paths(&self, value: &Value) -> Vec<String> {
        let paths = path::leaf_paths(value);
        debug!(self.logger, "enumerated leaf paths"; "count" => paths.len());
        paths
    }

    /// Parse a typed literal, see [`literal::parse_literal`].
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidArgument`] for an unknown tag or an unparseable
    /// raw value.
    pub fn parse_literal(&self, text: &str) -> Result<Value, MatchError> {
        let typed = literal::TypedLiteral::split(text);
        debug!(self.logger, "converting value"; "raw" => typed.raw, "tag" => typed.tag.unwrap_or(""));
        let parsed = literal::parse_literal(text)?;
        debug!(self.logger, "converted value"; "value" => %parsed, "type" => parsed.type_name());
        Ok(parsed)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Logger::root(Discard, o!()))
    }
}

pub(crate) fn verdict(passed: bool, actual: &Value, expected: &str) -> Result<(), MatchError> {
    if passed {
        Ok(())
    } else {
        Err(MatchError::Mismatch {
            actual: actual.to_string(),
            expected: expected.to_string(),
        })
    }
}
