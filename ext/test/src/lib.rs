//! verdict-test: YAML conformance fixtures for the matching engine
//!
//! Each fixture file holds one or more `---` separated documents. A document
//! names a group of cases and the [`Outcome`] each must produce:
//!
//! ```yaml
//! name: int_equality
//! description: Tagged int literals coerce the actual value
//! cases:
//!   - name: int matches int
//!     operator: equal
//!     actual: 645
//!     expected: 645((int))
//!     outcome: ok
//! ```
//!
//! [`fixture::Fixture`] runs engine cases and [`table_fixture::TableFixture`]
//! runs whole assertion tables.
//!
//! # Example
//!
//! ```
//! use verdict_test::fixture::Fixture;
//!
//! let fixtures = Fixture::from_yaml_multi(r#"
//! name: contains
//! description: substring test
//! cases:
//!   - name: found
//!     operator: contain
//!     actual: hello world
//!     expected: world
//!     outcome: ok
//! "#).unwrap();
//!
//! fixtures[0].run_and_assert();
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use verdict::{ErrorKind, MatchError};
use verdict_table::TableError;

pub mod fixture;
pub mod table_fixture;

/// The result class a case must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The assertion passed.
    Ok,
    /// Comparable but unequal.
    Mismatch,
    /// The actual value could not be coerced to the declared type.
    TypeMismatch,
    /// Bad literal, bad regex, wrong actual type for the operator.
    InvalidArgument,
    /// Unknown operator name.
    UndefinedOperator,
    /// A path or key did not resolve.
    UnknownPath,
    /// A fully-contains check left leaves unasserted.
    NotFullyMatched,
    /// A table header named an unknown column.
    UnexpectedColumn,
    /// A table was malformed (no header, row wider than the header).
    InvalidTable,
}

impl Outcome {
    /// Classify an engine result.
    #[must_use]
    pub fn of_match(result: &Result<(), MatchError>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(e) => match e.kind() {
                ErrorKind::Mismatch => Self::Mismatch,
                ErrorKind::TypeMismatch => Self::TypeMismatch,
                ErrorKind::InvalidArgument => Self::InvalidArgument,
                ErrorKind::UndefinedOperator => Self::UndefinedOperator,
            },
        }
    }

    /// Classify a table result. Row failures take their engine error's class.
    #[must_use]
    pub fn of_table(result: &Result<(), TableError>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(TableError::Row { source, .. }) => Self::of_match(&Err(source.clone())),
            Err(TableError::UnknownPath { .. }) => Self::UnknownPath,
            Err(TableError::NotFullyMatched { .. }) => Self::NotFullyMatched,
            Err(TableError::UnexpectedColumn { .. }) => Self::UnexpectedColumn,
            Err(
                TableError::MissingHeader
                | TableError::RowWidth { .. }
                | TableError::Io(_)
                | TableError::Json(_)
                | TableError::Yaml(_),
            ) => Self::InvalidTable,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::Mismatch => "mismatch",
            Self::TypeMismatch => "type_mismatch",
            Self::InvalidArgument => "invalid_argument",
            Self::UndefinedOperator => "undefined_operator",
            Self::UnknownPath => "unknown_path",
            Self::NotFullyMatched => "not_fully_matched",
            Self::UnexpectedColumn => "unexpected_column",
            Self::InvalidTable => "invalid_table",
        };
        f.write_str(name)
    }
}

/// Errors loading a fixture file.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Io {
        /// Fixture file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A document did not parse.
    #[error("failed to parse fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::fixture::{CaseResult, Fixture, TestCase};
    pub use crate::table_fixture::{TableCase, TableFixture};
    pub use crate::{FixtureError, Outcome};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_of_match() {
        assert_eq!(Outcome::of_match(&Ok(())), Outcome::Ok);
        assert_eq!(
            Outcome::of_match(&Err(MatchError::UndefinedOperator { name: "x".into() })),
            Outcome::UndefinedOperator
        );
    }

    #[test]
    fn test_outcome_of_table() {
        let row = TableError::Row {
            row: 1,
            field: "a".into(),
            source: MatchError::TypeMismatch {
                actual: "1".into(),
                expected_type: "string".into(),
            },
        };
        assert_eq!(Outcome::of_table(&Err(row)), Outcome::TypeMismatch);
        assert_eq!(
            Outcome::of_table(&Err(TableError::MissingHeader)),
            Outcome::InvalidTable
        );
    }

    #[test]
    fn test_outcome_names() {
        let parsed: Outcome = serde_yaml::from_str("type_mismatch").unwrap();
        assert_eq!(parsed, Outcome::TypeMismatch);
        assert_eq!(parsed.to_string(), "type_mismatch");
    }
}
