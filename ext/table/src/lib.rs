//! verdict-table - Header-driven assertion tables
//!
//! Step definitions hand the engine a table whose first row names the
//! columns:
//!
//! ```text
//! | field      | matcher | value        |
//! | user.id    | =       | 645((int))   |
//! | user.email | =~      | @example\.com$ |
//! ```
//!
//! [`TableChecker`] resolves each row's `field` against decoded data and runs
//! [`verdict::Engine::assert`] on it. Headers and metadata, which are flat
//! string maps, use a `key` column with [`TableChecker::check_map`].
//!
//! # Example
//!
//! ```
//! use verdict::{Engine, Value};
//! use verdict_table::{AssertionTable, TableChecker};
//!
//! let table = AssertionTable::from_rows(vec![
//!     vec!["field".into(), "matcher".into(), "value".into()],
//!     vec!["user.id".into(), "=".into(), "645((int))".into()],
//!     vec!["user.tags".into(), "size is".into(), "2".into()],
//! ])
//! .unwrap();
//!
//! let body: Value = serde_json::json!({"user": {"id": 645, "tags": ["a", "b"]}}).into();
//! let checker = TableChecker::new(Engine::default());
//!
//! assert!(checker.check_value(&body, &table, false).is_ok());
//! // `fully` also requires a row for every leaf path: `user.tags.0` and
//! // `user.tags.1` were never asserted on their own.
//! assert!(checker.check_value(&body, &table, true).is_err());
//! ```

mod checker;
mod table;

pub use checker::TableChecker;
pub use table::{load_table, AssertionRow, AssertionTable, Cell, Column, TableFile};

use verdict::MatchError;

/// Errors from building or checking an assertion table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A header cell names no known column.
    #[error("unexpected column \"{header}\"")]
    UnexpectedColumn {
        /// The header as written (trimmed).
        header: String,
    },

    /// The table has no header row.
    #[error("assertion table has no header row")]
    MissingHeader,

    /// A data row has more cells than the header.
    #[error("row {row} has {width} cells but the header has {header_width}")]
    RowWidth {
        /// 1-based data row number.
        row: usize,
        /// Cells in the row.
        width: usize,
        /// Cells in the header.
        header_width: usize,
    },

    /// A row's field does not exist in the checked data.
    #[error("unknown key: {path}")]
    UnknownPath {
        /// The field path or key as written.
        path: String,
    },

    /// A row's assertion failed.
    #[error("row {row} ({field}): {source}")]
    Row {
        /// 1-based data row number.
        row: usize,
        /// The row's field path or key.
        field: String,
        /// The engine's verdict.
        #[source]
        source: MatchError,
    },

    /// Every row passed, but some leaves of the data were never asserted.
    #[error("expected values to be fully matched but it was not: missing {missing:?}")]
    NotFullyMatched {
        /// Unasserted leaf paths, sorted.
        missing: Vec<String>,
    },

    /// Reading a table file failed.
    #[error("failed to read table file: {0}")]
    Io(#[from] std::io::Error),

    /// A `.json` table file did not parse.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML table file did not parse.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TableError {
    /// Returns `true` only for a row whose assertion was a plain mismatch.
    ///
    /// Pollers keep polling on a mismatch and give up on everything else.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Row { source, .. } if source.is_mismatch())
    }

    /// The engine error behind a failed row, if any.
    #[must_use]
    pub fn match_error(&self) -> Option<&MatchError> {
        match self {
            Self::Row { source, .. } => Some(source),
            _ => None,
        }
    }
}
