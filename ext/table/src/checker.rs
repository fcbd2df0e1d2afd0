//! `TableChecker` - runs an [`AssertionTable`] through the engine

use std::collections::BTreeMap;

use slog::{debug, o};
use verdict::path::{to_field_name, SEPARATOR};
use verdict::{Engine, Value};

use crate::{AssertionRow, AssertionTable, TableError};

/// Checks assertion tables against decoded data.
///
/// Rows run in order and the first failure is returned. The checker owns no
/// state beyond its engine and may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct TableChecker {
    engine: Engine,
}

impl TableChecker {
    /// Create a checker that asserts through `engine`.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Check every row's `field` path against `actual`.
    ///
    /// With `fully`, every leaf path of `actual` must also be asserted by a
    /// row naming that exact path. A row on a container does not count for
    /// the leaves beneath it.
    ///
    /// # Errors
    ///
    /// - [`TableError::UnknownPath`] if a row's path does not resolve
    /// - [`TableError::Row`] if a row's assertion fails
    /// - [`TableError::NotFullyMatched`] if `fully` and leaves were left
    ///   unasserted
    pub fn check_value(
        &self,
        actual: &Value,
        table: &AssertionTable,
        fully: bool,
    ) -> Result<(), TableError> {
        let logger = self.engine.logger().new(o!("table" => "value"));
        debug!(logger, "checking table"; "rows" => table.len(), "fully" => fully);

        for (i, row) in table.rows().iter().enumerate() {
            let found = self
                .engine
                .resolve(actual, &row.field)
                .ok_or_else(|| TableError::UnknownPath {
                    path: row.field.clone(),
                })?;
            self.assert_row(i + 1, row, found)?;
        }

        if fully {
            let missing = unasserted_leaves(&self.engine.leaf_paths(actual), table);
            if !missing.is_empty() {
                debug!(logger, "table not fully matched"; "missing" => missing.len());
                return Err(TableError::NotFullyMatched { missing });
            }
        }

        debug!(logger, "table passed");
        Ok(())
    }

    /// Check every row's `key` against a flat string map (headers, message
    /// attributes, stored variables). Keys are looked up literally, without
    /// path splitting. A key whose value is empty counts as missing.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownPath`] for a missing or empty key,
    /// [`TableError::Row`] for a failed assertion.
    pub fn check_map(
        &self,
        actual: &BTreeMap<String, String>,
        table: &AssertionTable,
    ) -> Result<(), TableError> {
        let logger = self.engine.logger().new(o!("table" => "map"));
        debug!(logger, "checking table"; "rows" => table.len(), "keys" => actual.len());

        for (i, row) in table.rows().iter().enumerate() {
            let found = actual
                .get(&row.field)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| TableError::UnknownPath {
                    path: row.field.clone(),
                })?;
            self.assert_row(i + 1, row, &Value::String(found.clone()))?;
        }

        debug!(logger, "table passed");
        Ok(())
    }

    fn assert_row(&self, row: usize, line: &AssertionRow, actual: &Value) -> Result<(), TableError> {
        self.engine
            .assert(&line.matcher, actual, &line.value)
            .map_err(|source| TableError::Row {
                row,
                field: line.field.clone(),
                source,
            })
    }
}

fn unasserted_leaves(leaves: &[String], table: &AssertionTable) -> Vec<String> {
    let mut missing: Vec<String> = leaves
        .iter()
        .filter(|leaf| !table.rows().iter().any(|row| asserts_leaf(&row.field, leaf)))
        .cloned()
        .collect();
    missing.sort();
    missing
}

/// `asserted` names exactly `leaf`. Segments compare literally or as record
/// field names.
fn asserts_leaf(asserted: &str, leaf: &str) -> bool {
    asserted.split(SEPARATOR).count() == leaf.split(SEPARATOR).count()
        && asserted
            .split(SEPARATOR)
            .zip(leaf.split(SEPARATOR))
            .all(|(segment, l)| l == segment || l == to_field_name(segment))
}
