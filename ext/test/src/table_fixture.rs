//! Table fixture runner
//!
//! Each case carries either a decoded `body` (checked by path) or a flat
//! `headers` map (checked by key), an assertion table, and the outcome the
//! whole table must produce.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use verdict::Value;
use verdict_table::{AssertionTable, TableChecker, TableError, TableFile};

use crate::fixture::CaseResult;
use crate::{FixtureError, Outcome};

/// A named group of table cases.
#[derive(Debug, Deserialize)]
pub struct TableFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cases: Vec<TableCase>,
}

/// One table check.
#[derive(Debug, Deserialize)]
pub struct TableCase {
    pub name: String,
    #[serde(default)]
    pub body: serde_json::Value,
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    pub table: TableFile,
    #[serde(default)]
    pub fully: bool,
    pub outcome: Outcome,
    /// Expected unasserted leaves for a `not_fully_matched` outcome.
    #[serde(default)]
    pub missing: Option<Vec<String>>,
}

impl TableCase {
    /// Build the table and check it against the case's body or headers.
    pub fn check(&self, checker: &TableChecker) -> Result<(), TableError> {
        let table = AssertionTable::try_from(self.table.clone())?;
        match &self.headers {
            Some(headers) => checker.check_map(headers, &table),
            None => checker.check_value(&Value::from(&self.body), &table, self.fully),
        }
    }

    fn missing_matches(&self, result: &Result<(), TableError>) -> bool {
        match (&self.missing, result) {
            (Some(expected), Err(TableError::NotFullyMatched { missing })) => expected == missing,
            (Some(_), _) => false,
            (None, _) => true,
        }
    }
}

impl TableFixture {
    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Read and parse every document in a fixture file
    pub fn load(path: &Path) -> Result<Vec<Self>, FixtureError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_yaml_multi(&yaml)?)
    }

    /// Run all cases with a default checker
    pub fn run(&self) -> Vec<CaseResult> {
        let checker = TableChecker::default();
        self.cases
            .iter()
            .map(|case| {
                let result = case.check(&checker);
                let actual = Outcome::of_table(&result);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.outcome && case.missing_matches(&result),
                    expected: case.outcome,
                    actual,
                    detail: result.err().map(|e| e.to_string()),
                }
            })
            .collect()
    }

    /// Run all cases and panic on first failure
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Table fixture '{}' case '{}' failed: expected {}, got {} ({})",
                self.name,
                result.case_name,
                result.expected,
                result.actual,
                result.detail.as_deref().unwrap_or("no error"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: body checks
cases:
  - name: passes
    body: {id: 645, tags: [a, b]}
    table:
      rows:
        - [field, matcher, value]
        - [id, "=", 645((int))]
        - [tags.0, "", a]
        - [tags.1, "", b]
    fully: true
    outcome: ok
  - name: container row leaves elements unasserted
    body: {id: 645, tags: [a, b]}
    table:
      rows:
        - [field, matcher, value]
        - [id, "=", 645((int))]
        - [tags, size is, "2"]
    fully: true
    outcome: not_fully_matched
    missing: [tags.0, tags.1]
  - name: reports missing leaves
    body: {id: 645, name: ada}
    table:
      rows:
        - [field, value]
        - [name, ada]
    fully: true
    outcome: not_fully_matched
    missing: [id]
  - name: header check
    headers: {Content-Type: application/json}
    table:
      header: [key, matcher, value]
      rows:
        - [Content-Type, contains, json]
    outcome: ok
"#;

    #[test]
    fn test_table_fixture_runs() {
        let fixtures = TableFixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 1);
        for result in fixtures[0].run() {
            assert!(result.passed, "{}: {:?}", result.case_name, result.detail);
        }
    }

    #[test]
    fn test_unquoted_number_cell_is_a_parse_error() {
        let yaml = YAML.replace(r#"[tags, size is, "2"]"#, "[tags, size is, 2]");
        let err = TableFixture::from_yaml_multi(&yaml).unwrap_err();
        assert!(err.to_string().contains("unquoted number"), "{err}");
    }

    #[test]
    fn test_missing_list_must_match() {
        let yaml = YAML.replace("missing: [id]", "missing: [name]");
        let fixtures = TableFixture::from_yaml_multi(&yaml).unwrap();
        let results = fixtures[0].run();
        assert!(!results[2].passed);
        assert_eq!(results[2].actual, Outcome::NotFullyMatched);
    }
}
