//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs each case through [`verdict::Engine`].

use std::path::Path;

use serde::{Deserialize, Deserializer};
use verdict::{Engine, Value};
use verdict_table::Cell;

use crate::{FixtureError, Outcome};

/// A named group of engine cases.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cases: Vec<TestCase>,
}

/// One assertion and the outcome it must produce.
///
/// `actual` is any YAML value, decoded the way a JSON body is. When `path` is
/// set the assertion runs against the value at that path; an unresolved path
/// produces [`Outcome::UnknownPath`].
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub actual: serde_json::Value,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub expected: String,
    pub outcome: Outcome,
}

/// Read a literal cell, rejecting unquoted numbers and booleans whose
/// written form YAML would not keep.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Cell::deserialize(deserializer).map(String::from)
}

impl TestCase {
    /// Run the case, returning its outcome and the error text if any.
    pub fn evaluate(&self, engine: &Engine) -> (Outcome, Option<String>) {
        let actual = Value::from(&self.actual);
        let target = match &self.path {
            Some(path) => match engine.resolve(&actual, path) {
                Some(found) => found,
                None => return (Outcome::UnknownPath, Some(format!("unknown key: {path}"))),
            },
            None => &actual,
        };

        let result = engine.assert(&self.operator, target, &self.expected);
        (
            Outcome::of_match(&result),
            result.err().map(|e| e.to_string()),
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Outcome,
    pub actual: Outcome,
    pub detail: Option<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

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

    /// Run all test cases with a discarding engine
    pub fn run(&self) -> Vec<CaseResult> {
        self.run_with(&Engine::default())
    }

    /// Run all test cases through `engine`
    pub fn run_with(&self, engine: &Engine) -> Vec<CaseResult> {
        self.cases
            .iter()
            .map(|case| {
                let (actual, detail) = case.evaluate(engine);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.outcome,
                    expected: case.outcome,
                    actual,
                    detail,
                }
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {} ({})",
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
name: first
description: one
cases:
  - name: int
    operator: equal
    actual: 645
    expected: 645((int))
    outcome: ok
  - name: nested
    operator: eq
    actual: {a: {b: [10, 20]}}
    path: a.b.1
    expected: 20((int))
    outcome: ok
---
name: second
cases:
  - name: missing path
    actual: {a: 1}
    path: a.b
    expected: x
    outcome: unknown_path
  - name: deliberately wrong
    operator: equal
    actual: 1
    expected: 1((int))
    outcome: mismatch
"#;

    #[test]
    fn test_parse_multi() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases.len(), 2);
        assert_eq!(fixtures[1].description, "");
        assert_eq!(fixtures[1].cases[0].operator, "");
    }

    #[test]
    fn test_run_reports_failures() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert!(fixtures[0].run().iter().all(|r| r.passed));

        let results = fixtures[1].run();
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert_eq!(results[1].actual, Outcome::Ok);
        assert_eq!(results[1].expected, Outcome::Mismatch);
    }

    #[test]
    #[should_panic(expected = "deliberately wrong")]
    fn test_run_and_assert_panics() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        fixtures[1].run_and_assert();
    }

    #[test]
    fn test_expected_keeps_written_text() {
        let yaml = r#"
name: floats
cases:
  - name: trailing zero kept
    operator: equal
    actual: "2.50"
    expected: "2.50"
    outcome: ok
"#;
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures[0].cases[0].expected, "2.50");
        fixtures[0].run_and_assert();

        let unquoted = yaml.replace(r#"expected: "2.50""#, "expected: 1.0");
        let err = Fixture::from_yaml_multi(&unquoted).unwrap_err();
        assert!(err.to_string().contains("unquoted number"), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Fixture::load(Path::new("/nonexistent/fixture.yaml")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
