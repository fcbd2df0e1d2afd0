//! Conformance tests that run YAML fixtures against the engine
//!
//! Run with: cargo test -p verdict-test --test conformance

use std::fs;
use std::path::{Path, PathBuf};

use verdict_test::fixture::Fixture;

/// The conformance/ directory at the workspace root
fn fixtures_dir() -> PathBuf {
    // ext/test -> ext -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root")
        .join("conformance")
}

/// Load and run all fixtures in a directory
fn run_fixtures_in_dir(dir: &Path) {
    assert!(
        dir.exists(),
        "Fixtures directory does not exist: {}",
        dir.display()
    );

    let mut count = 0;
    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            println!("Running fixture: {}", path.display());

            let fixtures = Fixture::load(&path).unwrap_or_else(|e| {
                panic!("Failed to load {}: {}", path.display(), e);
            });

            for fixture in fixtures {
                println!("  Running: {}", fixture.name);
                fixture.run_and_assert();
                count += 1;
            }
        }
    }
    assert!(count > 0, "no fixtures found in {}", dir.display());
}

#[test]
fn test_typed_literals() {
    run_fixtures_in_dir(&fixtures_dir().join("01_typed_literals"));
}

#[test]
fn test_operators() {
    run_fixtures_in_dir(&fixtures_dir().join("02_operators"));
}

#[test]
fn test_navigation() {
    run_fixtures_in_dir(&fixtures_dir().join("03_navigation"));
}
