//! Conformance tests that run YAML table fixtures through `TableChecker`
//!
//! Run with: cargo test -p verdict-test --test table_conformance

use std::fs;
use std::path::{Path, PathBuf};

use verdict_test::table_fixture::TableFixture;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root")
        .join("conformance")
        .join("04_tables")
}

#[test]
fn test_tables() {
    let dir = fixtures_dir();
    let mut count = 0;

    for entry in fs::read_dir(&dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        if !path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            continue;
        }

        println!("Running table fixture: {}", path.display());
        let fixtures = TableFixture::load(&path).unwrap_or_else(|e| {
            panic!("Failed to load {}: {}", path.display(), e);
        });

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
            count += 1;
        }
    }

    assert!(count > 0, "no table fixtures found in {}", dir.display());
}
