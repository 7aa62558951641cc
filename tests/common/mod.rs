// Test utility module for gomsort integration tests
#![allow(dead_code)]

use gomsort::parser::DeclKind;
use gomsort::{extract_methods, parse_source, sort_source, SortOptions, SortOutcome};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("go")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

/// Sort with default options.
pub fn sort(source: &str) -> SortOutcome {
    sort_with(source, SortOptions::default())
}

pub fn sort_with(source: &str, options: SortOptions) -> SortOutcome {
    sort_source("test.go", source, options).expect("source should sort")
}

/// Method names in the order they appear in `source`.
pub fn method_order(source: &str) -> Vec<String> {
    let unit = parse_source("test.go", source).expect("source should parse");
    extract_methods(&unit).into_iter().map(|m| m.name).collect()
}

/// `Receiver.name` keys of every method, sorted.
pub fn method_multiset(source: &str) -> Vec<String> {
    let unit = parse_source("test.go", source).expect("source should parse");
    let mut keys: Vec<String> = extract_methods(&unit)
        .iter()
        .map(|m| m.key().to_string())
        .collect();
    keys.sort();
    keys
}

/// Text of every top-level item that is not a method, in order.
pub fn non_method_texts(source: &str) -> Vec<String> {
    let unit = parse_source("test.go", source).expect("source should parse");
    unit.decls()
        .iter()
        .filter(|decl| decl.kind != DeclKind::Method)
        .map(|decl| unit.text(decl.full_span()).to_string())
        .collect()
}
