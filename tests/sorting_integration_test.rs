mod common;

use common::{method_multiset, method_order, non_method_texts, read_fixture, sort, sort_with};
use gomsort::{MethodPlacement, SortOptions};
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn test_complex_fixture_order() {
    let source = read_fixture("complex_example.go");
    let outcome = sort(&source);

    assert!(outcome.changed);
    assert_eq!(
        method_order(&outcome.content),
        vec![
            "Close",
            "Connect",
            "Query",
            "cleanup",
            "lowLevelExecute",
            "parseResults",
            "validateConnection",
            "executeRawQuery",
            "GetValue",
            "getValue",
        ]
    );
}

#[test]
fn test_complex_fixture_keeps_comments_with_methods() {
    let source = read_fixture("complex_example.go");
    let output = sort(&source).content;

    for (doc, signature) in [
        ("// Close releases the connection.", "func (db *Database) Close() error {"),
        ("// Query runs sql and parses the rows.", "func (db *Database) Query(sql string) ([]Row, error) {"),
        ("// getValue reads a raw value.", "func (r *Row) getValue(key string) interface{} {"),
    ] {
        assert!(
            output.contains(&format!("{doc}\n{signature}")),
            "{doc} should directly precede its method"
        );
        assert_eq!(output.matches(doc).count(), 1, "{doc} should appear once");
    }
    assert_eq!(output.matches("// validate first").count(), 1);
    assert!(output.contains("if err := db.validateConnection(); err != nil { // validate first"));
}

#[test]
fn test_complex_fixture_preserves_non_methods() {
    let source = read_fixture("complex_example.go");
    let output = sort(&source).content;

    assert_eq!(non_method_texts(&output), non_method_texts(&source));
    assert_eq!(method_multiset(&output), method_multiset(&source));
    assert!(output.ends_with("}\n"));
}

#[test]
fn test_sorting_is_idempotent() {
    let source = read_fixture("complex_example.go");
    let first = sort(&source);
    let second = sort(&first.content);

    assert!(!second.changed);
    assert_eq!(second.content, first.content);
}

#[test]
fn test_helper_before_entry_point() {
    let outcome = sort(indoc! {r#"
        package server

        type Server struct{}

        func (s *Server) helper() {}

        func (s *Server) Start() error {
            s.helper()
            return nil
        }
    "#});

    assert!(outcome.changed);
    assert_eq!(method_order(&outcome.content), vec!["Start", "helper"]);
}

#[test]
fn test_receivers_are_grouped_by_name() {
    let outcome = sort(indoc! {r#"
        package net

        type Client struct{}
        type Server struct{}

        func (s *Server) Start() {}

        func (c *Client) Connect() {}
    "#});

    assert!(outcome.changed);
    assert_eq!(method_order(&outcome.content), vec!["Connect", "Start"]);
}

#[test]
fn test_exported_first_regardless_of_metrics() {
    let outcome = sort(indoc! {r#"
        package a

        type T struct{}

        func (t *T) leaf() {}

        func (t *T) Deep() { t.mid() }

        func (t *T) mid() { t.leaf() }
    "#});

    assert_eq!(method_order(&outcome.content), vec!["Deep", "leaf", "mid"]);
}

#[test]
fn test_lower_depth_sorts_first() {
    let outcome = sort(indoc! {r#"
        package a

        type T struct{}

        func (t *T) Run() { t.step() }

        func (t *T) Stop() {}

        func (t *T) step() {}
    "#});

    assert_eq!(method_order(&outcome.content), vec!["Stop", "Run", "step"]);
}

#[test]
fn test_mutual_recursion_is_stable() {
    let source = indoc! {r#"
        package a

        type T struct{}

        func (t *T) pong(n int) {
            if n > 0 {
                t.ping(n - 1)
            }
        }

        func (t *T) ping(n int) {
            if n > 0 {
                t.pong(n - 1)
            }
        }
    "#};

    let first = sort(source);
    let second = sort(source);
    assert_eq!(first.content, second.content);
    assert!(!first.changed);
    assert!(first.methods.iter().all(|m| m.max_depth == 2));
}

#[test]
fn test_free_functions_and_unclassifiable_methods_stay() {
    let source = indoc! {r#"
        package a

        type T struct{}

        func (t *T) b() {}

        func helper() {}

        func (t **T) weird() {}

        func (t *T) A() {}
    "#};
    let outcome = sort(source);

    assert_eq!(method_order(&outcome.content), vec!["A", "b"]);
    assert_eq!(non_method_texts(&outcome.content), non_method_texts(source));
    let helper = outcome.content.find("func helper()").unwrap();
    let weird = outcome.content.find("func (t **T) weird()").unwrap();
    let a = outcome.content.find("func (t *T) A()").unwrap();
    assert!(helper < weird && weird < a);
}

#[test]
fn test_freestanding_comments_are_not_moved_or_duplicated() {
    let source = indoc! {r#"
        package a

        type T struct{}

        // Section: lifecycle

        func (t *T) stop() {}

        func (t *T) Start() { t.stop() }

        // end of file
    "#};
    let output = sort(source).content;

    assert_eq!(
        output,
        indoc! {r#"
            package a

            type T struct{}

            // Section: lifecycle

            func (t *T) Start() { t.stop() }

            func (t *T) stop() {}

            // end of file
        "#}
    );
}

#[test]
fn test_first_method_placement() {
    let source = indoc! {r#"
        package a

        type T struct{}

        func (t *T) b() {}

        func (t *T) A() {}

        var registry = map[string]*T{}
    "#};
    let outcome = sort_with(
        source,
        SortOptions {
            placement: MethodPlacement::FirstMethod,
            ..SortOptions::default()
        },
    );

    assert_eq!(
        outcome.content,
        indoc! {r#"
            package a

            type T struct{}

            func (t *T) A() {}

            func (t *T) b() {}

            var registry = map[string]*T{}
        "#}
    );
}

#[test]
fn test_generic_receivers_group_together() {
    let source = indoc! {r#"
        package a

        type Stack[T any] struct{ items []T }

        func (s *Stack[T]) pop() T {
            var zero T
            return zero
        }

        func (s Stack[T]) Len() int { return len(s.items) }
    "#};
    let outcome = sort(source);

    assert_eq!(method_order(&outcome.content), vec!["Len", "pop"]);
    assert!(outcome.methods.iter().all(|m| m.receiver_type == "Stack"));
}
