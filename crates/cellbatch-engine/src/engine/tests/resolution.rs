//! End-to-end resolution of detached batches.

use cellbatch_common::Value;
use cellbatch_ops::builtin_registry;

use super::common::{batch_of, entry, lit, outcome, reference};
use crate::engine::batch::Argument;
use crate::engine::eval::resolve_batch;

#[test]
fn dependent_cells_see_computed_values() {
    let (a, ra) = entry("A1", "plus", vec![lit(2), lit(3)]);
    let (b, rb) = entry("B1", "plus", vec![reference("A1"), lit(10)]);
    let summary = resolve_batch(&builtin_registry(), batch_of(vec![a, b]));

    assert_eq!(summary.evaluated, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(outcome(ra).unwrap(), Value::Int(5));
    assert_eq!(outcome(rb).unwrap(), Value::Int(15));
}

#[test]
fn submission_order_does_not_constrain_dependencies() {
    // The dependent arrives before the cell it references.
    let (b, rb) = entry("B1", "plus", vec![reference("A1"), lit(10)]);
    let (a, ra) = entry("A1", "plus", vec![lit(2), lit(3)]);
    resolve_batch(&builtin_registry(), batch_of(vec![b, a]));

    assert_eq!(outcome(ra).unwrap(), Value::Int(5));
    assert_eq!(outcome(rb).unwrap(), Value::Int(15));
}

#[test]
fn diamond_dependencies_resolve_in_one_pass() {
    let (a, ra) = entry("A1", "plus", vec![lit(1), lit(1)]);
    let (b, rb) = entry("B1", "multiply", vec![reference("A1"), lit(2)]);
    let (c, rc) = entry("C1", "plus", vec![reference("A1"), lit(3)]);
    let (d, rd) = entry("D1", "plus", vec![reference("B1"), reference("C1")]);
    resolve_batch(&builtin_registry(), batch_of(vec![a, b, c, d]));

    assert_eq!(outcome(ra).unwrap(), Value::Int(2));
    assert_eq!(outcome(rb).unwrap(), Value::Int(4));
    assert_eq!(outcome(rc).unwrap(), Value::Int(5));
    assert_eq!(outcome(rd).unwrap(), Value::Int(9));
}

#[test]
fn chains_resolve_transitively() {
    let (a, ra) = entry("A1", "plus", vec![lit(1)]);
    let (b, rb) = entry("B1", "plus", vec![reference("A1"), lit(1)]);
    let (c, rc) = entry("C1", "plus", vec![reference("B1"), lit(1)]);
    let (d, rd) = entry("D1", "plus", vec![reference("C1"), lit(1)]);
    resolve_batch(&builtin_registry(), batch_of(vec![d, c, b, a]));

    assert_eq!(outcome(ra).unwrap(), Value::Int(1));
    assert_eq!(outcome(rb).unwrap(), Value::Int(2));
    assert_eq!(outcome(rc).unwrap(), Value::Int(3));
    assert_eq!(outcome(rd).unwrap(), Value::Int(4));
}

#[test]
fn cached_value_overrides_the_literal() {
    let (a, ra) = entry("A1", "plus", vec![lit(2), lit(3)]);
    let (b, rb) = entry(
        "B1",
        "plus",
        vec![Argument::reference_or("A1", Value::Int(999)), lit(10)],
    );
    resolve_batch(&builtin_registry(), batch_of(vec![a, b]));

    assert_eq!(outcome(ra).unwrap(), Value::Int(5));
    assert_eq!(outcome(rb).unwrap(), Value::Int(15));
}

#[test]
fn text_literals_are_parsed_before_dispatch() {
    let (a, ra) = entry(
        "A1",
        "plus",
        vec![
            Argument::literal(Value::Text("2".into())),
            Argument::literal(Value::Text("3".into())),
        ],
    );
    let (b, rb) = entry(
        "B1",
        "equals",
        vec![
            Argument::literal(Value::Text("true".into())),
            Argument::literal(Value::Boolean(true)),
        ],
    );
    resolve_batch(&builtin_registry(), batch_of(vec![a, b]));

    assert_eq!(outcome(ra).unwrap(), Value::Int(5));
    assert_eq!(outcome(rb).unwrap(), Value::Boolean(true));
}

#[test]
fn case_and_lock_markers_do_not_split_cells() {
    // "$a1 " and "A1" are the same cell after normalization.
    let (a, ra) = entry("$a1 ", "plus", vec![lit(2), lit(3)]);
    let (b, rb) = entry("B1", "plus", vec![reference("A1"), lit(10)]);
    resolve_batch(&builtin_registry(), batch_of(vec![a, b]));

    assert_eq!(outcome(ra).unwrap(), Value::Int(5));
    assert_eq!(outcome(rb).unwrap(), Value::Int(15));
}
