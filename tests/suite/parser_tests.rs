//! Parser and compiler tests for einfunc patterns.

use einfunc::notation::validate_shapes;
use einfunc::{AxisHandle, compile_pattern, parse_pattern};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_broadcast() {
    let notation = parse_pattern("b c h w, b w -> b h").unwrap();
    assert_eq!(notation.num_inputs(), 2);
    assert_eq!(notation.num_outputs(), 1);
    assert_eq!(notation.universe(), &["b", "c", "h", "w"]);
    assert_eq!(notation.collapse_labels(0), vec!["c", "w"]);
}

#[test]
fn test_parse_trace() {
    let notation = parse_pattern("i i ->").unwrap();
    assert!(notation.is_unary());
    assert!(notation.is_scalar_output(0));
}

#[test]
fn test_parse_underscored_labels() {
    let notation = parse_pattern("first_tensor second_tensor -> first_tensor").unwrap();
    assert_eq!(notation.inputs()[0].len(), 2);
    assert_eq!(notation.collapse_labels(0), vec!["second_tensor"]);
}

#[test]
fn test_whitespace_insensitive() {
    let messy = parse_pattern(" one  two  ,  three four->two  four  ").unwrap();
    let clean = parse_pattern("one two,three four->two four").unwrap();

    assert_eq!(messy.inputs(), clean.inputs());
    assert_eq!(messy.outputs(), clean.outputs());
    assert_eq!(messy.to_string(), "one two,three four->two four");
}

#[test]
fn test_parse_multiple_outputs() {
    let notation = parse_pattern("i j -> i, j, ").unwrap();
    assert!(notation.is_multi_output());
    assert_eq!(notation.num_outputs(), 3);
    assert!(notation.is_scalar_output(2));
}

#[test]
fn test_compile_allocates_in_first_appearance_order() {
    let plan = compile_pattern("x y, z x -> z", false).unwrap();
    let axes = plan.axes();

    assert_eq!(axes.handle("x"), Some(AxisHandle::new(0)));
    assert_eq!(axes.handle("y"), Some(AxisHandle::new(1)));
    assert_eq!(axes.handle("z"), Some(AxisHandle::new(2)));

    assert_eq!(plan.inputs()[1].as_slice(), &[AxisHandle::new(2), AxisHandle::new(0)]);
    assert_eq!(plan.outputs()[0].collapse(), &[AxisHandle::new(0), AxisHandle::new(1)]);
    assert_eq!(plan.outputs()[0].order(), &[AxisHandle::new(2)]);
}

#[test]
fn test_compile_is_deterministic() {
    let a = compile_pattern("b c h w, b w, b c -> b h", true).unwrap();
    let b = compile_pattern("b c h w, b w, b c -> b h", true).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.exposed_handles().map(|h| h.len()), Some(4));
    assert_eq!(compile_pattern("i -> i", false).unwrap().exposed_handles(), None);
}

#[test]
fn test_validate_shapes_reports_output_shapes() {
    let notation = parse_pattern("b c h w, b w -> b h, w").unwrap();
    let result = validate_shapes(&notation, &[&[2, 3, 4, 5], &[2, 5]]).unwrap();

    assert_eq!(result.output_shapes, vec![vec![2, 4], vec![5]]);
    assert_eq!(result.extent("c"), Some(3));
    assert_eq!(result.aligned_elements(), 120);
}
