//! Error contract of the public entry points.

use einfunc::ndarray::{ArrayD, IxDyn, array};
use einfunc::{Argument, BoundTensor, EinfuncError, OptionValue, einfunc, einfunc_positional};
use pretty_assertions::assert_eq;

fn identity<'a>() -> Argument<'a, f64> {
    Argument::function(|t, _| t[0].clone())
}

#[test]
fn test_missing_arrow() {
    let v = array![1.0, 2.0].into_dyn();
    let err = einfunc(&[v], "i j", |t, _| t[0].clone(), None).unwrap_err();
    assert!(matches!(err, EinfuncError::MalformedPattern { .. }));
}

#[test]
fn test_two_arrows() {
    let v = array![1.0, 2.0].into_dyn();
    let err = einfunc(&[v], "i -> i -> i", |t, _| t[0].clone(), None).unwrap_err();
    assert!(matches!(err, EinfuncError::MalformedPattern { .. }));
}

#[test]
fn test_unbound_output_label() {
    let v = array![1.0, 2.0].into_dyn();
    let err = einfunc(&[v], "i -> k", |t, _| t[0].clone(), None).unwrap_err();
    assert_eq!(err, EinfuncError::UnboundLabel { label: "k".into() });
}

#[test]
fn test_repeated_output_label() {
    let v = array![1.0, 2.0].into_dyn();
    let err = einfunc(&[v], "i -> i i", |t, _| t[0].clone(), None).unwrap_err();
    assert_eq!(err, EinfuncError::RepeatedOutputLabel { label: "i".into() });
}

#[test]
fn test_rank_mismatch_names_input() {
    let x = array![1.0, 2.0].into_dyn();
    let y = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    let err = einfunc(&[x, y], "i, i -> i", |t, _| t[0].clone(), None).unwrap_err();
    assert_eq!(
        err,
        EinfuncError::RankMismatch {
            input: 1,
            labels: "i".into(),
            expected: 1,
            got: 2,
        }
    );
}

#[test]
fn test_extent_mismatch_across_inputs() {
    let x = ArrayD::<f64>::zeros(IxDyn(&[2, 3]));
    let y = ArrayD::<f64>::zeros(IxDyn(&[2, 4]));
    let err = einfunc(&[x, y], "b w, b w -> b", |t, _| &t[0] * &t[1], None).unwrap_err();
    assert_eq!(err, EinfuncError::AxisExtentMismatch { label: "w".into(), expected: 3, got: 4 });
}

#[test]
fn test_extent_mismatch_on_diagonal() {
    let x = ArrayD::<f64>::zeros(IxDyn(&[3, 4]));
    let err = einfunc(&[x], "i i -> i", |t, _| t[0].clone(), None).unwrap_err();
    assert!(matches!(err, EinfuncError::AxisExtentMismatch { expected: 3, got: 4, .. }));
}

#[test]
fn test_unknown_reduction_mode() {
    let args = vec![
        Argument::tensor(array![1.0].into_dyn()),
        Argument::text("i ->"),
        identity(),
    ];
    let err = einfunc_positional(args, [("reduce", OptionValue::from("median"))]).unwrap_err();
    assert_eq!(err, EinfuncError::InvalidReductionMode { mode: "median".into() });
    assert_eq!(
        err.to_string(),
        "'median' is not one of the allowed reduction types: sum, prod, mean, min, max"
    );
}

#[test]
fn test_too_few_arguments() {
    let args = vec![Argument::text("i ->"), identity()];
    let err = einfunc_positional(args, []).unwrap_err();
    assert_eq!(err, EinfuncError::TooFewArguments { got: 2 });
}

#[test]
fn test_malformed_pattern_through_positional() {
    let args = vec![
        Argument::tensor(array![1.0].into_dyn()),
        Argument::text("i"),
        identity(),
    ];
    let err = einfunc_positional(args, []).unwrap_err();
    assert!(matches!(err, EinfuncError::MalformedPattern { .. }));
}

#[test]
fn test_function_errors_propagate() {
    let v = array![1.0, 2.0].into_dyn();
    let err = einfunc(
        &[v],
        "i -> i",
        |_, _| -> Result<BoundTensor<'_, f64>, EinfuncError> { Err(EinfuncError::shape("inside")) },
        None,
    )
    .unwrap_err();
    assert_eq!(err, EinfuncError::shape("inside"));
}

#[test]
fn test_inputs_are_not_mutated() {
    let x = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
    let before = x.clone();
    einfunc(&[x.clone()], "i j -> j", |t, _| t[0].map(|v| v * 10.0), None).unwrap();
    assert_eq!(x, before);
}
