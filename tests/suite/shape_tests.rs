//! Shape and value equivalence against the reference evaluator.

use einfunc::ndarray::{ArrayD, array};
use einfunc::{BoundTensor, EinfuncConfig, ReduceMode, einfunc};
use pretty_assertions::assert_eq;

use crate::common::{filled, init_logger, norm_diff, reference};

#[derive(Clone, Copy)]
enum Function {
    Identity,
    Product,
}

impl Function {
    fn apply<'a>(self, tensors: &[BoundTensor<'a, f64>]) -> BoundTensor<'a, f64> {
        match self {
            Function::Identity => tensors[0].clone(),
            Function::Product => tensors[1..].iter().fold(tensors[0].clone(), |acc, t| &acc * t),
        }
    }
}

struct Case {
    pattern: &'static str,
    function: Function,
    shapes: &'static [&'static [usize]],
    expected: &'static [usize],
}

const CASES: &[Case] = &[
    Case {
        pattern: "i i -> i",
        function: Function::Identity,
        shapes: &[&[5, 5]],
        expected: &[5],
    },
    Case {
        pattern: "b c h w, b w -> b h",
        function: Function::Product,
        shapes: &[&[2, 3, 4, 5], &[2, 5]],
        expected: &[2, 4],
    },
    Case {
        pattern: "b c h w, b w, b c -> b h",
        function: Function::Product,
        shapes: &[&[2, 3, 40, 5], &[2, 5], &[2, 3]],
        expected: &[2, 40],
    },
    Case {
        pattern: "first_tensor second_tensor -> first_tensor",
        function: Function::Identity,
        shapes: &[&[5, 4]],
        expected: &[5],
    },
    Case {
        pattern: "i i -> ",
        function: Function::Identity,
        shapes: &[&[5, 5]],
        expected: &[],
    },
    Case {
        pattern: " one  two  ,  three four->two  four  ",
        function: Function::Product,
        shapes: &[&[2, 3], &[4, 5]],
        expected: &[3, 5],
    },
    Case {
        pattern: "i middle i -> middle",
        function: Function::Identity,
        shapes: &[&[5, 10, 5]],
        expected: &[10],
    },
    Case {
        pattern: "one one one -> one",
        function: Function::Identity,
        shapes: &[&[5, 5, 5]],
        expected: &[5],
    },
    Case {
        pattern: "i j k -> j i k",
        function: Function::Identity,
        shapes: &[&[1, 2, 3]],
        expected: &[2, 1, 3],
    },
    Case {
        pattern: "index ->",
        function: Function::Identity,
        shapes: &[&[10]],
        expected: &[],
    },
];

fn inputs_for(case: &Case) -> Vec<ArrayD<f64>> {
    case.shapes.iter().enumerate().map(|(seed, shape)| filled(shape, seed)).collect()
}

fn split(pattern: &str) -> (Vec<&str>, &str) {
    let (lhs, rhs) = pattern.split_once("->").unwrap();
    (lhs.split(',').collect(), rhs)
}

#[test]
fn test_matches_reference_for_every_mode() {
    init_logger();

    for case in CASES {
        let tensors = inputs_for(case);
        let (groups, output) = split(case.pattern);

        for mode in ReduceMode::ALL {
            let function = case.function;
            let result = einfunc(
                &tensors,
                case.pattern,
                move |t, _| function.apply(t),
                Some(EinfuncConfig::new().with_reduce(mode)),
            )
            .unwrap()
            .into_single()
            .unwrap();

            let expected = reference(&groups, output, &tensors, mode);

            assert_eq!(result.shape(), case.expected, "{} ({})", case.pattern, mode);
            assert_eq!(result.shape(), expected.shape(), "{} ({})", case.pattern, mode);
            assert!(
                norm_diff(&result, &expected) < 1e-5,
                "{} ({}): {:?} vs {:?}",
                case.pattern,
                mode,
                result,
                expected
            );
        }
    }
}

#[test]
fn test_diagonal_is_exact() {
    let m = filled(&[5, 5], 3);
    let out = einfunc(&[m.clone()], "i i -> i", |t, _| t[0].clone(), None)
        .unwrap()
        .into_single()
        .unwrap();

    let diagonal: Vec<f64> = (0..5).map(|i| m[[i, i]]).collect();
    assert_eq!(out.iter().copied().collect::<Vec<_>>(), diagonal);
}

#[test]
fn test_full_reduction_is_scalar() {
    let v = array![1.0, 2.0, 3.0, 4.0].into_dyn();

    for (mode, expected) in [
        (ReduceMode::Sum, 10.0),
        (ReduceMode::Mean, 2.5),
        (ReduceMode::Prod, 24.0),
        (ReduceMode::Max, 4.0),
        (ReduceMode::Min, 1.0),
    ] {
        let out = einfunc(&[v.clone()], "index ->", |t, _| t[0].clone(), Some(EinfuncConfig::new().with_reduce(mode)))
            .unwrap()
            .into_single()
            .unwrap();
        assert_eq!(out.ndim(), 0);
        assert_eq!(out[[]], expected, "{mode}");
    }
}

#[test]
fn test_axis_swap_moves_values() {
    let x = filled(&[2, 3, 4], 1);
    let out = einfunc(&[x.clone()], "i j k -> j i k", |t, _| t[0].clone(), None)
        .unwrap()
        .into_single()
        .unwrap();

    assert_eq!(out.shape(), &[3, 2, 4]);
    assert!(out.is_standard_layout());
    for ((i, j, k), &v) in x.clone().into_dimensionality::<einfunc::ndarray::Ix3>().unwrap().indexed_iter() {
        assert_eq!(out[[j, i, k]], v);
    }
}

#[test]
fn test_shared_axis_broadcast() {
    let x = filled(&[2, 3, 4, 5], 0);
    let y = filled(&[2, 5], 1);

    let out = einfunc(&[x.clone(), y.clone()], "b c h w, b w -> b h", |t, _| &t[0] * &t[1], None)
        .unwrap()
        .into_single()
        .unwrap();

    for b in 0..2 {
        for h in 0..4 {
            let mut expected = 0.0;
            for c in 0..3 {
                for w in 0..5 {
                    expected += x[[b, c, h, w]] * y[[b, w]];
                }
            }
            assert!((out[[b, h]] - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn test_multiple_outputs() {
    let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();

    let out = einfunc(&[m], "i j -> i, j", |t, _| (t[0].clone(), t[0].clone()), None).unwrap();
    assert!(out.is_multiple());

    let outputs = out.into_vec();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0], array![6.0, 15.0].into_dyn());
    assert_eq!(outputs[1], array![5.0, 7.0, 9.0].into_dyn());
}

#[test]
fn test_exposed_handles() {
    let x = array![1.0, 2.0].into_dyn();
    let y = array![10.0, 20.0, 30.0].into_dyn();

    let out = einfunc(
        &[x, y],
        "i, j -> i",
        |t, handles| {
            assert_eq!(handles.len(), 2);
            assert_eq!(t[0].axes(), &handles[..1]);
            assert_eq!(t[1].axes(), &handles[1..]);
            // Reduce 'j' inside the function, then let einfunc collapse nothing.
            let summed = t[1].reduce(ReduceMode::Sum, &handles[1..])?;
            let product = &t[0] * &summed;
            Ok::<_, einfunc::EinfuncError>(&product * &t[1].map(|_| 1.0))
        },
        Some(EinfuncConfig::new().with_handles(true).with_reduce(ReduceMode::Max)),
    )
    .unwrap()
    .into_single()
    .unwrap();

    // max over j of (x_i * 60)
    assert_eq!(out, array![60.0, 120.0].into_dyn());
}

#[test]
fn test_f16_elements() {
    use half::f16;

    let m = ArrayD::from_shape_vec(
        einfunc::ndarray::IxDyn(&[2, 2]),
        [1.0f32, 2.0, 3.0, 4.0].into_iter().map(f16::from_f32).collect(),
    )
    .unwrap();

    let trace = einfunc(&[m], "i i ->", |t, _| t[0].clone(), None)
        .unwrap()
        .into_single()
        .unwrap();
    assert_eq!(trace[[]], f16::from_f32(5.0));
}
