//! Diagonal extraction kernel.
//!
//! Binds a tensor to a handle sequence that may repeat handles:
//! `i i -> i` keeps only the positions where both physical indices agree,
//! `i m i` keeps a diagonal across non-adjacent axes, `a a a` a triple
//! diagonal.

use alloc::vec;
use alloc::vec::Vec;

use ndarray::{ArrayD, CowArray, IxDyn};

use crate::error::{EinfuncError, EinfuncResult};
use crate::plan::{AxisHandle, AxisList};

/// Extracts the generalized diagonal selected by repeated handles.
///
/// Returns the data and its distinct handles in first-appearance order.
/// Without repeats the input is passed through untouched, so a borrowed
/// input stays borrowed. Extent mismatches name the axis by handle id.
pub fn extract_diagonal<'a, A: Clone>(
    input: impl Into<CowArray<'a, A, IxDyn>>,
    handles: &[AxisHandle],
) -> EinfuncResult<(CowArray<'a, A, IxDyn>, AxisList)> {
    let input = input.into();
    if input.ndim() != handles.len() {
        return Err(EinfuncError::shape(alloc::format!(
            "diagonal: {} handles for a rank {} tensor",
            handles.len(),
            input.ndim()
        )));
    }

    let mut axes = AxisList::new();
    let mut shape: Vec<usize> = Vec::with_capacity(handles.len());
    // Physical axis -> position of its handle in `axes`
    let mut source: Vec<usize> = Vec::with_capacity(handles.len());

    for (&handle, &dim) in handles.iter().zip(input.shape()) {
        match axes.iter().position(|&a| a == handle) {
            Some(pos) => {
                if shape[pos] != dim {
                    return Err(EinfuncError::extent(
                        alloc::format!("{}", handle),
                        shape[pos],
                        dim,
                    ));
                }
                source.push(pos);
            }
            None => {
                source.push(axes.len());
                axes.push(handle);
                shape.push(dim);
            }
        }
    }

    if axes.len() == handles.len() {
        return Ok((input, axes));
    }

    let mut full = vec![0usize; handles.len()];
    let data = ArrayD::from_shape_fn(IxDyn(&shape), |index| {
        for (physical, &pos) in source.iter().enumerate() {
            full[physical] = index[pos];
        }
        input[full.as_slice()].clone()
    });

    Ok((data.into(), axes))
}
