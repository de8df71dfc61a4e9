//! Broadcast-aligned elementwise kernel.
//!
//! Two bound tensors are combined on the union of their axes: the left
//! operand's axes first, then any axes only the right operand carries. An axis
//! missing from one side is broadcast along the other side's extent.

use alloc::vec::Vec;

use ndarray::{ArrayD, ArrayViewD, Axis, Zip};

use super::permute::permutation;
use crate::error::{EinfuncError, EinfuncResult};
use crate::plan::{AxisHandle, AxisList};

/// Computes the union layout of two bound tensors.
///
/// Extent mismatches name the axis by handle id.
pub fn union_layout(
    lhs_axes: &[AxisHandle],
    lhs_shape: &[usize],
    rhs_axes: &[AxisHandle],
    rhs_shape: &[usize],
) -> EinfuncResult<(AxisList, Vec<usize>)> {
    let mut axes: AxisList = lhs_axes.iter().copied().collect();
    let mut shape: Vec<usize> = lhs_shape.to_vec();

    for (&handle, &dim) in rhs_axes.iter().zip(rhs_shape) {
        match axes.iter().position(|&a| a == handle) {
            Some(pos) => {
                if shape[pos] != dim {
                    return Err(EinfuncError::extent(
                        alloc::format!("{}", handle),
                        shape[pos],
                        dim,
                    ));
                }
            }
            None => {
                axes.push(handle);
                shape.push(dim);
            }
        }
    }

    Ok((axes, shape))
}

/// Adds unit axes for every handle of `target` the view lacks, then permutes
/// the view into `target` order.
fn expand_to<'a, A>(
    view: ArrayViewD<'a, A>,
    axes: &[AxisHandle],
    target: &[AxisHandle],
) -> EinfuncResult<ArrayViewD<'a, A>> {
    let mut view = view;
    let mut current: AxisList = axes.iter().copied().collect();

    for &handle in target {
        if !current.contains(&handle) {
            let next = view.ndim();
            view = view.insert_axis(Axis(next));
            current.push(handle);
        }
    }

    let perm = permutation(&current, target)?;
    Ok(view.permuted_axes(perm))
}

/// Combines two bound tensors elementwise after aligning their axes.
pub fn zip_aligned<A, F>(
    lhs: ArrayViewD<'_, A>,
    lhs_axes: &[AxisHandle],
    rhs: ArrayViewD<'_, A>,
    rhs_axes: &[AxisHandle],
    mut f: F,
) -> EinfuncResult<(ArrayD<A>, AxisList)>
where
    A: Clone,
    F: FnMut(A, A) -> A,
{
    let (axes, shape) = union_layout(lhs_axes, lhs.shape(), rhs_axes, rhs.shape())?;

    let lhs = expand_to(lhs, lhs_axes, &axes)?;
    let rhs = expand_to(rhs, rhs_axes, &axes)?;

    let broadcast_error = || EinfuncError::shape(alloc::format!("cannot broadcast to {:?}", shape));
    let lhs_full = lhs.broadcast(shape.as_slice()).ok_or_else(broadcast_error)?;
    let rhs_full = rhs.broadcast(shape.as_slice()).ok_or_else(broadcast_error)?;

    let data = Zip::from(&lhs_full)
        .and(&rhs_full)
        .map_collect(|a, b| f(a.clone(), b.clone()));

    Ok((data, axes))
}
