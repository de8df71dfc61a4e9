//! Materializes a bound tensor in a requested axis order.
//!
//! Permuting only rewrites strides, so the result is copied into standard
//! (row-major) layout before it leaves the engine.

use alloc::vec::Vec;

use ndarray::{ArrayD, CowArray, IxDyn};

use crate::error::{EinfuncError, EinfuncResult};
use crate::plan::AxisHandle;

/// Computes where each handle of `target` sits in `current`.
pub fn permutation(current: &[AxisHandle], target: &[AxisHandle]) -> EinfuncResult<Vec<usize>> {
    target
        .iter()
        .map(|handle| {
            current
                .iter()
                .position(|h| h == handle)
                .ok_or_else(|| EinfuncError::axis_not_bound(alloc::format!("{}", handle)))
        })
        .collect()
}

/// Copies `data` (laid out as `axes`) into a standard-layout array laid out
/// as `order`.
///
/// `order` must be a permutation of `axes`. Owned data already in the
/// requested layout is returned without a copy.
pub fn materialize<'a, A: Clone + 'a>(
    data: impl Into<CowArray<'a, A, IxDyn>>,
    axes: &[AxisHandle],
    order: &[AxisHandle],
) -> EinfuncResult<ArrayD<A>> {
    if axes.len() != order.len() {
        return Err(EinfuncError::shape(alloc::format!(
            "materialize: cannot lay out {} axes as {}",
            axes.len(),
            order.len()
        )));
    }

    let data = data.into();
    let perm = permutation(axes, order)?;
    let is_identity = perm.iter().enumerate().all(|(i, &p)| i == p);
    if is_identity && data.is_standard_layout() {
        return Ok(data.into_owned());
    }

    Ok(data.view().permuted_axes(perm).as_standard_layout().into_owned())
}
