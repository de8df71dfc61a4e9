//! Reduction kernels.
//!
//! `sum`, `mean`, `max` and `min` collapse all requested axes in one pass by
//! flattening them into a single trailing axis. `prod` is applied one axis at
//! a time by the caller.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::error::{EinfuncError, EinfuncResult};
use crate::tensor::Element;

/// How collapsed axes are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReduceMode {
    #[default]
    Sum,
    Mean,
    Prod,
    Max,
    Min,
}

impl ReduceMode {
    /// Every supported mode.
    pub const ALL: [ReduceMode; 5] = [
        ReduceMode::Sum,
        ReduceMode::Mean,
        ReduceMode::Prod,
        ReduceMode::Max,
        ReduceMode::Min,
    ];

    /// Returns the option string for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            ReduceMode::Sum => "sum",
            ReduceMode::Mean => "mean",
            ReduceMode::Prod => "prod",
            ReduceMode::Max => "max",
            ReduceMode::Min => "min",
        }
    }

    /// Returns true if the mode can only reduce one axis per step.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        matches!(self, ReduceMode::Prod)
    }
}

impl fmt::Display for ReduceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReduceMode {
    type Err = EinfuncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReduceMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| EinfuncError::InvalidReductionMode { mode: s.into() })
    }
}

/// Reduces a single axis.
pub fn reduce_axis<A: Element>(
    data: ArrayViewD<'_, A>,
    axis: usize,
    mode: ReduceMode,
) -> EinfuncResult<ArrayD<A>> {
    if axis >= data.ndim() {
        return Err(EinfuncError::shape(alloc::format!(
            "reduce: axis {} out of range for rank {}",
            axis,
            data.ndim()
        )));
    }

    let len = data.len_of(Axis(axis));
    let axis = Axis(axis);

    match mode {
        ReduceMode::Sum => Ok(data.fold_axis(axis, A::zero(), |&acc, &x| acc + x)),
        ReduceMode::Prod => Ok(data.fold_axis(axis, A::one(), |&acc, &x| acc * x)),
        ReduceMode::Mean => {
            let count = <A as NumCast>::from(len).ok_or_else(|| EinfuncError::UnsupportedReduction {
                mode: mode.name().into(),
                message: alloc::format!("cannot represent count {} in the element type", len),
            })?;
            let sum = data.fold_axis(axis, A::zero(), |&acc, &x| acc + x);
            Ok(sum.mapv(|v| v / count))
        }
        ReduceMode::Max | ReduceMode::Min => {
            if len == 0 {
                return Err(EinfuncError::UnsupportedReduction {
                    mode: mode.name().into(),
                    message: "zero-extent axis has no identity".into(),
                });
            }
            let (init, pick): (A, fn(A, A) -> A) = if mode == ReduceMode::Max {
                (A::neg_infinity(), <A as Float>::max)
            } else {
                (A::infinity(), <A as Float>::min)
            };
            Ok(data.fold_axis(axis, init, |&acc, &x| {
                if acc.is_nan() || x.is_nan() {
                    A::nan()
                } else {
                    pick(acc, x)
                }
            }))
        }
    }
}

/// Reduces several axes at once.
///
/// The remaining axes keep their relative order. Not valid for sequential
/// modes; use [`reduce_axis`] per axis for those.
pub fn reduce_axes<A: Element>(
    data: ArrayViewD<'_, A>,
    axes: &[usize],
    mode: ReduceMode,
) -> EinfuncResult<ArrayD<A>> {
    match axes {
        [] => return Ok(data.to_owned()),
        [axis] => return reduce_axis(data, *axis, mode),
        _ => {}
    }

    if mode.is_sequential() {
        return Err(EinfuncError::UnsupportedReduction {
            mode: mode.name().into(),
            message: "reduces one axis at a time".into(),
        });
    }

    let ndim = data.ndim();
    if let Some(&bad) = axes.iter().find(|&&a| a >= ndim) {
        return Err(EinfuncError::shape(alloc::format!(
            "reduce: axis {} out of range for rank {}",
            bad, ndim
        )));
    }

    let kept: Vec<usize> = (0..ndim).filter(|p| !axes.contains(p)).collect();
    let count: usize = axes.iter().map(|&p| data.shape()[p]).product();

    let mut flat_shape: Vec<usize> = kept.iter().map(|&p| data.shape()[p]).collect();
    flat_shape.push(count);

    let mut perm = kept.clone();
    perm.extend_from_slice(axes);

    let flat = data
        .permuted_axes(perm)
        .as_standard_layout()
        .into_owned()
        .into_shape_with_order(IxDyn(&flat_shape))
        .map_err(|e| EinfuncError::shape(alloc::format!("reduce: {}", e)))?;

    reduce_axis(flat.view(), kept.len(), mode)
}
