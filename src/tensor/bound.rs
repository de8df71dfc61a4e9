//! Tensors annotated with logical axis handles.

use alloc::vec::Vec;

use ndarray::{ArrayD, ArrayViewD, CowArray, IxDyn};

use crate::error::{EinfuncError, EinfuncResult};
use crate::kernels::{ReduceMode, extract_diagonal, materialize, reduce_axes, reduce_axis, zip_aligned};
use crate::plan::{AxisHandle, AxisList};
use crate::tensor::Element;

/// A tensor whose physical axes are each bound to a distinct logical axis.
///
/// Bound tensors are what user functions receive and return. Arithmetic
/// between two bound tensors aligns shared axes by handle and broadcasts the
/// rest, so the physical layout of either operand never matters.
///
/// Binding a borrowed array without repeated handles borrows it; data is only
/// owned once a diagonal, an arithmetic result or a reduction produces it.
/// Errors raised here name axes by handle id (`axis#N`); inside an einfunc
/// call they are reported with the pattern's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundTensor<'a, A> {
    data: CowArray<'a, A, IxDyn>,
    axes: AxisList,
}

impl<'a, A: Element> BoundTensor<'a, A> {
    /// Binds `input` to one handle per physical axis.
    ///
    /// Repeating a handle selects the diagonal across those positions.
    pub fn bind(input: impl Into<CowArray<'a, A, IxDyn>>, handles: &[AxisHandle]) -> EinfuncResult<Self> {
        let input = input.into();
        if input.ndim() != handles.len() {
            return Err(EinfuncError::RankMismatch {
                input: 0,
                labels: describe(handles),
                expected: handles.len(),
                got: input.ndim(),
            });
        }

        let (data, axes) = extract_diagonal(input, handles)?;
        Ok(Self { data, axes })
    }

    /// Wraps data whose axes are already distinct.
    pub fn from_parts(data: impl Into<CowArray<'a, A, IxDyn>>, axes: AxisList) -> EinfuncResult<Self> {
        let data = data.into();
        if data.ndim() != axes.len() {
            return Err(EinfuncError::shape(alloc::format!(
                "{} handles for a rank {} tensor",
                axes.len(),
                data.ndim()
            )));
        }
        if let Some(dup) = first_repeat(&axes) {
            return Err(EinfuncError::shape(alloc::format!(
                "{} bound twice; use bind to take a diagonal",
                dup
            )));
        }
        Ok(Self { data, axes })
    }

    /// A rank-0 tensor.
    pub fn scalar(value: A) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(&[]), value).into(),
            axes: AxisList::new(),
        }
    }

    fn owned(data: ArrayD<A>, axes: AxisList) -> Self {
        Self { data: data.into(), axes }
    }

    /// Read-only view of the data, laid out as [`axes`](Self::axes).
    #[inline]
    pub fn data(&self) -> ArrayViewD<'_, A> {
        self.data.view()
    }

    /// Returns the data, copying it only if it is still borrowed.
    pub fn into_data(self) -> ArrayD<A> {
        self.data.into_owned()
    }

    /// Returns true if the data still borrows from the bound input.
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        self.data.is_view()
    }

    /// Detaches the tensor from the input it borrows from.
    pub fn into_owned(self) -> BoundTensor<'static, A> {
        BoundTensor::owned(self.data.into_owned(), self.axes)
    }

    /// Handles of the physical axes, in physical order.
    #[inline]
    pub fn axes(&self) -> &[AxisHandle] {
        &self.axes
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Returns true if `handle` is bound on this tensor.
    #[inline]
    pub fn contains(&self, handle: AxisHandle) -> bool {
        self.axes.contains(&handle)
    }

    /// Returns the extent of the axis bound to `handle`.
    pub fn extent(&self, handle: AxisHandle) -> Option<usize> {
        self.position(handle).map(|p| self.data.shape()[p])
    }

    fn position(&self, handle: AxisHandle) -> Option<usize> {
        self.axes.iter().position(|&a| a == handle)
    }

    /// Applies `f` to every element.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(A) -> A,
    {
        Self::owned(self.data.mapv(f), self.axes.clone())
    }

    /// Combines two tensors elementwise, aligning shared axes and
    /// broadcasting the others.
    ///
    /// The result carries this tensor's axes followed by any axes only
    /// `other` carries.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> EinfuncResult<Self>
    where
        F: FnMut(A, A) -> A,
    {
        let (data, axes) = zip_aligned(self.data.view(), &self.axes, other.data.view(), &other.axes, f)?;
        Ok(Self::owned(data, axes))
    }

    /// Reduces the given axes away.
    pub fn reduce(&self, mode: ReduceMode, handles: &[AxisHandle]) -> EinfuncResult<Self> {
        self.clone().into_reduced(mode, handles)
    }

    /// Reduces the given axes away, consuming the tensor.
    ///
    /// `prod` reduces one axis at a time, last handle first. The other modes
    /// reduce all handles in one pass.
    pub fn into_reduced(self, mode: ReduceMode, handles: &[AxisHandle]) -> EinfuncResult<Self> {
        if handles.is_empty() {
            return Ok(self);
        }
        if let Some(dup) = first_repeat(handles) {
            return Err(EinfuncError::shape(alloc::format!("{} reduced twice", dup)));
        }

        let positions = handles
            .iter()
            .map(|&h| {
                self.position(h)
                    .ok_or_else(|| EinfuncError::axis_not_bound(alloc::format!("{}", h)))
            })
            .collect::<EinfuncResult<Vec<usize>>>()?;

        let Self { data, mut axes } = self;

        if mode.is_sequential() {
            let mut data = data;
            for &handle in handles.iter().rev() {
                let pos = axes
                    .iter()
                    .position(|&a| a == handle)
                    .ok_or_else(|| EinfuncError::axis_not_bound(alloc::format!("{}", handle)))?;
                data = reduce_axis(data.view(), pos, mode)?.into();
                axes.remove(pos);
            }
            Ok(Self { data, axes })
        } else {
            let data = reduce_axes(data.view(), &positions, mode)?;
            axes.retain(|a| !handles.contains(a));
            Ok(Self::owned(data, axes))
        }
    }

    /// Copies the data into a standard-layout array laid out as `order`.
    pub fn order(&self, order: &[AxisHandle]) -> EinfuncResult<ArrayD<A>> {
        self.check_order(order)?;
        materialize(self.data.view(), &self.axes, order)
    }

    /// Lays the data out as `order`, consuming the tensor.
    ///
    /// `order` must name every bound axis exactly once.
    pub fn into_ordered(self, order: &[AxisHandle]) -> EinfuncResult<ArrayD<A>> {
        self.check_order(order)?;
        materialize(self.data, &self.axes, order)
    }

    fn check_order(&self, order: &[AxisHandle]) -> EinfuncResult<()> {
        let extra: AxisList = self
            .axes
            .iter()
            .copied()
            .filter(|a| !order.contains(a))
            .collect();
        if !extra.is_empty() {
            return Err(EinfuncError::UnexpectedAxes { axes: describe(&extra) });
        }
        if let Some(missing) = order.iter().find(|&&h| !self.contains(h)) {
            return Err(EinfuncError::axis_not_bound(alloc::format!("{}", missing)));
        }
        Ok(())
    }
}

fn describe(handles: &[AxisHandle]) -> alloc::string::String {
    handles
        .iter()
        .map(|h| alloc::format!("{}", h))
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_repeat(handles: &[AxisHandle]) -> Option<AxisHandle> {
    handles
        .iter()
        .enumerate()
        .find(|&(i, h)| handles[..i].contains(h))
        .map(|(_, &h)| h)
}
