//! Normalization of user-function results.

use alloc::vec;
use alloc::vec::Vec;

use ndarray::ArrayD;

use crate::error::{EinfuncError, EinfuncResult};
use crate::tensor::{BoundTensor, Element};

/// Values a user function may return.
///
/// Every return value is normalized to a list of bound tensors, which is then
/// paired positionally with the pattern's output groups. `'a` is the lifetime
/// of the call's input data; returned tensors may still borrow from it.
pub trait IntoOutputs<'a, A> {
    fn into_outputs(self) -> EinfuncResult<Vec<BoundTensor<'a, A>>>;
}

impl<'a, A: Element> IntoOutputs<'a, A> for BoundTensor<'a, A> {
    fn into_outputs(self) -> EinfuncResult<Vec<BoundTensor<'a, A>>> {
        Ok(vec![self])
    }
}

impl<'a, A: Element> IntoOutputs<'a, A> for Vec<BoundTensor<'a, A>> {
    fn into_outputs(self) -> EinfuncResult<Vec<BoundTensor<'a, A>>> {
        Ok(self)
    }
}

impl<'a, A: Element, T: IntoOutputs<'a, A>> IntoOutputs<'a, A> for EinfuncResult<T> {
    fn into_outputs(self) -> EinfuncResult<Vec<BoundTensor<'a, A>>> {
        self?.into_outputs()
    }
}

macro_rules! impl_tuple_outputs {
    ($($name:ident),+) => {
        impl<'a, A: Element> IntoOutputs<'a, A> for ($(impl_tuple_outputs!(@ty $name, 'a, A),)+) {
            #[allow(non_snake_case)]
            fn into_outputs(self) -> EinfuncResult<Vec<BoundTensor<'a, A>>> {
                let ($($name,)+) = self;
                Ok(vec![$($name),+])
            }
        }
    };
    (@ty $name:ident, $lt:lifetime, $a:ident) => { BoundTensor<$lt, $a> };
}

impl_tuple_outputs!(T0, T1);
impl_tuple_outputs!(T0, T1, T2);
impl_tuple_outputs!(T0, T1, T2, T3);

/// Result of an einfunc call.
#[derive(Debug, Clone, PartialEq)]
pub enum EinfuncOutput<A> {
    /// The pattern declares a single output group.
    Single(ArrayD<A>),
    /// The pattern declares several output groups, in declaration order.
    Multiple(Vec<ArrayD<A>>),
}

impl<A> EinfuncOutput<A> {
    /// Returns the single output, failing if the pattern declared several.
    pub fn into_single(self) -> EinfuncResult<ArrayD<A>> {
        match self {
            EinfuncOutput::Single(array) => Ok(array),
            EinfuncOutput::Multiple(arrays) => Err(EinfuncError::OutputArityMismatch {
                expected: 1,
                got: arrays.len(),
            }),
        }
    }

    /// Returns every output in declaration order.
    pub fn into_vec(self) -> Vec<ArrayD<A>> {
        match self {
            EinfuncOutput::Single(array) => vec![array],
            EinfuncOutput::Multiple(arrays) => arrays,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EinfuncOutput::Single(_) => 1,
            EinfuncOutput::Multiple(arrays) => arrays.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, EinfuncOutput::Multiple(_))
    }
}
