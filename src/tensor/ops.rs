//! Arithmetic operators on bound tensors.
//!
//! Operands are aligned by axis handle and broadcast along axes only one side
//! carries.
//!
//! # Panics
//!
//! Like `ndarray`'s operators, these panic when a shared axis has different
//! extents on each side. Use [`BoundTensor::zip_with`] to get an error
//! instead.

use core::ops::{Add, Div, Mul, Sub};

use super::{BoundTensor, Element};

macro_rules! impl_binary_op {
    ($trt:ident, $mth:ident, $op:tt) => {
        impl<'a, A: Element> $trt<&BoundTensor<'a, A>> for &BoundTensor<'a, A> {
            type Output = BoundTensor<'a, A>;

            fn $mth(self, rhs: &BoundTensor<'a, A>) -> BoundTensor<'a, A> {
                match self.zip_with(rhs, |a, b| a $op b) {
                    Ok(out) => out,
                    Err(err) => panic!("bound tensor {}: {:?}", stringify!($mth), err),
                }
            }
        }

        impl<'a, A: Element> $trt<BoundTensor<'a, A>> for BoundTensor<'a, A> {
            type Output = BoundTensor<'a, A>;

            fn $mth(self, rhs: BoundTensor<'a, A>) -> BoundTensor<'a, A> {
                (&self).$mth(&rhs)
            }
        }

        impl<'a, A: Element> $trt<&BoundTensor<'a, A>> for BoundTensor<'a, A> {
            type Output = BoundTensor<'a, A>;

            fn $mth(self, rhs: &BoundTensor<'a, A>) -> BoundTensor<'a, A> {
                (&self).$mth(rhs)
            }
        }

        impl<'a, A: Element> $trt<BoundTensor<'a, A>> for &BoundTensor<'a, A> {
            type Output = BoundTensor<'a, A>;

            fn $mth(self, rhs: BoundTensor<'a, A>) -> BoundTensor<'a, A> {
                self.$mth(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, +);
impl_binary_op!(Sub, sub, -);
impl_binary_op!(Mul, mul, *);
impl_binary_op!(Div, div, /);
