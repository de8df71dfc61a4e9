//! Element types accepted by einfunc.

use core::fmt::Debug;

use num_traits::Float;

/// Scalar type a bound tensor can hold.
///
/// Implemented for every floating point type usable with `ndarray`:
/// `f32`, `f64`, and the `half` types.
pub trait Element: Float + Debug + Send + Sync + 'static {}

impl<T> Element for T where T: Float + Debug + Send + Sync + 'static {}
