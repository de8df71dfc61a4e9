//! Named-axis tensors handed to user functions.

mod bound;
mod element;
mod ops;

pub use bound::BoundTensor;
pub use element::Element;
