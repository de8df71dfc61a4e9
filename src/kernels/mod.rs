//! CPU kernels behind named-axis tensors.
//!
//! Contains implementations of:
//! - Diagonal extraction (binding with repeated handles)
//! - Broadcast-aligned elementwise combination
//! - Reductions over collapsed axes
//! - Permute/copy (materializing a final axis order)

mod broadcast;
mod diagonal;
mod permute;
mod reduce;

pub use broadcast::{union_layout, zip_aligned};
pub use diagonal::extract_diagonal;
pub use permute::{materialize, permutation};
pub use reduce::{ReduceMode, reduce_axes, reduce_axis};
