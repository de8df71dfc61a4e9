//! # einfunc
//!
//! Einstein-notation patterns for arbitrary functions.
//!
//! A pattern such as `"b c h w, b w -> b h"` names the axes of every input.
//! Each input is bound to those names, handed to a user function, and the
//! result is collapsed over every axis the output does not name, using a
//! configurable reduction (`sum`, `mean`, `prod`, `max`, `min`). The kept
//! axes are laid out in the output's order.
//!
//! ## Features
//!
//! - Repeated labels in one input take a diagonal (`"i i -> i"`)
//! - Shared labels across inputs broadcast-align by name
//! - Multiple output groups for functions returning several tensors
//! - Bounded LRU cache of compiled patterns (`std` feature)
//!
//! ## Example
//!
//! ```
//! use einfunc::{einfunc, EinfuncConfig, ReduceMode};
//! use ndarray::Array;
//!
//! let images = Array::from_elem((2, 3, 4, 5), 1.0f32).into_dyn();
//! let weights = Array::from_elem((2, 5), 0.5f32).into_dyn();
//!
//! let out = einfunc(
//!     &[images, weights],
//!     "b c h w, b w -> b h",
//!     |t, _| &t[0] * &t[1],
//!     Some(EinfuncConfig::new().with_reduce(ReduceMode::Sum)),
//! )?
//! .into_single()?;
//!
//! assert_eq!(out.shape(), &[2, 4]);
//! assert_eq!(out[[0, 0]], 7.5);
//! # Ok::<(), einfunc::EinfuncError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod kernels;
pub mod launch;
pub mod notation;
pub mod plan;
pub mod tensor;

pub use ndarray;

pub use error::{EinfuncError, EinfuncResult};
pub use kernels::ReduceMode;
#[cfg(feature = "std")]
pub use launch::Einfunc;
pub use launch::{
    Argument, EinfuncConfig, EinfuncOutput, IntoOutputs, OptionValue, einfunc, einfunc_positional,
    einfunc_with_plan,
};
pub use notation::{EinfuncNotation, Subscript, parse_pattern};
#[cfg(feature = "std")]
pub use plan::{CacheStats, PlanCache};
pub use plan::{AxisHandle, CompiledPlan, compile_pattern};
pub use tensor::{BoundTensor, Element};
