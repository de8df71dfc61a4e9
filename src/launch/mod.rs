//! Launch module for einfunc calls.
//!
//! Provides the high-level API: configuration, the typed and positional entry
//! points, and the cached engine.

mod args;
mod config;
#[cfg(feature = "std")]
mod engine;
mod executor;
mod output;

pub use args::{Argument, DynFunction, einfunc_positional};
pub use config::{EinfuncConfig, OptionValue};
#[cfg(feature = "std")]
pub use engine::Einfunc;
pub use executor::{einfunc, einfunc_with_plan};
pub use output::{EinfuncOutput, IntoOutputs};
