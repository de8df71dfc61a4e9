//! Positional calling convention: `tensors..., pattern, function` plus named
//! options.
//!
//! Argument types are only known at runtime here, so every check the typed
//! [`einfunc`](super::einfunc) entry gets from the compiler is done
//! explicitly.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use ndarray::{ArrayD, ArrayViewD, CowArray, IxDyn};

use super::config::{EinfuncConfig, OptionValue};
use super::executor::run_plan;
use super::output::{EinfuncOutput, IntoOutputs};
use crate::error::{EinfuncError, EinfuncResult};
use crate::plan::{AxisHandle, compile_pattern};
use crate::tensor::{BoundTensor, Element};

/// Type-erased user function over tensors borrowing for `'a`.
pub type DynFunction<'a, A> =
    Box<dyn Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> EinfuncResult<Vec<BoundTensor<'a, A>>> + 'a>;

/// One positional argument.
///
/// Tensors are either owned, and moved into their bound tensor, or borrowed
/// for `'a`.
pub enum Argument<'a, A> {
    Tensor(CowArray<'a, A, IxDyn>),
    Text(String),
    Function(DynFunction<'a, A>),
}

impl<'a, A: Element> Argument<'a, A> {
    pub fn tensor(array: impl Into<CowArray<'a, A, IxDyn>>) -> Self {
        Argument::Tensor(array.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Argument::Text(text.into())
    }

    /// Wraps any function the typed entry point accepts.
    pub fn function<F, R>(function: F) -> Self
    where
        F: Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> R + 'a,
        R: IntoOutputs<'a, A>,
    {
        Argument::Function(Box::new(
            move |tensors: &[BoundTensor<'a, A>], handles: &[AxisHandle]| function(tensors, handles).into_outputs(),
        ))
    }
}

impl<A> Argument<'_, A> {
    /// Name of the argument's type, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Tensor(_) => "tensor",
            Argument::Text(_) => "str",
            Argument::Function(_) => "function",
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Argument<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Tensor(array) => f.debug_tuple("Tensor").field(&array.shape()).finish(),
            Argument::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Argument::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl<A> From<ArrayD<A>> for Argument<'_, A> {
    fn from(array: ArrayD<A>) -> Self {
        Argument::Tensor(array.into())
    }
}

impl<'a, A> From<ArrayViewD<'a, A>> for Argument<'a, A> {
    fn from(view: ArrayViewD<'a, A>) -> Self {
        Argument::Tensor(view.into())
    }
}

impl<A> From<&str> for Argument<'_, A> {
    fn from(text: &str) -> Self {
        Argument::Text(text.into())
    }
}

impl<A> From<String> for Argument<'_, A> {
    fn from(text: String) -> Self {
        Argument::Text(text)
    }
}

/// Runs einfunc with positional arguments and named options.
///
/// `args` holds one or more tensors, then the pattern, then the function.
/// Checks run in this order: argument count, pattern position, function
/// position, `reduce` option, `indexs` option, tensor positions, pattern
/// compile, binding.
pub fn einfunc_positional<'o, A, I>(
    args: Vec<Argument<'_, A>>,
    options: I,
) -> EinfuncResult<EinfuncOutput<A>>
where
    A: Element,
    I: IntoIterator<Item = (&'o str, OptionValue)>,
{
    if args.len() < 3 {
        return Err(EinfuncError::TooFewArguments { got: args.len() });
    }

    let mut args = args;
    let pattern_position = args.len() - 2;
    if !matches!(args[pattern_position], Argument::Text(_)) {
        return Err(EinfuncError::PatternType {
            found: args[pattern_position].kind(),
        });
    }

    let function = match args.pop() {
        Some(Argument::Function(function)) => function,
        Some(other) => return Err(EinfuncError::FunctionType { found: other.kind() }),
        None => return Err(EinfuncError::TooFewArguments { got: 0 }),
    };
    let pattern = match args.pop() {
        Some(Argument::Text(pattern)) => pattern,
        Some(other) => return Err(EinfuncError::PatternType { found: other.kind() }),
        None => return Err(EinfuncError::TooFewArguments { got: 1 }),
    };

    let config = EinfuncConfig::from_options(options)?;

    let tensors = args
        .into_iter()
        .enumerate()
        .map(|(position, arg)| match arg {
            Argument::Tensor(array) => Ok(array),
            other => Err(EinfuncError::TensorArgumentType {
                position,
                found: other.kind(),
            }),
        })
        .collect::<EinfuncResult<Vec<_>>>()?;

    let plan = compile_pattern(&pattern, config.expose_handles)?;
    run_plan(tensors, &plan, |bound, handles| function(bound, handles), &config)
}
