//! Einfunc execution engine.
//!
//! Orchestrates compiling, binding, invocation, collapse and reordering.

use alloc::vec::Vec;

use ndarray::{ArrayD, CowArray, IxDyn};

use super::config::EinfuncConfig;
use super::output::{EinfuncOutput, IntoOutputs};
use crate::error::{EinfuncError, EinfuncResult};
use crate::kernels::ReduceMode;
use crate::notation::validate_shapes;
use crate::plan::{AxisHandle, AxisRegistry, CompiledPlan, OutputPlan, compile_pattern};
use crate::tensor::{BoundTensor, Element};

/// Applies `function` to named-axis views of `tensors` and collapses the
/// result onto the pattern's outputs.
///
/// The function receives one bound tensor per input group and, when
/// `expose_handles` is set, every axis handle in allocation order (otherwise
/// an empty slice). Inputs without repeated labels are bound as views of
/// `tensors`, not copies.
///
/// # Example
///
/// ```
/// use einfunc::{einfunc, EinfuncConfig, ReduceMode};
/// use ndarray::array;
///
/// let m = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
///
/// // Trace
/// let trace = einfunc(&[m.clone()], "i i ->", |t, _| t[0].clone(), None)?
///     .into_single()?;
/// assert_eq!(trace[[]], 5.0);
///
/// // Row-wise max of a product
/// let best = einfunc(
///     &[m.clone(), m],
///     "i j, i j -> i",
///     |t, _| &t[0] * &t[1],
///     Some(EinfuncConfig::new().with_reduce(ReduceMode::Max)),
/// )?
/// .into_single()?;
/// assert_eq!(best, array![4.0, 16.0].into_dyn());
/// # Ok::<(), einfunc::EinfuncError>(())
/// ```
pub fn einfunc<'a, A, F, R>(
    tensors: &'a [ArrayD<A>],
    pattern: &str,
    function: F,
    config: Option<EinfuncConfig>,
) -> EinfuncResult<EinfuncOutput<A>>
where
    A: Element,
    F: Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> R,
    R: IntoOutputs<'a, A>,
{
    let config = config.unwrap_or_default();

    if tensors.is_empty() {
        // Pattern and function are present; the tensors are not.
        return Err(EinfuncError::TooFewArguments { got: 2 });
    }

    let plan = compile_pattern(pattern, config.expose_handles)?;
    einfunc_with_plan(tensors, &plan, function, &config)
}

/// Executes a pre-compiled plan.
///
/// Useful when the same pattern will be executed many times. Whether handles
/// are passed to `function` follows the plan, and only `config.reduce` is
/// read from the config.
pub fn einfunc_with_plan<'a, A, F, R>(
    tensors: &'a [ArrayD<A>],
    plan: &CompiledPlan,
    function: F,
    config: &EinfuncConfig,
) -> EinfuncResult<EinfuncOutput<A>>
where
    A: Element,
    F: Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> R,
    R: IntoOutputs<'a, A>,
{
    let views = tensors.iter().map(|t| CowArray::from(t.view())).collect();
    run_plan(views, plan, function, config)
}

/// Executes a plan over inputs that are either borrowed or handed over.
///
/// Owned inputs are moved into their bound tensors.
pub(crate) fn run_plan<'a, A, F, R>(
    tensors: Vec<CowArray<'a, A, IxDyn>>,
    plan: &CompiledPlan,
    function: F,
    config: &EinfuncConfig,
) -> EinfuncResult<EinfuncOutput<A>>
where
    A: Element,
    F: Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> R,
    R: IntoOutputs<'a, A>,
{
    log::debug!(
        "einfunc '{}': {} inputs, {} outputs, reduce={}",
        plan.notation(),
        tensors.len(),
        plan.num_outputs(),
        config.reduce
    );

    let bound = bind_inputs(tensors, plan)?;
    let handles = plan.exposed_handles().unwrap_or_default();

    let results = function(&bound, &handles)
        .into_outputs()
        .map_err(|err| relabel_error(err, plan.axes()))?;
    drop(bound);

    if results.len() != plan.num_outputs() {
        return Err(EinfuncError::OutputArityMismatch {
            expected: plan.num_outputs(),
            got: results.len(),
        });
    }

    let arrays = results
        .into_iter()
        .zip(plan.outputs())
        .map(|(tensor, output)| collapse_output(plan, output, tensor, config.reduce))
        .collect::<EinfuncResult<Vec<_>>>()?;

    Ok(match <[ArrayD<A>; 1]>::try_from(arrays) {
        Ok([single]) => EinfuncOutput::Single(single),
        Err(arrays) => EinfuncOutput::Multiple(arrays),
    })
}

/// Binds every tensor to its input group's handle sequence.
fn bind_inputs<'a, A: Element>(
    tensors: Vec<CowArray<'a, A, IxDyn>>,
    plan: &CompiledPlan,
) -> EinfuncResult<Vec<BoundTensor<'a, A>>> {
    if tensors.len() != plan.num_inputs() {
        return Err(EinfuncError::ArityMismatch {
            expected: plan.num_inputs(),
            got: tensors.len(),
        });
    }

    let shapes: Vec<&[usize]> = tensors.iter().map(|t| t.shape()).collect();
    validate_shapes(plan.notation(), &shapes)?;

    tensors
        .into_iter()
        .zip(plan.inputs())
        .map(|(tensor, handles)| BoundTensor::bind(tensor, handles))
        .collect()
}

/// Names axes by label in errors raised inside the user function.
fn relabel_error(err: EinfuncError, registry: &AxisRegistry) -> EinfuncError {
    match err {
        EinfuncError::AxisExtentMismatch { label, expected, got } => {
            EinfuncError::extent(registry.relabel(&label), expected, got)
        }
        EinfuncError::AxisNotBound { axis } => EinfuncError::AxisNotBound {
            axis: registry.relabel(&axis),
        },
        EinfuncError::UnexpectedAxes { axes } => EinfuncError::UnexpectedAxes {
            axes: registry.relabel(&axes),
        },
        other => other,
    }
}

/// Collapses one returned tensor onto its output group.
fn collapse_output<A: Element>(
    plan: &CompiledPlan,
    output: &OutputPlan,
    tensor: BoundTensor<'_, A>,
    mode: ReduceMode,
) -> EinfuncResult<ArrayD<A>> {
    let axes = plan.axes();

    if let Some(&missing) = output.collapse().iter().find(|&&h| !tensor.contains(h)) {
        return Err(EinfuncError::axis_not_bound(axes.describe(&[missing])));
    }

    let reduced = tensor.into_reduced(mode, output.collapse())?;

    let extra: Vec<AxisHandle> = reduced
        .axes()
        .iter()
        .copied()
        .filter(|h| !output.order().contains(h))
        .collect();
    if !extra.is_empty() {
        return Err(EinfuncError::UnexpectedAxes {
            axes: axes.describe(&extra),
        });
    }
    if let Some(&missing) = output.order().iter().find(|&&h| !reduced.contains(h)) {
        return Err(EinfuncError::axis_not_bound(axes.describe(&[missing])));
    }

    reduced.into_ordered(output.order())
}
