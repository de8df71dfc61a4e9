//! Compiled plan for einfunc patterns.

use alloc::vec::Vec;

use super::axis::{AxisHandle, AxisList, AxisRegistry};
use crate::error::{EinfuncError, EinfuncResult};
use crate::notation::{EinfuncNotation, parse_pattern, validate_notation};

/// Collapse and ordering instructions for one output group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    /// Axes reduced away, in allocation order.
    collapse: AxisList,
    /// Axes kept, in the declared output order.
    order: AxisList,
}

impl OutputPlan {
    /// Returns the axes to collapse.
    #[inline]
    pub fn collapse(&self) -> &[AxisHandle] {
        &self.collapse
    }

    /// Returns the final axis order.
    #[inline]
    pub fn order(&self) -> &[AxisHandle] {
        &self.order
    }

    /// Returns true if the output is a scalar.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.order.is_empty()
    }
}

/// Immutable result of compiling a pattern.
///
/// Holds the handle sequence for every input, and the collapse/order lists for
/// every output. A plan touches no tensor data, so it is safe to share and
/// cache by pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPlan {
    notation: EinfuncNotation,
    axes: AxisRegistry,
    inputs: Vec<AxisList>,
    outputs: Vec<OutputPlan>,
    expose_handles: bool,
}

impl CompiledPlan {
    /// Builds a plan from a validated notation.
    pub fn from_notation(notation: EinfuncNotation, expose_handles: bool) -> EinfuncResult<Self> {
        let axes = AxisRegistry::allocate(notation.universe().iter().map(|s| s.as_str()));

        let lookup = |label: &str| {
            axes.handle(label)
                .ok_or_else(|| EinfuncError::unbound_label(label))
        };

        let inputs = notation
            .inputs()
            .iter()
            .map(|input| input.iter().map(lookup).collect::<EinfuncResult<AxisList>>())
            .collect::<EinfuncResult<Vec<_>>>()?;

        let outputs = (0..notation.num_outputs())
            .map(|i| {
                let collapse = notation
                    .collapse_labels(i)
                    .into_iter()
                    .map(lookup)
                    .collect::<EinfuncResult<AxisList>>()?;
                let order = notation.outputs()[i]
                    .iter()
                    .map(lookup)
                    .collect::<EinfuncResult<AxisList>>()?;
                Ok(OutputPlan { collapse, order })
            })
            .collect::<EinfuncResult<Vec<_>>>()?;

        Ok(Self {
            notation,
            axes,
            inputs,
            outputs,
            expose_handles,
        })
    }

    /// Returns the parsed notation this plan was built from.
    #[inline]
    pub fn notation(&self) -> &EinfuncNotation {
        &self.notation
    }

    /// Returns the label/handle registry.
    #[inline]
    pub fn axes(&self) -> &AxisRegistry {
        &self.axes
    }

    /// Returns the handle sequence for every input.
    #[inline]
    pub fn inputs(&self) -> &[AxisList] {
        &self.inputs
    }

    /// Returns the per-output instructions.
    #[inline]
    pub fn outputs(&self) -> &[OutputPlan] {
        &self.outputs
    }

    /// Returns the number of input groups.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of output groups.
    #[inline]
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Returns true if the plan was compiled to expose its handles.
    #[inline]
    pub fn exposes_handles(&self) -> bool {
        self.expose_handles
    }

    /// Returns all universe handles in allocation order, if exposed.
    pub fn exposed_handles(&self) -> Option<AxisList> {
        self.expose_handles.then(|| self.axes.handles())
    }
}

/// Compiles a pattern into an execution plan.
///
/// This is a pure function of the pattern text and the `expose_handles` flag.
pub fn compile_pattern(pattern: &str, expose_handles: bool) -> EinfuncResult<CompiledPlan> {
    let notation = parse_pattern(pattern)?;
    validate_notation(&notation)?;

    let plan = CompiledPlan::from_notation(notation, expose_handles)?;
    log::debug!(
        "compiled '{}' into {} inputs, {} outputs over {} axes",
        pattern,
        plan.num_inputs(),
        plan.num_outputs(),
        plan.axes().len()
    );
    Ok(plan)
}
