//! Validation for einfunc patterns and tensor shapes.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

use super::notation::EinfuncNotation;
use crate::error::{EinfuncError, EinfuncResult};

/// Validates a pattern for correctness.
///
/// Checks:
/// - Output labels must appear in at least one input
/// - No label appears twice in the same output
pub fn validate_notation(notation: &EinfuncNotation) -> EinfuncResult<()> {
    validate_output_labels(notation)?;
    validate_output_repeats(notation)?;
    Ok(())
}

/// Validates that all output labels are bound by an input.
fn validate_output_labels(notation: &EinfuncNotation) -> EinfuncResult<()> {
    for output in notation.outputs() {
        for label in output.iter() {
            if !notation.universe().iter().any(|l| l == label) {
                return Err(EinfuncError::unbound_label(label));
            }
        }
    }
    Ok(())
}

/// Validates that each output names a label at most once.
fn validate_output_repeats(notation: &EinfuncNotation) -> EinfuncResult<()> {
    for output in notation.outputs() {
        for label in output.iter() {
            if output.count(label) > 1 {
                return Err(EinfuncError::RepeatedOutputLabel {
                    label: label.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Validates tensor shapes against the pattern.
///
/// Every input must have one dimension per declared label, and every label
/// must bind the same extent wherever it appears (within one tensor for
/// diagonals, across tensors for shared axes).
pub fn validate_shapes(
    notation: &EinfuncNotation,
    shapes: &[&[usize]],
) -> EinfuncResult<ValidationResult> {
    if shapes.len() != notation.num_inputs() {
        return Err(EinfuncError::ArityMismatch {
            expected: notation.num_inputs(),
            got: shapes.len(),
        });
    }

    let extents = build_extent_map(notation, shapes)?;

    let output_shapes = notation
        .outputs()
        .iter()
        .map(|output| {
            output
                .iter()
                .map(|label| {
                    extents
                        .get(label)
                        .copied()
                        .ok_or_else(|| EinfuncError::unbound_label(label))
                })
                .collect::<EinfuncResult<Vec<usize>>>()
        })
        .collect::<EinfuncResult<Vec<_>>>()?;

    Ok(ValidationResult {
        extents,
        output_shapes,
    })
}

/// Result of shape validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Mapping from labels to extents.
    pub extents: HashMap<String, usize>,
    /// Computed shape of each output.
    pub output_shapes: Vec<Vec<usize>>,
}

impl ValidationResult {
    /// Returns the extent bound to a label.
    pub fn extent(&self, label: &str) -> Option<usize> {
        self.extents.get(label).copied()
    }

    /// Number of elements the function sees when all input axes are aligned.
    pub fn aligned_elements(&self) -> u64 {
        self.extents.values().map(|&d| d as u64).product()
    }
}

/// Builds a mapping from labels to extents, checking rank and consistency.
fn build_extent_map(
    notation: &EinfuncNotation,
    shapes: &[&[usize]],
) -> EinfuncResult<HashMap<String, usize>> {
    let mut extents: HashMap<String, usize> = HashMap::new();

    for (position, (input, shape)) in notation.inputs().iter().zip(shapes.iter()).enumerate() {
        if input.len() != shape.len() {
            return Err(EinfuncError::RankMismatch {
                input: position,
                labels: input.to_string(),
                expected: input.len(),
                got: shape.len(),
            });
        }

        for (label, &dim) in input.iter().zip(shape.iter()) {
            if let Some(&existing) = extents.get(label) {
                if existing != dim {
                    return Err(EinfuncError::extent(label, existing, dim));
                }
            } else {
                extents.insert(label.to_string(), dim);
            }
        }
    }

    Ok(extents)
}
