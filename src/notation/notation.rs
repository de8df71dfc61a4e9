//! Complete einfunc pattern representation.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::subscript::Subscript;

/// Complete parsed einfunc pattern.
///
/// Contains the input subscripts, one or more output subscripts, and the
/// label universe derived from the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EinfuncNotation {
    /// Input tensor subscripts.
    inputs: Vec<Subscript>,
    /// Output subscripts, one per value returned by the function.
    outputs: Vec<Subscript>,
    /// Distinct input labels in first-appearance order.
    universe: Vec<String>,
    /// Original pattern string (if available).
    original: Option<String>,
}

impl EinfuncNotation {
    /// Creates a new notation from parsed components.
    pub fn new(inputs: Vec<Subscript>, outputs: Vec<Subscript>) -> Self {
        let mut universe: Vec<String> = Vec::new();
        for input in &inputs {
            for label in input {
                if !universe.contains(label) {
                    universe.push(label.clone());
                }
            }
        }

        Self {
            inputs,
            outputs,
            universe,
            original: None,
        }
    }

    /// Sets the original pattern string.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Returns the original pattern string, if recorded.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Returns the input subscripts.
    #[inline]
    pub fn inputs(&self) -> &[Subscript] {
        &self.inputs
    }

    /// Returns the output subscripts.
    #[inline]
    pub fn outputs(&self) -> &[Subscript] {
        &self.outputs
    }

    /// Returns the number of input tensors.
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of output groups.
    #[inline]
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Returns the distinct input labels in first-appearance order.
    #[inline]
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    /// Returns true if this is a unary operation (single input).
    #[inline]
    pub fn is_unary(&self) -> bool {
        self.inputs.len() == 1
    }

    /// Returns true if more than one output group is declared.
    #[inline]
    pub fn is_multi_output(&self) -> bool {
        self.outputs.len() > 1
    }

    /// Returns true if the given output is a scalar (empty subscript).
    pub fn is_scalar_output(&self, output: usize) -> bool {
        self.outputs.get(output).is_some_and(Subscript::is_empty)
    }

    /// Returns the labels collapsed for the given output, in universe order.
    pub fn collapse_labels(&self, output: usize) -> Vec<&str> {
        let Some(kept) = self.outputs.get(output) else {
            return Vec::new();
        };
        self.universe
            .iter()
            .map(String::as_str)
            .filter(|label| !kept.contains(label))
            .collect()
    }

    /// Returns which inputs contain a given label.
    pub fn inputs_containing(&self, label: &str) -> Vec<usize> {
        self.inputs
            .iter()
            .enumerate()
            .filter_map(|(i, s)| if s.contains(label) { Some(i) } else { None })
            .collect()
    }
}

impl fmt::Display for EinfuncNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", input)?;
        }
        write!(f, "->")?;
        for (i, output) in self.outputs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", output)?;
        }
        Ok(())
    }
}
