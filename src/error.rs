//! Error types for einfunc operations.

use alloc::string::String;

/// Errors that can occur while compiling a pattern or evaluating an einfunc call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EinfuncError {
    /// The pattern does not contain exactly one `->` separator.
    #[cfg_attr(feature = "std", error("malformed pattern '{pattern}': {message}"))]
    MalformedPattern { pattern: String, message: String },

    /// An output label does not appear in any input group.
    #[cfg_attr(feature = "std", error("output label '{label}' not found in any input"))]
    UnboundLabel { label: String },

    /// An output group names the same label twice.
    #[cfg_attr(feature = "std", error("output label '{label}' appears more than once in the same output"))]
    RepeatedOutputLabel { label: String },

    /// Fewer than three positional arguments (tensors, pattern, function).
    #[cfg_attr(feature = "std", error("einfunc takes at least 3 arguments (one or more tensors, the pattern, the function), got {got}"))]
    TooFewArguments { got: usize },

    /// The second-to-last positional argument is not a pattern string.
    #[cfg_attr(feature = "std", error("the second to last argument must be the pattern string, got {found}"))]
    PatternType { found: &'static str },

    /// The last positional argument is not a callable.
    #[cfg_attr(feature = "std", error("the last argument must be a function, got {found}"))]
    FunctionType { found: &'static str },

    /// A leading positional argument is not a tensor.
    #[cfg_attr(feature = "std", error("argument {position} must be a tensor, got {found}"))]
    TensorArgumentType { position: usize, found: &'static str },

    /// The `reduce` option is not one of the recognized modes.
    #[cfg_attr(feature = "std", error("'{mode}' is not one of the allowed reduction types: sum, prod, mean, min, max"))]
    InvalidReductionMode { mode: String },

    /// An option has the wrong value type.
    #[cfg_attr(feature = "std", error("option '{option}' must be a {expected}, got {found}"))]
    InvalidOptionType {
        option: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Number of tensors does not match the number of input groups.
    #[cfg_attr(feature = "std", error("pattern declares {expected} inputs, got {got} tensors"))]
    ArityMismatch { expected: usize, got: usize },

    /// A tensor's rank does not match the labels declared for it.
    #[cfg_attr(feature = "std", error("input {input} labelled '{labels}' expects {expected} dims, tensor has {got}"))]
    RankMismatch {
        input: usize,
        labels: String,
        expected: usize,
        got: usize,
    },

    /// A label binds to inconsistent extents.
    #[cfg_attr(feature = "std", error("extent mismatch for axis '{label}': expected {expected}, got {got}"))]
    AxisExtentMismatch {
        label: String,
        expected: usize,
        got: usize,
    },

    /// The function returned a different number of tensors than output groups.
    #[cfg_attr(feature = "std", error("pattern declares {expected} outputs, function returned {got}"))]
    OutputArityMismatch { expected: usize, got: usize },

    /// The reduction cannot be applied.
    #[cfg_attr(feature = "std", error("unsupported reduction '{mode}': {message}"))]
    UnsupportedReduction { mode: String, message: String },

    /// A tensor lacks an axis it is asked to reduce or order.
    #[cfg_attr(feature = "std", error("axis '{axis}' is not bound on the tensor"))]
    AxisNotBound { axis: String },

    /// A result keeps axes that its output group does not declare.
    #[cfg_attr(feature = "std", error("result has axes [{axes}] not declared by its output"))]
    UnexpectedAxes { axes: String },

    /// Shape computation error.
    #[cfg_attr(feature = "std", error("shape error: {message}"))]
    ShapeError { message: String },
}

impl EinfuncError {
    pub fn malformed(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn unbound_label(label: impl Into<String>) -> Self {
        Self::UnboundLabel {
            label: label.into(),
        }
    }

    pub fn extent(label: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::AxisExtentMismatch {
            label: label.into(),
            expected,
            got,
        }
    }

    pub fn axis_not_bound(axis: impl Into<String>) -> Self {
        Self::AxisNotBound { axis: axis.into() }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::ShapeError {
            message: message.into(),
        }
    }
}

/// Result type for einfunc operations.
pub type EinfuncResult<T> = core::result::Result<T, EinfuncError>;
