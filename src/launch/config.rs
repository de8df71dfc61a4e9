//! Configuration for einfunc calls.

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EinfuncError, EinfuncResult};
use crate::kernels::ReduceMode;

/// Configuration options for einfunc execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EinfuncConfig {
    /// How axes missing from an output are collapsed.
    pub reduce: ReduceMode,
    /// Whether the function also receives every axis handle.
    #[serde(rename = "indexs")]
    pub expose_handles: bool,
}

impl EinfuncConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reduction mode.
    pub fn with_reduce(mut self, reduce: ReduceMode) -> Self {
        self.reduce = reduce;
        self
    }

    /// Enables or disables passing axis handles to the function.
    pub fn with_handles(mut self, enabled: bool) -> Self {
        self.expose_handles = enabled;
        self
    }

    /// Builds a config from named options.
    ///
    /// Recognizes `reduce` (a mode name) and `indexs` (a boolean). `reduce`
    /// is checked before `indexs`; other names are ignored.
    pub fn from_options<'a, I>(options: I) -> EinfuncResult<Self>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        let mut reduce = None;
        let mut indexs = None;

        for (name, value) in options {
            match name {
                "reduce" => reduce = Some(value),
                "indexs" => indexs = Some(value),
                other => log::warn!("ignoring unknown einfunc option '{}'", other),
            }
        }

        let mut config = Self::default();

        if let Some(value) = reduce {
            config.reduce = match value {
                OptionValue::Str(mode) => mode.parse()?,
                other => {
                    return Err(EinfuncError::InvalidReductionMode {
                        mode: alloc::format!("{}", other),
                    });
                }
            };
        }

        if let Some(value) = indexs {
            config.expose_handles = match value {
                OptionValue::Bool(flag) => flag,
                other => {
                    return Err(EinfuncError::InvalidOptionType {
                        option: "indexs".into(),
                        expected: "bool",
                        found: other.kind(),
                    });
                }
            };
        }

        Ok(config)
    }
}

/// A named option value in the positional calling convention.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl OptionValue {
    /// Name of the value's type, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Str(_) => "str",
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.into())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<ReduceMode> for OptionValue {
    fn from(value: ReduceMode) -> Self {
        OptionValue::Str(value.name().into())
    }
}
