//! Einfunc pattern parser.
//!
//! Parses strings like `"b c h w, b w -> b h"` into a structured
//! [`EinfuncNotation`].

use alloc::vec::Vec;

use super::notation::EinfuncNotation;
use super::subscript::Subscript;
use crate::error::{EinfuncError, EinfuncResult};

const ARROW: &str = "->";

/// Parses an einfunc pattern string.
///
/// # Grammar
///
/// ```text
/// pattern  ::= inputs '->' outputs
/// inputs   ::= group (',' group)*
/// outputs  ::= group (',' group)*
/// group    ::= label*            (whitespace separated)
/// label    ::= any whitespace-free token
/// ```
///
/// An empty output group (`"i i ->"`) declares a scalar result.
///
/// # Examples
///
/// ```ignore
/// let notation = parse_pattern("b c h w, b w -> b h")?;
/// let notation = parse_pattern("i i ->")?;               // trace
/// let notation = parse_pattern("i j -> i, j")?;          // two outputs
/// ```
pub fn parse_pattern(pattern: &str) -> EinfuncResult<EinfuncNotation> {
    let arrows = pattern.matches(ARROW).count();
    if arrows == 0 {
        return Err(EinfuncError::malformed(
            pattern,
            "einstein pattern must contain ->",
        ));
    }
    if arrows > 1 {
        return Err(EinfuncError::malformed(
            pattern,
            alloc::format!("expected exactly one ->, found {}", arrows),
        ));
    }

    let Some((inputs_str, outputs_str)) = pattern.split_once(ARROW) else {
        return Err(EinfuncError::malformed(pattern, "missing ->"));
    };

    let inputs = parse_groups(inputs_str);
    let outputs = parse_groups(outputs_str);

    Ok(EinfuncNotation::new(inputs, outputs).with_original(pattern))
}

/// Splits one side of the arrow into comma-separated subscripts.
fn parse_groups(side: &str) -> Vec<Subscript> {
    side.split(',').map(Subscript::parse).collect()
}
