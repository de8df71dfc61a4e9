//! Einfunc pattern parsing and representation.
//!
//! Supports the pattern grammar:
//! - Basic: `b c h w, b w -> b h`
//! - Repeated labels (diagonals): `i i -> i`
//! - Scalar output: `index ->`
//! - Multiple outputs: `i j -> i, j`

mod notation;
mod parser;
mod subscript;
pub mod validation;

pub use notation::EinfuncNotation;
pub use parser::parse_pattern;
pub use subscript::Subscript;
pub use validation::{ValidationResult, validate_notation, validate_shapes};
