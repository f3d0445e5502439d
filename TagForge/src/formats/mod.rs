//! Tag file formats
//!
//! `common` holds the primitives shared by both generations, `function` the
//! animation curve codec, and `gen1`/`gen2` the shader tags themselves.

pub mod common;
pub mod function;
pub mod gen1;
pub mod gen2;

use crate::error::Diagnostic;

// Re-export common types for convenience
pub use common::{FourCC, Reference, TagHeader};
pub use function::{CurveKind, CurveOutput, CurveShape, FunctionCurve};
pub use gen1::{ShaderEnvironment, ShaderModel, ShaderV1};
pub use gen2::{Parameter, ShaderTag};

/// A decoded tag together with its header and non-fatal findings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTag<T> {
    pub header: TagHeader,
    pub tag: T,
    pub diagnostics: Vec<Diagnostic>,
}
