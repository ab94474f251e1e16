#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use miette::Diagnostic;
use sya_ir::IrError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TraceError {
    #[error("runtime assertion is known to be false at compile time")]
    #[diagnostic(code(sya::trace))]
    StaticallyFalse,

    #[error("slice step {step} is unsupported; only unit steps are")]
    #[diagnostic(code(sya::trace))]
    UnsupportedSliceStep { step: i128 },

    #[error("a symbolic condition cannot be used as a native boolean")]
    #[diagnostic(
        code(sya::trace),
        help("control flow may not depend on values only known when the generated function runs; assert the condition instead")
    )]
    SymbolicBool,

    #[error("cannot assert `{shape}`")]
    #[diagnostic(
        code(sya::trace),
        help("only comparisons between an argument and a literal, joined by `&&`, can be asserted")
    )]
    UnsupportedAssertion { shape: String },

    #[error("comparing two symbolic byte sequences is not supported")]
    #[diagnostic(code(sya::trace))]
    SymbolicByteComparison,

    #[error("parameter {index} is void")]
    #[diagnostic(code(sya::trace))]
    VoidParameter { index: usize },

    #[error("parameter {index} is not {expected}")]
    #[diagnostic(code(sya::trace))]
    ArgumentKind { index: usize, expected: &'static str },

    #[error("no parameter at index {index}")]
    #[diagnostic(code(sya::trace))]
    ArgumentIndex { index: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ir(#[from] IrError),

    #[error("argument `{name}` outlived the trace that created it")]
    #[diagnostic(code(sya::trace))]
    Detached { name: String },
}
