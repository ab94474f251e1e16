#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use miette::Diagnostic;
use sya_ir::{BinOp, ConcreteType};
use sya_trace::TraceError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Trace(#[from] TraceError),

    #[error("no way to satisfy the constraints on `{argument}`")]
    #[diagnostic(code(sya::collapse))]
    Unsatisfiable { argument: String },

    #[error("`{argument} {op} {operand}` is not yet handled: only literal operands can be collapsed")]
    #[diagnostic(code(sya::collapse))]
    NonLiteralOperand {
        argument: String,
        op: BinOp,
        operand: String,
    },

    #[error("{count} complex assertion(s) cannot be checked, first: `{first}`")]
    #[diagnostic(
        code(sya::compile),
        help("constraints spanning several arguments or byte contents are not supported")
    )]
    ComplexAssertions { count: usize, first: String },

    #[error("function returns {expected} but the traced value is {found}")]
    #[diagnostic(code(sya::compile))]
    ReturnMismatch {
        expected: ConcreteType,
        found: &'static str,
    },

    #[error("function returns {expected} but the traced function produced no value")]
    #[diagnostic(code(sya::compile))]
    MissingReturnValue { expected: ConcreteType },
}
