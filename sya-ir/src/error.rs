#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum IrError {
    #[error("invalid interval [{low}, {high}): low bound must be below high bound")]
    #[diagnostic(code(sya::ir))]
    InvalidInterval { low: i128, high: i128 },

    #[error("unsupported integer width: {bits} bits")]
    #[diagnostic(code(sya::ir), help("supported widths are 8, 16, 32 and 64"))]
    UnsupportedWidth { bits: u32 },

    #[error("byte array length type must be unsigned")]
    #[diagnostic(code(sya::ir))]
    SignedLengthType,

    #[error("unknown type `{name}`")]
    #[diagnostic(
        code(sya::ir),
        help("expected one of u8, s8, u16, s16, u32, s32, u64, s64, binary, void")
    )]
    UnknownType { name: String },
}
