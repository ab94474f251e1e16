#![forbid(unsafe_code)]

mod collapse;
mod error;
mod function;
mod options;

pub use collapse::{collapse, guard_clause, synthesize_guard, ArgumentRange};
pub use error::CompileError;
pub use function::{compile_function, Body, CompiledFunction};
pub use options::CompileOptions;
