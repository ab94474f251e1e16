#![forbid(unsafe_code)]

//! Write a function once against symbolic parameters; get back a standalone C
//! function that checks its own preconditions.
//!
//! ```no_run
//! use sya::{compile, U32};
//!
//! let c = compile("inc", &[U32], U32, |p| Ok(p.int(0)? + 1))?;
//! assert!(c.contains("return (arg_0 + 1);"));
//! # Ok::<(), sya::Error>(())
//! ```

pub mod config;
pub mod demos;

use miette::Diagnostic;
use thiserror::Error;

pub use sya_backend_c::{emit_runtime_h, CBackendError};
pub use sya_core::{CompileError, CompileOptions, CompiledFunction};
pub use sya_ir::{ConcreteType, CATALOG, IntegerType, IrError, BINARY, S16, S32, S64, S8, U16, U32, U64, U8, VOID};
pub use sya_trace::{assert_that, Bytes, Cond, Int, Params, TraceError, Value};

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Backend(#[from] CBackendError),
}

/// A host function that can be traced into C.
pub trait Kernel {
    /// Unprefixed name of the generated function.
    fn name(&self) -> &'static str;

    fn params(&self) -> Vec<ConcreteType>;

    fn returns(&self) -> ConcreteType {
        VOID
    }

    fn trace(&self, params: Params<'_>) -> Result<Value, TraceError>;
}

/// Compile with the default prefix and abort routine.
pub fn compile<F, V>(
    name: &str,
    params: &[ConcreteType],
    return_type: ConcreteType,
    f: F,
) -> Result<String, Error>
where
    F: FnOnce(Params<'_>) -> Result<V, TraceError>,
    V: Into<Value>,
{
    compile_with(&CompileOptions::default(), name, params, return_type, f)
}

pub fn compile_with<F, V>(
    options: &CompileOptions,
    name: &str,
    params: &[ConcreteType],
    return_type: ConcreteType,
    f: F,
) -> Result<String, Error>
where
    F: FnOnce(Params<'_>) -> Result<V, TraceError>,
    V: Into<Value>,
{
    let unit = sya_core::compile_function(options, name, params, return_type, f)?;
    Ok(sya_backend_c::emit_function(&unit)?)
}

pub fn compile_kernel(options: &CompileOptions, kernel: &dyn Kernel) -> Result<String, Error> {
    compile_with(
        options,
        kernel.name(),
        &kernel.params(),
        kernel.returns(),
        |p| kernel.trace(p),
    )
}
