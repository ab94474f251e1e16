#![forbid(unsafe_code)]

use log::debug;
use sya_ir::ConcreteType;
use sya_trace::{Frame, Params, Render, TraceError, Value};

use crate::collapse::{collapse, synthesize_guard};
use crate::{CompileError, CompileOptions};

/// The final statement of a generated function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// `return <expr>;`
    Return(String),
    /// `<expr>;` for void functions that still compute something.
    Eval(String),
    /// Void function with nothing left to evaluate.
    Empty,
}

/// A traced, collapsed and frozen compilation unit, ready to be printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledFunction {
    /// Prefixed name.
    pub name: String,
    pub return_type: ConcreteType,
    /// Parameter declarations in signature order, hidden lengths included.
    pub arguments: Vec<String>,
    /// The precondition, `1` when there is none.
    pub guard: String,
    pub abort_routine: String,
    pub body: Body,
}

/// Trace `f` once against placeholders for `params`, collapse what it
/// asserted into a guard, and freeze the result.
///
/// Any failure aborts the whole compilation; nothing partial is returned.
pub fn compile_function<F, V>(
    options: &CompileOptions,
    name: &str,
    params: &[ConcreteType],
    return_type: ConcreteType,
    f: F,
) -> Result<CompiledFunction, CompileError>
where
    F: FnOnce(Params<'_>) -> Result<V, TraceError>,
    V: Into<Value>,
{
    debug!("compiling `{name}` with {} parameter(s)", params.len());
    let frame = Frame::new(params)?;
    let value: Value = f(frame.params())?.into();

    let ranges = collapse(&frame)?;
    let complex = frame.complex();
    if let Some(first) = complex.first() {
        return Err(CompileError::ComplexAssertions {
            count: complex.len(),
            first: first.render(),
        });
    }
    let guard = synthesize_guard(&ranges);
    debug!("guard for `{name}`: {guard}");

    let body = match (&return_type, &value) {
        (ConcreteType::Void, Value::Unit) => Body::Empty,
        (ConcreteType::Void, v) => Body::Eval(v.render()),
        (_, Value::Unit) => {
            return Err(CompileError::MissingReturnValue {
                expected: return_type,
            })
        }
        (ConcreteType::Integer(_), Value::Int(_) | Value::Cond(_))
        | (ConcreteType::ByteArray { .. }, Value::Bytes(_)) => Body::Return(value.render()),
        (_, v) => {
            return Err(CompileError::ReturnMismatch {
                expected: return_type,
                found: v.describe(),
            })
        }
    };

    Ok(CompiledFunction {
        name: format!("{}{name}", options.prefix),
        return_type,
        arguments: frame.arguments().iter().map(|a| a.declaration()).collect(),
        guard,
        abort_routine: options.abort_routine.clone(),
        body,
    })
}
