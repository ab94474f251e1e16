#![forbid(unsafe_code)]

use log::debug;
use miette::Diagnostic;
use sya_core::{Body, CompileOptions, CompiledFunction};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("C backend error: {message}")]
#[diagnostic(code(sya::backend_c))]
#[allow(unused_assignments)]
pub struct CBackendError {
    pub message: String,
}

/// The prelude every generated function relies on.
pub fn emit_runtime_h(options: &CompileOptions) -> String {
    let mut out = String::new();
    out.push_str("#pragma once\n");
    out.push_str("#include <stdint.h>\n\n");
    out.push_str("// Called when a generated function's guard fails. Must not return.\n");
    out.push_str(&format!("void {}(void);\n", options.abort_routine));
    out
}

/// `uint32_t sya_name(uint8_t *arg_0, uint32_t arg_0_len)`
pub fn emit_prototype(f: &CompiledFunction) -> Result<String, CBackendError> {
    check_ident(&f.name, "function name")?;
    check_ident(&f.abort_routine, "abort routine")?;
    let args = if f.arguments.is_empty() {
        "void".to_string()
    } else {
        f.arguments.join(", ")
    };
    Ok(format!("{}({args})", f.return_type.declare(&f.name)))
}

/// The whole function: signature, guard, and the final statement.
pub fn emit_function(f: &CompiledFunction) -> Result<String, CBackendError> {
    let mut out = emit_prototype(f)?;
    out.push_str(" {\n");

    out.push_str("    if (!(");
    out.push_str(&f.guard);
    out.push_str(")) {\n");
    out.push_str("        ");
    out.push_str(&f.abort_routine);
    out.push_str("();\n");
    out.push_str("    }\n");

    match &f.body {
        Body::Return(expr) => {
            out.push_str("    return ");
            out.push_str(expr);
            out.push_str(";\n");
        }
        Body::Eval(expr) => {
            out.push_str("    ");
            out.push_str(expr);
            out.push_str(";\n");
        }
        Body::Empty => {}
    }

    out.push_str("}\n");
    debug!("emitted `{}` ({} bytes)", f.name, out.len());
    Ok(out)
}

fn check_ident(name: &str, what: &str) -> Result<(), CBackendError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CBackendError {
            message: format!("{what} `{name}` is not a valid C identifier"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sya_ir::{BINARY, U32, VOID};

    fn unit(name: &str, arguments: Vec<String>, body: Body) -> CompiledFunction {
        CompiledFunction {
            name: name.to_string(),
            return_type: U32,
            arguments,
            guard: "1".to_string(),
            abort_routine: "abort_assert_fail".to_string(),
            body,
        }
    }

    #[test]
    fn function_template() {
        let f = unit(
            "sya_inc",
            vec![U32.declare("arg_0")],
            Body::Return("(arg_0 + 1)".to_string()),
        );
        assert_eq!(
            emit_function(&f).unwrap(),
            "uint32_t sya_inc(uint32_t arg_0) {\n    if (!(1)) {\n        abort_assert_fail();\n    }\n    return (arg_0 + 1);\n}\n"
        );
    }

    #[test]
    fn pointer_returns_and_empty_parameter_lists() {
        let mut f = unit("sya_none", Vec::new(), Body::Empty);
        assert_eq!(emit_prototype(&f).unwrap(), "uint32_t sya_none(void)");
        f.return_type = BINARY;
        assert_eq!(emit_prototype(&f).unwrap(), "uint8_t *sya_none(void)");
        f.return_type = VOID;
        assert!(emit_function(&f).unwrap().ends_with("    }\n}\n"));
    }

    #[test]
    fn invalid_identifiers_are_rejected() {
        let f = unit("sya_my-fn", Vec::new(), Body::Empty);
        let err = emit_function(&f).unwrap_err();
        assert!(err.message.contains("sya_my-fn"));
    }

    #[test]
    fn runtime_header_declares_the_abort_routine() {
        let h = emit_runtime_h(&CompileOptions::default());
        assert!(h.contains("void abort_assert_fail(void);"));
    }
}
