use sya::{assert_that, compile, compile_with, CompileError, CompileOptions, Error, IrError, TraceError};
use sya::{ConcreteType, IntegerType, BINARY, S8, U16, U32, U8, VOID};

fn compile_error(r: Result<String, Error>) -> CompileError {
    match r {
        Err(Error::Compile(e)) => e,
        other => panic!("expected a compile error, got {other:?}"),
    }
}

#[test]
fn increment_needs_no_guard() {
    let c = compile("inc", &[U32], U32, |p| Ok(p.int(0)? + 1)).unwrap();
    assert_eq!(
        c,
        "uint32_t sya_inc(uint32_t arg_0) {\n    if (!(1)) {\n        abort_assert_fail();\n    }\n    return (arg_0 + 1);\n}\n"
    );
}

#[test]
fn byte_arrays_carry_their_length() {
    let c = compile("first", &[BINARY], U8, |p| p.bytes(0)?.at(0)).unwrap();
    assert!(
        c.starts_with("uint8_t sya_first(uint8_t *arg_0, uint32_t arg_0_len) {"),
        "{c}"
    );
    assert!(c.contains("if (!(arg_0_len >= 1))"), "{c}");
    assert!(c.contains("return (arg_0[0]);"), "{c}");
}

#[test]
fn asserted_bounds_become_the_guard() {
    let c = compile("bounded", &[U8], U16, |p| {
        let x = p.int(0)?;
        assert_that(x.ge(10))?;
        assert_that(x.lt(200))?;
        Ok(x * 2)
    })
    .unwrap();
    assert!(c.contains("if (!(10 <= arg_0 && arg_0 < 200))"), "{c}");
}

#[test]
fn reversed_comparisons_record_the_same_fact() {
    let lhs = compile("a", &[U8], U8, |p| {
        let x = p.int(0)?;
        assert_that(x.gt(5))?;
        Ok(x)
    })
    .unwrap();
    let rhs = compile("a", &[U8], U8, |p| {
        let x = p.int(0)?;
        assert_that(sya::Int::from(5).lt(&x))?;
        Ok(x)
    })
    .unwrap();
    assert_eq!(lhs, rhs);
    assert!(lhs.contains("arg_0 >= 6"), "{lhs}");
}

#[test]
fn several_arguments_are_guarded_together() {
    let c = compile("pair", &[S8, U8], S8, |p| {
        let (x, y) = (p.int(0)?, p.int(1)?);
        assert_that(x.ge(0))?;
        assert_that(y.ne(0))?;
        Ok(x / y)
    })
    .unwrap();
    assert!(c.contains("if (!((arg_0 >= 0 && arg_1 >= 1)))"), "{c}");
    assert!(c.contains("return (arg_0 / arg_1);"), "{c}");
}

#[test]
fn void_functions_evaluate_without_returning() {
    let c = compile("touch", &[U32], VOID, |p| {
        assert_that(p.int(0)?.lt(4))?;
        Ok(())
    })
    .unwrap();
    assert_eq!(
        c,
        "void sya_touch(uint32_t arg_0) {\n    if (!(arg_0 < 4)) {\n        abort_assert_fail();\n    }\n}\n"
    );
}

#[test]
fn options_rename_prefix_and_abort_routine() {
    let options = CompileOptions {
        prefix: "fw_".to_string(),
        abort_routine: "trap".to_string(),
    };
    let c = compile_with(&options, "id", &[U8], U8, |p| p.int(0)).unwrap();
    assert!(c.starts_with("uint8_t fw_id(uint8_t arg_0)"), "{c}");
    assert!(c.contains("        trap();\n"), "{c}");
}

#[test]
fn bad_abort_routine_is_a_backend_error() {
    let options = CompileOptions {
        abort_routine: "not valid".to_string(),
        ..CompileOptions::default()
    };
    let r = compile_with(&options, "id", &[U8], U8, |p| p.int(0));
    assert!(matches!(r, Err(Error::Backend(_))), "{r:?}");
}

#[test]
fn stepped_slices_fail() {
    let e = compile_error(compile("s", &[BINARY], BINARY, |p| {
        p.bytes(0)?.slice_step(0, 8, 2)
    }));
    assert!(matches!(
        e,
        CompileError::Trace(TraceError::UnsupportedSliceStep { step: 2 })
    ));
}

#[test]
fn comparing_symbolic_views_fails() {
    let e = compile_error(compile("cmp", &[BINARY, BINARY], U8, |p| {
        p.bytes(0)?.eq_view(&p.bytes(1)?)
    }));
    assert!(matches!(
        e,
        CompileError::Trace(TraceError::SymbolicByteComparison)
    ));
}

#[test]
fn branching_on_a_symbolic_condition_fails() {
    let e = compile_error(compile("branch", &[U32], U32, |p| {
        let x = p.int(0)?;
        if bool::try_from(x.gt(3))? {
            Ok(x)
        } else {
            Ok(x + 1)
        }
    }));
    assert!(matches!(e, CompileError::Trace(TraceError::SymbolicBool)));
}

#[test]
fn byte_content_constraints_are_unsupported() {
    let e = compile_error(compile("magic", &[BINARY], U8, |p| {
        let x = p.bytes(0)?;
        assert_that(x.at(0)?.eq(0xEB))?;
        x.at(1)
    }));
    assert!(
        matches!(&e, CompileError::ComplexAssertions { count: 1, first } if first == "((arg_0[0]) == 235)"),
        "{e:?}"
    );
}

#[test]
fn literal_byte_comparison_pins_the_length() {
    let c = compile("is_elf", &[BINARY], U8, |p| {
        let x = p.bytes(0)?;
        let head = x.slice(0, 4)?;
        Ok(head.eq_bytes(b"\x7fELF")?)
    })
    .unwrap();
    assert!(c.contains("arg_0_len >= 4"), "{c}");
    assert!(
        c.contains("return (((((arg_0[0]) == 127) && ((arg_0[1]) == 69)) && ((arg_0[2]) == 76)) && ((arg_0[3]) == 70));"),
        "{c}"
    );
}

#[test]
fn contradictions_are_reported_per_argument() {
    let e = compile_error(compile("never", &[U8], U8, |p| {
        let x = p.int(0)?;
        assert_that(x.eq(5))?;
        assert_that(x.ne(5))?;
        Ok(x)
    }));
    assert!(matches!(e, CompileError::Unsatisfiable { argument } if argument == "arg_0"));
}

#[test]
fn missing_and_mismatched_returns() {
    let e = compile_error(compile("nothing", &[U8], U8, |_| Ok(())));
    assert!(matches!(e, CompileError::MissingReturnValue { .. }));

    let e = compile_error(compile("wrong", &[BINARY], U8, |p| p.bytes(0)));
    assert!(matches!(e, CompileError::ReturnMismatch { found: "a byte array", .. }), "{e:?}");
}

#[test]
fn void_parameters_are_rejected() {
    let e = compile_error(compile("v", &[VOID], VOID, |_| Ok(())));
    assert!(matches!(
        e,
        CompileError::Trace(TraceError::VoidParameter { index: 0 })
    ));
}

#[test]
fn byte_array_lengths_must_be_unsigned() {
    let signed = ConcreteType::ByteArray {
        length: IntegerType::new(32, true).unwrap(),
    };
    let e = compile_error(compile("sl", &[signed], U8, |p| p.bytes(0)?.at(0)));
    assert!(
        matches!(e, CompileError::Trace(TraceError::Ir(IrError::SignedLengthType))),
        "{e:?}"
    );
}
