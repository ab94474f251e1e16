use sya_ir::{BinOp, ConcreteType, IntegerType, IrError, BINARY, U32, U8};
use sya_trace::{assert_that, Cond, Frame, Int, Param, Render, TraceError};

#[test]
fn arguments_are_named_by_position() {
    let frame = Frame::new(&[U8, BINARY, U32]).unwrap();
    let names: Vec<&str> = frame.arguments().iter().map(|a| a.name()).collect();
    assert_eq!(names, ["arg_0", "arg_1", "arg_1_len", "arg_2"]);

    let decls: Vec<String> = frame.arguments().iter().map(|a| a.declaration()).collect();
    assert_eq!(
        decls,
        ["uint8_t arg_0", "uint8_t *arg_1", "uint32_t arg_1_len", "uint32_t arg_2"]
    );

    assert_eq!(frame.params().len(), 3);
    assert!(matches!(frame.params().get(1), Ok(Param::Bytes(_))));
}

#[test]
fn parameter_kinds_are_checked() {
    let frame = Frame::new(&[U8, BINARY]).unwrap();
    let p = frame.params();
    assert_eq!(
        p.bytes(0).unwrap_err(),
        TraceError::ArgumentKind {
            index: 0,
            expected: "a byte array"
        }
    );
    assert!(matches!(p.int(1), Err(TraceError::ArgumentKind { index: 1, .. })));
    assert_eq!(p.int(7).unwrap_err(), TraceError::ArgumentIndex { index: 7 });
}

#[test]
fn arithmetic_builds_parenthesized_text() {
    let frame = Frame::new(&[U32, U32]).unwrap();
    let x = frame.params().int(0).unwrap();
    let y = frame.params().int(1).unwrap();

    assert_eq!(((&x + 2) * 10 - &y * 2).render(), "(((arg_0 + 2) * 10) - (arg_1 * 2))");
    assert_eq!((3 - &x).render(), "(3 - arg_0)");
    assert_eq!(((&x >> 4) & 0xF).render(), "((arg_0 >> 4) & 15)");
    assert_eq!((&x ^ &y).render(), "(arg_0 ^ arg_1)");
}

#[test]
fn literals_fold_before_they_reach_the_graph() {
    let v = (Int::from(6) * 7) + 0;
    assert_eq!(v.as_lit(), Some(42));
    assert!(!v.is_symbolic());
    assert_eq!(Int::from(1).lt(2).known(), Some(true));
    assert_eq!(Int::from(1).gt(2).known(), Some(false));
}

#[test]
fn reversed_comparison_is_recorded_against_the_argument() {
    let frame = Frame::new(&[U8]).unwrap();
    let x = frame.params().int(0).unwrap();
    assert_that(Int::from(5).lt(&x)).unwrap();

    let facts = frame.facts(&frame.arguments()[0]);
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].op, BinOp::Gt);
    assert_eq!(facts[0].operand.as_lit(), Some(5));
}

#[test]
fn conjunctions_assert_both_sides() {
    let frame = Frame::new(&[U8]).unwrap();
    let x = frame.params().int(0).unwrap();
    (x.ge(10) & x.lt(200)).assert().unwrap();
    let ops: Vec<BinOp> = frame
        .facts(&frame.arguments()[0])
        .iter()
        .map(|f| f.op)
        .collect();
    assert_eq!(ops, [BinOp::Ge, BinOp::Lt]);
}

#[test]
fn disjunctions_and_derived_operands_are_rejected() {
    let frame = Frame::new(&[U8]).unwrap();
    let x = frame.params().int(0).unwrap();
    assert!(matches!(
        assert_that(x.lt(3) | x.gt(9)),
        Err(TraceError::UnsupportedAssertion { .. })
    ));
    assert!(matches!(
        assert_that((&x + 1).lt(3)),
        Err(TraceError::UnsupportedAssertion { .. })
    ));
}

#[test]
fn known_conditions_need_no_record() {
    assert_eq!(assert_that(true), Ok(()));
    assert_eq!(assert_that(false), Err(TraceError::StaticallyFalse));
    assert_eq!(assert_that(Cond::from(true) & Cond::from(false)), Err(TraceError::StaticallyFalse));
}

#[test]
fn symbolic_conditions_are_not_booleans() {
    let frame = Frame::new(&[U8]).unwrap();
    let x = frame.params().int(0).unwrap();
    assert_eq!(bool::try_from(x.eq(1)), Err(TraceError::SymbolicBool));
    assert_eq!(bool::try_from(Int::from(1).eq(1)), Ok(true));
}

#[test]
fn byte_reads_against_literals_are_complex() {
    let frame = Frame::new(&[BINARY]).unwrap();
    let b = frame.params().bytes(0).unwrap();
    assert_that(b.at(2).unwrap().ne(0)).unwrap();

    let complex = frame.complex();
    assert_eq!(complex.len(), 1);
    assert_eq!(complex[0].render(), "((arg_0[2]) != 0)");
}

#[test]
fn length_of_a_literal_window_is_literal() {
    let frame = Frame::new(&[BINARY]).unwrap();
    let b = frame.params().bytes(0).unwrap();
    assert!(b.len().is_symbolic());
    assert_eq!(b.slice(3, 11).unwrap().len().as_lit(), Some(8));
    assert_eq!(b.render(), "arg_0");
}

#[test]
fn signed_length_types_are_rejected() {
    let length = IntegerType::new(32, true).unwrap();
    assert_eq!(
        Frame::new(&[ConcreteType::ByteArray { length }]).unwrap_err(),
        TraceError::Ir(IrError::SignedLengthType)
    );
}
