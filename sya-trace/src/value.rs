#![forbid(unsafe_code)]

use std::ops;
use std::rc::Rc;

use sya_ir::{c_literal, BinOp};

use crate::bytes::Bytes;
use crate::expr::{Expr, Render};
use crate::{frame, TraceError};

/// An integer that is either known now or only when the generated function runs.
///
/// Arithmetic on two literals folds immediately; anything touching a symbolic
/// operand builds a new [`Expr::Binary`] node.
#[derive(Clone, Debug)]
pub enum Int {
    Lit(i128),
    Sym(Rc<Expr>),
}

fn fold(op: BinOp, a: i128, b: i128) -> Option<i128> {
    match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => a.checked_div(b),
        BinOp::Shl => u32::try_from(b).ok().and_then(|s| a.checked_shl(s)),
        BinOp::Shr => u32::try_from(b).ok().and_then(|s| a.checked_shr(s)),
        BinOp::BitOr => Some(a | b),
        BinOp::BitXor => Some(a ^ b),
        BinOp::BitAnd => Some(a & b),
        _ => None,
    }
}

fn holds(op: BinOp, a: i128, b: i128) -> bool {
    match op {
        BinOp::Lt => a < b,
        BinOp::Gt => a > b,
        BinOp::Le => a <= b,
        BinOp::Ge => a >= b,
        BinOp::Eq => a == b,
        BinOp::Ne => a != b,
        _ => unreachable!("{op} is not a comparison"),
    }
}

#[allow(clippy::should_implement_trait)]
impl Int {
    pub fn as_lit(&self) -> Option<i128> {
        match self {
            Int::Lit(v) => Some(*v),
            Int::Sym(_) => None,
        }
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Int::Lit(_) => None,
            Int::Sym(e) => Some(e.as_ref()),
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Int::Sym(_))
    }

    pub(crate) fn binary(op: BinOp, lhs: Int, rhs: Int) -> Int {
        debug_assert!(!op.is_comparison() && !op.is_logical());
        if let (Int::Lit(a), Int::Lit(b)) = (&lhs, &rhs) {
            if let Some(v) = fold(op, *a, *b) {
                return Int::Lit(v);
            }
        }
        Int::Sym(Rc::new(Expr::Binary { op, lhs, rhs }))
    }

    fn compare(&self, op: BinOp, rhs: Int) -> Cond {
        match (self, &rhs) {
            (Int::Lit(a), Int::Lit(b)) => Cond::Known(holds(op, *a, *b)),
            _ => Cond::Sym(Rc::new(Expr::Binary {
                op,
                lhs: self.clone(),
                rhs,
            })),
        }
    }

    pub fn lt(&self, rhs: impl Into<Int>) -> Cond {
        self.compare(BinOp::Lt, rhs.into())
    }

    pub fn le(&self, rhs: impl Into<Int>) -> Cond {
        self.compare(BinOp::Le, rhs.into())
    }

    pub fn gt(&self, rhs: impl Into<Int>) -> Cond {
        self.compare(BinOp::Gt, rhs.into())
    }

    pub fn ge(&self, rhs: impl Into<Int>) -> Cond {
        self.compare(BinOp::Ge, rhs.into())
    }

    pub fn eq(&self, rhs: impl Into<Int>) -> Cond {
        self.compare(BinOp::Eq, rhs.into())
    }

    pub fn ne(&self, rhs: impl Into<Int>) -> Cond {
        self.compare(BinOp::Ne, rhs.into())
    }
}

impl Render for Int {
    fn render(&self) -> String {
        match self {
            Int::Lit(v) => c_literal(*v),
            Int::Sym(e) => e.render(),
        }
    }
}

impl From<&Int> for Int {
    fn from(v: &Int) -> Self {
        v.clone()
    }
}

macro_rules! int_from_literal {
    ($($t:ty),*) => {$(
        impl From<$t> for Int {
            fn from(v: $t) -> Self {
                Int::Lit(v as i128)
            }
        }
    )*};
}

int_from_literal!(i8, i16, i32, i64, i128, u8, u16, u32, u64, usize);

macro_rules! int_binop {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => {$(
        impl<T: Into<Int>> ops::$trait<T> for Int {
            type Output = Int;

            fn $method(self, rhs: T) -> Int {
                Int::binary($op, self, rhs.into())
            }
        }

        impl<T: Into<Int>> ops::$trait<T> for &Int {
            type Output = Int;

            fn $method(self, rhs: T) -> Int {
                Int::binary($op, self.clone(), rhs.into())
            }
        }

        // Only `i32` on the left, so unsuffixed literals like `3 - x` infer.
        int_binop!(@lhs $trait :: $method => $op; i32);
    )*};
    (@lhs $trait:ident :: $method:ident => $op:expr; $($t:ty),*) => {$(
        impl ops::$trait<Int> for $t {
            type Output = Int;

            fn $method(self, rhs: Int) -> Int {
                Int::binary($op, Int::from(self), rhs)
            }
        }

        impl ops::$trait<&Int> for $t {
            type Output = Int;

            fn $method(self, rhs: &Int) -> Int {
                Int::binary($op, Int::from(self), rhs.clone())
            }
        }
    )*};
}

int_binop! {
    Add::add => BinOp::Add,
    Sub::sub => BinOp::Sub,
    Mul::mul => BinOp::Mul,
    Div::div => BinOp::Div,
    Shl::shl => BinOp::Shl,
    Shr::shr => BinOp::Shr,
    BitOr::bitor => BinOp::BitOr,
    BitXor::bitxor => BinOp::BitXor,
    BitAnd::bitand => BinOp::BitAnd,
}

/// The outcome of a comparison.
///
/// There is no infallible way to turn a `Cond` into a `bool`. A symbolic
/// condition can only be asserted; traced code cannot branch on it.
#[derive(Clone, Debug)]
pub enum Cond {
    Known(bool),
    Sym(Rc<Expr>),
}

impl Cond {
    /// The value, if it was decided while tracing.
    pub fn known(&self) -> Option<bool> {
        match self {
            Cond::Known(b) => Some(*b),
            Cond::Sym(_) => None,
        }
    }

    pub fn and(self, other: Cond) -> Cond {
        match (self, other) {
            (Cond::Known(false), _) | (_, Cond::Known(false)) => Cond::Known(false),
            (Cond::Known(true), c) | (c, Cond::Known(true)) => c,
            (Cond::Sym(a), Cond::Sym(b)) => Cond::logical(BinOp::And, a, b),
        }
    }

    pub fn or(self, other: Cond) -> Cond {
        match (self, other) {
            (Cond::Known(true), _) | (_, Cond::Known(true)) => Cond::Known(true),
            (Cond::Known(false), c) | (c, Cond::Known(false)) => c,
            (Cond::Sym(a), Cond::Sym(b)) => Cond::logical(BinOp::Or, a, b),
        }
    }

    fn logical(op: BinOp, a: Rc<Expr>, b: Rc<Expr>) -> Cond {
        Cond::Sym(Rc::new(Expr::Binary {
            op,
            lhs: Int::Sym(a),
            rhs: Int::Sym(b),
        }))
    }

    /// Turn the condition into a compile-time fact. See [`assert_that`].
    ///
    /// [`assert_that`]: crate::assert_that
    pub fn assert(self) -> Result<(), TraceError> {
        frame::assert_that(self)
    }
}

impl From<bool> for Cond {
    fn from(b: bool) -> Self {
        Cond::Known(b)
    }
}

impl TryFrom<Cond> for bool {
    type Error = TraceError;

    fn try_from(c: Cond) -> Result<bool, TraceError> {
        c.known().ok_or(TraceError::SymbolicBool)
    }
}

impl ops::BitAnd for Cond {
    type Output = Cond;

    fn bitand(self, rhs: Cond) -> Cond {
        self.and(rhs)
    }
}

impl ops::BitOr for Cond {
    type Output = Cond;

    fn bitor(self, rhs: Cond) -> Cond {
        self.or(rhs)
    }
}

impl Render for Cond {
    fn render(&self) -> String {
        match self {
            Cond::Known(true) => "1".to_string(),
            Cond::Known(false) => "0".to_string(),
            Cond::Sym(e) => e.render(),
        }
    }
}

/// What a traced function hands back.
#[derive(Clone, Debug)]
pub enum Value {
    Unit,
    Int(Int),
    Bytes(Bytes),
    Cond(Cond),
}

impl Value {
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Unit => "nothing",
            Value::Int(_) => "an integer",
            Value::Bytes(_) => "a byte array",
            Value::Cond(_) => "a condition",
        }
    }
}

impl Render for Value {
    fn render(&self) -> String {
        match self {
            Value::Unit => String::new(),
            Value::Int(i) => i.render(),
            Value::Bytes(b) => b.render(),
            Value::Cond(c) => c.render(),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<Int> for Value {
    fn from(v: Int) -> Self {
        Value::Int(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<Cond> for Value {
    fn from(v: Cond) -> Self {
        Value::Cond(v)
    }
}
