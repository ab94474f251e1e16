#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use sya_ir::{BinOp, ConcreteType};

use crate::bytes::Bytes;
use crate::expr::{Argument, Expr, Render};
use crate::value::{Cond, Int};
use crate::TraceError;

/// `argument <op> operand`, recorded against one argument.
#[derive(Clone, Debug)]
pub struct Fact {
    pub op: BinOp,
    pub operand: Int,
}

/// An asserted comparison that does not reduce to a range on one argument,
/// such as a constraint on the content of a byte array.
#[derive(Clone, Debug)]
pub struct ComplexFact {
    pub op: BinOp,
    pub lhs: Int,
    pub rhs: Int,
}

impl Render for ComplexFact {
    fn render(&self) -> String {
        self.op.render(&self.lhs.render(), &self.rhs.render())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FactLog {
    facts: RefCell<Vec<Vec<Fact>>>,
    complex: RefCell<Vec<ComplexFact>>,
}

impl FactLog {
    fn record(&self, arg: &Argument, fact: Fact) {
        debug!("fact: {} {} {}", arg.name(), fact.op, fact.operand.render());
        let mut facts = self.facts.borrow_mut();
        if facts.len() <= arg.index() {
            facts.resize_with(arg.index() + 1, Vec::new);
        }
        facts[arg.index()].push(fact);
    }

    fn record_complex(&self, fact: ComplexFact) {
        debug!("complex fact: {}", fact.render());
        self.complex.borrow_mut().push(fact);
    }
}

/// A declared parameter as the traced function sees it.
#[derive(Clone, Debug)]
pub enum Param {
    Int(Int),
    Bytes(Bytes),
}

/// The traced function's view of its parameters, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct Params<'a> {
    params: &'a [Param],
}

impl<'a> Params<'a> {
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&'a Param, TraceError> {
        self.params
            .get(index)
            .ok_or(TraceError::ArgumentIndex { index })
    }

    pub fn int(&self, index: usize) -> Result<Int, TraceError> {
        match self.get(index)? {
            Param::Int(i) => Ok(i.clone()),
            Param::Bytes(_) => Err(TraceError::ArgumentKind {
                index,
                expected: "an integer",
            }),
        }
    }

    pub fn bytes(&self, index: usize) -> Result<Bytes, TraceError> {
        match self.get(index)? {
            Param::Bytes(b) => Ok(b.clone()),
            Param::Int(_) => Err(TraceError::ArgumentKind {
                index,
                expected: "a byte array",
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Param> {
        self.params.iter()
    }
}

/// One compilation unit's arguments and everything asserted about them.
///
/// Each byte-array parameter also allocates a hidden unsigned length
/// argument named `<name>_len`, placed right after it.
#[derive(Debug)]
pub struct Frame {
    arguments: Vec<Argument>,
    params: Vec<Param>,
    log: Rc<FactLog>,
}

impl Frame {
    pub fn new(types: &[ConcreteType]) -> Result<Self, TraceError> {
        let log = Rc::new(FactLog::default());
        let mut arguments = Vec::new();
        let mut params = Vec::with_capacity(types.len());

        for (i, ty) in types.iter().enumerate() {
            let name = format!("arg_{i}");
            match ty {
                ConcreteType::Integer(_) => {
                    let arg = Argument::new(arguments.len(), name, *ty, &log);
                    params.push(Param::Int(Int::Sym(Rc::new(Expr::Argument(arg.clone())))));
                    arguments.push(arg);
                }
                ConcreteType::ByteArray { length } => {
                    ConcreteType::byte_array(*length)?;
                    let data = Argument::new(arguments.len(), name.clone(), *ty, &log);
                    let len = Argument::new(
                        arguments.len() + 1,
                        format!("{name}_len"),
                        ConcreteType::Integer(*length),
                        &log,
                    );
                    params.push(Param::Bytes(Bytes::argument(
                        Rc::new(Expr::Argument(data.clone())),
                        Int::Sym(Rc::new(Expr::Argument(len.clone()))),
                    )));
                    arguments.push(data);
                    arguments.push(len);
                }
                ConcreteType::Void => return Err(TraceError::VoidParameter { index: i }),
            }
        }

        log.facts.borrow_mut().resize_with(arguments.len(), Vec::new);
        let frame = Self {
            arguments,
            params,
            log,
        };

        for param in &frame.params {
            if let Param::Bytes(b) = param {
                assert_that(b.len().ge(0))?;
            }
        }
        debug!(
            "frame: {} parameter(s), {} argument(s)",
            frame.params.len(),
            frame.arguments.len()
        );
        Ok(frame)
    }

    pub fn params(&self) -> Params<'_> {
        Params {
            params: &self.params,
        }
    }

    /// All arguments in signature order, hidden length arguments included.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Facts recorded against `arg`, in the order they were asserted.
    pub fn facts(&self, arg: &Argument) -> Vec<Fact> {
        self.log
            .facts
            .borrow()
            .get(arg.index())
            .cloned()
            .unwrap_or_default()
    }

    pub fn complex(&self) -> Vec<ComplexFact> {
        self.log.complex.borrow().clone()
    }
}

/// The only way a condition becomes a compile-time fact.
///
/// A known-true condition is a no-op and a known-false one fails. A symbolic
/// comparison between an argument and another operand is recorded against the
/// argument, reversing the operator when the argument sits on the right.
/// Conjunctions assert both sides. Comparisons of a byte read against a
/// literal are kept as complex facts. Every other shape is rejected.
pub fn assert_that(cond: impl Into<Cond>) -> Result<(), TraceError> {
    match cond.into() {
        Cond::Known(true) => Ok(()),
        Cond::Known(false) => Err(TraceError::StaticallyFalse),
        Cond::Sym(expr) => assert_expr(&expr),
    }
}

fn assert_expr(expr: &Expr) -> Result<(), TraceError> {
    let unsupported = || TraceError::UnsupportedAssertion {
        shape: expr.render(),
    };
    let Expr::Binary { op, lhs, rhs } = expr else {
        return Err(unsupported());
    };

    if *op == BinOp::And {
        for side in [lhs, rhs] {
            match side.as_expr() {
                Some(e) => assert_expr(e)?,
                None => return Err(unsupported()),
            }
        }
        return Ok(());
    }

    let Some(reversed) = op.reverse() else {
        return Err(unsupported());
    };

    match (lhs.as_expr(), rhs.as_expr()) {
        (Some(Expr::Argument(arg)), _) => record(
            arg,
            Fact {
                op: *op,
                operand: rhs.clone(),
            },
        ),
        (_, Some(Expr::Argument(arg))) => record(
            arg,
            Fact {
                op: reversed,
                operand: lhs.clone(),
            },
        ),
        (Some(read @ Expr::ByteIndex { .. }), None) | (None, Some(read @ Expr::ByteIndex { .. })) => {
            let arg = read.root_argument().ok_or_else(unsupported)?;
            let log = arg.log().ok_or_else(|| TraceError::Detached {
                name: arg.name().to_string(),
            })?;
            log.record_complex(ComplexFact {
                op: *op,
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            });
            Ok(())
        }
        _ => Err(unsupported()),
    }
}

fn record(arg: &Argument, fact: Fact) -> Result<(), TraceError> {
    let log = arg.log().ok_or_else(|| TraceError::Detached {
        name: arg.name().to_string(),
    })?;
    log.record(arg, fact);
    Ok(())
}
