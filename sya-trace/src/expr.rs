#![forbid(unsafe_code)]

use std::fmt;
use std::rc::{Rc, Weak};

use sya_ir::{BinOp, ConcreteType};

use crate::frame::FactLog;
use crate::value::Int;

/// Anything that can be spelled in the generated C.
pub trait Render {
    fn render(&self) -> String;
}

/// A parameter of the function being generated.
///
/// Arguments only hold a weak link back to the fact log of the [`Frame`]
/// that created them; the frame is the sole owner.
///
/// [`Frame`]: crate::Frame
#[derive(Clone)]
pub struct Argument {
    index: usize,
    name: String,
    ty: ConcreteType,
    log: Weak<FactLog>,
}

impl Argument {
    pub(crate) fn new(index: usize, name: String, ty: ConcreteType, log: &Rc<FactLog>) -> Self {
        Self {
            index,
            name,
            ty,
            log: Rc::downgrade(log),
        }
    }

    /// Position among all arguments, hidden length arguments included.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ConcreteType {
        self.ty
    }

    pub(crate) fn log(&self) -> Option<Rc<FactLog>> {
        self.log.upgrade()
    }

    /// `uint32_t arg_0`, `uint8_t *arg_1`.
    pub fn declaration(&self) -> String {
        self.ty.declare(&self.name)
    }
}

impl PartialEq for Argument {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Weak::ptr_eq(&self.log, &other.log)
    }
}

impl Eq for Argument {}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// A node of the traced expression graph. Nodes are immutable once built.
#[derive(Clone, Debug)]
pub enum Expr {
    Argument(Argument),

    /// Arithmetic, bitwise, comparison or logical operation. Operand order is
    /// the order the traced code wrote them in.
    Binary { op: BinOp, lhs: Int, rhs: Int },

    /// The byte at offset `key` of `source`. `source` is always a byte-array argument.
    ByteIndex { source: Rc<Expr>, key: Int },

    /// A window onto `base`, which is always a byte-array argument.
    ByteSlice { base: Rc<Expr>, start: Int, length: Int },
}

impl Expr {
    pub fn as_argument(&self) -> Option<&Argument> {
        match self {
            Expr::Argument(arg) => Some(arg),
            _ => None,
        }
    }

    /// The argument this node ultimately reads from, following the left
    /// operand of binary nodes and the source of byte nodes.
    pub fn root_argument(&self) -> Option<&Argument> {
        match self {
            Expr::Argument(arg) => Some(arg),
            Expr::Binary { lhs, rhs, .. } => lhs
                .as_expr()
                .and_then(|e| e.root_argument())
                .or_else(|| rhs.as_expr().and_then(|e| e.root_argument())),
            Expr::ByteIndex { source, .. } => source.root_argument(),
            Expr::ByteSlice { base, .. } => base.root_argument(),
        }
    }
}

impl Render for Expr {
    fn render(&self) -> String {
        match self {
            Expr::Argument(arg) => arg.name.clone(),
            Expr::Binary { op, lhs, rhs } => op.render(&lhs.render(), &rhs.render()),
            Expr::ByteIndex { source, key } => {
                format!("({}[{}])", source.render(), key.render())
            }
            Expr::ByteSlice { base, start, .. } => match start {
                Int::Lit(0) => base.render(),
                _ => format!("({} + {})", base.render(), start.render()),
            },
        }
    }
}
