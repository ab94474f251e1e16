#![forbid(unsafe_code)]

use std::fmt;

use crate::IntervalSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Shl,
    Shr,
    BitOr,
    BitXor,
    BitAnd,

    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,

    And,
    Or,
}

/// One row of the operator table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operator {
    pub op: BinOp,
    pub name: &'static str,
    /// Spelling in the generated C.
    pub symbol: &'static str,
    /// For comparisons: the operator that holds after swapping operands.
    pub reverse: Option<BinOp>,
}

pub static OPERATORS: [Operator; 17] = [
    Operator { op: BinOp::Add, name: "add", symbol: "+", reverse: None },
    Operator { op: BinOp::Sub, name: "sub", symbol: "-", reverse: None },
    Operator { op: BinOp::Mul, name: "mul", symbol: "*", reverse: None },
    Operator { op: BinOp::Div, name: "div", symbol: "/", reverse: None },
    Operator { op: BinOp::Shl, name: "shl", symbol: "<<", reverse: None },
    Operator { op: BinOp::Shr, name: "shr", symbol: ">>", reverse: None },
    Operator { op: BinOp::BitOr, name: "bitor", symbol: "|", reverse: None },
    Operator { op: BinOp::BitXor, name: "bitxor", symbol: "^", reverse: None },
    Operator { op: BinOp::BitAnd, name: "bitand", symbol: "&", reverse: None },
    Operator { op: BinOp::Lt, name: "lt", symbol: "<", reverse: Some(BinOp::Gt) },
    Operator { op: BinOp::Gt, name: "gt", symbol: ">", reverse: Some(BinOp::Lt) },
    Operator { op: BinOp::Le, name: "le", symbol: "<=", reverse: Some(BinOp::Ge) },
    Operator { op: BinOp::Ge, name: "ge", symbol: ">=", reverse: Some(BinOp::Le) },
    Operator { op: BinOp::Eq, name: "eq", symbol: "==", reverse: Some(BinOp::Eq) },
    Operator { op: BinOp::Ne, name: "ne", symbol: "!=", reverse: Some(BinOp::Ne) },
    Operator { op: BinOp::And, name: "and", symbol: "&&", reverse: None },
    Operator { op: BinOp::Or, name: "or", symbol: "||", reverse: None },
];

impl BinOp {
    pub fn info(self) -> &'static Operator {
        // The table is laid out in declaration order.
        &OPERATORS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn is_comparison(self) -> bool {
        self.info().reverse.is_some()
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    /// The comparison that holds with operands swapped (`<` becomes `>`).
    /// `None` for anything that is not a comparison.
    pub fn reverse(self) -> Option<BinOp> {
        self.info().reverse
    }

    /// Values `v` within `[low, high)` for which `v <op> literal` holds.
    ///
    /// Exact over the given bounds, not an approximation. `None` when the
    /// operator is not a comparison.
    pub fn implied_range(self, literal: i128, low: i128, high: i128) -> Option<IntervalSet> {
        let next = literal.saturating_add(1);
        let set = match self {
            BinOp::Eq => IntervalSet::range(literal, next)
                .intersection(&IntervalSet::range(low, high)),
            BinOp::Ne => IntervalSet::range(low, literal.min(high))
                .union(&IntervalSet::range(next.max(low), high)),
            BinOp::Lt => IntervalSet::range(low, literal.min(high)),
            BinOp::Le => IntervalSet::range(low, next.min(high)),
            BinOp::Gt => IntervalSet::range(next.max(low), high),
            BinOp::Ge => IntervalSet::range(literal.max(low), high),
            _ => return None,
        };
        Some(set)
    }

    /// `(a <op> b)`.
    pub fn render(self, a: &str, b: &str) -> String {
        format!("({a} {} {b})", self.symbol())
    }

    /// Left-to-right parenthesized chain of already-rendered operands:
    /// `((a op b) op c)`. A single operand comes back unchanged.
    pub fn join<S: AsRef<str>>(self, parts: &[S]) -> Option<String> {
        let (first, rest) = parts.split_first()?;
        Some(
            rest.iter()
                .fold(first.as_ref().to_string(), |acc, part| self.render(&acc, part.as_ref())),
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
