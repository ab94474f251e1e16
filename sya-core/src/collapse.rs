#![forbid(unsafe_code)]

use log::trace;
use sya_ir::{c_literal, BinOp, IntervalSet};
use sya_trace::{Argument, Frame, Render, TraceError};

use crate::CompileError;

/// The values an integer argument may take once every assertion holds.
#[derive(Clone, Debug)]
pub struct ArgumentRange {
    pub argument: Argument,
    /// Everything the argument's type can represent.
    pub possible: IntervalSet,
    /// What is left after folding in the recorded facts.
    pub range: IntervalSet,
}

/// Fold every fact recorded against each integer argument into one interval
/// set, starting from the argument type's representable range.
pub fn collapse(frame: &Frame) -> Result<Vec<ArgumentRange>, CompileError> {
    let mut out = Vec::new();
    for arg in frame.arguments() {
        let Some(possible) = arg.ty().representable_range() else {
            continue;
        };
        let unsatisfiable = || CompileError::Unsatisfiable {
            argument: arg.name().to_string(),
        };

        let mut range = possible.clone();
        for fact in frame.facts(arg) {
            let Some(literal) = fact.operand.as_lit() else {
                return Err(CompileError::NonLiteralOperand {
                    argument: arg.name().to_string(),
                    op: fact.op,
                    operand: fact.operand.render(),
                });
            };
            let (Some(low), Some(high)) = (range.low(), range.high()) else {
                return Err(unsatisfiable());
            };
            let implied = fact.op.implied_range(literal, low, high).ok_or_else(|| {
                TraceError::UnsupportedAssertion {
                    shape: format!("{} {} {literal}", arg.name(), fact.op),
                }
            })?;
            range = &range & &implied;
            trace!("{} {} {literal}: {range}", arg.name(), fact.op);
            if range.is_empty() {
                return Err(unsatisfiable());
            }
        }

        out.push(ArgumentRange {
            argument: arg.clone(),
            possible,
            range,
        });
    }
    Ok(out)
}

/// The smallest condition confining `r.argument` to `r.range`, or `None`
/// when the range is the whole representable range.
pub fn guard_clause(r: &ArgumentRange) -> Option<String> {
    if r.range == r.possible {
        return None;
    }
    let (plow, phigh) = (r.possible.low()?, r.possible.high()?);
    let name = r.argument.name();

    let pieces: Vec<String> = r
        .range
        .elems()
        .iter()
        .map(|&(low, high)| {
            let (lo, hi) = (c_literal(low), c_literal(high));
            match (low != plow, high != phigh) {
                (true, true) => format!("{lo} <= {name} && {name} < {hi}"),
                (true, false) => format!("{name} >= {lo}"),
                _ => format!("{name} < {hi}"),
            }
        })
        .collect();
    BinOp::Or.join(&pieces)
}

/// All per-argument clauses joined with `&&`; `1` when nothing is constrained.
pub fn synthesize_guard(ranges: &[ArgumentRange]) -> String {
    let clauses: Vec<String> = ranges.iter().filter_map(guard_clause).collect();
    BinOp::And.join(&clauses).unwrap_or_else(|| "1".to_string())
}
