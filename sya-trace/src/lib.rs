#![forbid(unsafe_code)]

//! Symbolic tracing.
//!
//! A traced function receives placeholder values instead of numbers. Every
//! operation on them builds an expression node, and every assertion made
//! against an argument is recorded on the [`Frame`] that owns it.

mod bytes;
mod error;
mod expr;
mod frame;
mod value;

pub use bytes::Bytes;
pub use error::TraceError;
pub use expr::{Argument, Expr, Render};
pub use frame::{assert_that, ComplexFact, Fact, Frame, Param, Params};
pub use value::{Cond, Int, Value};
