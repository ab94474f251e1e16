#![forbid(unsafe_code)]

pub mod error;
pub mod intset;
pub mod ops;
pub mod types;

pub use error::IrError;
pub use intset::IntervalSet;
pub use ops::*;
pub use types::*;
