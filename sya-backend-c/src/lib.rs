#![forbid(unsafe_code)]

mod emit;

pub use emit::{emit_function, emit_prototype, emit_runtime_h, CBackendError};
