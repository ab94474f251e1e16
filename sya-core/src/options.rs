#![forbid(unsafe_code)]

pub const DEFAULT_PREFIX: &str = "sya_";
pub const DEFAULT_ABORT_ROUTINE: &str = "abort_assert_fail";

/// Names baked into every generated function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Prepended to the traced function's name.
    pub prefix: String,
    /// Called with no arguments when the guard fails. Supplied by the C runtime.
    pub abort_routine: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            abort_routine: DEFAULT_ABORT_ROUTINE.to_string(),
        }
    }
}
