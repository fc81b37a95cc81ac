//! Errors that can occur while executing a grammar.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Execution fuel exhausted (too many matcher steps).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (rules nested too deeply, e.g. left recursion).
    #[error("runtime recursion limit exceeded")]
    RecursionLimitExceeded,
}
