//! Runtime error types for the mdlisp evaluator.

use thiserror::Error;

/// Everything that can stop a run after parsing.
///
/// Messages follow the wording the browser IDE has always shown after
/// `Error: `.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A node that cannot be turned into IR (e.g. a bare definition).
    #[error("Unexpected node type in transform: {0}")]
    StructuralParse(String),

    #[error("Undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// The operator of an application evaluated to a non-function.
    #[error("Attempt to call non-function: {0}")]
    NotCallable(String),

    /// `car`/`cdr` given something other than a cons cell. Carries the primitive name.
    #[error("{0}: expected a cons cell")]
    NotAPair(&'static str),

    /// Gas or call-depth limit reached.
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A primitive received operands it cannot combine.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
