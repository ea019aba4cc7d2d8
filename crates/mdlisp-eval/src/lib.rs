//! mdlisp tree-walking evaluator.
//!
//! ```text
//! AST definition ──transform──▶ IR (once) ──eval (frame stack)──▶ Value / printed lines
//! ```
//!
//! The [`Runner`] owns one global [`Environment`], installs the primitive
//! library, registers every definition as a closure and calls `main`.

mod config;
pub mod env;
mod error;
pub mod evaluator;
pub mod ir;
pub mod primitives;
pub mod runner;
mod sink;
pub mod value;

pub use config::EvalConfig;
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use ir::{Application, IfForm, Ir, LambdaForm, ParamSpec};
pub use runner::{Outcome, Runner, COMPLETION_MARKER, NO_ENTRY_POINT};
pub use sink::LineSink;
pub use value::{Closure, Primitive, Value};
