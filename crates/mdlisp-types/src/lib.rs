//! Shared types for mdlisp.
//!
//! This crate defines the AST node type, source spans, parse diagnostics,
//! and the JavaScript-compatible number text used by both the parser and
//! the evaluator.

pub mod ast;
mod error;
pub mod number;
mod span;

pub use ast::{Atom, Node, NodeKind, Program};
pub use error::{Diagnostics, ErrorCategory, ErrorCode, MdlispError, MAX_WARNINGS};
pub use span::{SourceFile, Span};
