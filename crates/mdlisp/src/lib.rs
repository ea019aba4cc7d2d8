//! mdlisp: a Lisp written as Markdown bullet lists.
//!
//! ```text
//! Source → Scanner → Parser → AST ──register──▶ global env ──call main──▶ output lines
//! ```
//!
//! The two host-facing entry points are [`parse`] and [`run`]. [`run`]
//! never returns an error: failures become a single `Error: <message>`
//! line on the sink, exactly as the browser IDE shows them.

use mdlisp_eval::Runner;
use mdlisp_lexer::Scanner;
use mdlisp_parser::Parser;
use mdlisp_types::SourceFile;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use mdlisp_eval::{EvalConfig, EvalError, LineSink, Outcome, COMPLETION_MARKER, NO_ENTRY_POINT};
pub use mdlisp_parser::ParseResult;
pub use mdlisp_types::{Diagnostics, Program};

/// Name used for the source in diagnostics.
const SOURCE_NAME: &str = "main.md";

/// Result of a run with output captured, serializable for hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Whether the run finished without a runtime error.
    pub success: bool,
    /// Every emitted line, including the trailing marker or error line.
    pub output: Vec<String>,
    /// The parsed program, if the run succeeded.
    pub ast: Option<Program>,
    /// Parser diagnostics (tolerated structure problems).
    pub warnings: Diagnostics,
    /// Hex SHA-256 of the source text.
    pub source_hash: String,
}

/// Parse source text into a program plus diagnostics.
pub fn parse(source: &str) -> ParseResult {
    let source_file = SourceFile::new(SOURCE_NAME, source);
    let lines = Scanner::new(&source_file).scan();
    Parser::new(lines, &source_file).parse()
}

/// Parse and run `source` with default limits, sending every line to `sink`.
///
/// Returns the program on success. On a runtime error, emits
/// `Error: <message>` and returns `None`.
pub fn run(source: &str, sink: &mut dyn LineSink) -> Option<Program> {
    run_with_config(source, EvalConfig::default(), sink)
}

/// [`run`] with explicit evaluator limits.
pub fn run_with_config(
    source: &str,
    config: EvalConfig,
    sink: &mut dyn LineSink,
) -> Option<Program> {
    let program = parse(source).program;
    match Runner::new(config).run(&program, &mut *sink) {
        Ok(_) => Some(program),
        Err(e) => {
            sink.emit(&format!("Error: {e}"));
            None
        }
    }
}

/// Run `source` and capture everything into a [`RunResult`].
pub fn run_to_result(source: &str) -> RunResult {
    run_to_result_with_config(source, EvalConfig::default())
}

/// [`run_to_result`] with explicit evaluator limits.
pub fn run_to_result_with_config(source: &str, config: EvalConfig) -> RunResult {
    let ParseResult {
        program,
        diagnostics,
    } = parse(source);

    let mut output = Vec::new();
    let mut sink = |line: &str| output.push(line.to_string());
    let outcome = Runner::new(config).run(&program, &mut sink);

    let (success, ast) = match outcome {
        Ok(_) => (true, Some(program)),
        Err(e) => {
            output.push(format!("Error: {e}"));
            (false, None)
        }
    };

    RunResult {
        success,
        output,
        ast,
        warnings: diagnostics,
        source_hash: source_hash(source),
    }
}

/// Hex SHA-256 of `source`. Identical text always hashes the same.
pub fn source_hash(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}
