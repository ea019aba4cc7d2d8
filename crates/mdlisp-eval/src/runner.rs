//! Definition registry and program runner.
//!
//! Registers every top-level definition in a fresh global environment, then
//! calls `main` with no arguments.

use crate::config::EvalConfig;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use crate::ir::{self, Ir, LambdaForm, ParamSpec};
use crate::primitives;
use crate::sink::LineSink;
use crate::value::Value;
use mdlisp_types::{Node, NodeKind, Program};
use std::rc::Rc;

/// Emitted after `main` returns.
pub const COMPLETION_MARKER: &str = "--- Execution Finished ---";

/// Emitted instead of running anything when no definition is named `main`.
pub const NO_ENTRY_POINT: &str = "No '# main' definition found.";

const ENTRY_POINT: &str = "main";

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `main` returned this value.
    Finished(Value),
    /// There was no `main` to call.
    NoEntryPoint,
}

/// Executes programs. Each [`Runner::run`] starts from an empty global scope.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: EvalConfig,
}

impl Runner {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Register `program`'s definitions and call `main`.
    ///
    /// Printed lines, then the completion marker (or the no-entry-point
    /// notice), go to `sink`. On error nothing further is emitted; lines
    /// printed before the error have already been delivered.
    pub fn run(&self, program: &Program, sink: &mut dyn LineSink) -> EvalResult<Outcome> {
        let global = Environment::global();
        primitives::install(&global);
        let result = self.run_in(program, &global, sink);
        // closures in the global scope capture the global scope
        global.clear();
        result
    }

    fn run_in(
        &self,
        program: &Program,
        global: &Rc<Environment>,
        sink: &mut dyn LineSink,
    ) -> EvalResult<Outcome> {
        let mut evaluator = Evaluator::new(self.config, &mut *sink);
        register_definitions(program, global, &mut evaluator)?;

        let main = match global.lookup(ENTRY_POINT) {
            Ok(main) => main,
            Err(EvalError::UndefinedSymbol(_)) => {
                sink.emit(NO_ENTRY_POINT);
                return Ok(Outcome::NoEntryPoint);
            }
            Err(e) => return Err(e),
        };
        let value = evaluator.apply(&main, Vec::new())?;
        sink.emit(COMPLETION_MARKER);
        Ok(Outcome::Finished(value))
    }
}

/// Bind every definition in `program` to a closure over `global`.
///
/// Everything is registered before anything runs, so definitions may refer
/// to each other (and themselves) in any order. A later definition with the
/// same name replaces an earlier one.
pub fn register_definitions(
    program: &Program,
    global: &Rc<Environment>,
    evaluator: &mut Evaluator<'_>,
) -> EvalResult<()> {
    for def in program.definitions() {
        let Some(form) = compile_definition(def)? else {
            continue;
        };
        let name = def.text().unwrap_or_default();
        let closure = evaluator.eval(&Ir::Lambda(form), global)?;
        global.define(name, closure);
    }
    Ok(())
}

/// Turn a definition into the lambda it denotes, or `None` if it has no body.
///
/// With two or more children the first is the parameter spec and the second
/// the body; anything after is ignored. A single child is the body of a
/// nullary function.
pub fn compile_definition(def: &Node) -> EvalResult<Option<Rc<LambdaForm>>> {
    debug_assert_eq!(def.kind, NodeKind::Definition);
    let (params, body) = match def.children.as_slice() {
        [] => return Ok(None),
        [body] => (ParamSpec::Nullary, body),
        [params, body, ..] => (ir::definition_params(params)?, body),
    };
    let body = ir::transform(body)?;
    Ok(Some(Rc::new(LambdaForm { params, body })))
}
