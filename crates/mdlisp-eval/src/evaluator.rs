//! Core IR evaluator.
//!
//! Evaluation runs on an explicit stack of [`Frame`]s rather than the host
//! stack, so recursion depth in a program is bounded by
//! [`EvalConfig::max_call_depth`] alone.

use crate::config::EvalConfig;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::ir::{Application, IfForm, Ir};
use crate::sink::LineSink;
use crate::value::{Closure, Value};
use std::rc::Rc;

/// The evaluator: walks IR against an environment chain.
///
/// Holds the run's limits and counters and the sink that `print` writes to.
/// Environments are passed in, never owned, so one evaluator can serve a
/// whole run.
pub struct Evaluator<'s> {
    config: EvalConfig,
    /// Steps taken so far.
    gas: u64,
    /// Closure calls currently in progress.
    depth: usize,
    sink: &'s mut dyn LineSink,
}

/// Work suspended while an operand is evaluated.
enum Frame {
    /// Waiting for the test of an `if`.
    Branch {
        form: Rc<IfForm>,
        env: Rc<Environment>,
    },
    /// Collecting the operator, then each argument, of an application.
    Operands {
        form: Rc<Application>,
        env: Rc<Environment>,
        values: Vec<Value>,
    },
    /// A closure body is running.
    Return,
}

/// What the machine does next.
enum Control {
    Eval(Ir, Rc<Environment>),
    Return(Value),
}

impl<'s> Evaluator<'s> {
    pub fn new(config: EvalConfig, sink: &'s mut dyn LineSink) -> Self {
        Self {
            config,
            gas: 0,
            depth: 0,
            sink,
        }
    }

    /// Steps consumed so far.
    pub fn gas_used(&self) -> u64 {
        self.gas
    }

    /// Consume one unit of gas. Returns error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.config.gas_limit {
            Err(EvalError::ResourceExhausted(format!(
                "gas limit of {} steps reached",
                self.config.gas_limit
            )))
        } else {
            Ok(())
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Entry points
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate `ir` in `env`.
    pub fn eval(&mut self, ir: &Ir, env: &Rc<Environment>) -> EvalResult<Value> {
        self.drive(Control::Eval(ir.clone(), Rc::clone(env)), Vec::new())
    }

    /// Call a function value with already-evaluated arguments.
    pub fn apply(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult<Value> {
        let mut stack = Vec::new();
        let control = self.call(callee.clone(), args, &mut stack)?;
        self.drive(control, stack)
    }

    /// Run until `stack` is empty. The call depth is restored on every exit.
    fn drive(&mut self, mut control: Control, mut stack: Vec<Frame>) -> EvalResult<Value> {
        let running = stack.iter().filter(|f| matches!(f, Frame::Return)).count();
        let base_depth = self.depth - running;
        let result = loop {
            let step = match control {
                Control::Eval(ir, env) => self.step(ir, env, &mut stack),
                Control::Return(value) => match stack.pop() {
                    None => break Ok(value),
                    Some(frame) => self.resume(frame, value, &mut stack),
                },
            };
            match step {
                Ok(next) => control = next,
                Err(e) => break Err(e),
            }
        };
        self.depth = base_depth;
        result
    }

    // ══════════════════════════════════════════════════════════════════════
    // Steps
    // ══════════════════════════════════════════════════════════════════════

    /// Begin evaluating one expression.
    fn step(&mut self, ir: Ir, env: Rc<Environment>, stack: &mut Vec<Frame>) -> EvalResult<Control> {
        self.tick()?;
        let value = match ir {
            Ir::Nil => Value::Nil,
            Ir::Number(n) => Value::Number(n),
            Ir::String(s) => Value::String(s),
            Ir::Symbol(name) => env.lookup(&name)?,
            Ir::Lambda(form) => Value::Closure(Rc::new(Closure { form, env })),
            Ir::If(form) => {
                let test = form.test.clone();
                stack.push(Frame::Branch {
                    form,
                    env: Rc::clone(&env),
                });
                return Ok(Control::Eval(test, env));
            }
            Ir::Apply(form) => {
                let operator = form.operator.clone();
                stack.push(Frame::Operands {
                    values: Vec::with_capacity(form.args.len() + 1),
                    form,
                    env: Rc::clone(&env),
                });
                return Ok(Control::Eval(operator, env));
            }
        };
        Ok(Control::Return(value))
    }

    /// Hand `value` to the frame that was waiting for it.
    fn resume(&mut self, frame: Frame, value: Value, stack: &mut Vec<Frame>) -> EvalResult<Control> {
        match frame {
            Frame::Branch { form, env } => {
                let branch = if value.is_truthy() {
                    Some(&form.then)
                } else {
                    form.otherwise.as_ref()
                };
                Ok(match branch {
                    Some(ir) => Control::Eval(ir.clone(), env),
                    None => Control::Return(Value::Nil),
                })
            }
            Frame::Operands {
                form,
                env,
                mut values,
            } => {
                // the operator is checked before any argument runs
                if values.is_empty() && !value.is_callable() {
                    return Err(EvalError::NotCallable(operator_text(&form.operator)));
                }
                values.push(value);
                match form.args.get(values.len() - 1).cloned() {
                    Some(arg) => {
                        stack.push(Frame::Operands {
                            form,
                            env: Rc::clone(&env),
                            values,
                        });
                        Ok(Control::Eval(arg, env))
                    }
                    None => {
                        let args = values.split_off(1);
                        let callee = values.swap_remove(0);
                        self.call(callee, args, stack)
                    }
                }
            }
            Frame::Return => {
                self.depth -= 1;
                Ok(Control::Return(value))
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Application
    // ══════════════════════════════════════════════════════════════════════

    fn call(&mut self, callee: Value, args: Vec<Value>, stack: &mut Vec<Frame>) -> EvalResult<Control> {
        match callee {
            Value::Primitive(p) => Ok(Control::Return((p.func)(&mut *self.sink, args)?)),
            Value::Closure(closure) => {
                if self.depth >= self.config.max_call_depth {
                    return Err(EvalError::ResourceExhausted(format!(
                        "maximum call depth of {} exceeded",
                        self.config.max_call_depth
                    )));
                }
                let local = Environment::child(&closure.env);
                closure.form.params.bind(&local, args);
                stack.push(Frame::Return);
                self.depth += 1;
                Ok(Control::Eval(closure.form.body.clone(), local))
            }
            other => Err(EvalError::NotCallable(other.to_string())),
        }
    }
}

/// Operator as shown in a not-callable error: names quoted, other forms as
/// S-expressions.
fn operator_text(operator: &Ir) -> String {
    match operator {
        Ir::Symbol(name) => serde_json::to_string(&**name).unwrap_or_else(|_| name.to_string()),
        other => other.to_string(),
    }
}
