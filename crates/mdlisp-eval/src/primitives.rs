//! The built-in function library installed in the global environment.
//!
//! Every primitive takes its arguments positionally; a missing argument is
//! nil and extra arguments are ignored.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::sink::LineSink;
use crate::value::{NativeFn, Primitive, Value};
use std::cmp::Ordering;
use std::rc::Rc;

/// Name and implementation of every primitive, in installation order.
pub const PRIMITIVES: &[(&str, NativeFn)] = &[
    ("+", add),
    ("-", sub),
    ("*", mul),
    ("/", div),
    ("%", rem),
    ("<=", less_eq),
    (">=", greater_eq),
    ("<", less),
    (">", greater),
    ("!=", not_eq),
    ("eq", eq),
    ("and", and),
    ("or", or),
    ("not", not),
    ("cons", cons),
    ("car", car),
    ("cdr", cdr),
    ("print", print),
];

/// Bind every primitive in `env`.
pub fn install(env: &Environment) {
    for &(name, func) in PRIMITIVES {
        env.define(name, Value::Primitive(Primitive { name, func }));
    }
}

/// The first two arguments, nil-padded.
fn two(args: Vec<Value>) -> (Value, Value) {
    let mut args = args.into_iter();
    let a = args.next().unwrap_or(Value::Nil);
    let b = args.next().unwrap_or(Value::Nil);
    (a, b)
}

fn one(args: Vec<Value>) -> Value {
    args.into_iter().next().unwrap_or(Value::Nil)
}

// ── Arithmetic ───────────────────────────────────────────────────────────────

fn add(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    match two(args) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (a @ Value::String(_), b) | (a, b @ Value::String(_)) => {
            Ok(Value::String(format!("{a}{b}")))
        }
        (a, b) => Err(EvalError::TypeMismatch(format!(
            "cannot add {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn arith(args: Vec<Value>, op: fn(f64, f64) -> f64, symbol: &str) -> EvalResult<Value> {
    match two(args) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(op(a, b))),
        (a, b) => Err(EvalError::TypeMismatch(format!(
            "cannot apply '{symbol}' to {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn sub(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    arith(args, |a, b| a - b, "-")
}

fn mul(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    arith(args, |a, b| a * b, "*")
}

/// IEEE division: `x / 0` is an infinity, `0 / 0` is NaN.
fn div(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    arith(args, |a, b| a / b, "/")
}

/// Remainder with the sign of the dividend.
fn rem(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    arith(args, |a, b| a % b, "%")
}

// ── Comparison ───────────────────────────────────────────────────────────────

/// Numbers compare numerically, strings lexicographically. `None` when
/// the operands are unordered (NaN).
fn compare(args: Vec<Value>, symbol: &str) -> EvalResult<Option<Ordering>> {
    match two(args) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(&b)),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(&b))),
        (a, b) => Err(EvalError::TypeMismatch(format!(
            "cannot apply '{symbol}' to {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn less_eq(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let ord = compare(args, "<=")?;
    Ok(Value::Bool(matches!(ord, Some(Ordering::Less | Ordering::Equal))))
}

fn greater_eq(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let ord = compare(args, ">=")?;
    Ok(Value::Bool(matches!(ord, Some(Ordering::Greater | Ordering::Equal))))
}

fn less(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Bool(compare(args, "<")? == Some(Ordering::Less)))
}

fn greater(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Bool(compare(args, ">")? == Some(Ordering::Greater)))
}

fn eq(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let (a, b) = two(args);
    Ok(Value::Bool(a.strict_eq(&b)))
}

fn not_eq(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let (a, b) = two(args);
    Ok(Value::Bool(!a.strict_eq(&b)))
}

// ── Logic ────────────────────────────────────────────────────────────────────
// Both operands are already evaluated; these select, they do not short-circuit.

fn and(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let (a, b) = two(args);
    Ok(if a.is_truthy() { b } else { a })
}

fn or(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let (a, b) = two(args);
    Ok(if a.is_truthy() { a } else { b })
}

fn not(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    Ok(Value::Bool(!one(args).is_truthy()))
}

// ── Pairs ────────────────────────────────────────────────────────────────────

fn cons(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let (a, b) = two(args);
    Ok(Value::List(Rc::new(vec![a, b])))
}

fn car(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    match one(args) {
        Value::List(items) => items.first().cloned().ok_or(EvalError::NotAPair("car")),
        _ => Err(EvalError::NotAPair("car")),
    }
}

fn cdr(_: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    match one(args) {
        Value::List(items) if !items.is_empty() => {
            Ok(items.get(1).cloned().unwrap_or(Value::Nil))
        }
        _ => Err(EvalError::NotAPair("cdr")),
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

fn print(sink: &mut dyn LineSink, args: Vec<Value>) -> EvalResult<Value> {
    let line = args
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    sink.emit(&line);
    Ok(Value::String(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let mut sink = |_: &str| {};
        let (_, func) = PRIMITIVES
            .iter()
            .find(|(n, _)| *n == name)
            .expect("unknown primitive");
        func(&mut sink, args)
    }

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn test_install_binds_every_primitive() {
        let env = Environment::global();
        install(&env);
        for (name, _) in PRIMITIVES {
            assert!(env.is_bound_locally(name), "{name} not installed");
        }
        assert_eq!(PRIMITIVES.len(), 18);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(call("+", vec![n(2.0), n(3.0)]), Ok(n(5.0)));
        assert_eq!(call("-", vec![n(2.0), n(3.0)]), Ok(n(-1.0)));
        assert_eq!(call("*", vec![n(4.0), n(3.0)]), Ok(n(12.0)));
        assert_eq!(call("/", vec![n(1.0), n(2.0)]), Ok(n(0.5)));
        assert_eq!(call("%", vec![n(-7.0), n(3.0)]), Ok(n(-1.0)));
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        assert_eq!(call("/", vec![n(1.0), n(0.0)]), Ok(n(f64::INFINITY)));
    }

    #[test]
    fn test_add_concatenates_strings() {
        assert_eq!(
            call("+", vec![Value::from("n="), n(5.0)]),
            Ok(Value::from("n=5"))
        );
        assert_eq!(
            call("+", vec![n(1.0), Value::from("")]),
            Ok(Value::from("1"))
        );
    }

    #[test]
    fn test_arithmetic_type_mismatch() {
        assert!(matches!(
            call("-", vec![Value::from("a"), n(1.0)]),
            Err(EvalError::TypeMismatch(_))
        ));
        assert!(matches!(
            call("+", vec![n(1.0)]),
            Err(EvalError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_comparison() {
        assert_eq!(call("<=", vec![n(1.0), n(1.0)]), Ok(Value::Bool(true)));
        assert_eq!(call("<", vec![n(1.0), n(1.0)]), Ok(Value::Bool(false)));
        assert_eq!(call(">", vec![n(2.0), n(1.0)]), Ok(Value::Bool(true)));
        assert_eq!(call(">=", vec![n(f64::NAN), n(1.0)]), Ok(Value::Bool(false)));
        assert_eq!(
            call("<", vec![Value::from("abc"), Value::from("b")]),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn test_equality_is_strict() {
        assert_eq!(call("eq", vec![n(1.0), n(1.0)]), Ok(Value::Bool(true)));
        assert_eq!(call("eq", vec![n(1.0), Value::from("1")]), Ok(Value::Bool(false)));
        assert_eq!(call("!=", vec![n(1.0), Value::from("1")]), Ok(Value::Bool(true)));
        assert_eq!(call("eq", vec![]), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_logic_selects_operands() {
        assert_eq!(call("and", vec![n(0.0), n(5.0)]), Ok(n(0.0)));
        assert_eq!(call("and", vec![n(1.0), n(5.0)]), Ok(n(5.0)));
        assert_eq!(call("or", vec![Value::Nil, n(5.0)]), Ok(n(5.0)));
        assert_eq!(call("or", vec![Value::from(""), n(5.0)]), Ok(Value::from("")));
        assert_eq!(call("not", vec![n(0.0)]), Ok(Value::Bool(true)));
        assert_eq!(call("not", vec![Value::from("")]), Ok(Value::Bool(false)));
        assert_eq!(call("not", vec![]), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_pairs() {
        let pair = call("cons", vec![n(1.0), n(2.0)]).unwrap();
        assert_eq!(call("car", vec![pair.clone()]), Ok(n(1.0)));
        assert_eq!(call("cdr", vec![pair]), Ok(n(2.0)));
        let partial = call("cons", vec![n(1.0)]).unwrap();
        assert_eq!(call("cdr", vec![partial]), Ok(Value::Nil));
    }

    #[test]
    fn test_car_cdr_reject_non_pairs() {
        assert_eq!(call("car", vec![n(1.0)]), Err(EvalError::NotAPair("car")));
        assert_eq!(call("cdr", vec![Value::Nil]), Err(EvalError::NotAPair("cdr")));
        let empty = Value::List(Rc::new(Vec::new()));
        assert_eq!(call("car", vec![empty.clone()]), Err(EvalError::NotAPair("car")));
        assert_eq!(call("cdr", vec![empty]), Err(EvalError::NotAPair("cdr")));
        assert_eq!(
            EvalError::NotAPair("car").to_string(),
            "car: expected a cons cell"
        );
    }

    #[test]
    fn test_print_emits_and_returns_line() {
        let mut lines = Vec::new();
        let mut sink = |line: &str| lines.push(line.to_string());
        let result = print(
            &mut sink,
            vec![Value::from("Result of 5! is:"), n(120.0), Value::Bool(true), Value::Nil],
        );
        assert_eq!(result, Ok(Value::from("Result of 5! is: 120 true ")));
        assert_eq!(lines, vec!["Result of 5! is: 120 true "]);
    }

    #[test]
    fn test_print_no_args_emits_empty_line() {
        let mut lines = Vec::new();
        let mut sink = |line: &str| lines.push(line.to_string());
        assert_eq!(print(&mut sink, vec![]), Ok(Value::from("")));
        assert_eq!(lines, vec![""]);
    }
}
