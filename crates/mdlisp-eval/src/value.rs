//! Runtime values.

use crate::env::Environment;
use crate::error::EvalResult;
use crate::ir::LambdaForm;
use crate::sink::LineSink;
use mdlisp_types::number::format_number;
use std::fmt;
use std::rc::Rc;

/// Signature of a built-in function. Output goes through the sink.
pub type NativeFn = fn(&mut dyn LineSink, Vec<Value>) -> EvalResult<Value>;

/// A value produced by evaluation.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    /// Both "null" and "no argument supplied".
    Nil,
    /// Built by `cons`; shared, never mutated.
    List(Rc<Vec<Value>>),
    Closure(Rc<Closure>),
    Primitive(Primitive),
}

/// A lambda paired with the environment it was created in.
pub struct Closure {
    pub form: Rc<LambdaForm>,
    pub env: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // the captured environment may (through the global scope) contain this closure
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.form.params)
            .finish_non_exhaustive()
    }
}

/// A named built-in function.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub func: NativeFn,
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Primitive({})", self.name)
    }
}

impl Value {
    /// Falsy values are exactly `false`, `0` and nil.
    ///
    /// The empty string is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Nil => false,
            _ => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Primitive(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Nil => "nil",
            Value::List(_) => "pair",
            Value::Closure(_) | Value::Primitive(_) => "function",
        }
    }

    /// Identity-style equality used by `eq` and `!=`: pairs and functions
    /// are equal only to themselves, `NaN` to nothing.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Primitive(a), Value::Primitive(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Structural equality; functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => a == b,
            _ => self.strict_eq(other),
        }
    }
}

/// Display form used by `print` and string concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Nil => Ok(()),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Closure(_) | Value::Primitive(_) => f.write_str("<function>"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: Value, b: Value) -> Value {
        Value::List(Rc::new(vec![a, b]))
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(-0.0).is_truthy());
        assert!(!Value::Nil.is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(f64::NAN).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(pair(Value::Nil, Value::Nil).is_truthy());
    }

    #[test]
    fn test_empty_string_is_truthy() {
        // differs from most hosts; kept deliberately
        assert!(Value::from("").is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(120.0).to_string(), "120");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Nil.to_string(), "");
    }

    #[test]
    fn test_nested_pair_display_flattens() {
        let list = pair(
            Value::Number(1.0),
            pair(Value::Number(2.0), Value::Number(3.0)),
        );
        assert_eq!(list.to_string(), "1,2,3");
        assert_eq!(pair(Value::Number(1.0), Value::Nil).to_string(), "1,");
    }

    #[test]
    fn test_strict_eq_pairs_by_identity() {
        let a = pair(Value::Number(1.0), Value::Number(2.0));
        let b = pair(Value::Number(1.0), Value::Number(2.0));
        assert!(!a.strict_eq(&b));
        assert!(a.strict_eq(&a.clone()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_strict_eq_across_types() {
        assert!(!Value::Number(1.0).strict_eq(&Value::from("1")));
        assert!(!Value::Nil.strict_eq(&Value::Bool(false)));
        assert!(!Value::Number(f64::NAN).strict_eq(&Value::Number(f64::NAN)));
        assert!(Value::Number(0.0).strict_eq(&Value::Number(-0.0)));
    }
}
