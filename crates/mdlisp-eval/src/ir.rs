//! IR: the S-expression form the evaluator walks.
//!
//! A definition body is transformed once, at registration, and the same
//! IR is reused by every call. Call expressions are classified here, not
//! during evaluation: a node whose text is `if` or `lambda` becomes a
//! special form, everything else an application.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use mdlisp_types::{Atom, Node, NodeKind};
use std::fmt;
use std::rc::Rc;

/// Deepest operand nesting [`transform`] accepts.
pub const MAX_NESTING: usize = 256;

/// An evaluable expression.
///
/// Compound forms are reference counted so that evaluation frames can hold
/// on to them while their operands run.
#[derive(Debug, Clone, PartialEq)]
pub enum Ir {
    /// An operand a special form was not given.
    Nil,
    Number(f64),
    String(String),
    /// Reference resolved against the environment at evaluation time.
    Symbol(Rc<str>),
    If(Rc<IfForm>),
    Lambda(Rc<LambdaForm>),
    Apply(Rc<Application>),
}

impl Ir {
    pub fn if_form(test: Ir, then: Ir, otherwise: Option<Ir>) -> Ir {
        Ir::If(Rc::new(IfForm {
            test,
            then,
            otherwise,
        }))
    }

    pub fn apply(operator: Ir, args: Vec<Ir>) -> Ir {
        Ir::Apply(Rc::new(Application { operator, args }))
    }
}

#[derive(Debug, PartialEq)]
pub struct IfForm {
    pub test: Ir,
    pub then: Ir,
    pub otherwise: Option<Ir>,
}

/// Operator plus operands, evaluated in that order.
#[derive(Debug, PartialEq)]
pub struct Application {
    pub operator: Ir,
    pub args: Vec<Ir>,
}

/// Parameters and body of a function, shared by every closure made from it.
#[derive(Debug, PartialEq)]
pub struct LambdaForm {
    pub params: ParamSpec,
    pub body: Ir,
}

/// How call arguments are bound to names.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSpec {
    /// Binds nothing.
    Nullary,
    /// Binds the first argument.
    Single(String),
    /// Slot `i` binds argument `i`; `None` slots consume an argument unbound.
    Positional(Vec<Option<String>>),
}

impl ParamSpec {
    /// Bind `args` into `env`. Extra arguments are dropped, missing ones bind nil.
    pub fn bind(&self, env: &Environment, args: Vec<Value>) {
        let mut args = args.into_iter();
        match self {
            ParamSpec::Nullary => {}
            ParamSpec::Single(name) => env.define(name.as_str(), args.next().unwrap_or(Value::Nil)),
            ParamSpec::Positional(slots) => {
                for slot in slots {
                    let value = args.next().unwrap_or(Value::Nil);
                    if let Some(name) = slot {
                        env.define(name.as_str(), value);
                    }
                }
            }
        }
    }

    /// Number of slots (bound or not).
    pub fn arity(&self) -> usize {
        match self {
            ParamSpec::Nullary => 0,
            ParamSpec::Single(_) => 1,
            ParamSpec::Positional(slots) => slots.len(),
        }
    }
}

/// Transform one AST node into IR.
///
/// Operands nested deeper than [`MAX_NESTING`] are rejected as
/// [`EvalError::ResourceExhausted`].
pub fn transform(node: &Node) -> EvalResult<Ir> {
    transform_at(node, 0)
}

fn transform_at(node: &Node, depth: usize) -> EvalResult<Ir> {
    if depth > MAX_NESTING {
        return Err(EvalError::ResourceExhausted(format!(
            "expression nesting deeper than {MAX_NESTING} levels"
        )));
    }
    if !node.children.is_empty() {
        return transform_call(node, depth);
    }
    match (node.kind, &node.value) {
        (NodeKind::Literal, Some(Atom::Number(n))) => Ok(Ir::Number(*n)),
        (NodeKind::Literal, Some(Atom::Text(s))) => Ok(Ir::String(s.clone())),
        (NodeKind::Symbol | NodeKind::Expression, Some(value)) => {
            Ok(Ir::Symbol(value.to_string().into()))
        }
        _ => Err(structural(node)),
    }
}

/// Parameter spec written as the first operand of `lambda`.
///
/// A bare name binds one argument. A group binds positionally, with the
/// group's own head occupying slot 0: in
///
/// ```text
/// * lambda
///   * a
///     * b
/// ```
///
/// `b` binds the second argument.
pub fn lambda_params(node: &Node) -> EvalResult<ParamSpec> {
    if node.children.is_empty() {
        return leaf_params(node);
    }
    let head = std::iter::once(None);
    Ok(ParamSpec::Positional(head.chain(group_slots(node)).collect()))
}

/// Parameter spec written as the first child of a definition.
///
/// Same as [`lambda_params`], except that a named group head is a tag and
/// is dropped, so `* params` with children `a`, `b` binds `a` and `b`.
pub fn definition_params(node: &Node) -> EvalResult<ParamSpec> {
    match &node.value {
        Some(Atom::Text(_)) if !node.children.is_empty() => {
            Ok(ParamSpec::Positional(group_slots(node).collect()))
        }
        _ => lambda_params(node),
    }
}

fn leaf_params(node: &Node) -> EvalResult<ParamSpec> {
    match (node.kind, &node.value) {
        (NodeKind::Symbol | NodeKind::Expression, Some(name)) => Ok(ParamSpec::Single(name.to_string())),
        (NodeKind::Literal, _) => Ok(ParamSpec::Nullary),
        _ => Err(structural(node)),
    }
}

/// One slot per child: named when the child is a bare symbol.
fn group_slots(node: &Node) -> impl Iterator<Item = Option<String>> + '_ {
    node.children.iter().map(|child| match (child.kind, &child.value) {
        (NodeKind::Symbol | NodeKind::Expression, Some(name)) if child.is_leaf() => {
            Some(name.to_string())
        }
        _ => None,
    })
}

fn transform_call(node: &Node, depth: usize) -> EvalResult<Ir> {
    let operands = node
        .children
        .iter()
        .map(|child| transform_at(child, depth + 1))
        .collect::<EvalResult<Vec<_>>>()?;

    match &node.value {
        Some(Atom::Text(op)) if op == "if" => {
            let mut operands = operands.into_iter();
            let test = operands.next().unwrap_or(Ir::Nil);
            let then = operands.next().unwrap_or(Ir::Nil);
            Ok(Ir::if_form(test, then, operands.next()))
        }
        Some(Atom::Text(op)) if op == "lambda" => {
            let params = lambda_params(&node.children[0])?;
            let body = operands.into_iter().nth(1).unwrap_or(Ir::Nil);
            Ok(Ir::Lambda(Rc::new(LambdaForm { params, body })))
        }
        Some(Atom::Text(op)) => Ok(Ir::apply(Ir::Symbol(op.as_str().into()), operands)),
        Some(Atom::Number(n)) => Ok(Ir::apply(Ir::Number(*n), operands)),
        None => Err(structural(node)),
    }
}

fn structural(node: &Node) -> EvalError {
    let value = node
        .value
        .as_ref()
        .map_or_else(|| "none".to_string(), |v| format!("'{v}'"));
    EvalError::StructuralParse(format!("{:?} with value: {value}", node.kind))
}

/// S-expression rendering, used in error messages.
impl fmt::Display for Ir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ir::Nil => f.write_str("nil"),
            Ir::Number(n) => f.write_str(&mdlisp_types::number::format_number(*n)),
            Ir::String(s) => write!(f, "{s:?}"),
            Ir::Symbol(name) => f.write_str(name),
            Ir::If(form) => {
                write!(f, "(if {} {}", form.test, form.then)?;
                if let Some(otherwise) = &form.otherwise {
                    write!(f, " {otherwise}")?;
                }
                f.write_str(")")
            }
            Ir::Lambda(form) => write!(f, "(lambda/{} {})", form.params.arity(), form.body),
            Ir::Apply(form) => {
                write!(f, "({}", form.operator)?;
                for arg in &form.args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdlisp_types::Span;

    fn sym(name: &str) -> Node {
        Node::item(NodeKind::Symbol, Atom::Text(name.into()), 0, Span::default())
    }

    fn num(n: f64) -> Node {
        Node::item(NodeKind::Literal, Atom::Number(n), 0, Span::default())
    }

    fn call(head: &str, children: Vec<Node>) -> Node {
        let mut node = sym(head);
        node.children = children;
        node
    }

    #[test]
    fn test_leaves() {
        assert_eq!(transform(&num(5.0)), Ok(Ir::Number(5.0)));
        assert_eq!(transform(&sym("n")), Ok(Ir::Symbol("n".into())));
        let text = Node::item(NodeKind::Literal, Atom::Text("hi".into()), 0, Span::default());
        assert_eq!(transform(&text), Ok(Ir::String("hi".into())));
    }

    #[test]
    fn test_application() {
        let ir = transform(&call("+", vec![sym("n"), num(1.0)])).unwrap();
        assert_eq!(
            ir,
            Ir::apply(
                Ir::Symbol("+".into()),
                vec![Ir::Symbol("n".into()), Ir::Number(1.0)]
            )
        );
        assert_eq!(ir.to_string(), "(+ n 1)");
    }

    #[test]
    fn test_if_form() {
        let ir = transform(&call("if", vec![sym("c"), num(1.0)])).unwrap();
        assert_eq!(
            ir,
            Ir::if_form(Ir::Symbol("c".into()), Ir::Number(1.0), None)
        );
    }

    #[test]
    fn test_if_missing_operands_are_nil() {
        let ir = transform(&call("if", vec![sym("c")])).unwrap();
        assert_eq!(ir.to_string(), "(if c nil)");
    }

    #[test]
    fn test_lambda_form() {
        let ir = transform(&call("lambda", vec![sym("x"), call("*", vec![sym("x"), sym("x")])]))
            .unwrap();
        let Ir::Lambda(form) = ir else {
            panic!("expected a lambda form")
        };
        assert_eq!(form.params, ParamSpec::Single("x".into()));
        assert_eq!(form.body.to_string(), "(* x x)");
    }

    #[test]
    fn test_lambda_group_head_occupies_slot() {
        let params = lambda_params(&call("a", vec![sym("b"), sym("c")])).unwrap();
        assert_eq!(
            params,
            ParamSpec::Positional(vec![None, Some("b".into()), Some("c".into())])
        );
    }

    #[test]
    fn test_definition_group_head_stripped() {
        let params = definition_params(&call("params", vec![sym("a"), sym("b")])).unwrap();
        assert_eq!(
            params,
            ParamSpec::Positional(vec![Some("a".into()), Some("b".into())])
        );
    }

    #[test]
    fn test_definition_numeric_head_kept() {
        let mut group = num(1.0);
        group.children = vec![sym("a")];
        assert_eq!(
            definition_params(&group).unwrap(),
            ParamSpec::Positional(vec![None, Some("a".into())])
        );
    }

    #[test]
    fn test_non_symbol_slots_consume_arguments() {
        let params =
            definition_params(&call("p", vec![sym("a"), num(2.0), call("x", vec![sym("y")]), sym("d")]))
                .unwrap();
        assert_eq!(
            params,
            ParamSpec::Positional(vec![Some("a".into()), None, None, Some("d".into())])
        );
    }

    #[test]
    fn test_bind_positional() {
        let env = Environment::global();
        let spec = ParamSpec::Positional(vec![Some("a".into()), None, Some("c".into())]);
        spec.bind(&env, vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(env.lookup("a"), Ok(Value::Number(1.0)));
        assert_eq!(env.lookup("c"), Ok(Value::Nil));
    }

    #[test]
    fn test_bind_ignores_extra_args() {
        let env = Environment::global();
        ParamSpec::Single("x".into()).bind(&env, vec![Value::Number(1.0), Value::Number(9.0)]);
        assert_eq!(env.lookup("x"), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_definition_leaf_is_structural_error() {
        let def = Node::definition("main", Span::default());
        assert!(matches!(transform(&def), Err(EvalError::StructuralParse(_))));
        assert!(matches!(transform(&Node::program()), Err(EvalError::StructuralParse(_))));
    }

    fn chain(levels: usize) -> Node {
        let mut node = num(1.0);
        for _ in 0..levels {
            node = call("+", vec![node]);
        }
        node
    }

    #[test]
    fn test_nesting_at_limit_transforms() {
        let ir = transform(&chain(MAX_NESTING)).unwrap();
        assert!(ir.to_string().starts_with("(+ (+ (+"));
    }

    #[test]
    fn test_nesting_past_limit_is_resource_exhausted() {
        let err = transform(&chain(2000)).unwrap_err();
        assert!(matches!(err, EvalError::ResourceExhausted(_)));
        assert_eq!(
            err.to_string(),
            "Resource exhausted: expression nesting deeper than 256 levels"
        );
    }

    #[test]
    fn test_transform_is_deterministic() {
        let node = call("if", vec![call("<=", vec![sym("n"), num(1.0)]), num(1.0), sym("n")]);
        assert_eq!(transform(&node), transform(&node));
    }
}
