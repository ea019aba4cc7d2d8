//! AST node types for mdlisp.
//!
//! The tree is deliberately untyped: one [`Node`] shape for every construct,
//! distinguished by [`NodeKind`]. Children are owned, so the tree has no
//! shared nodes and no parent links.
//!
//! The serialized form matches what the browser IDE displays:
//! `{ "type": "LITERAL", "value": 5, "children": [] }`. Indentation and
//! spans are construction details and are not serialized.

use crate::number::format_number;
use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    Program,
    #[serde(rename = "DEF")]
    Definition,
    Expression,
    Literal,
    Symbol,
}

/// The payload carried by a node: a number or a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Atom {
    Number(f64),
    Text(String),
}

impl Atom {
    /// The text of a `Text` atom, `None` for numbers.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Atom::Text(s) => Some(s),
            Atom::Number(_) => None,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Number(n) => f.write_str(&format_number(*n)),
            Atom::Text(s) => f.write_str(s),
        }
    }
}

/// One parsed construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Definition name, literal value, or raw symbol text. `None` only for the program root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Atom>,
    #[serde(default)]
    pub children: Vec<Node>,
    /// Indentation depth of the source line (tree construction only).
    #[serde(skip)]
    pub indent: usize,
    #[serde(skip)]
    pub span: Span,
}

/// The parse result root.
pub type Program = Node;

impl Node {
    /// The program root.
    pub fn program() -> Self {
        Self {
            kind: NodeKind::Program,
            value: None,
            children: Vec::new(),
            indent: 0,
            span: Span::point(1, 1),
        }
    }

    /// A `# name` definition.
    pub fn definition(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: NodeKind::Definition,
            value: Some(Atom::Text(name.into())),
            children: Vec::new(),
            indent: 0,
            span,
        }
    }

    /// A leaf list item (symbol or literal) at the given depth.
    pub fn item(kind: NodeKind, value: Atom, indent: usize, span: Span) -> Self {
        Self {
            kind,
            value: Some(value),
            children: Vec::new(),
            indent,
            span,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's value as text (definition name, symbol name), if it is text.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(Atom::as_text)
    }

    /// Top-level definitions of a program root, in source order.
    pub fn definitions(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|n| n.kind == NodeKind::Definition)
    }

    /// Look up a top-level definition by name.
    pub fn definition_named(&self, name: &str) -> Option<&Node> {
        self.definitions().find(|d| d.text() == Some(name))
    }
}

/// Drops descendants from a worklist; bullet nesting has no depth limit.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
