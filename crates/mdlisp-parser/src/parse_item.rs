//! List item content: literal or symbol.

use mdlisp_lexer::strip_bullet_marker;
use mdlisp_types::number::parse_canonical_number;
use mdlisp_types::{Atom, NodeKind};

/// Parse the text of a list item (marker already removed once).
///
/// `` `...` `` is a literal: quotes are stripped once, and the result is a
/// number when it is in canonical numeric form, text otherwise. Anything
/// else is a symbol holding the trimmed text.
pub fn parse_item(content: &str) -> (NodeKind, Atom) {
    let text = strip_bullet_marker(content.trim()).trim();
    match backtick_interior(text) {
        Some(inner) => {
            let inner = strip_quotes(inner);
            let value = match parse_canonical_number(inner) {
                Some(n) => Atom::Number(n),
                None => Atom::Text(inner.to_string()),
            };
            (NodeKind::Literal, value)
        }
        None => (NodeKind::Symbol, Atom::Text(text.to_string())),
    }
}

/// The text between a single enclosing backtick pair, if non-empty and backtick-free.
fn backtick_interior(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('`')?.strip_suffix('`')?;
    (!inner.is_empty() && !inner.contains('`')).then_some(inner)
}

fn strip_quotes(text: &str) -> &str {
    let quoted = |q: char| text.starts_with(q) && text.ends_with(q);
    if quoted('"') || quoted('\'') {
        // a lone quote character strips to the empty string
        return text.get(1..text.len() - 1).unwrap_or("");
    }
    text
}
