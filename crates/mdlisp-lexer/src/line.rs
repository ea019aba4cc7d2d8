//! Line types produced by the scanner.
//!
//! Defines [`LineKind`], the three shapes a non-blank Markdown line can take,
//! and [`ScannedLine`], which pairs a kind with its indentation depth and
//! source [`Span`].

use mdlisp_types::Span;
use std::fmt;

/// A single non-blank source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLine {
    pub kind: LineKind,
    /// Leading whitespace (tabs count as two spaces) divided by two.
    pub indent: usize,
    /// Covers the trimmed line text.
    pub span: Span,
}

impl ScannedLine {
    pub fn new(kind: LineKind, indent: usize, span: Span) -> Self {
        Self { kind, indent, span }
    }
}

/// How a trimmed line starts.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// `# name`, `## name`, ...: opens a definition. Carries the name.
    Heading(String),
    /// `- item` or `* item`: carries the text after the marker.
    Bullet(String),
    /// Anything else: prose, ignored by the tree builder.
    Text,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Heading(name) => write!(f, "heading '{name}'"),
            LineKind::Bullet(content) => write!(f, "list item '{content}'"),
            LineKind::Text => write!(f, "text"),
        }
    }
}

/// Strip one leading `-`/`*` marker when it is followed by whitespace.
///
/// A lone marker is left alone: `-` and `*` on their own are the
/// subtraction and multiplication operators.
pub fn strip_bullet_marker(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*'), Some(c)) if c.is_whitespace() => text[1..].trim_start(),
        _ => text,
    }
}

/// Classify an already-trimmed, non-empty line.
pub(crate) fn classify(trimmed: &str) -> LineKind {
    if let Some(rest) = trimmed.strip_prefix('#') {
        let name = rest.trim_start_matches('#').trim();
        return LineKind::Heading(name.to_string());
    }
    if trimmed.starts_with('-') || trimmed.starts_with('*') {
        return LineKind::Bullet(strip_bullet_marker(trimmed).to_string());
    }
    LineKind::Text
}
