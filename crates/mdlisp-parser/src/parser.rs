//! Tree builder: turns scanned lines into the program AST.
//!
//! Open list items are kept on a stack together with their depth. A new
//! item first closes every open item at the same or a deeper depth; a closed
//! item is handed to the item below it on the stack, or to the current
//! definition when the stack runs empty. Headings close everything and
//! start a fresh stack.

use mdlisp_lexer::{LineKind, ScannedLine};
use mdlisp_types::{Diagnostics, ErrorCode, MdlispError, Node, Program, SourceFile, Span};

use crate::parse_item::parse_item;

/// The mdlisp tree builder.
pub struct Parser<'src> {
    lines: Vec<ScannedLine>,
    /// Source file for diagnostic context.
    source_file: &'src SourceFile,
    diagnostics: Diagnostics,
}

/// Result of parsing. The program is always present; the tree builder is total.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

impl<'src> Parser<'src> {
    /// Create a new parser from scanned lines and their source file.
    pub fn new(lines: Vec<ScannedLine>, source_file: &'src SourceFile) -> Self {
        Self {
            lines,
            source_file,
            diagnostics: Diagnostics::empty(),
        }
    }

    /// Build the program.
    pub fn parse(mut self) -> ParseResult {
        let mut root = Node::program();
        let mut current: Option<Node> = None;
        let mut open: Vec<Node> = Vec::new();

        for line in std::mem::take(&mut self.lines) {
            match line.kind {
                LineKind::Heading(name) => {
                    if let Some(def) = current.take() {
                        self.finish_definition(&mut root, def, &mut open);
                    }
                    if name.is_empty() {
                        self.warn(
                            ErrorCode::EMPTY_DEFINITION_NAME,
                            "heading has no definition name",
                            line.span,
                        );
                    }
                    current = Some(Node::definition(name, line.span));
                }
                LineKind::Bullet(content) => {
                    let Some(def) = current.as_mut() else {
                        self.warn(
                            ErrorCode::ORPHAN_LIST_ITEM,
                            format!("list item '{content}' appears before any definition and is ignored"),
                            line.span,
                        );
                        continue;
                    };
                    let (kind, value) = parse_item(&content);
                    close_open_items(def, &mut open, line.indent);
                    open.push(Node::item(kind, value, line.indent, line.span));
                }
                LineKind::Text => {}
            }
        }
        if let Some(def) = current.take() {
            self.finish_definition(&mut root, def, &mut open);
        }

        ParseResult {
            program: root,
            diagnostics: self.diagnostics,
        }
    }

    fn finish_definition(&mut self, root: &mut Program, mut def: Node, open: &mut Vec<Node>) {
        close_open_items(&mut def, open, 0);
        if def.children.is_empty() {
            self.warn(
                ErrorCode::EMPTY_DEFINITION,
                format!(
                    "definition '{}' has no body and will not be registered",
                    def.text().unwrap_or_default()
                ),
                def.span,
            );
        }
        root.children.push(def);
    }

    fn warn(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self.source_file.line(span.start_line).unwrap_or("");
        let warning = MdlispError::new(&self.source_file.name, code, message, span, source_line);
        self.diagnostics.push(warning);
    }
}

/// Close every open item whose depth is at least `indent`.
fn close_open_items(def: &mut Node, open: &mut Vec<Node>, indent: usize) {
    while open.last().is_some_and(|top| top.indent >= indent) {
        if let Some(node) = open.pop() {
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => def.children.push(node),
            }
        }
    }
}
