//! Indentation scanner: converts source text into [`ScannedLine`]s.
//!
//! - Blank lines are dropped and never influence parent resolution
//! - Indentation depth is leading whitespace / 2, tabs counting as two spaces
//! - Each line is classified as heading, bullet, or prose

use mdlisp_types::{SourceFile, Span};

use crate::line::{classify, ScannedLine};

/// Spaces a leading tab stands for.
const TAB_WIDTH: usize = 2;
/// Spaces per indentation level.
const INDENT_WIDTH: usize = 2;

/// Indentation depth of a raw (untrimmed) line.
pub fn indent_level(line: &str) -> usize {
    let spaces: usize = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    spaces / INDENT_WIDTH
}

/// The mdlisp scanner.
pub struct Scanner<'src> {
    source_file: &'src SourceFile,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self { source_file }
    }

    /// Scan the whole file, in source order.
    pub fn scan(self) -> Vec<ScannedLine> {
        self.source_file
            .lines()
            .filter_map(|(number, raw)| Self::scan_line(number, raw))
            .collect()
    }

    fn scan_line(number: u32, raw: &str) -> Option<ScannedLine> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let leading = raw.chars().take_while(|c| c.is_whitespace()).count();
        let span = Span::on_line(number, leading as u32 + 1, trimmed.chars().count());
        Some(ScannedLine::new(classify(trimmed), indent_level(raw), span))
    }
}
